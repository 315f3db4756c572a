use image::{imageops, Rgb, RgbImage};

use crate::output::WHITE;
use crate::RenderError;

/// Layout for [`render_panel_grid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub columns: u32,
    /// Spacing between panels and around the outside.
    pub gap: u32,
    pub background: Rgb<u8>,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            gap: 12,
            background: WHITE,
        }
    }
}

/// Tile panels row by row. Cells are sized by the largest panel.
pub fn render_panel_grid(
    panels: &[RgbImage],
    layout: &GridLayout,
) -> Result<RgbImage, RenderError> {
    if panels.is_empty() {
        return Err(RenderError::NoPanels);
    }
    if layout.columns == 0 {
        return Err(RenderError::InvalidColumns);
    }

    let cell_w = panels.iter().map(RgbImage::width).max().unwrap_or(0);
    let cell_h = panels.iter().map(RgbImage::height).max().unwrap_or(0);
    let count = panels.len() as u32;
    let cols = layout.columns.min(count);
    let rows = count.div_ceil(layout.columns);

    let width = cols * cell_w + (cols + 1) * layout.gap;
    let height = rows * cell_h + (rows + 1) * layout.gap;
    let mut out = RgbImage::from_pixel(width, height, layout.background);

    for (k, panel) in panels.iter().enumerate() {
        let k = k as u32;
        let (row, col) = (k / layout.columns, k % layout.columns);
        let x0 = layout.gap + col * (cell_w + layout.gap);
        let y0 = layout.gap + row * (cell_h + layout.gap);
        imageops::overlay(&mut out, panel, x0 as i64, y0 as i64);
    }
    log::debug!("panel grid {rows}x{cols} -> {width}x{height}");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BLACK;

    #[test]
    fn nine_panels_form_three_by_three() {
        let panels = vec![RgbImage::from_pixel(10, 8, BLACK); 9];
        let layout = GridLayout {
            gap: 2,
            ..GridLayout::default()
        };
        let grid = render_panel_grid(&panels, &layout).expect("grid");
        assert_eq!(grid.dimensions(), (3 * 10 + 4 * 2, 3 * 8 + 4 * 2));
        assert_eq!(grid.get_pixel(2, 2), &BLACK);
        assert_eq!(grid.get_pixel(1, 1), &layout.background);
        // Last panel's bottom-right pixel.
        assert_eq!(grid.get_pixel(2 + 2 * 12 + 9, 2 + 2 * 10 + 7), &BLACK);
    }

    #[test]
    fn partial_last_row() {
        let panels = vec![RgbImage::from_pixel(4, 4, BLACK); 4];
        let layout = GridLayout {
            columns: 3,
            gap: 1,
            ..GridLayout::default()
        };
        let grid = render_panel_grid(&panels, &layout).expect("grid");
        assert_eq!(grid.dimensions(), (3 * 4 + 4, 2 * 4 + 3));
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(
            render_panel_grid(&[], &GridLayout::default()),
            Err(RenderError::NoPanels)
        ));
        let panels = vec![RgbImage::from_pixel(1, 1, BLACK)];
        let layout = GridLayout {
            columns: 0,
            ..GridLayout::default()
        };
        assert!(matches!(
            render_panel_grid(&panels, &layout),
            Err(RenderError::InvalidColumns)
        ));
    }
}
