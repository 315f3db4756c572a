//! Scalar field to RGB heatmap, with a colorbar and an optional aim marker.

use dart_aim_core::ScalarField;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::output::{BLACK, WHITE};
use crate::{Colormap, RenderError};

/// Heatmap appearance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatmapStyle {
    pub colormap: Colormap,
    /// Fixed `(lo, hi)` color range; the field's own range when `None`.
    #[serde(default)]
    pub value_range: Option<(f64, f64)>,
    /// Colorbar width in pixels, 0 disables it.
    pub colorbar_width: u32,
    /// Gap between the heatmap and the colorbar.
    pub colorbar_gap: u32,
    pub background: [u8; 3],
}

impl HeatmapStyle {
    pub fn new(colormap: Colormap) -> Self {
        Self {
            colormap,
            value_range: None,
            colorbar_width: 16,
            colorbar_gap: 8,
            background: WHITE.0,
        }
    }

    /// Colorbar sized relative to a heatmap of height `h`.
    pub fn scaled_for(colormap: Colormap, h: usize) -> Self {
        let h = h as u32;
        Self {
            colorbar_width: (h / 25).max(6),
            colorbar_gap: (h / 50).max(3),
            ..Self::new(colormap)
        }
    }
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self::new(Colormap::default())
    }
}

/// Aim point marker drawn on top of a heatmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimMarker {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: Rgb<u8>,
}

impl AimMarker {
    /// White disc sized relative to the heatmap.
    pub fn at_pixel(x: usize, y: usize, field_height: usize) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
            radius: (field_height as i32 / 100).max(3),
            color: WHITE,
        }
    }

    pub fn draw(&self, img: &mut RgbImage) {
        // Dark rim keeps the marker visible on bright colors.
        draw_filled_circle_mut(img, (self.x, self.y), self.radius + 1, BLACK);
        draw_filled_circle_mut(img, (self.x, self.y), self.radius, self.color);
    }
}

fn normalizer(field: &ScalarField, style: &HeatmapStyle) -> Result<(f64, f64), RenderError> {
    let (lo, hi) = match style.value_range {
        Some(range) => range,
        None => field.min_max().ok_or(RenderError::EmptyField)?,
    };
    let span = hi - lo;
    Ok((lo, if span.abs() > f64::EPSILON { span } else { 1.0 }))
}

/// Render `field` as a heatmap, colorbar to the right.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(field, style),
        fields(width = field.width, height = field.height)
    )
)]
pub fn render_heatmap(field: &ScalarField, style: &HeatmapStyle) -> Result<RgbImage, RenderError> {
    if field.is_empty() {
        return Err(RenderError::EmptyField);
    }
    let (lo, span) = normalizer(field, style)?;
    let (w, h) = (field.width as u32, field.height as u32);

    let bar_extent = if style.colorbar_width > 0 {
        style.colorbar_gap + style.colorbar_width
    } else {
        0
    };
    let mut img = RgbImage::from_pixel(w + bar_extent, h, Rgb(style.background));

    for y in 0..field.height {
        for (x, &v) in field.row(y).iter().enumerate() {
            img.put_pixel(x as u32, y as u32, style.colormap.map((v - lo) / span));
        }
    }

    if style.colorbar_width > 0 {
        let x0 = (w + style.colorbar_gap) as i32;
        let denom = h.saturating_sub(1).max(1) as f64;
        for y in 0..h {
            let color = style.colormap.map(1.0 - y as f64 / denom);
            draw_filled_rect_mut(
                &mut img,
                Rect::at(x0, y as i32).of_size(style.colorbar_width, 1),
                color,
            );
        }
        draw_hollow_rect_mut(
            &mut img,
            Rect::at(x0, 0).of_size(style.colorbar_width, h),
            BLACK,
        );
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_map_to_colormap_ends() {
        let f = ScalarField::from_fn(10, 6, |x, _| x as f64);
        let style = HeatmapStyle::new(Colormap::Gray);
        let img = render_heatmap(&f, &style).expect("render");
        assert_eq!(img.width(), 10 + 8 + 16);
        assert_eq!(img.get_pixel(0, 3), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(9, 3), &Rgb([255, 255, 255]));
        // Gap stays background.
        assert_eq!(img.get_pixel(12, 3), &WHITE);
    }

    #[test]
    fn colorbar_runs_high_to_low() {
        let f = ScalarField::from_fn(4, 20, |x, y| (x + y) as f64);
        let style = HeatmapStyle {
            colorbar_gap: 2,
            colorbar_width: 5,
            ..HeatmapStyle::new(Colormap::Gray)
        };
        let img = render_heatmap(&f, &style).expect("render");
        let top = img.get_pixel(8, 1)[0];
        let bottom = img.get_pixel(8, 18)[0];
        assert!(top > bottom);
        // Outline.
        assert_eq!(img.get_pixel(6, 0), &BLACK);
    }

    #[test]
    fn constant_field_does_not_divide_by_zero() {
        let f = ScalarField::filled(3, 3, 7.0);
        let style = HeatmapStyle {
            colorbar_width: 0,
            ..HeatmapStyle::new(Colormap::Viridis)
        };
        let img = render_heatmap(&f, &style).expect("render");
        assert_eq!(img.width(), 3);
        assert_eq!(img.get_pixel(1, 1), &Colormap::Viridis.map(0.0));
    }

    #[test]
    fn marker_paints_white_center_with_dark_rim() {
        let f = ScalarField::filled(50, 50, 0.0);
        let mut img = render_heatmap(&f, &HeatmapStyle::default()).expect("render");
        AimMarker::at_pixel(20, 30, 50).draw(&mut img);
        assert_eq!(img.get_pixel(20, 30), &WHITE);
        assert_eq!(img.get_pixel(24, 30), &BLACK);
    }

    #[test]
    fn marker_near_edge_is_clipped() {
        let f = ScalarField::filled(10, 10, 0.0);
        let style = HeatmapStyle {
            colorbar_width: 0,
            ..HeatmapStyle::default()
        };
        let mut img = render_heatmap(&f, &style).expect("render");
        AimMarker::at_pixel(0, 9, 10).draw(&mut img);
        assert_eq!(img.get_pixel(0, 9), &WHITE);
    }

    #[test]
    fn empty_field_is_an_error() {
        let f = ScalarField::new(0, 0);
        assert!(matches!(
            render_heatmap(&f, &HeatmapStyle::default()),
            Err(RenderError::EmptyField)
        ));
    }
}
