//! The two standard figures: the raw board and the expected-score grid.

use dart_aim_core::{ScalarField, ScoreImage};
use image::RgbImage;

use crate::{
    render_heatmap, render_panel_grid, with_title, AimMarker, Colormap, GridLayout, HeatmapStyle,
    RenderError,
};

/// One expected-score map and its best aim pixel.
#[derive(Clone, Copy, Debug)]
pub struct ExpectedPanel<'a> {
    pub accuracy_radius_mm: f64,
    pub field: &'a ScalarField,
    pub aim_pixel: [usize; 2],
}

impl ExpectedPanel<'_> {
    /// `p(error <= 25mm)=0.95`
    pub fn title(&self) -> String {
        format!("p(error <= {}mm)=0.95", self.accuracy_radius_mm)
    }
}

/// Full-resolution board scores in the rainbow colormap.
pub fn render_board_figure(scores: &ScoreImage) -> Result<RgbImage, RenderError> {
    let style = HeatmapStyle::scaled_for(Colormap::Rainbow, scores.height);
    render_heatmap(scores, &style)
}

/// One titled expected-score heatmap with its aim point marked.
pub fn render_expected_panel(panel: &ExpectedPanel<'_>) -> Result<RgbImage, RenderError> {
    let style = HeatmapStyle::scaled_for(Colormap::Viridis, panel.field.height);
    let mut img = render_heatmap(panel.field, &style)?;
    let [x, y] = panel.aim_pixel;
    AimMarker::at_pixel(x, y, panel.field.height).draw(&mut img);
    Ok(with_title(&img, &panel.title()))
}

/// Expected-score panels tiled three per row (3×3 for the presets).
pub fn render_expected_grid(panels: &[ExpectedPanel<'_>]) -> Result<RgbImage, RenderError> {
    let rendered = panels
        .iter()
        .map(render_expected_panel)
        .collect::<Result<Vec<_>, _>>()?;
    let layout = GridLayout {
        gap: panels
            .first()
            .map(|p| (p.field.height as u32 / 40).max(4))
            .unwrap_or(4),
        ..GridLayout::default()
    };
    render_panel_grid(&rendered, &layout)
}
