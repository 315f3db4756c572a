//! PNG heatmaps for dartboard score fields.
//!
//! Fields are mapped through a colormap into an [`image::RgbImage`],
//! decorated with a colorbar, aim markers and titles via `imageproc`,
//! optionally tiled into a grid, and saved as PNG.

mod colormap;
mod figures;
mod grid;
mod heatmap;
mod output;
mod text;

pub use colormap::Colormap;
pub use figures::{render_board_figure, render_expected_grid, render_expected_panel, ExpectedPanel};
pub use grid::{render_panel_grid, GridLayout};
pub use heatmap::{render_heatmap, AimMarker, HeatmapStyle};
pub use image::{Rgb, RgbImage};
pub use output::{write_png, BLACK, WHITE};
pub use text::{title_font, title_scale, with_title};

/// Errors produced while rendering or writing figures.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("field has no finite values to render")]
    EmptyField,
    #[error("image has zero width or height")]
    EmptyCanvas,
    #[error("panel grid needs at least one panel")]
    NoPanels,
    #[error("panel grid needs at least one column")]
    InvalidColumns,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
