use crate::{BoardCalibration, ScalarField};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Raw board scores, one per pixel.
pub type ScoreImage = ScalarField;

/// Evaluate the scorer at every integer pixel of the calibrated image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(cal), fields(width = cal.width(), height = cal.height()))
)]
pub fn render_score_image(cal: &BoardCalibration) -> ScoreImage {
    let img = ScalarField::from_fn(cal.width(), cal.height(), |x, y| cal.score_pixel(x, y));
    log::debug!(
        "rendered {}x{} score image (board radius {:.1}px, {:.3}px/mm)",
        img.width,
        img.height,
        cal.radius,
        cal.scale
    );
    img
}
