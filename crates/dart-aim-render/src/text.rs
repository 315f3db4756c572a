//! Panel titles, drawn with the bundled DejaVu Sans.

use ab_glyph::{FontRef, PxScale};
use image::{imageops, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::output::{BLACK, WHITE};

const DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// The title font, or `None` if the embedded face fails to parse.
pub fn title_font() -> Option<FontRef<'static>> {
    FontRef::try_from_slice(DEJAVU_SANS).ok()
}

/// Title glyph height for a panel of the given height.
pub fn title_scale(panel_height: u32) -> PxScale {
    PxScale::from((panel_height as f32 / 14.0).max(12.0))
}

/// Copy of `img` with `title` centered in a band above it.
///
/// Without a usable font the image is returned unchanged.
pub fn with_title(img: &RgbImage, title: &str) -> RgbImage {
    let Some(font) = title_font() else {
        log::warn!("title font unavailable, skipping title {title:?}");
        return img.clone();
    };
    let scale = title_scale(img.height());
    let band = (scale.y * 1.6).ceil() as u32;
    let (text_w, text_h) = text_size(scale, &font, title);

    let mut out = RgbImage::from_pixel(img.width(), img.height() + band, WHITE);
    imageops::overlay(&mut out, img, 0, band as i64);
    let x = (img.width().saturating_sub(text_w) / 2) as i32;
    let y = (band.saturating_sub(text_h) / 2) as i32;
    draw_text_mut(&mut out, BLACK, x, y, scale, &font, title);
    out
}
