use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::RenderError;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Write `img` as a PNG file, creating parent directories as needed.
pub fn write_png(img: &RgbImage, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    if img.width() == 0 || img.height() == 0 {
        return Err(RenderError::EmptyCanvas);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    img.save_with_format(path, ImageFormat::Png)?;
    log::info!(
        "wrote {}x{} PNG to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_is_written_into_nested_dirs() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/out.png");
        write_png(&img, &path).expect("write");

        let bytes = std::fs::read(&path).expect("read");
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        let back = image::open(&path).expect("decode").to_rgb8();
        assert_eq!(back, img);
    }

    #[test]
    fn empty_image_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let img = RgbImage::new(0, 3);
        assert!(matches!(
            write_png(&img, dir.path().join("empty.png")),
            Err(RenderError::EmptyCanvas)
        ));
    }
}
