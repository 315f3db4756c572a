//! Board measurements and their conversion into pixel units.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Physical dartboard measurements in millimetres.
///
/// Defaults are the standard regulation board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardMeasurements {
    /// Radius of the whole scoring area (outer edge of the double ring).
    pub radius_mm: f64,
    /// Radius to the outer edge of the triple ring.
    pub triple_outer_radius_mm: f64,
    /// Radial width of the double and triple rings.
    pub band_width_mm: f64,
    /// Radius of the 50-point double bull.
    pub double_bull_radius_mm: f64,
    /// Radius of the 25-point bull.
    pub bull_radius_mm: f64,
}

impl Default for BoardMeasurements {
    fn default() -> Self {
        Self {
            radius_mm: 170.0,
            triple_outer_radius_mm: 107.0,
            band_width_mm: 8.0,
            double_bull_radius_mm: 12.7 / 2.0,
            bull_radius_mm: 31.8 / 2.0,
        }
    }
}

/// Size of the rendered board image in pixels.
///
/// The board is centered and leaves `border / 2` pixels above and below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGeometry {
    pub height: u32,
    pub width: u32,
    pub border: u32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            height: 1024,
            width: 1024,
            border: 200,
        }
    }
}

/// Calibration validation errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CalibrationError {
    #[error("image dimensions must be non-zero (width={width}, height={height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("border ({border}) must be smaller than the image height ({height})")]
    BorderTooLarge { border: u32, height: u32 },
    #[error("measurement `{name}` must be finite and > 0 (got {value})")]
    InvalidMeasurement { name: &'static str, value: f64 },
    #[error("band width {band_width_mm}mm does not fit inside the triple ring radius")]
    BandTooWide { band_width_mm: f64 },
    #[error(
        "triple ring (outer {triple_outer_radius_mm}mm) overlaps the double ring \
         (inner {double_inner_radius_mm}mm)"
    )]
    OverlappingRings {
        triple_outer_radius_mm: f64,
        double_inner_radius_mm: f64,
    },
}

/// Pixel-space constants of a board drawn into an image.
///
/// Computed once from [`BoardGeometry`] and [`BoardMeasurements`] and never
/// mutated afterwards. All radii are in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardCalibration {
    pub geometry: BoardGeometry,
    pub measurements: BoardMeasurements,
    /// Board center. Uses `width / 2`, `height / 2`, not the pixel center.
    pub center: Point2<f64>,
    /// Pixels per millimetre.
    pub scale: f64,
    pub radius: f64,
    pub triple_outer_radius: f64,
    pub band_width: f64,
    pub double_bull_radius: f64,
    pub bull_radius: f64,
}

impl BoardCalibration {
    /// Validate inputs and derive the pixel constants.
    pub fn new(
        geometry: BoardGeometry,
        measurements: BoardMeasurements,
    ) -> Result<Self, CalibrationError> {
        if geometry.width == 0 || geometry.height == 0 {
            return Err(CalibrationError::EmptyImage {
                width: geometry.width,
                height: geometry.height,
            });
        }
        if geometry.border >= geometry.height {
            return Err(CalibrationError::BorderTooLarge {
                border: geometry.border,
                height: geometry.height,
            });
        }
        validate_measurements(&measurements)?;

        let radius = (geometry.height - geometry.border) as f64 / 2.0;
        let scale = radius / measurements.radius_mm;

        Ok(Self {
            geometry,
            measurements,
            center: Point2::new(geometry.width as f64 / 2.0, geometry.height as f64 / 2.0),
            scale,
            radius,
            triple_outer_radius: measurements.triple_outer_radius_mm * scale,
            band_width: measurements.band_width_mm * scale,
            double_bull_radius: measurements.double_bull_radius_mm * scale,
            bull_radius: measurements.bull_radius_mm * scale,
        })
    }

    /// Standard board measurements drawn into a `height × width` image.
    pub fn from_image(height: u32, width: u32, border: u32) -> Result<Self, CalibrationError> {
        Self::new(
            BoardGeometry {
                height,
                width,
                border,
            },
            BoardMeasurements::default(),
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.geometry.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.geometry.height as usize
    }

    /// Inner edge of the triple ring.
    #[inline]
    pub fn triple_inner_radius(&self) -> f64 {
        self.triple_outer_radius - self.band_width
    }

    /// Inner edge of the double ring.
    #[inline]
    pub fn double_inner_radius(&self) -> f64 {
        self.radius - self.band_width
    }

    /// Convert a pixel position into millimetres relative to the board center
    /// (x to the right, y downwards).
    pub fn pixel_to_mm(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            (p.x - self.center.x) / self.scale,
            (p.y - self.center.y) / self.scale,
        )
    }

    /// Inverse of [`Self::pixel_to_mm`].
    pub fn mm_to_pixel(&self, p_mm: Point2<f64>) -> Point2<f64> {
        Point2::new(
            self.center.x + p_mm.x * self.scale,
            self.center.y + p_mm.y * self.scale,
        )
    }
}

fn validate_measurements(m: &BoardMeasurements) -> Result<(), CalibrationError> {
    let named = [
        ("radius_mm", m.radius_mm),
        ("triple_outer_radius_mm", m.triple_outer_radius_mm),
        ("band_width_mm", m.band_width_mm),
        ("double_bull_radius_mm", m.double_bull_radius_mm),
        ("bull_radius_mm", m.bull_radius_mm),
    ];
    for (name, value) in named {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalibrationError::InvalidMeasurement { name, value });
        }
    }
    if m.band_width_mm >= m.triple_outer_radius_mm {
        return Err(CalibrationError::BandTooWide {
            band_width_mm: m.band_width_mm,
        });
    }
    let double_inner_radius_mm = m.radius_mm - m.band_width_mm;
    if m.triple_outer_radius_mm > double_inner_radius_mm {
        return Err(CalibrationError::OverlappingRings {
            triple_outer_radius_mm: m.triple_outer_radius_mm,
            double_inner_radius_mm,
        });
    }
    Ok(())
}
