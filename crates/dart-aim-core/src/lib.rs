//! Dartboard geometry and scoring.
//!
//! A [`BoardCalibration`] places a regulation board (measured in mm) into an
//! image of a given size. The scorer maps any pixel to the points a dart
//! landing there would earn, and [`render_score_image`] evaluates it over the
//! whole image.
//!
//! ```
//! use dart_aim_core::{render_score_image, BoardCalibration, Region};
//!
//! let cal = BoardCalibration::from_image(500, 500, 100).unwrap();
//! assert_eq!(cal.classify_pixel(250, 250), Region::DoubleBull);
//!
//! let img = render_score_image(&cal);
//! assert_eq!(img.get(0, 0), Some(0.0));
//! ```

mod calibration;
mod field;
mod logger;
mod score_image;
mod scorer;

pub use calibration::{BoardCalibration, BoardGeometry, BoardMeasurements, CalibrationError};
pub use field::{ScalarField, ScalarFieldView};
pub use score_image::{render_score_image, ScoreImage};
pub use scorer::{
    sector_center_angle, sector_index, Region, BULL_SCORE, DOUBLE_BULL_SCORE, SECTOR_VALUES,
    SECTOR_WIDTH,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, LOG_ENV_VAR};
