//! Expected dart scores under aiming uncertainty.
//!
//! The raw score image from `dart-aim-core` is smoothed with a Gaussian whose
//! width matches a player's accuracy; the maximum of the smoothed field is the
//! best place to aim.
//!
//! ## Quickstart
//!
//! ```
//! use dart_aim_analysis::{ExpectedScoreAnalyzer, GaussianParams};
//! use dart_aim_core::BoardCalibration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cal = BoardCalibration::from_image(120, 120, 0)?;
//! let analyzer = ExpectedScoreAnalyzer::new(cal, GaussianParams::default())?;
//! let rec = analyzer.recommend(50.0)?;
//! println!("aim for {} ({} points)", rec.region, rec.raw_score);
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod error;
mod gaussian;
mod io;
mod readout;

pub use analyzer::{
    sigma_px_for_radius, AimRecommendation, AnalysisEntry, ExpectedScoreAnalyzer,
    ExpectedScoreMap, PRESET_ACCURACY_RADII_MM,
};
pub use error::AnalysisError;
pub use gaussian::{
    gaussian_filter, gaussian_kernel_1d, kernel_radius, BoundaryMode, GaussianParams,
    KERNEL_RADIUS_PER_SIDE, MAX_KERNEL_RADIUS,
};
pub use io::{AnalysisConfig, AnalysisIoError, AnalysisReport};
pub use readout::{format_coord, pixel_under};
