use dart_aim_core::CalibrationError;

/// Errors returned by the expected-score analysis.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("accuracy radius must be finite and >= 0 (got {radius_mm}mm)")]
    InvalidAccuracyRadius { radius_mm: f64 },
    #[error("gaussian sigma must be finite and >= 0 (got {sigma})")]
    InvalidSigma { sigma: f64 },
    #[error("kernel truncation must be finite and > 0 (got {truncate})")]
    InvalidTruncate { truncate: f64 },
    #[error("gaussian kernel radius {radius} exceeds the limit of {limit} samples")]
    KernelTooLarge { radius: f64, limit: usize },
    #[error("field has no finite values")]
    EmptyField,
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}
