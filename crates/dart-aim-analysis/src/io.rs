//! JSON configuration and report helpers for the expected-score analysis.

use crate::{
    AimRecommendation, AnalysisEntry, AnalysisError, ExpectedScoreAnalyzer, GaussianParams,
    PRESET_ACCURACY_RADII_MM,
};
use dart_aim_core::{BoardCalibration, BoardGeometry, BoardMeasurements, CalibrationError};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum AnalysisIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_radii() -> Vec<f64> {
    PRESET_ACCURACY_RADII_MM.to_vec()
}

/// Analysis configuration. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub board: BoardGeometry,
    #[serde(default)]
    pub measurements: BoardMeasurements,
    #[serde(default = "default_radii")]
    pub accuracy_radii_mm: Vec<f64>,
    #[serde(default)]
    pub smoothing: GaussianParams,
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            board: BoardGeometry::default(),
            measurements: BoardMeasurements::default(),
            accuracy_radii_mm: default_radii(),
            smoothing: GaussianParams::default(),
            output_dir: None,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnalysisIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalysisIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the directory for rendered figures.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dart_aim_out"))
    }

    pub fn build_calibration(&self) -> Result<BoardCalibration, CalibrationError> {
        BoardCalibration::new(self.board, self.measurements)
    }

    /// Build an analyzer; renders the score image.
    pub fn build_analyzer(&self) -> Result<ExpectedScoreAnalyzer, AnalysisError> {
        let calibration = self.build_calibration()?;
        ExpectedScoreAnalyzer::new(calibration, self.smoothing)
    }
}

/// Summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub calibration: BoardCalibration,
    pub smoothing: GaussianParams,
    pub recommendations: Vec<AimRecommendation>,
    #[serde(default)]
    pub figure_path: Option<String>,
}

impl AnalysisReport {
    pub fn new(analyzer: &ExpectedScoreAnalyzer, entries: &[AnalysisEntry]) -> Self {
        Self {
            calibration: *analyzer.calibration(),
            smoothing: *analyzer.params(),
            recommendations: entries.iter().map(|e| e.recommendation).collect(),
            figure_path: None,
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnalysisIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalysisIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
