//! Optimal aim points for players of different accuracy.
//!
//! A player's throws are modelled as an isotropic Gaussian around the aim
//! point. The accuracy radius is the radius containing 95% of throws, taken as
//! two standard deviations. Smoothing the raw score image with that Gaussian
//! gives the expected score for every possible aim point; its arg-max is the
//! recommended target.

use dart_aim_core::{render_score_image, BoardCalibration, Region, ScalarField, ScoreImage};
use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::gaussian::{gaussian_filter, GaussianParams};
use crate::AnalysisError;

/// Accuracy radii (mm) analysed by default, from expert to beginner.
pub const PRESET_ACCURACY_RADII_MM: [f64; 9] =
    [10.0, 25.0, 35.0, 50.0, 65.0, 80.0, 100.0, 120.0, 200.0];

/// Pixel standard deviation for an accuracy radius given in mm.
#[inline]
pub fn sigma_px_for_radius(accuracy_radius_mm: f64, scale: f64) -> f64 {
    accuracy_radius_mm / 2.0 * scale
}

/// Expected score for every aim pixel, for one accuracy radius.
#[derive(Clone, Debug)]
pub struct ExpectedScoreMap {
    pub accuracy_radius_mm: f64,
    pub sigma_px: f64,
    pub field: ScalarField,
}

/// Best aim point for one accuracy radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AimRecommendation {
    pub accuracy_radius_mm: f64,
    pub sigma_px: f64,
    /// Arg-max pixel `[x, y]` of the expected-score map.
    pub aim_pixel: [usize; 2],
    /// Aim point relative to the board center in mm (x right, y down).
    pub aim_offset_mm: Point2<f64>,
    pub distance_from_center_mm: f64,
    /// Smoothed score at the aim pixel.
    pub expected_score: f64,
    /// Unsmoothed board score at the aim pixel.
    pub raw_score: f64,
    pub region: Region,
}

/// One analysed accuracy radius.
#[derive(Clone, Debug)]
pub struct AnalysisEntry {
    pub map: ExpectedScoreMap,
    pub recommendation: AimRecommendation,
}

/// Owns the raw score image and derives expected-score maps from it.
#[derive(Clone, Debug)]
pub struct ExpectedScoreAnalyzer {
    calibration: BoardCalibration,
    params: GaussianParams,
    score_image: ScoreImage,
}

impl ExpectedScoreAnalyzer {
    /// Render the score image once for the given board.
    pub fn new(
        calibration: BoardCalibration,
        params: GaussianParams,
    ) -> Result<Self, AnalysisError> {
        params.validate()?;
        let score_image = render_score_image(&calibration);
        Ok(Self {
            calibration,
            params,
            score_image,
        })
    }

    pub fn calibration(&self) -> &BoardCalibration {
        &self.calibration
    }

    pub fn params(&self) -> &GaussianParams {
        &self.params
    }

    pub fn score_image(&self) -> &ScoreImage {
        &self.score_image
    }

    /// Smooth the score image for one accuracy radius.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn expected_map(&self, accuracy_radius_mm: f64) -> Result<ExpectedScoreMap, AnalysisError> {
        if !accuracy_radius_mm.is_finite() || accuracy_radius_mm < 0.0 {
            return Err(AnalysisError::InvalidAccuracyRadius {
                radius_mm: accuracy_radius_mm,
            });
        }
        let sigma_px = sigma_px_for_radius(accuracy_radius_mm, self.calibration.scale);
        debug!("accuracy radius {accuracy_radius_mm}mm -> sigma {sigma_px:.3}px");
        let field = gaussian_filter(&self.score_image, sigma_px, &self.params)?;
        Ok(ExpectedScoreMap {
            accuracy_radius_mm,
            sigma_px,
            field,
        })
    }

    /// Locate the best aim pixel of an expected-score map.
    pub fn recommend_from_map(
        &self,
        map: &ExpectedScoreMap,
    ) -> Result<AimRecommendation, AnalysisError> {
        let (x, y, expected_score) = map.field.argmax().ok_or(AnalysisError::EmptyField)?;
        let region = self.calibration.classify_pixel(x, y);
        let aim_offset_mm = self
            .calibration
            .pixel_to_mm(Point2::new(x as f64, y as f64));
        Ok(AimRecommendation {
            accuracy_radius_mm: map.accuracy_radius_mm,
            sigma_px: map.sigma_px,
            aim_pixel: [x, y],
            aim_offset_mm,
            distance_from_center_mm: aim_offset_mm.coords.norm(),
            expected_score,
            raw_score: region.score() as f64,
            region,
        })
    }

    /// Smooth and pick the best aim point for one accuracy radius.
    pub fn recommend(&self, accuracy_radius_mm: f64) -> Result<AimRecommendation, AnalysisError> {
        let map = self.expected_map(accuracy_radius_mm)?;
        self.recommend_from_map(&map)
    }

    /// Run the analysis for every radius, in order.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn analyze(&self, radii_mm: &[f64]) -> Result<Vec<AnalysisEntry>, AnalysisError> {
        let mut entries = Vec::with_capacity(radii_mm.len());
        for &radius in radii_mm {
            let map = self.expected_map(radius)?;
            let recommendation = self.recommend_from_map(&map)?;
            info!(
                "accuracy {:>5.1}mm: aim {} at ({}, {}), expected {:.2}",
                radius,
                recommendation.region,
                recommendation.aim_pixel[0],
                recommendation.aim_pixel[1],
                recommendation.expected_score
            );
            entries.push(AnalysisEntry {
                map,
                recommendation,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaussian::BoundaryMode;
    use approx::assert_relative_eq;

    fn analyzer(height: u32) -> ExpectedScoreAnalyzer {
        let cal = BoardCalibration::from_image(height, height, 0).expect("calibration");
        ExpectedScoreAnalyzer::new(cal, GaussianParams::default()).expect("analyzer")
    }

    #[test]
    fn sigma_is_half_the_radius_in_pixels() {
        assert_relative_eq!(sigma_px_for_radius(10.0, 2.0), 10.0);
        assert_relative_eq!(sigma_px_for_radius(25.0, 412.0 / 170.0), 12.5 * 412.0 / 170.0);
    }

    #[test]
    fn zero_radius_aims_at_the_first_treble_twenty_pixel() {
        let a = analyzer(340);
        let rec = a.recommend(0.0).expect("recommendation");
        assert_eq!(rec.raw_score, 60.0);
        assert_eq!(rec.expected_score, 60.0);
        assert_eq!(rec.region, Region::Triple(20));
        // Row-major scan: the first 60 is on the top edge of the treble 20.
        assert_eq!(rec.aim_pixel[1], 170 - 107);
    }

    #[test]
    fn tight_grouping_aims_at_a_treble() {
        let a = analyzer(340);
        let rec = a.recommend(10.0).expect("recommendation");
        assert!(
            matches!(rec.region, Region::Triple(20) | Region::Triple(19)),
            "got {:?}",
            rec.region
        );
        assert!(rec.expected_score > 35.0);
        assert_eq!(rec.raw_score, rec.region.score() as f64);
    }

    #[test]
    fn wider_grouping_moves_aim_towards_center() {
        // Off-image throws miss, so mirrored boards must not contribute.
        let cal = BoardCalibration::from_image(240, 240, 0).expect("calibration");
        let params = GaussianParams {
            boundary: BoundaryMode::Constant { value: 0.0 },
            ..GaussianParams::default()
        };
        let a = ExpectedScoreAnalyzer::new(cal, params).expect("analyzer");
        let entries = a.analyze(&[10.0, 200.0]).expect("analysis");
        let tight = &entries[0].recommendation;
        let wide = &entries[1].recommendation;
        assert!(wide.distance_from_center_mm < tight.distance_from_center_mm);
        assert!(
            wide.distance_from_center_mm < a.calibration().measurements.triple_outer_radius_mm
                - a.calibration().measurements.band_width_mm
        );
        assert!(wide.expected_score < tight.expected_score);
    }

    #[test]
    fn wider_grouping_moves_aim_towards_center_with_default_boundary() {
        let cal = BoardCalibration::from_image(200, 200, 80).expect("calibration");
        let a = ExpectedScoreAnalyzer::new(cal, GaussianParams::default()).expect("analyzer");
        let tight = a.recommend(10.0).expect("tight");
        let wide = a.recommend(200.0).expect("wide");
        assert!(wide.distance_from_center_mm < tight.distance_from_center_mm);
        let m = a.calibration().measurements;
        assert!(wide.distance_from_center_mm < m.triple_outer_radius_mm - m.band_width_mm);
    }

    #[test]
    fn huge_radius_is_an_error_not_an_abort() {
        let a = analyzer(40);
        assert!(matches!(
            a.recommend(1.0e12),
            Err(AnalysisError::KernelTooLarge { limit: 320, .. })
        ));
    }

    #[test]
    fn expected_score_never_exceeds_raw_maximum() {
        let a = analyzer(160);
        let map = a.expected_map(35.0).expect("map");
        let (_, hi) = map.field.min_max().expect("range");
        assert!(hi <= 60.0 + 1e-9);
        assert_eq!(
            (map.field.width, map.field.height),
            (a.score_image().width, a.score_image().height)
        );
    }

    #[test]
    fn rejects_negative_radius() {
        let a = analyzer(60);
        assert_eq!(
            a.recommend(-5.0),
            Err(AnalysisError::InvalidAccuracyRadius { radius_mm: -5.0 })
        );
    }

    #[test]
    fn preset_radii_are_increasing() {
        assert!(PRESET_ACCURACY_RADII_MM.windows(2).all(|w| w[0] < w[1]));
    }
}
