//! The dartboard scoring function.
//!
//! A point is classified purely by its distance and clockwise angle from the
//! board center, so scoring is a pure function of the calibration.

use std::f64::consts::TAU;
use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::BoardCalibration;

/// Sector base values, clockwise starting at the top of the board.
pub const SECTOR_VALUES: [u32; 20] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Angular width of one sector (radians).
pub const SECTOR_WIDTH: f64 = TAU / SECTOR_VALUES.len() as f64;

pub const DOUBLE_BULL_SCORE: u32 = 50;
pub const BULL_SCORE: u32 = 25;

/// Where a dart landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "sector")]
pub enum Region {
    Miss,
    DoubleBull,
    Bull,
    Single(u32),
    Double(u32),
    Triple(u32),
}

impl Region {
    /// Points awarded for this region.
    pub fn score(self) -> u32 {
        match self {
            Region::Miss => 0,
            Region::DoubleBull => DOUBLE_BULL_SCORE,
            Region::Bull => BULL_SCORE,
            Region::Single(v) => v,
            Region::Double(v) => 2 * v,
            Region::Triple(v) => 3 * v,
        }
    }

    /// Base value of the sector, if the region belongs to one.
    pub fn sector_value(self) -> Option<u32> {
        match self {
            Region::Single(v) | Region::Double(v) | Region::Triple(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Miss => write!(f, "miss"),
            Region::DoubleBull => write!(f, "double bull"),
            Region::Bull => write!(f, "bull"),
            Region::Single(v) => write!(f, "S{v}"),
            Region::Double(v) => write!(f, "D{v}"),
            Region::Triple(v) => write!(f, "T{v}"),
        }
    }
}

/// Sector index (into [`SECTOR_VALUES`]) for an offset from the center in
/// image coordinates (y grows downwards).
///
/// `atan2(dx, -dy)` is the clockwise angle from "up". Sector 0 is centered on
/// that direction, hence the half-sector shift before flooring.
#[inline]
pub fn sector_index(dx: f64, dy: f64) -> usize {
    let theta = dx.atan2(-dy);
    let shifted = (theta + 0.5 * SECTOR_WIDTH).rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU.
    (shifted / SECTOR_WIDTH) as usize % SECTOR_VALUES.len()
}

/// Clockwise angle (from "up") of the center of sector `index`.
pub fn sector_center_angle(index: usize) -> f64 {
    (index % SECTOR_VALUES.len()) as f64 * SECTOR_WIDTH
}

impl BoardCalibration {
    /// Classify a point given in pixel coordinates.
    pub fn classify_point(&self, p: Point2<f64>) -> Region {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let d = (dx * dx + dy * dy).sqrt();

        if d > self.radius {
            return Region::Miss;
        }
        if d < self.double_bull_radius {
            return Region::DoubleBull;
        }
        if d < self.bull_radius {
            return Region::Bull;
        }

        let value = SECTOR_VALUES[sector_index(dx, dy)];
        if d >= self.triple_inner_radius() && d <= self.triple_outer_radius {
            Region::Triple(value)
        } else if d >= self.double_inner_radius() {
            Region::Double(value)
        } else {
            Region::Single(value)
        }
    }

    /// Classify the integer pixel `(x, y)`.
    #[inline]
    pub fn classify_pixel(&self, x: usize, y: usize) -> Region {
        self.classify_point(Point2::new(x as f64, y as f64))
    }

    /// Score of a point given in pixel coordinates.
    #[inline]
    pub fn score_point(&self, p: Point2<f64>) -> f64 {
        self.classify_point(p).score() as f64
    }

    /// Score of the integer pixel `(x, y)`.
    #[inline]
    pub fn score_pixel(&self, x: usize, y: usize) -> f64 {
        self.classify_pixel(x, y).score() as f64
    }
}
