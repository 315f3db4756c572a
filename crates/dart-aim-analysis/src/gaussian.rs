//! Separable Gaussian smoothing of scalar fields.
//!
//! Semantics follow the usual n-d image filter convention: a sampled kernel
//! of radius `floor(truncate * sigma + 0.5)`, normalized to unit sum, applied
//! as a 1-D correlation along each axis with a configurable boundary mode.

use dart_aim_core::ScalarField;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::AnalysisError;

/// How samples outside the field are synthesized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Half-sample symmetric: `d c b a | a b c d | d c b a`.
    #[default]
    Reflect,
    /// Repeat the edge sample: `a a a a | a b c d | d d d d`.
    Nearest,
    /// Periodic: `a b c d | a b c d | a b c d`.
    Wrap,
    /// Fixed value outside the field.
    Constant { value: f64 },
}

fn default_truncate() -> f64 {
    4.0
}

/// Smoothing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianParams {
    /// Kernel radius in standard deviations.
    #[serde(default = "default_truncate")]
    pub truncate: f64,
    #[serde(default)]
    pub boundary: BoundaryMode,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            truncate: default_truncate(),
            boundary: BoundaryMode::default(),
        }
    }
}

impl GaussianParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.truncate.is_finite() || self.truncate <= 0.0 {
            return Err(AnalysisError::InvalidTruncate {
                truncate: self.truncate,
            });
        }
        Ok(())
    }
}

/// Largest kernel half-width [`gaussian_kernel_1d`] will allocate.
pub const MAX_KERNEL_RADIUS: usize = 1 << 22;

/// Kernel half-width relative to the longest field side that
/// [`gaussian_filter`] accepts.
pub const KERNEL_RADIUS_PER_SIDE: usize = 8;

/// Kernel half-width in samples. Saturates at `usize::MAX`.
#[inline]
pub fn kernel_radius(sigma: f64, truncate: f64) -> usize {
    (truncate * sigma + 0.5).floor().max(0.0) as usize
}

fn checked_kernel(sigma: f64, truncate: f64, limit: usize) -> Result<Vec<f64>, AnalysisError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(AnalysisError::InvalidSigma { sigma });
    }
    if !truncate.is_finite() || truncate <= 0.0 {
        return Err(AnalysisError::InvalidTruncate { truncate });
    }
    let exact = (truncate * sigma + 0.5).floor();
    if exact > limit as f64 {
        return Err(AnalysisError::KernelTooLarge {
            radius: exact,
            limit,
        });
    }
    let radius = exact as usize;
    if radius == 0 {
        return Ok(vec![1.0]);
    }

    let inv_two_var = -0.5 / (sigma * sigma);
    let mut kernel: Vec<f64> = (0..=2 * radius)
        .map(|k| {
            let x = k as f64 - radius as f64;
            (inv_two_var * x * x).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in kernel.iter_mut() {
        *w /= sum;
    }
    Ok(kernel)
}

/// Sampled, normalized 1-D Gaussian of length `2 * radius + 1`.
///
/// Fails with [`AnalysisError::KernelTooLarge`] past [`MAX_KERNEL_RADIUS`].
pub fn gaussian_kernel_1d(sigma: f64, truncate: f64) -> Result<Vec<f64>, AnalysisError> {
    checked_kernel(sigma, truncate, MAX_KERNEL_RADIUS)
}

/// Map a possibly out-of-range index onto `0..n`, or `None` for a constant
/// boundary.
#[inline]
fn boundary_index(j: isize, n: usize, mode: BoundaryMode) -> Option<usize> {
    let n_i = n as isize;
    if (0..n_i).contains(&j) {
        return Some(j as usize);
    }
    match mode {
        BoundaryMode::Reflect => {
            let period = 2 * n_i;
            let m = j.rem_euclid(period);
            Some(if m < n_i { m } else { period - 1 - m } as usize)
        }
        BoundaryMode::Nearest => Some(j.clamp(0, n_i - 1) as usize),
        BoundaryMode::Wrap => Some(j.rem_euclid(n_i) as usize),
        BoundaryMode::Constant { .. } => None,
    }
}

/// Correlate one line with a symmetric kernel.
///
/// `padded` is scratch space, reused across lines.
fn correlate_line(
    src: &[f64],
    kernel: &[f64],
    mode: BoundaryMode,
    padded: &mut Vec<f64>,
    out: &mut [f64],
) {
    let n = src.len();
    let r = kernel.len() / 2;
    let fill = match mode {
        BoundaryMode::Constant { value } => value,
        _ => 0.0,
    };

    padded.clear();
    padded.extend((0..n + 2 * r).map(|p| {
        boundary_index(p as isize - r as isize, n, mode)
            .map(|i| src[i])
            .unwrap_or(fill)
    }));

    for (i, o) in out.iter_mut().enumerate() {
        *o = kernel
            .iter()
            .zip(&padded[i..i + kernel.len()])
            .map(|(w, v)| w * v)
            .sum();
    }
}

/// Isotropic Gaussian smoothing of `src` with standard deviation `sigma`
/// (pixels).
///
/// Columns are filtered first, then rows. `sigma == 0` returns a copy.
/// Kernels wider than [`KERNEL_RADIUS_PER_SIDE`] times the longest side are
/// rejected.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src, params), fields(width = src.width, height = src.height))
)]
pub fn gaussian_filter(
    src: &ScalarField,
    sigma: f64,
    params: &GaussianParams,
) -> Result<ScalarField, AnalysisError> {
    params.validate()?;
    let limit = KERNEL_RADIUS_PER_SIDE
        .saturating_mul(src.width.max(src.height).max(1))
        .min(MAX_KERNEL_RADIUS);
    let kernel = checked_kernel(sigma, params.truncate, limit)?;
    if kernel.len() == 1 || src.is_empty() {
        return Ok(src.clone());
    }

    let (w, h) = (src.width, src.height);
    let mut tmp = src.clone();
    let mut padded = Vec::new();

    let mut column = vec![0.0; h];
    let mut filtered = vec![0.0; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = src.data[y * w + x];
        }
        correlate_line(&column, &kernel, params.boundary, &mut padded, &mut filtered);
        for (y, &v) in filtered.iter().enumerate() {
            tmp.data[y * w + x] = v;
        }
    }

    let mut out = ScalarField::new(w, h);
    for y in 0..h {
        let row = &tmp.data[y * w..(y + 1) * w];
        correlate_line(
            row,
            &kernel,
            params.boundary,
            &mut padded,
            &mut out.data[y * w..(y + 1) * w],
        );
    }

    log::trace!(
        "gaussian_filter sigma={sigma:.3} radius={} on {w}x{h}",
        kernel.len() / 2
    );
    Ok(out)
}
