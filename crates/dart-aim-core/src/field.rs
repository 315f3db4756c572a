use serde::{Deserialize, Serialize};

/// Row-major grid of scalar values, one per pixel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>, // len = w*h
}

/// Borrowed view of a [`ScalarField`].
#[derive(Clone, Copy, Debug)]
pub struct ScalarFieldView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [f64],
}

impl ScalarField {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Evaluate `f(x, y)` at every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn view(&self) -> ScalarFieldView<'_> {
        ScalarFieldView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.view().get(x, y)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Position and value of the largest finite entry.
    ///
    /// Ties go to the first entry in row-major order.
    pub fn argmax(&self) -> Option<(usize, usize, f64)> {
        self.view().argmax()
    }

    /// Smallest and largest finite entry.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.view().min_max()
    }
}

impl<'a> ScalarFieldView<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub fn argmax(&self) -> Option<(usize, usize, f64)> {
        if self.width == 0 {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            // Strict comparison keeps the first maximum.
            if best.map(|(_, b)| v > b).unwrap_or(true) {
                best = Some((idx, v));
            }
        }
        best.map(|(idx, v)| (idx % self.width, idx / self.width, v))
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
