use image::Rgb;
use serde::{Deserialize, Serialize};

/// Perceptual viridis, sampled at nine evenly spaced stops.
const VIRIDIS_STOPS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    /// Violet to red through blue, green and yellow.
    Rainbow,
    #[default]
    Viridis,
    Gray,
}

impl Colormap {
    /// Color for `t` in `[0, 1]`; values outside are clamped, NaN maps to 0.
    pub fn map(self, t: f64) -> Rgb<u8> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Rainbow => {
                let r = (2.0 * t - 0.5).abs();
                let g = (std::f64::consts::PI * t).sin();
                let b = (std::f64::consts::FRAC_PI_2 * t).cos();
                Rgb([to_u8(r), to_u8(g), to_u8(b)])
            }
            Colormap::Viridis => lerp_stops(&VIRIDIS_STOPS, t),
            Colormap::Gray => {
                let v = to_u8(t);
                Rgb([v, v, v])
            }
        }
    }
}

fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn lerp_stops(stops: &[[u8; 3]], t: f64) -> Rgb<u8> {
    let segments = (stops.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let f = pos - i as f64;
    let (a, b) = (stops[i], stops[i + 1]);
    let mix = |k: usize| (a[k] as f64 + f * (b[k] as f64 - a[k] as f64)).round() as u8;
    Rgb([mix(0), mix(1), mix(2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(Colormap::Viridis.map(0.0), Rgb(VIRIDIS_STOPS[0]));
        assert_eq!(Colormap::Viridis.map(1.0), Rgb(VIRIDIS_STOPS[8]));
        assert_eq!(Colormap::Viridis.map(0.5), Rgb(VIRIDIS_STOPS[4]));
        assert_eq!(Colormap::Gray.map(2.0), Rgb([255, 255, 255]));
    }

    #[test]
    fn rainbow_runs_violet_to_red() {
        let lo = Colormap::Rainbow.map(0.0);
        let hi = Colormap::Rainbow.map(1.0);
        assert_eq!(lo, Rgb([128, 0, 255]));
        assert_eq!(hi[0], 255);
        assert!(hi[2] < 5);
        assert_eq!(Colormap::Rainbow.map(f64::NAN), lo);
    }
}
