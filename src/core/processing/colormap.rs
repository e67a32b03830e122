use image::Rgb;

use crate::types::Colormap;

type Stops = [[u8; 3]; 11];

// Eleven evenly spaced samples of each perceptual map, from 0.0 to 1.0.
const INFERNO: Stops = [
    [0, 0, 4],
    [22, 11, 57],
    [66, 10, 104],
    [106, 23, 110],
    [147, 38, 103],
    [188, 55, 84],
    [221, 81, 58],
    [243, 120, 25],
    [252, 165, 10],
    [246, 215, 70],
    [252, 255, 164],
];

const VIRIDIS: Stops = [
    [68, 1, 84],
    [72, 36, 117],
    [65, 68, 135],
    [53, 95, 141],
    [42, 120, 142],
    [33, 145, 140],
    [34, 168, 132],
    [68, 191, 112],
    [122, 209, 81],
    [189, 223, 38],
    [253, 231, 37],
];

const MAGMA: Stops = [
    [0, 0, 4],
    [20, 14, 54],
    [59, 15, 112],
    [100, 26, 128],
    [140, 41, 129],
    [183, 55, 121],
    [222, 73, 104],
    [247, 112, 92],
    [254, 159, 109],
    [254, 207, 146],
    [252, 253, 191],
];

const PLASMA: Stops = [
    [13, 8, 135],
    [65, 4, 157],
    [106, 0, 168],
    [143, 13, 164],
    [177, 42, 144],
    [204, 71, 120],
    [225, 100, 98],
    [242, 132, 75],
    [252, 166, 54],
    [252, 206, 37],
    [240, 249, 33],
];

impl Colormap {
    /// Color at position `t` in `[0, 1]`; values outside are clamped.
    pub fn sample(&self, t: f64) -> Rgb<u8> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops = match self {
            Colormap::Inferno => &INFERNO,
            Colormap::Viridis => &VIRIDIS,
            Colormap::Magma => &MAGMA,
            Colormap::Plasma => &PLASMA,
            Colormap::Gray => {
                let v = (t * 255.0).round() as u8;
                return Rgb([v, v, v]);
            }
        };
        interpolate(stops, t)
    }
}

fn interpolate(stops: &Stops, t: f64) -> Rgb<u8> {
    let segments = (stops.len() - 1) as f64;
    let pos = t * segments;
    let lo = (pos.floor() as usize).min(stops.len() - 2);
    let frac = pos - lo as f64;
    let a = stops[lo];
    let b = stops[lo + 1];
    let mut out = [0u8; 3];
    for c in 0..3 {
        let v = a[c] as f64 + (b[c] as f64 - a[c] as f64) * frac;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    Rgb(out)
}

/// Linear mapping of data values onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalizer {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Position of `v` on the scale. A degenerate range maps everything to 0.
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return 0.0;
        }
        ((v - self.vmin) / span).clamp(0.0, 1.0)
    }
}
