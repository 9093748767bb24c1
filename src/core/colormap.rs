//! Color maps for intensity images and the default line color cycle.
//!
//! Maps are piecewise-linear over evenly spaced anchor colors sampled from
//! the matplotlib maps of the same name.

use plotters::style::RGBColor;

const COOLWARM: [[u8; 3]; 9] = [
    [59, 76, 192],
    [98, 130, 234],
    [141, 176, 254],
    [184, 208, 249],
    [221, 221, 221],
    [245, 196, 173],
    [244, 154, 123],
    [222, 96, 77],
    [180, 4, 38],
];

const VIRIDIS: [[u8; 3]; 9] = [
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

const GRAY: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];

/// matplotlib `tab10`, the default property cycle for line plots.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Color of the `i`-th line in a panel.
pub fn cycle_color(i: usize) -> RGBColor {
    TAB10[i % TAB10.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    Gray,
    CoolWarm,
    Viridis,
}

impl ColorMap {
    fn anchors(self) -> &'static [[u8; 3]] {
        match self {
            ColorMap::Gray => &GRAY,
            ColorMap::CoolWarm => &COOLWARM,
            ColorMap::Viridis => &VIRIDIS,
        }
    }

    /// Color at `t ∈ [0, 1]`. Out-of-range values are clamped, NaN maps to the low end.
    pub fn color(self, t: f64) -> RGBColor {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (anchors.len() - 1) as f64;
        let lo = (pos.floor() as usize).min(anchors.len() - 1);
        let hi = (lo + 1).min(anchors.len() - 1);
        let frac = pos - lo as f64;
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - frac) + b as f64 * frac).round() as u8;
        RGBColor(
            mix(anchors[lo][0], anchors[hi][0]),
            mix(anchors[lo][1], anchors[hi][1]),
            mix(anchors[lo][2], anchors[hi][2]),
        )
    }
}

/// Linear mapping of data values onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    /// Range of the finite values in `rows`; `(0, 1)` when there are none.
    pub fn from_rows(rows: &[Vec<f32>]) -> Self {
        let mut vmin = f64::INFINITY;
        let mut vmax = f64::NEG_INFINITY;
        for &v in rows.iter().flatten() {
            if v.is_finite() {
                vmin = vmin.min(v as f64);
                vmax = vmax.max(v as f64);
            }
        }
        if !vmin.is_finite() || !vmax.is_finite() {
            return Self { vmin: 0.0, vmax: 1.0 };
        }
        Self { vmin, vmax }
    }

    pub fn is_degenerate(&self) -> bool {
        (self.vmax - self.vmin).abs() < f64::EPSILON
    }

    pub fn apply(&self, v: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        (v - self.vmin) / (self.vmax - self.vmin)
    }

    /// Axis range for a colorbar; degenerate ranges are widened around the value.
    pub fn axis_range(&self) -> (f64, f64) {
        if self.is_degenerate() {
            let pad = self.vmin.abs().max(1.0) * 0.05;
            (self.vmin - pad, self.vmax + pad)
        } else {
            (self.vmin, self.vmax)
        }
    }
}
