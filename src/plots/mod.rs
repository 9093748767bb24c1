//! Panels drawn onto caller-supplied drawing areas, and the composite
//! figures that tile them.
//!
//! Every panel function takes its target `DrawingArea` explicitly, so the
//! same code renders into PNG bitmaps, SVG strings and sub-areas of a grid.

pub mod export;
pub mod figures;
pub mod matrix;
pub mod network;
pub mod series;

pub use figures::{Figure, FigureWriter, SavedFigure, plot_corr_mat_dcm, plot_time_corr};
pub use matrix::{plot_heatmap_evolutions, plot_sum_corr_mat, plot_time_to_sync};
pub use network::{plot_graph, plot_graph_with_layout};
pub use series::{plot_corr_vals, plot_time_evolution};

/// What a panel put on its area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelStats {
    /// Line series, image cells excluded.
    pub series: usize,
    /// Point markers (graph nodes).
    pub markers: usize,
    /// Text labels attached to markers or legend entries.
    pub labels: usize,
}

pub(crate) const FONT: &str = "sans-serif";

/// Output resolution used to turn typographic sizes into pixels.
pub const DPI: f64 = 100.0;

/// Points to pixels at [`DPI`].
pub const fn pt(points: f64) -> f64 {
    points * DPI / 72.0
}

/// Padded y range over the finite values of all rows.
pub(crate) fn padded_range<'a, I>(rows: I) -> (f32, f32)
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut y_min = f32::INFINITY;
    let mut y_max = f32::NEG_INFINITY;
    for row in rows {
        for &v in row {
            if v.is_finite() {
                y_min = y_min.min(v);
                y_max = y_max.max(v);
            }
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    let range = (y_max - y_min).abs();
    let pad = if range > 1e-6 {
        0.05 * range
    } else {
        0.1 * y_max.abs().max(1.0)
    };
    (y_min - pad, y_max + pad)
}

/// x range of a time vector, never empty.
pub(crate) fn time_range(t: &[f32]) -> (f32, f32) {
    let lo = t.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = t.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < 1e-9 {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}
