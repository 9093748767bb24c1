//! Time-series panels: correlation values and oscillator phases.

use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::core::colormap::cycle_color;
use crate::core::phase::driver_trace;
use crate::core::shape::check_series;

use super::{FONT, PanelStats, padded_range, pt, time_range};

/// Legend text size in points.
const LEGEND_PT: f64 = 7.0;

/// One curve per row of `corr_vals` against the shared time axis.
pub fn plot_corr_vals<DB: DrawingBackend>(
    corr_vals: &[Vec<f32>],
    t: &[f32],
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    check_series("corr_vals", corr_vals, t)?;

    let (x_lo, x_hi) = time_range(t);
    let (y_lo, y_hi) = padded_range(corr_vals.iter().map(Vec::as_slice));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("t")
        .y_desc("correlation values")
        .draw()?;

    for (i, row) in corr_vals.iter().enumerate() {
        chart.draw_series(LineSeries::new(finite_points(t, row), cycle_color(i)))?;
    }

    debug!(series = corr_vals.len(), samples = t.len(), "drew correlation values");
    Ok(PanelStats {
        series: corr_vals.len(),
        ..Default::default()
    })
}

/// Phase trajectory of every oscillator plus the driver `(Ω·t) mod 2π`.
pub fn plot_time_evolution<DB: DrawingBackend>(
    sol: &[Vec<f32>],
    t: &[f32],
    omega: f32,
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    check_series("sol", sol, t)?;

    let driver = driver_trace(omega, t);
    let (x_lo, x_hi) = time_range(t);
    let (y_lo, y_hi) = padded_range(
        sol.iter()
            .map(Vec::as_slice)
            .chain(std::iter::once(driver.as_slice())),
    );

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("t")
        .y_desc("θ")
        .draw()?;

    for (i, row) in sol.iter().enumerate() {
        let color = cycle_color(i);
        chart
            .draw_series(LineSeries::new(finite_points(t, row), color))?
            .label(format!("f {i}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .draw_series(LineSeries::new(
            finite_points(t, &driver),
            RED.stroke_width(2),
        ))?
        .label("driver")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, pt(LEGEND_PT)))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    debug!(oscillators = sol.len(), omega, "drew time evolution");
    Ok(PanelStats {
        series: sol.len() + 1,
        labels: sol.len() + 1,
        ..Default::default()
    })
}

fn finite_points<'a>(t: &'a [f32], row: &'a [f32]) -> impl Iterator<Item = (f32, f32)> + 'a {
    t.iter()
        .copied()
        .zip(row.iter().copied())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
}
