//! Intensity-image panels: the phase heat map and the N×N matrices with a
//! colorbar.

use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::core::colormap::{ColorMap, Normalize};
use crate::core::shape::{check_series, check_square};

use super::{FONT, PanelStats, pt};

const COLORBAR_STEPS: usize = 128;
const COLORBAR_LABEL_AREA: u32 = 50;
const TICK_PT: f64 = 10.0;
const MARGIN: u32 = 10;
const X_LABEL_AREA: u32 = 30;

/// Grayscale image of `sol`, one row per oscillator, spanning
/// `x ∈ [0, t_last]` and `y ∈ [0, rows]` with row 0 at the top.
pub fn plot_heatmap_evolutions<DB: DrawingBackend>(
    sol: &[Vec<f32>],
    t: &[f32],
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    check_series("sol", sol, t)?;

    let rows = sol.len();
    let cols = t.len();
    let t_last = t.last().copied().filter(|v| v.is_finite()).unwrap_or(0.0);
    let extent = if t_last.abs() > 1e-9 { t_last } else { 1.0 };
    let (x_lo, x_hi) = if extent > 0.0 { (0.0, extent) } else { (extent, 0.0) };
    let y_hi = rows.max(1) as f32;

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0.0f32..y_hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("t")
        .y_desc("Θ_i")
        .draw()?;

    let norm = Normalize::from_rows(sol);
    let dx = extent / cols as f32;
    chart.draw_series(sol.iter().enumerate().flat_map(|(i, row)| {
        let y_top = (rows - i) as f32;
        row.iter().enumerate().map(move |(j, &v)| {
            let x0 = j as f32 * dx;
            let color = ColorMap::Gray.color(norm.apply(v as f64));
            Rectangle::new([(x0, y_top), (x0 + dx, y_top - 1.0)], color.filled())
        })
    }))?;

    debug!(rows, cols, "drew phase heat map");
    Ok(PanelStats::default())
}

/// Averaged sum of the correlation matrices, coolwarm with a colorbar.
pub fn plot_sum_corr_mat<DB: DrawingBackend>(
    sum_rho_avg: &[Vec<f32>],
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    draw_matrix(
        "sum_rho_avg",
        sum_rho_avg,
        ColorMap::CoolWarm,
        "Correlation matrix",
        area,
    )
}

/// Time-to-synchronization matrix of one run, with its own color map.
pub fn plot_time_to_sync<DB: DrawingBackend>(
    d_average: &[Vec<f32>],
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    draw_matrix(
        "d_average",
        d_average,
        ColorMap::Viridis,
        "Time to synchronization in DCM",
        area,
    )
}

fn draw_matrix<DB: DrawingBackend>(
    name: &'static str,
    matrix: &[Vec<f32>],
    cmap: ColorMap,
    title: &str,
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let n = check_square(name, matrix)?;
    let norm = Normalize::from_rows(matrix);

    let body = area.titled(title, (FONT, 14.0).into_font())?;
    let (width, _) = body.dim_in_pixel();
    let bar_w = (width as f64 * 0.05).round().max(6.0) as u32;
    let pad = (width as f64 * 0.02).round() as u32;
    let side_w = bar_w + pad + COLORBAR_LABEL_AREA + 2 * MARGIN;
    let (image_area, side) = body.split_horizontally(width.saturating_sub(side_w));
    let (_, bar_area) = side.split_horizontally(pad);

    let lim = n as f32 - 0.5;
    let flip = |y: &f32| format!("{:.0}", lim - 0.5 - *y);
    let mut chart = ChartBuilder::on(&image_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(40)
        .build_cartesian_2d(-0.5f32..lim, -0.5f32..lim)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n.min(8))
        .y_labels(n.min(8))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&flip)
        .draw()?;

    // Row i sits at y = n - 1 - i so the first row is drawn on top.
    chart.draw_series(matrix.iter().enumerate().flat_map(|(i, row)| {
        let yc = (n - 1 - i) as f32;
        row.iter().enumerate().map(move |(j, &v)| {
            let xc = j as f32;
            let color = cmap.color(norm.apply(v as f64));
            Rectangle::new(
                [(xc - 0.5, yc + 0.5), (xc + 0.5, yc - 0.5)],
                color.filled(),
            )
        })
    }))?;

    draw_colorbar(&bar_area, cmap, &norm)?;

    debug!(matrix = name, n, vmin = norm.vmin, vmax = norm.vmax, "drew matrix");
    Ok(PanelStats::default())
}

/// Vertical color scale with tick labels on the right.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    cmap: ColorMap,
    norm: &Normalize,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (lo, hi) = norm.axis_range();
    let mut bar = ChartBuilder::on(area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .right_y_label_area_size(COLORBAR_LABEL_AREA)
        .build_cartesian_2d(0.0f64..1.0, lo..hi)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_style((FONT, pt(TICK_PT)))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let y0 = lo + k as f64 * step;
        let color = cmap.color(norm.apply(y0 + 0.5 * step));
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;

    bar.plotting_area().draw(&Rectangle::new(
        [(0.0, lo), (1.0, hi)],
        BLACK.stroke_width(1),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_svg<F>(draw: F) -> Result<String, Box<dyn Error>>
    where
        F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<PanelStats, Box<dyn Error>>,
    {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (500, 400)).into_drawing_area();
            draw(&root)?;
            root.present()?;
        }
        Ok(svg)
    }

    fn identity(n: usize) -> Vec<Vec<f32>> {
        (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect()
    }

    #[test]
    fn correlation_matrix_has_title() {
        let svg = render_svg(|root| plot_sum_corr_mat(&identity(4), root)).unwrap();
        assert!(svg.contains("Correlation matrix"));
    }

    #[test]
    fn time_to_sync_has_title() {
        let svg = render_svg(|root| plot_time_to_sync(&identity(3), root)).unwrap();
        assert!(svg.contains("Time to synchronization in DCM"));
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let m = vec![vec![1.0, 0.0], vec![0.0]];
        let err = render_svg(|root| plot_sum_corr_mat(&m, root)).unwrap_err();
        assert!(err.to_string().contains("square"), "unexpected error: {err}");
    }

    #[test]
    fn constant_matrix_still_renders() {
        let m = vec![vec![0.3; 3]; 3];
        assert!(render_svg(|root| plot_time_to_sync(&m, root)).is_ok());
    }

    #[test]
    fn heatmap_requires_full_rows() {
        let t = vec![0.0, 0.5, 1.0];
        let sol = vec![vec![0.0, 1.0]];
        assert!(render_svg(|root| plot_heatmap_evolutions(&sol, &t, root)).is_err());
    }

    #[test]
    fn heatmap_draws_every_cell() {
        let t: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let sol = vec![t.clone(), t.iter().rev().copied().collect()];
        let svg = render_svg(|root| plot_heatmap_evolutions(&sol, &t, root)).unwrap();
        assert!(svg.contains("Θ_i"));
        assert!(svg.matches("<rect").count() >= 20);
    }
}
