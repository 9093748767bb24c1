use std::error::Error;
use std::f32::consts::TAU;

use plotters::coord::Shift;
use plotters::prelude::*;

use syncplot::core::graph::Graph;
use syncplot::core::layout::{LayoutParams, layout};
use syncplot::core::phase::{driver_phase, driver_trace};
use syncplot::plots::{
    PanelStats, plot_corr_vals, plot_graph, plot_graph_with_layout, plot_time_evolution,
};

fn on_svg<F>(draw: F) -> Result<PanelStats, Box<dyn Error>>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<PanelStats, Box<dyn Error>>,
{
    let mut svg = String::new();
    let root = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;
    let stats = draw(&root)?;
    root.present()?;
    Ok(stats)
}

/// Renders a panel and returns its SVG text.
fn svg_of<F>(draw: F) -> String
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<PanelStats, Box<dyn Error>>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
        root.fill(&WHITE).unwrap();
        draw(&root).unwrap();
        root.present().unwrap();
    }
    svg
}

fn polylines(svg: &str) -> usize {
    svg.matches("<polyline").count()
}

/// `n` rows spanning the same range, so axes and ticks stay fixed.
fn bounded_rows(t: &[f32], n: usize) -> Vec<Vec<f32>> {
    (0..n)
        .map(|k| {
            let mut row: Vec<f32> = t.iter().map(|x| (x * (k + 1) as f32).sin() * 0.5).collect();
            row[0] = -1.0;
            row[1] = 1.0;
            row
        })
        .collect()
}

#[test]
fn correlation_panel_draws_one_series_per_row() {
    let t: Vec<f32> = (0..100).map(|i| i as f32 * 0.01).collect();
    let one = polylines(&svg_of(|root| plot_corr_vals(&bounded_rows(&t, 1), &t, root)));
    for n in [1usize, 3, 12] {
        let rows = bounded_rows(&t, n);
        let stats = on_svg(|root| plot_corr_vals(&rows, &t, root)).unwrap();
        assert_eq!(stats.series, n);
        let drawn = polylines(&svg_of(|root| plot_corr_vals(&rows, &t, root)));
        assert_eq!(drawn - one, n - 1, "{n} rows");
    }
}

#[test]
fn graph_panel_places_one_labeled_marker_per_node() {
    for k in [1usize, 2, 9] {
        let mut g = Graph::with_nodes(k);
        for i in 1..k {
            g.add_edge(i - 1, i).unwrap();
        }
        let stats = on_svg(|root| plot_graph(&g, root)).unwrap();
        assert_eq!(stats.markers, k);
        assert_eq!(stats.labels, k);
    }
}

#[test]
fn graph_panel_accepts_a_precomputed_layout() {
    let g = Graph::from_edges(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);
    let params = LayoutParams {
        seed: 11,
        ..Default::default()
    };
    let positions = layout(&g, &params);
    let stats = on_svg(|root| plot_graph_with_layout(&g, &positions, root)).unwrap();
    assert_eq!(stats.markers, 4);
}

#[test]
fn driver_curve_is_linear_phase_mod_two_pi() {
    let omega = 2.7f32;
    let t: Vec<f32> = (0..500).map(|i| i as f32 * 0.037).collect();
    let trace = driver_trace(omega, &t);
    assert_eq!(trace.len(), t.len());
    for (&ti, &d) in t.iter().zip(&trace) {
        let expected = (omega * ti).rem_euclid(TAU);
        let diff = (d - expected).abs();
        // Either equal, or both sit on the wrap boundary.
        assert!(
            diff < 1e-4 || (TAU - diff).abs() < 1e-4,
            "driver at t={ti}: {d} vs {expected}"
        );
        assert!((0.0..TAU).contains(&d));
        assert_eq!(d, driver_phase(omega, ti));
    }
}

#[test]
fn time_evolution_counts_driver_and_legend_entries() {
    let t: Vec<f32> = (0..40).map(|i| i as f32 * 0.25).collect();
    let sol: Vec<Vec<f32>> = (0..5)
        .map(|k| t.iter().map(|x| (x * (k + 1) as f32).rem_euclid(TAU)).collect())
        .collect();
    let stats = on_svg(|root| plot_time_evolution(&sol, &t, 1.0, root)).unwrap();
    assert_eq!(stats.series, 6);
    assert_eq!(stats.labels, 6);
}

#[test]
fn time_evolution_draws_driver_on_top_of_oscillators() {
    let t: Vec<f32> = (0..40).map(|i| i as f32 * 0.25).collect();
    let omega = 1.0;
    let driver = driver_trace(omega, &t);
    let sol = vec![driver.clone(); 5];
    // Correlation panel over the same rows: same ranges, one curve per row.
    let curves_only = polylines(&svg_of(|root| plot_corr_vals(&sol, &t, root)));
    let evolution = polylines(&svg_of(|root| plot_time_evolution(&sol, &t, omega, root)));
    // Plus the driver curve and one legend swatch for each of the six entries.
    assert_eq!(evolution, curves_only + 1 + 6);
}

#[test]
fn row_length_mismatch_is_not_truncated() {
    let t: Vec<f32> = (0..10).map(|i| i as f32).collect();
    let long = vec![(0..11).map(|i| i as f32).collect::<Vec<f32>>()];
    let short = vec![(0..9).map(|i| i as f32).collect::<Vec<f32>>()];
    assert!(on_svg(|root| plot_corr_vals(&long, &t, root)).is_err());
    assert!(on_svg(|root| plot_corr_vals(&short, &t, root)).is_err());
    assert!(on_svg(|root| plot_time_evolution(&short, &t, 1.0, root)).is_err());
}
