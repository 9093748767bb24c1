use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::core::graph::Graph;
use crate::core::layout::{LayoutParams, Position, layout};
use crate::core::shape::ShapeError;

use super::{FONT, PanelStats, pt};

const LIGHT_SKY_BLUE: RGBColor = RGBColor(135, 206, 250);
/// Node marker size in pt², the square of the disc diameter.
const NODE_AREA_PT2: f64 = 400.0;
const LABEL_PT: f64 = 20.0;

fn node_radius() -> i32 {
    pt(NODE_AREA_PT2.sqrt() / 2.0).round() as i32
}

/// Draw the network with a freshly computed layout.
pub fn plot_graph<DB: DrawingBackend>(
    graph: &Graph,
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let positions = layout(graph, &LayoutParams::default());
    plot_graph_with_layout(graph, &positions, area)
}

/// Draw edges as straight segments and every node as a labeled disc.
pub fn plot_graph_with_layout<DB: DrawingBackend>(
    graph: &Graph,
    positions: &[Position],
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelStats, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    if positions.len() != graph.node_count() {
        return Err(ShapeError::LayoutLength {
            nodes: graph.node_count(),
            positions: positions.len(),
        }
        .into());
    }
    if graph.is_empty() {
        return Ok(PanelStats::default());
    }

    let ((x_lo, x_hi), (y_lo, y_hi)) = bounds(positions);
    let mut chart = ChartBuilder::on(area)
        .margin(node_radius() as u32 + 4)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart.draw_series(
        graph
            .edges()
            .iter()
            .map(|&(a, b)| PathElement::new(vec![positions[a], positions[b]], BLACK)),
    )?;

    let label_style = TextStyle::from((FONT, pt(LABEL_PT)).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(graph.labels().iter().zip(positions).map(|(label, &pos)| {
        EmptyElement::at(pos)
            + Circle::new((0, 0), node_radius(), LIGHT_SKY_BLUE.filled())
            + Text::new(label.clone(), (0, 0), label_style.clone())
    }))?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "drew network"
    );
    Ok(PanelStats {
        series: 0,
        markers: graph.node_count(),
        labels: graph.node_count(),
    })
}

/// Bounding box of the layout with room for the node discs.
fn bounds(positions: &[Position]) -> ((f64, f64), (f64, f64)) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for &(px, py) in positions {
        x = (x.0.min(px), x.1.max(px));
        y = (y.0.min(py), y.1.max(py));
    }
    let pad = |(lo, hi): (f64, f64)| {
        let span = hi - lo;
        let p = if span > 1e-9 { 0.1 * span } else { 1.0 };
        (lo - p, hi + p)
    };
    (pad(x), pad(y))
}
