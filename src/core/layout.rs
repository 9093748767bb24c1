//! Stress-majorization layout over hop distances.
//!
//! This is the energy model graphviz `neato` uses by default: node pairs are
//! pulled towards a Euclidean distance equal to their graph distance, with
//! weights `d^-2`. Positions are refined with localized majorization updates
//! from a seeded random start, so the same seed gives the same picture.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    #[serde(default = "LayoutParams::default_seed")]
    pub seed: u64,
    #[serde(default = "LayoutParams::default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "LayoutParams::default_epsilon")]
    pub epsilon: f64,
}

impl LayoutParams {
    fn default_seed() -> u64 {
        1
    }
    fn default_max_iter() -> usize {
        200
    }
    fn default_epsilon() -> f64 {
        1e-4
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            max_iter: Self::default_max_iter(),
            epsilon: Self::default_epsilon(),
        }
    }
}

pub type Position = (f64, f64);

/// Target distances for every pair. Unreachable pairs sit one hop beyond
/// the longest finite distance so components stay close but separate.
pub fn target_distances(graph: &Graph) -> Vec<Vec<f64>> {
    let hops = graph.hop_distances();
    let max_finite = hops
        .iter()
        .flat_map(|row| row.iter().flatten())
        .copied()
        .max()
        .unwrap_or(0);
    let disconnected = (max_finite + 1) as f64;
    hops.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|d| d.map(|d| d as f64).unwrap_or(disconnected))
                .collect()
        })
        .collect()
}

/// Weighted stress `Σ_{i<j} d_ij^-2 (|x_i - x_j| - d_ij)^2`.
pub fn stress(positions: &[Position], targets: &[Vec<f64>]) -> f64 {
    let n = positions.len();
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = targets[i][j];
            if d <= 0.0 {
                continue;
            }
            let diff = distance(positions[i], positions[j]) - d;
            sum += diff * diff / (d * d);
        }
    }
    sum
}

pub fn layout(graph: &Graph, params: &LayoutParams) -> Vec<Position> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.0, 0.0)],
        _ => {}
    }

    let targets = target_distances(graph);
    let mut positions = initial_positions(n, params.seed);
    let mut prev = stress(&positions, &targets);

    for iter in 0..params.max_iter {
        majorize_once(&mut positions, &targets);
        let current = stress(&positions, &targets);
        let rel = if prev > 0.0 {
            (prev - current).abs() / prev
        } else {
            0.0
        };
        prev = current;
        if rel < params.epsilon {
            debug!(iter, stress = current, "layout converged");
            break;
        }
    }

    center(&mut positions);
    positions
}

fn initial_positions(n: usize, seed: u64) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = (n as f64).sqrt().max(1.0);
    (0..n)
        .map(|_| (rng.random_range(0.0..side), rng.random_range(0.0..side)))
        .collect()
}

fn majorize_once(positions: &mut [Position], targets: &[Vec<f64>]) {
    let n = positions.len();
    for i in 0..n {
        let (xi, yi) = positions[i];
        let mut num_x = 0.0;
        let mut num_y = 0.0;
        let mut denom = 0.0;
        for j in 0..n {
            if i == j {
                continue;
            }
            let d = targets[i][j];
            if d <= 0.0 {
                continue;
            }
            let w = 1.0 / (d * d);
            let (xj, yj) = positions[j];
            let dist = distance((xi, yi), (xj, yj));
            let (ux, uy) = if dist > 1e-9 {
                ((xi - xj) / dist, (yi - yj) / dist)
            } else {
                (0.0, 0.0)
            };
            num_x += w * (xj + d * ux);
            num_y += w * (yj + d * uy);
            denom += w;
        }
        if denom > 0.0 {
            positions[i] = (num_x / denom, num_y / denom);
        }
    }
}

fn center(positions: &mut [Position]) {
    let n = positions.len() as f64;
    let (sx, sy) = positions
        .iter()
        .fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
    let (cx, cy) = (sx / n, sy / n);
    for p in positions.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
    }
}

#[inline]
fn distance(a: Position, b: Position) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(n: usize) -> Graph {
        let mut g = Graph::with_nodes(n);
        for i in 0..n {
            g.add_edge(i, (i + 1) % n).unwrap();
        }
        g
    }

    #[test]
    fn empty_and_single_node() {
        let params = LayoutParams::default();
        assert!(layout(&Graph::new(), &params).is_empty());
        assert_eq!(layout(&Graph::with_nodes(1), &params), vec![(0.0, 0.0)]);
    }

    #[test]
    fn one_position_per_node() {
        let pos = layout(&cycle(7), &LayoutParams::default());
        assert_eq!(pos.len(), 7);
        assert!(pos.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn same_seed_same_layout() {
        let g = cycle(6);
        let params = LayoutParams::default();
        assert_eq!(layout(&g, &params), layout(&g, &params));
    }

    #[test]
    fn majorization_does_not_increase_stress() {
        let g = cycle(8);
        let targets = target_distances(&g);
        let start = initial_positions(8, 3);
        let before = stress(&start, &targets);
        let after = stress(&layout(&g, &LayoutParams { seed: 3, ..Default::default() }), &targets);
        assert!(after <= before + 1e-9, "stress went up: {before} -> {after}");
    }

    #[test]
    fn edge_pair_ends_near_unit_length() {
        let mut g = Graph::with_nodes(2);
        g.add_edge(0, 1).unwrap();
        let pos = layout(&g, &LayoutParams::default());
        let d = distance(pos[0], pos[1]);
        assert!((d - 1.0).abs() < 1e-3, "two-node edge length {d}");
    }

    #[test]
    fn disconnected_pairs_get_finite_target() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let t = target_distances(&g);
        assert_eq!(t[0][2], 2.0);
        assert_eq!(t[0][3], 3.0);
        assert_eq!(t[3][3], 0.0);
    }
}
