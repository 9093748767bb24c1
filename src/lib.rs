//! Figures for graph-coupled oscillator experiments: network layout,
//! phase trajectories against a driver, phase heat maps, correlation curves
//! and correlation / time-to-synchronization matrices.

pub mod config;
pub mod core;
pub mod data;
pub mod plots;
