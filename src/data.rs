//! Precomputed results of one experiment, as handed over by the simulation
//! driver in a JSON file.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::graph::{Graph, GraphSpec};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunData {
    #[serde(default)]
    pub graph: GraphSpec,
    /// Shared time axis of `sol` and `corr_vals`.
    #[serde(default)]
    pub t: Vec<f32>,
    /// Phase trajectories, one row per oscillator.
    #[serde(default)]
    pub sol: Vec<Vec<f32>>,
    #[serde(default)]
    pub corr_vals: Vec<Vec<f32>>,
    /// Angular frequency of the driver.
    #[serde(default)]
    pub omega: f32,
    #[serde(default)]
    pub sum_rho_avg: Vec<Vec<f32>>,
    #[serde(default)]
    pub d_average: Vec<Vec<f32>>,
    #[serde(default)]
    pub no_runs: usize,
}

impl RunData {
    pub fn from_json_str(text: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        let data = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            nodes = data.graph.nodes.len(),
            samples = data.t.len(),
            "loaded run data"
        );
        Ok(data)
    }

    pub fn graph(&self) -> Graph {
        self.graph.build()
    }

    pub fn has_time_series(&self) -> bool {
        !self.t.is_empty() || !self.sol.is_empty() || !self.corr_vals.is_empty()
    }

    pub fn has_matrices(&self) -> bool {
        !self.sum_rho_avg.is_empty() || !self.d_average.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let data = RunData::from_json_str(
            r#"{
                "graph": {"nodes": ["0", "1", "2"], "edges": [["0", "1"], ["1", "2"]]},
                "t": [0.0, 0.5, 1.0],
                "sol": [[0.0, 0.1, 0.2], [0.3, 0.4, 0.5], [0.6, 0.7, 0.8]],
                "omega": 2.0
            }"#,
        )
        .unwrap();
        let graph = data.graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(data.has_time_series());
        assert!(!data.has_matrices());
        assert_eq!(data.no_runs, 0);
    }

    #[test]
    fn edges_may_introduce_nodes() {
        let data = RunData::from_json_str(r#"{"graph": {"edges": [["a", "b"]]}}"#).unwrap();
        assert_eq!(data.graph().labels(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(RunData::from_json_str("{\"t\": [1, 2,").is_err());
    }
}
