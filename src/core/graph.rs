//! Undirected simple graph of labeled nodes.
//!
//! Nodes are identified by their label, which is also what the network
//! panel prints on each marker.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::core::shape::ShapeError;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with nodes `0..n` labeled by their index.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = Self::new();
        for i in 0..n {
            graph.add_node(&i.to_string());
        }
        graph
    }

    /// Build from label pairs, adding endpoints on first sight.
    pub fn from_edges<S: AsRef<str>>(edges: &[(S, S)]) -> Self {
        let mut graph = Self::new();
        for (a, b) in edges {
            let ia = graph.add_node(a.as_ref());
            let ib = graph.add_node(b.as_ref());
            graph.link(ia, ib);
        }
        graph
    }

    /// Returns the index of the node, inserting it if missing.
    pub fn add_node(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Self loops and repeated edges are ignored. Returns whether the edge was new.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<bool, ShapeError> {
        let nodes = self.node_count();
        if let Some(index) = [a, b].into_iter().find(|&i| i >= nodes) {
            return Err(ShapeError::MissingNode { index, nodes });
        }
        Ok(self.link(a, b))
    }

    fn link(&mut self, a: usize, b: usize) -> bool {
        if a == b || self.adjacency[a].contains(&b) {
            return false;
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.edges.push((a.min(b), a.max(b)));
        true
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// All-pairs hop distances by BFS. `None` marks unreachable pairs.
    pub fn hop_distances(&self) -> Vec<Vec<Option<usize>>> {
        let n = self.node_count();
        let mut out = Vec::with_capacity(n);
        let mut queue = VecDeque::new();
        for src in 0..n {
            let mut dist = vec![None; n];
            dist[src] = Some(0);
            queue.clear();
            queue.push_back(src);
            while let Some(u) = queue.pop_front() {
                let du = dist[u].unwrap_or(0);
                for &v in &self.adjacency[u] {
                    if dist[v].is_none() {
                        dist[v] = Some(du + 1);
                        queue.push_back(v);
                    }
                }
            }
            out.push(dist);
        }
        out
    }
}

/// Serialized form: node labels plus edges as label pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

impl GraphSpec {
    pub fn build(&self) -> Graph {
        let mut graph = Graph::new();
        for label in &self.nodes {
            graph.add_node(label);
        }
        for (a, b) in &self.edges {
            let ia = graph.add_node(a);
            let ib = graph.add_node(b);
            graph.link(ia, ib);
        }
        graph
    }
}

impl From<&Graph> for GraphSpec {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.labels.clone(),
            edges: graph
                .edges
                .iter()
                .map(|&(a, b)| (graph.labels[a].clone(), graph.labels[b].clone()))
                .collect(),
        }
    }
}
