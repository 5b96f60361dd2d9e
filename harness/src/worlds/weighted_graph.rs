//! `WeightedGraph`: an explicit directed graph with weighted edges.
//!
//! Operation `i` follows the `i`-th outgoing edge of a vertex, in insertion
//! order. The heuristic serves two purposes:
//!
//! - toward the graph's target it reads the per-vertex table `h`;
//! - between the two ends of an edge it returns the lightest edge weight
//!   joining them in either direction, which is the step cost A* and IDA*
//!   accumulate into `g`. Graphs meant for cost-optimal search should
//!   therefore have symmetric weights and no parallel edges.
//!
//! Any other pair scores 0.

use std::sync::Arc;

use lodestar_kernel::capability::{Equatable, Generative, Hashable, Heuristical};

use crate::contract::{SearchFixture, WorldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<(usize, u32)>>,
    h: Vec<u32>,
    target: usize,
}

impl WeightedGraph {
    /// A graph without edges.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidGraph`] if `h` does not have one entry per
    /// vertex, `target` is out of range or `h[target]` is not 0.
    pub fn new(vertex_count: usize, target: usize, h: Vec<u32>) -> Result<Self, WorldError> {
        if h.len() != vertex_count {
            return Err(invalid(format!(
                "heuristic table has {} entries for {vertex_count} vertices",
                h.len()
            )));
        }
        match h.get(target) {
            None => return Err(invalid(format!("target {target} out of range"))),
            Some(&value) if value != 0 => {
                return Err(invalid(format!("h[target] is {value}, expected 0")));
            }
            Some(_) => {}
        }
        Ok(Self {
            adjacency: vec![Vec::new(); vertex_count],
            h,
            target,
        })
    }

    /// Append a directed edge.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidGraph`] if either end is out of range.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: u32) -> Result<(), WorldError> {
        let count = self.adjacency.len();
        if to >= count {
            return Err(invalid(format!("edge {from}->{to}: vertex {to} out of range")));
        }
        self.adjacency
            .get_mut(from)
            .ok_or_else(|| invalid(format!("edge {from}->{to}: vertex {from} out of range")))?
            .push((to, weight));
        Ok(())
    }

    /// Add `from -> to` and `to -> from` with the same weight.
    ///
    /// # Errors
    ///
    /// See [`WeightedGraph::add_edge`].
    pub fn add_undirected(&mut self, a: usize, b: usize, weight: u32) -> Result<(), WorldError> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Outgoing `(to, weight)` edges of `vertex` in operation order.
    #[must_use]
    pub fn edges(&self, vertex: usize) -> &[(usize, u32)] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Cheapest total weight from `from` to the target, `None` if
    /// unreachable. Quadratic Dijkstra used as a reference oracle.
    #[must_use]
    pub fn shortest_distance(&self, from: usize) -> Option<u64> {
        let n = self.adjacency.len();
        let mut dist: Vec<Option<u64>> = vec![None; n];
        let mut done = vec![false; n];
        *dist.get_mut(from)? = Some(0);
        loop {
            let next = (0..n)
                .filter(|&v| !done[v])
                .filter_map(|v| dist[v].map(|d| (d, v)))
                .min();
            let Some((d, v)) = next else {
                break;
            };
            done[v] = true;
            for &(to, weight) in &self.adjacency[v] {
                let candidate = d + u64::from(weight);
                if dist[to].is_none_or(|current| candidate < current) {
                    dist[to] = Some(candidate);
                }
            }
        }
        dist[self.target]
    }

    /// Vertex `id` of the shared graph.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidGraph`] if `id` is out of range.
    pub fn vertex(self: &Arc<Self>, id: usize) -> Result<GraphVertex, WorldError> {
        if id >= self.adjacency.len() {
            return Err(invalid(format!("vertex {id} out of range")));
        }
        Ok(GraphVertex {
            id,
            graph: Arc::clone(self),
        })
    }

    fn edge_weight(&self, from: usize, to: usize) -> Option<u32> {
        self.adjacency[from]
            .iter()
            .filter(|&&(v, _)| v == to)
            .map(|&(_, w)| w)
            .min()
    }

    fn width(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn invalid(detail: String) -> WorldError {
    WorldError::InvalidGraph { detail }
}

#[derive(Debug, Clone)]
pub struct GraphVertex {
    pub id: usize,
    graph: Arc<WeightedGraph>,
}

impl Equatable for GraphVertex {
    fn is_equal(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hashable for GraphVertex {
    fn stable_hash(&self) -> u32 {
        u32::try_from(self.id).unwrap_or(u32::MAX)
    }
}

impl Generative for GraphVertex {
    type Op = usize;

    fn operations(&self) -> Vec<usize> {
        (0..self.graph.width()).collect()
    }

    fn generate(&self, op: &usize) -> Option<Self> {
        let &(id, _) = self.graph.adjacency[self.id].get(*op)?;
        Some(Self {
            id,
            graph: Arc::clone(&self.graph),
        })
    }
}

impl Heuristical for GraphVertex {
    fn heuristic_distance(&self, other: &Self, _param: i32) -> u32 {
        if self.id == other.id {
            return 0;
        }
        if other.id == self.graph.target {
            return self.graph.h[self.id];
        }
        let forward = self.graph.edge_weight(self.id, other.id);
        let backward = self.graph.edge_weight(other.id, self.id);
        match (forward, backward) {
            (Some(a), Some(b)) => a.min(b),
            (Some(w), None) | (None, Some(w)) => w,
            (None, None) => 0,
        }
    }
}

/// A graph searched from one vertex to its target.
#[derive(Debug, Clone)]
pub struct GraphFixture {
    id: String,
    graph: Arc<WeightedGraph>,
    start: usize,
}

impl GraphFixture {
    /// # Errors
    ///
    /// [`WorldError::InvalidGraph`] if `start` is out of range.
    pub fn new(id: &str, graph: WeightedGraph, start: usize) -> Result<Self, WorldError> {
        if start >= graph.vertex_count() {
            return Err(invalid(format!("start {start} out of range")));
        }
        Ok(Self {
            id: id.to_owned(),
            graph: Arc::new(graph),
            start,
        })
    }

    #[must_use]
    pub fn graph(&self) -> &Arc<WeightedGraph> {
        &self.graph
    }

    fn at(&self, id: usize) -> GraphVertex {
        GraphVertex {
            id,
            graph: Arc::clone(&self.graph),
        }
    }
}

impl SearchFixture for GraphFixture {
    type State = GraphVertex;

    fn fixture_id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> GraphVertex {
        self.at(self.start)
    }

    fn finish(&self) -> GraphVertex {
        self.at(self.graph.target)
    }

    fn describe(&self) -> serde_json::Value {
        let edges: usize = self.graph.adjacency.iter().map(Vec::len).sum();
        serde_json::json!({
            "world": "weighted_graph",
            "vertices": self.graph.vertex_count(),
            "edges": edges,
            "start": self.start,
            "target": self.graph.target,
        })
    }
}
