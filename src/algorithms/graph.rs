use std::collections::HashMap;

use crate::algorithms::sweep::{ActiveSet, SweepDriver, SweepObserver};
use crate::data::{Region, RegionSet};
use crate::Error;

fn edge_key(a: &str, b: &str) -> (String, String) {
  if a <= b {
    (a.to_string(), b.to_string())
  } else {
    (b.to_string(), a.to_string())
  }
}

/// Undirected graph whose nodes are region identifiers carrying the `Region`
/// as payload, and whose edges carry the intersection `Region` of their two
/// endpoints. No self-loops, no parallel edges.
///
/// Nodes, edges, and adjacency lists are all backed by insertion-ordered
/// `Vec`s with an auxiliary `HashMap` index for O(1) lookup — the same
/// dual-structure idiom `RegionSet` uses — so that iteration order is a
/// deterministic function of construction order, not of a randomly seeded
/// hasher.
#[derive(Debug, Clone, Default)]
pub struct IntersectionGraph {
  nodes: Vec<Region>,
  node_index: HashMap<String, usize>,
  edges: Vec<(String, String, Region)>,
  edge_index: HashMap<(String, String), usize>,
  adjacency: HashMap<String, Vec<String>>,
}

impl IntersectionGraph {
  fn empty() -> IntersectionGraph {
    IntersectionGraph {
      nodes: Vec::new(),
      node_index: HashMap::new(),
      edges: Vec::new(),
      edge_index: HashMap::new(),
      adjacency: HashMap::new(),
    }
  }

  fn add_node(&mut self, region: Region) {
    self.adjacency.entry(region.id().to_string()).or_default();
    self.node_index.insert(region.id().to_string(), self.nodes.len());
    self.nodes.push(region);
  }

  fn add_edge(&mut self, a: &str, b: &str, label: Region) {
    let key = edge_key(a, b);
    self.edge_index.insert(key.clone(), self.edges.len());
    self.edges.push((key.0, key.1, label));
    self.adjacency.entry(a.to_string()).or_default().push(b.to_string());
    self.adjacency.entry(b.to_string()).or_default().push(a.to_string());
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn edge_count(&self) -> usize {
    self.edges.len()
  }

  pub fn node(&self, id: &str) -> Option<&Region> {
    self.node_index.get(id).map(|&idx| &self.nodes[idx])
  }

  /// Nodes in insertion order (the order regions were added in `on_init`).
  pub fn nodes(&self) -> impl Iterator<Item = &Region> {
    self.nodes.iter()
  }

  pub fn has_edge(&self, a: &str, b: &str) -> bool {
    self.edge_index.contains_key(&edge_key(a, b))
  }

  /// The intersection `Region` labelling the edge `{a, b}`, if present.
  pub fn edge_label(&self, a: &str, b: &str) -> Option<&Region> {
    self
      .edge_index
      .get(&edge_key(a, b))
      .map(|&idx| &self.edges[idx].2)
  }

  /// Edges in insertion order (the order each pair was confirmed during the sweep).
  pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &Region)> {
    self.edges.iter().map(|(a, b, label)| (a.as_str(), b.as_str(), label))
  }

  /// A node's neighbors in the order edges to them were added.
  pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &str> {
    self
      .adjacency
      .get(id)
      .into_iter()
      .flat_map(|list| list.iter())
      .map(|s| s.as_str())
  }
}

/// Sweep observer that confirms full-dimensional intersection on each
/// candidate pair and assembles an [`IntersectionGraph`].
///
/// For `d = 1` a candidate already overlaps on the swept (only) dimension by
/// construction, so no further validation is needed. For `d > 1` the sweep
/// dimension's overlap is necessary but not sufficient — the observer
/// additionally checks every other dimension before admitting an edge.
pub struct GraphBuilder<'r> {
  graph: IntersectionGraph,
  sweep_dim: usize,
  regions: &'r RegionSet,
}

impl<'r> GraphBuilder<'r> {
  /// Build the intersection graph of `regions`, sweeping on `sweep_dim`
  /// (default 0 via [`crate::build_intersection_graph`]).
  pub fn build(regions: &RegionSet, sweep_dim: usize) -> Result<IntersectionGraph, Error> {
    let mut builder = GraphBuilder {
      graph: IntersectionGraph::empty(),
      sweep_dim,
      regions,
    };
    SweepDriver::run(regions, sweep_dim, &mut builder)
  }
}

impl<'r> SweepObserver for GraphBuilder<'r> {
  type Output = IntersectionGraph;

  fn on_init(&mut self, _dimension: usize) {
    self.graph = IntersectionGraph::empty();
    for region in self.regions {
      self.graph.add_node(region.clone());
    }
  }

  fn on_candidate(&mut self, active: &Region, incoming: &Region) -> Result<(), Error> {
    let confirmed = if active.dimension() == 1 {
      true
    } else {
      active.is_intersecting_excluding(incoming, self.sweep_dim, false)?
    };
    if confirmed {
      if let Some(label) = active.intersect(incoming, false)? {
        self.graph.add_edge(active.id(), incoming.id(), label);
      }
    }
    Ok(())
  }

  fn on_begin(&mut self, _region: &Region, _active_set: &ActiveSet<'_>) {}

  fn on_end(&mut self, _region: &Region, _active_set: &ActiveSet<'_>) {}

  fn on_done(&mut self) -> IntersectionGraph {
    std::mem::take(&mut self.graph)
  }
}
