//! Sweep-line construction of region intersection graphs.
//!
//! Given a collection of axis-aligned regions in d-dimensional space, this
//! crate builds an undirected, labelled intersection graph: a node per
//! region, an edge for every pair of regions that intersect, labelled with
//! the intersection region itself. Works for d = 1 (intervals), d = 2
//! (rectangles), and arbitrary d >= 1.
//!
//! The entry point is [`build_intersection_graph`].

pub mod algorithms;
pub mod data;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use algorithms::graph::{GraphBuilder, IntersectionGraph};
pub use algorithms::sweep::{SweepDriver, SweepObserver};
pub use algorithms::timeline::{RegionEvent, RegionEvtKind, Timeline};
pub use data::{Interval, Region, RegionSet};

/// The error taxonomy for this crate. "No intersection" is not an error —
/// see [`Interval::get_intersection`] and [`Region::intersect`], which
/// return `Option` — these variants only cover failures at construction or
/// sweep-configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// Two regions, or a region and a RegionSet, combine operands of
  /// incompatible dimension — or a sweep is configured on an out-of-range
  /// axis.
  DimensionMismatch { expected: usize, found: usize },
  /// A region added to a bounded `RegionSet` does not fit within its bounds.
  OutOfBounds { region_id: String, bounds_id: String },
  /// A constructed value would violate a core invariant: non-finite
  /// interval bounds, a duplicate region id, or similar malformed input.
  InvariantViolation { detail: String },
  /// A fold operation (`from_intersection`, `from_union`) was invoked with
  /// fewer than two inputs, or a `RegionSet`/`Timeline` operation requires a
  /// non-empty set.
  EmptyInput { operation: &'static str },
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::DimensionMismatch { expected, found } => {
        write!(f, "dimension mismatch: expected {expected}, found {found}")
      }
      Error::OutOfBounds { region_id, bounds_id } => write!(
        f,
        "region {region_id:?} does not fit within bounds {bounds_id:?}"
      ),
      Error::InvariantViolation { detail } => write!(f, "invariant violation: {detail}"),
      Error::EmptyInput { operation } => write!(f, "{operation} requires a non-empty input"),
    }
  }
}

impl std::error::Error for Error {}

/// Build the intersection graph of `region_set`, sweeping on `sweep_dim`
/// (the conventional default is `0`). Fails only if `sweep_dim` is out of
/// range for `region_set`'s dimension, or `region_set` is empty.
pub fn build_intersection_graph(
  region_set: &RegionSet,
  sweep_dim: usize,
) -> Result<IntersectionGraph, Error> {
  GraphBuilder::build(region_set, sweep_dim)
}
