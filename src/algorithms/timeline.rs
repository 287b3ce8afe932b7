use std::cmp::Ordering;

use ordered_float::NotNan;

use crate::data::{Region, RegionSet};
use crate::Error;

/// The four flavors of sweep-relevant instant a [`Timeline`] emits.
///
/// `Init`/`Done` bracket a single sweep pass over one dimension; every
/// `Region` contributes exactly one `Begin` and one matching `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegionEvtKind {
  Init,
  Begin,
  End,
  Done,
}

/// A single sweep-relevant instant: `(when, kind, order, context, dimension)`.
///
/// `order` is the tie-break priority used to order events sharing the same
/// `when` (see [`Timeline::events`] for the full total order). It is derived
/// from `kind` and whether `context`'s factor on `dimension` is zero-length:
///
/// - `Init` → -2
/// - `End` of a non-zero-length region → -1
/// - `Begin` or `End` of a zero-length region → 0
/// - `Begin` of a non-zero-length region → +1
/// - `Done` → +2
#[derive(Debug, Clone)]
pub struct RegionEvent<'a> {
  when: f64,
  kind: RegionEvtKind,
  order: i32,
  context: &'a Region,
  dimension: usize,
}

impl<'a> RegionEvent<'a> {
  fn new(kind: RegionEvtKind, context: &'a Region, dimension: usize) -> RegionEvent<'a> {
    let factor = context.project(dimension);
    let when = match kind {
      RegionEvtKind::Init | RegionEvtKind::Begin => factor.lower(),
      RegionEvtKind::Done | RegionEvtKind::End => factor.upper(),
    };
    let order = match kind {
      RegionEvtKind::Init => -2,
      RegionEvtKind::Done => 2,
      RegionEvtKind::Begin | RegionEvtKind::End => {
        let zero_length = factor.is_zero_length();
        let magnitude = if zero_length { 0 } else { 1 };
        let sign = if kind == RegionEvtKind::End { -1 } else { 1 };
        magnitude * sign
      }
    };
    RegionEvent {
      when,
      kind,
      order,
      context,
      dimension,
    }
  }

  pub fn when(&self) -> f64 {
    self.when
  }

  pub fn kind(&self) -> RegionEvtKind {
    self.kind
  }

  pub fn order(&self) -> i32 {
    self.order
  }

  pub fn context(&self) -> &'a Region {
    self.context
  }

  pub fn dimension(&self) -> usize {
    self.dimension
  }

  fn sort_key(&self) -> (NotNan<f64>, i32, RegionEvtKind, &'a str) {
    (
      NotNan::new(self.when).expect("RegionEvent.when is always finite"),
      self.order,
      self.kind,
      self.context.id(),
    )
  }
}

impl<'a> PartialEq for RegionEvent<'a> {
  fn eq(&self, other: &Self) -> bool {
    self.sort_key() == other.sort_key()
  }
}
impl<'a> Eq for RegionEvent<'a> {}

impl<'a> PartialOrd for RegionEvent<'a> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<'a> Ord for RegionEvent<'a> {
  /// Total order: lower `when` first, then lower `order` first (which
  /// already places non-zero-length `End`s before zero-length
  /// `Begin`/`End`s before non-zero-length `Begin`s at the same instant);
  /// when `order` ties, `Init`/`Begin`/`End`/`Done` breaks ties by `kind`
  /// only when both events share a context (relevant to zero-length
  /// regions, whose own `Begin` and `End` collapse to the same `when` and
  /// `order`); otherwise ties break by `context.id()`.
  fn cmp(&self, other: &Self) -> Ordering {
    self.when.partial_cmp(&other.when).unwrap_or(Ordering::Equal).then_with(|| self.order.cmp(&other.order)).then_with(|| {
      if self.context.id() == other.context.id() {
        self.kind.cmp(&other.kind)
      } else {
        self.context.id().cmp(other.context.id())
      }
    })
  }
}

/// The ordered stream of sweep events derived from a [`RegionSet`] on a
/// chosen sweep dimension.
///
/// The bounding box backing `Init`/`Done` events is computed once at
/// construction and owned by the `Timeline`, so events borrowing it live as
/// long as the `Timeline` itself rather than the `RegionSet`.
pub struct Timeline<'a> {
  regions: &'a RegionSet,
  bbox: Region,
}

impl<'a> Timeline<'a> {
  pub fn new(regions: &'a RegionSet) -> Result<Timeline<'a>, Error> {
    let bbox = regions.minbounds().ok_or(Error::EmptyInput {
      operation: "Timeline::new",
    })?;
    Ok(Timeline { regions, bbox })
  }

  /// A totally ordered iterator of `RegionEvent`s on `dimension`: one `Init`
  /// at the bounding box's lower bound, one `Done` at its upper bound, and
  /// one `Begin`/`End` pair per region. Stable: the same `RegionSet` and
  /// `dimension` always yield the same sequence. Materialises and sorts in
  /// memory — O(n log n).
  pub fn events(&self, dimension: usize) -> Result<Vec<RegionEvent<'_>>, Error> {
    if dimension >= self.regions.dimension() {
      return Err(Error::DimensionMismatch {
        expected: self.regions.dimension(),
        found: dimension,
      });
    }
    let mut events = Vec::with_capacity(2 + 2 * self.regions.size());
    events.push(RegionEvent::new(RegionEvtKind::Init, &self.bbox, dimension));
    events.push(RegionEvent::new(RegionEvtKind::Done, &self.bbox, dimension));
    for region in self.regions {
      events.push(RegionEvent::new(RegionEvtKind::Begin, region, dimension));
      events.push(RegionEvent::new(RegionEvtKind::End, region, dimension));
    }
    events.sort();
    Ok(events)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Interval;

  fn region(id: &str, bounds: &[(f64, f64)]) -> Region {
    let factors = bounds
      .iter()
      .map(|&(a, b)| Interval::new(a, b).unwrap())
      .collect();
    Region::new(factors, id).unwrap()
  }

  #[test]
  fn brackets_with_init_and_done() {
    let mut rs = RegionSet::new(1).unwrap();
    rs.add(region("a", &[(0.0, 4.0)])).unwrap();
    rs.add(region("b", &[(3.0, 7.0)])).unwrap();
    let timeline = Timeline::new(&rs).unwrap();
    let events = timeline.events(0).unwrap();
    assert_eq!(events.first().unwrap().kind(), RegionEvtKind::Init);
    assert_eq!(events.last().unwrap().kind(), RegionEvtKind::Done);
    assert_eq!(events.len(), 2 + 2 * rs.size());
  }

  #[test]
  fn adjacent_end_precedes_begin_at_shared_when() {
    let mut rs = RegionSet::new(1).unwrap();
    rs.add(region("a", &[(0.0, 5.0)])).unwrap();
    rs.add(region("b", &[(5.0, 10.0)])).unwrap();
    let timeline = Timeline::new(&rs).unwrap();
    let events = timeline.events(0).unwrap();
    let at_five: Vec<_> = events.iter().filter(|e| e.when() == 5.0).collect();
    assert_eq!(at_five.len(), 2);
    assert_eq!(at_five[0].kind(), RegionEvtKind::End);
    assert_eq!(at_five[1].kind(), RegionEvtKind::Begin);
  }

  #[test]
  fn zero_length_region_emits_begin_then_end_at_same_when() {
    let mut rs = RegionSet::new(1).unwrap();
    rs.add(region("a", &[(5.0, 5.0)])).unwrap();
    let timeline = Timeline::new(&rs).unwrap();
    let events = timeline.events(0).unwrap();
    let at_five: Vec<_> = events
      .iter()
      .filter(|e| e.when() == 5.0 && e.context().id() == "a")
      .collect();
    assert_eq!(at_five.len(), 2);
    assert_eq!(at_five[0].kind(), RegionEvtKind::Begin);
    assert_eq!(at_five[1].kind(), RegionEvtKind::End);
  }

  #[test]
  fn stable_across_repeated_runs() {
    let mut rs = RegionSet::new(1).unwrap();
    rs.add(region("a", &[(0.0, 4.0)])).unwrap();
    rs.add(region("b", &[(3.0, 7.0)])).unwrap();
    rs.add(region("c", &[(6.0, 10.0)])).unwrap();
    let timeline = Timeline::new(&rs).unwrap();
    let first: Vec<_> = timeline
      .events(0)
      .unwrap()
      .iter()
      .map(|e| (e.when(), e.kind(), e.context().id().to_string()))
      .collect();
    let second: Vec<_> = timeline
      .events(0)
      .unwrap()
      .iter()
      .map(|e| (e.when(), e.kind(), e.context().id().to_string()))
      .collect();
    assert_eq!(first, second);
  }
}
