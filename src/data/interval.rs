use std::hash::{Hash, Hasher};

use crate::Error;

/// A 1-dimensional range `[lower, upper]` of IEEE-754 doubles.
///
/// Constructed from any two real values; the smaller of the two becomes
/// `lower`. Immutable after construction — re-bounding produces a new
/// `Interval`. Equality and hashing are defined purely on the bit pattern of
/// `(lower, upper)`.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
  lower: f64,
  upper: f64,
}

impl PartialEq for Interval {
  fn eq(&self, other: &Self) -> bool {
    self.lower.to_bits() == other.lower.to_bits() && self.upper.to_bits() == other.upper.to_bits()
  }
}
impl Eq for Interval {}

impl Hash for Interval {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.lower.to_bits().hash(state);
    self.upper.to_bits().hash(state);
  }
}

impl Interval {
  /// Construct an `Interval` from two bounds, swapping them if necessary so
  /// that `lower <= upper`. Fails if either value is non-finite.
  pub fn new(a: f64, b: f64) -> Result<Interval, Error> {
    if !a.is_finite() || !b.is_finite() {
      return Err(Error::InvariantViolation {
        detail: format!("interval bounds must be finite, got ({a}, {b})"),
      });
    }
    if a <= b {
      Ok(Interval { lower: a, upper: b })
    } else {
      Ok(Interval { lower: b, upper: a })
    }
  }

  /// Construct an `Interval` without a finiteness check. Intended for use
  /// once the caller already holds validated bounds (e.g. the result of an
  /// arithmetic operation on two finite intervals is always finite).
  fn new_unchecked(lower: f64, upper: f64) -> Interval {
    debug_assert!(lower <= upper);
    Interval { lower, upper }
  }

  pub fn lower(&self) -> f64 {
    self.lower
  }

  pub fn upper(&self) -> f64 {
    self.upper
  }

  /// `upper - lower`, always non-negative.
  pub fn length(&self) -> f64 {
    self.upper - self.lower
  }

  pub fn midpoint(&self) -> f64 {
    (self.lower + self.upper) / 2.0
  }

  pub fn is_zero_length(&self) -> bool {
    self.length() == 0.0
  }

  /// True iff `value` lies between `lower` and `upper`, with each endpoint
  /// optionally excluded.
  pub fn contains(&self, value: f64, inc_lower: bool, inc_upper: bool) -> bool {
    let gte_lower = if inc_lower {
      self.lower <= value
    } else {
      self.lower < value
    };
    let lte_upper = if inc_upper {
      self.upper >= value
    } else {
      self.upper > value
    };
    gte_lower && lte_upper
  }

  /// True iff `that` lies entirely within `self`'s bounds — `self` must be
  /// at least as long as `that`, and both of `that`'s endpoints must be
  /// contained.
  pub fn encloses(&self, that: &Interval, inc_lower: bool, inc_upper: bool) -> bool {
    self.length() >= that.length()
      && self.contains(that.lower, inc_lower, inc_upper)
      && self.contains(that.upper, inc_lower, inc_upper)
  }

  /// True iff `self` and `that` overlap. Adjacent intervals (one's `lower`
  /// equal to the other's `upper`) only count as intersecting when
  /// `inc_bounds` is set — a zero-length, boundary-only overlap. Equal
  /// intervals always intersect.
  pub fn is_intersecting(&self, that: &Interval, inc_bounds: bool) -> bool {
    if self == that {
      return true;
    }
    if inc_bounds {
      self.upper >= that.lower && that.upper >= self.lower
    } else {
      self.upper > that.lower && that.upper > self.lower
    }
  }

  /// Alias of [`Interval::is_intersecting`].
  #[inline]
  pub fn overlaps(&self, that: &Interval, inc_bounds: bool) -> bool {
    self.is_intersecting(that, inc_bounds)
  }

  /// The overlapping `Interval` between `self` and `that`, or `None` if they
  /// don't intersect. Not an error — absence of overlap is a normal result.
  pub fn get_intersection(&self, that: &Interval, inc_bounds: bool) -> Option<Interval> {
    if !self.is_intersecting(that, inc_bounds) {
      return None;
    }
    Some(Interval::new_unchecked(
      self.lower.max(that.lower),
      self.upper.min(that.upper),
    ))
  }

  /// The smallest `Interval` enclosing both `self` and `that`. Defined even
  /// for disjoint inputs (the bounding interval).
  pub fn get_union(&self, that: &Interval) -> Interval {
    Interval::new_unchecked(self.lower.min(that.lower), self.upper.max(that.upper))
  }

  /// Fold a list of intervals under [`Interval::get_intersection`], `None` as
  /// soon as any consecutive pair fails to intersect. Requires at least two
  /// inputs.
  pub fn from_intersection(intervals: &[Interval]) -> Result<Option<Interval>, Error> {
    if intervals.len() < 2 {
      return Err(Error::EmptyInput {
        operation: "Interval::from_intersection",
      });
    }
    let mut acc = intervals[0];
    for next in &intervals[1..] {
      match acc.get_intersection(next, false) {
        Some(i) => acc = i,
        None => return Ok(None),
      }
    }
    Ok(Some(acc))
  }

  /// Fold a list of intervals under [`Interval::get_union`]. Requires at
  /// least two inputs.
  pub fn from_union(intervals: &[Interval]) -> Result<Interval, Error> {
    if intervals.len() < 2 {
      return Err(Error::EmptyInput {
        operation: "Interval::from_union",
      });
    }
    let mut acc = intervals[0];
    for next in &intervals[1..] {
      acc = acc.get_union(next);
    }
    Ok(acc)
  }

  /// The full boundary representation of `self` — an `{lower, upper}` pair a
  /// collaborator can hand to its own dict/struct encoding.
  pub fn to_object(&self) -> IntervalObject {
    IntervalObject {
      lower: self.lower,
      upper: self.upper,
    }
  }

  /// Inverse of [`Interval::to_object`].
  pub fn from_object(object: IntervalObject) -> Result<Interval, Error> {
    Interval::new(object.lower, object.upper)
  }

  /// The compact boundary representation — `(lower, upper)`, in that order.
  pub fn to_tuple(&self) -> (f64, f64) {
    (self.lower, self.upper)
  }

  /// Inverse of [`Interval::to_tuple`].
  pub fn from_tuple(tuple: (f64, f64)) -> Result<Interval, Error> {
    Interval::new(tuple.0, tuple.1)
  }
}

/// The `{lower, upper}` boundary representation of an [`Interval`], the shape
/// a collaborator's dict/JSON encoding of an interval takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalObject {
  pub lower: f64,
  pub upper: f64,
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn iv(a: f64, b: f64) -> Interval {
    Interval::new(a, b).unwrap()
  }

  #[test]
  fn swaps_out_of_order_bounds() {
    let i = iv(10.0, -5.0);
    assert_eq!(i.lower(), -5.0);
    assert_eq!(i.upper(), 10.0);
  }

  #[test]
  fn rejects_non_finite_bounds() {
    assert!(Interval::new(f64::NAN, 1.0).is_err());
    assert!(Interval::new(f64::INFINITY, 1.0).is_err());
  }

  #[test]
  fn length_and_midpoint() {
    let i = iv(-1.0, 3.0);
    assert_eq!(i.length(), 4.0);
    assert_eq!(i.midpoint(), 1.0);
  }

  #[test]
  fn contains_respects_boundary_policy() {
    let i = iv(5.0, 5.0);
    assert!(i.contains(5.0, true, true));
    assert!(!i.contains(5.0, false, true));
    assert!(!i.contains(5.0, true, false));
  }

  #[test]
  fn adjacency_is_not_intersection_by_default() {
    let a = iv(0.0, 5.0);
    let b = iv(5.0, 10.0);
    assert!(!a.is_intersecting(&b, false));
    assert!(a.is_intersecting(&b, true));
    assert!(a.overlaps(&b, true));
  }

  #[test]
  fn get_intersection_examples() {
    let a = iv(0.0, 10.0);
    let b = iv(5.0, 15.0);
    assert_eq!(a.get_intersection(&b, false), Some(iv(5.0, 10.0)));

    let c = iv(0.0, 5.0);
    let d = iv(5.0, 10.0);
    assert_eq!(c.get_intersection(&d, false), None);
    assert_eq!(c.get_intersection(&d, true), Some(iv(5.0, 5.0)));
  }

  #[test]
  fn get_union_is_bounding_even_when_disjoint() {
    let a = iv(0.0, 1.0);
    let b = iv(10.0, 11.0);
    assert_eq!(a.get_union(&b), iv(0.0, 11.0));
  }

  #[test]
  fn from_intersection_requires_at_least_two() {
    assert!(Interval::from_intersection(&[iv(0.0, 1.0)]).is_err());
  }

  #[test]
  fn from_intersection_folds_and_detects_empty() {
    let xs = [iv(0.0, 10.0), iv(5.0, 15.0), iv(8.0, 20.0)];
    assert_eq!(Interval::from_intersection(&xs).unwrap(), Some(iv(8.0, 10.0)));

    let ys = [iv(0.0, 1.0), iv(5.0, 6.0)];
    assert_eq!(Interval::from_intersection(&ys).unwrap(), None);
  }

  #[test]
  fn from_union_requires_at_least_two() {
    assert!(Interval::from_union(&[iv(0.0, 1.0)]).is_err());
  }

  #[test]
  fn from_union_folds() {
    let xs = [iv(0.0, 1.0), iv(5.0, 6.0), iv(-2.0, 0.5)];
    assert_eq!(Interval::from_union(&xs).unwrap(), iv(-2.0, 6.0));
  }

  #[test]
  fn encloses_requires_both_endpoints_contained_and_length() {
    let outer = iv(0.0, 10.0);
    let inner = iv(2.0, 4.0);
    assert!(outer.encloses(&inner, true, true));
    assert!(!inner.encloses(&outer, true, true));
  }

  #[test]
  fn to_object_from_object_round_trips() {
    let i = iv(-3.5, 7.25);
    assert_eq!(Interval::from_object(i.to_object()).unwrap(), i);
  }

  #[test]
  fn to_tuple_from_tuple_round_trips() {
    let i = iv(-3.5, 7.25);
    assert_eq!(Interval::from_tuple(i.to_tuple()).unwrap(), i);
  }

  #[test]
  fn from_object_rejects_non_finite_bounds() {
    claims::assert_matches!(
      Interval::from_object(IntervalObject {
        lower: f64::NAN,
        upper: 1.0
      }),
      Err(Error::InvariantViolation { .. })
    );
  }

  proptest! {
    #[test]
    fn object_round_trip_holds_for_any_interval(a in -1e6..1e6, b in -1e6..1e6) {
      let i = Interval::new(a, b).unwrap();
      prop_assert_eq!(Interval::from_object(i.to_object()).unwrap(), i);
      prop_assert_eq!(Interval::from_tuple(i.to_tuple()).unwrap(), i);
    }
  }
}
