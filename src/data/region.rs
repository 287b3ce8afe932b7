use std::hash::{Hash, Hasher};

use crate::data::Interval;
use crate::Error;

/// An ordered tuple of `d` [`Interval`] factors plus a stable identifier.
///
/// Equality is defined on the identifier, not on geometry — two `Region`s
/// with different ids are never equal, even if their factors coincide.
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct Region {
  id: String,
  factors: Vec<Interval>,
}

impl PartialEq for Region {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}
impl Eq for Region {}

impl Hash for Region {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

fn require_same_dimension(a: &Region, b: &Region) -> Result<(), Error> {
  if a.dimension() != b.dimension() {
    Err(Error::DimensionMismatch {
      expected: a.dimension(),
      found: b.dimension(),
    })
  } else {
    Ok(())
  }
}

impl Region {
  /// Construct a `Region` from its per-dimension factors and a stable id.
  /// `factors` must be non-empty — dimension `d >= 1`.
  pub fn new(factors: Vec<Interval>, id: impl Into<String>) -> Result<Region, Error> {
    if factors.is_empty() {
      return Err(Error::InvariantViolation {
        detail: "a Region must have at least one dimension".to_string(),
      });
    }
    Ok(Region {
      id: id.into(),
      factors,
    })
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn dimension(&self) -> usize {
    self.factors.len()
  }

  pub fn factors(&self) -> &[Interval] {
    &self.factors
  }

  /// Returns the factor on `dim`. Panics if `dim` is out of range — callers
  /// needing a checked variant should compare against `dimension()` first
  /// (this mirrors slice indexing, not a validated public entry point).
  pub fn project(&self, dim: usize) -> Interval {
    self.factors[dim]
  }

  pub fn contains(&self, point: &[f64], inc_lower: bool, inc_upper: bool) -> bool {
    if point.len() != self.dimension() {
      return false;
    }
    self
      .factors
      .iter()
      .zip(point)
      .all(|(factor, &v)| factor.contains(v, inc_lower, inc_upper))
  }

  pub fn encloses(&self, that: &Region, inc_lower: bool, inc_upper: bool) -> Result<bool, Error> {
    require_same_dimension(self, that)?;
    Ok(
      self
        .factors
        .iter()
        .zip(&that.factors)
        .all(|(a, b)| a.encloses(b, inc_lower, inc_upper)),
    )
  }

  pub fn is_intersecting(&self, that: &Region, inc_bounds: bool) -> Result<bool, Error> {
    require_same_dimension(self, that)?;
    Ok(
      self
        .factors
        .iter()
        .zip(&that.factors)
        .all(|(a, b)| a.is_intersecting(b, inc_bounds)),
    )
  }

  /// True iff every factor except `skip_dim` intersects. Used by
  /// [`crate::algorithms::graph::GraphBuilder`] to confirm a sweep's
  /// candidate pair on the dimensions the sweep axis didn't already cover.
  pub(crate) fn is_intersecting_excluding(
    &self,
    that: &Region,
    skip_dim: usize,
    inc_bounds: bool,
  ) -> Result<bool, Error> {
    require_same_dimension(self, that)?;
    Ok(
      self
        .factors
        .iter()
        .zip(&that.factors)
        .enumerate()
        .filter(|(dim, _)| *dim != skip_dim)
        .all(|(_, (a, b))| a.is_intersecting(b, inc_bounds)),
    )
  }

  /// The intersection `Region` of `self` and `that`, or `None` if they don't
  /// intersect in every dimension. The result's id is a deterministic
  /// function of the two operand ids (sorted, joined), so repeated calls on
  /// the same pair return an equal identifier.
  pub fn intersect(&self, that: &Region, inc_bounds: bool) -> Result<Option<Region>, Error> {
    require_same_dimension(self, that)?;
    let mut factors = Vec::with_capacity(self.dimension());
    for (a, b) in self.factors.iter().zip(&that.factors) {
      match a.get_intersection(b, inc_bounds) {
        Some(i) => factors.push(i),
        None => return Ok(None),
      }
    }
    Ok(Some(Region {
      id: intersection_id(&self.id, &that.id),
      factors,
    }))
  }

  /// The bounding `Region` of `self` and `that` — per-dimension union.
  pub fn union(&self, that: &Region) -> Result<Region, Error> {
    require_same_dimension(self, that)?;
    let factors = self
      .factors
      .iter()
      .zip(&that.factors)
      .map(|(a, b)| a.get_union(b))
      .collect();
    Ok(Region {
      id: intersection_id(&self.id, &that.id),
      factors,
    })
  }

  /// The full boundary representation — `{id, factors: [...]}`, each factor
  /// an `{lower, upper}` pair.
  pub fn to_object(&self) -> RegionObject {
    RegionObject {
      id: self.id.clone(),
      factors: self.factors.iter().map(Interval::to_tuple).collect(),
    }
  }

  /// Inverse of [`Region::to_object`].
  pub fn from_object(object: RegionObject) -> Result<Region, Error> {
    let factors = object
      .factors
      .into_iter()
      .map(Interval::from_tuple)
      .collect::<Result<Vec<_>, _>>()?;
    Region::new(factors, object.id)
  }

  /// The compact boundary representation — `(id, [(lower, upper), ...])`.
  pub fn to_tuple(&self) -> (String, Vec<(f64, f64)>) {
    (
      self.id.clone(),
      self.factors.iter().map(Interval::to_tuple).collect(),
    )
  }

  /// Inverse of [`Region::to_tuple`].
  pub fn from_tuple(tuple: (String, Vec<(f64, f64)>)) -> Result<Region, Error> {
    let factors = tuple
      .1
      .into_iter()
      .map(Interval::from_tuple)
      .collect::<Result<Vec<_>, _>>()?;
    Region::new(factors, tuple.0)
  }
}

/// The `{id, factors: [...]}` boundary representation of a [`Region`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegionObject {
  pub id: String,
  pub factors: Vec<(f64, f64)>,
}

fn intersection_id(a: &str, b: &str) -> String {
  if a <= b {
    format!("{a}\u{2229}{b}")
  } else {
    format!("{b}\u{2229}{a}")
  }
}
