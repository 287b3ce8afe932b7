//! Strategies and generators used by property tests and benchmarks.
//!
//! Two flavors of randomness live here: [`proptest`] strategies for
//! exhaustive property testing, and an independent [`rand`]-driven
//! `random_region_set` for the benchmark suite, where a single
//! reproducible dataset per size is preferable to proptest's shrinking.

use rand::Rng;

use crate::data::{Interval, Region, RegionSet};
use crate::Error;


/// Generate `n` uniformly random regions inside `bounds`, sized as a random
/// fraction of `bounds`'s extent on each dimension — the fraction is drawn
/// from `[sizepc_range.project(dim).lower(), sizepc_range.project(dim).upper()]`,
/// e.g. a `sizepc_range` of `[0.1, 0.5]` on every dimension produces regions
/// spanning 10%-50% of the bounds on each axis, placed at a uniformly random
/// offset that keeps them fully inside `bounds`.
pub fn random_region_set<R: Rng + ?Sized>(
  rng: &mut R,
  bounds: &Region,
  n: usize,
  sizepc_range: &Region,
) -> Result<RegionSet, Error> {
  if sizepc_range.dimension() != bounds.dimension() {
    return Err(Error::DimensionMismatch {
      expected: bounds.dimension(),
      found: sizepc_range.dimension(),
    });
  }
  let mut set = RegionSet::with_bounds(bounds.clone());
  for i in 0..n {
    let mut factors = Vec::with_capacity(bounds.dimension());
    for dim in 0..bounds.dimension() {
      let extent = bounds.project(dim);
      let span = extent.length();
      let pc = sizepc_range.project(dim);
      let size = span * rng.gen_range(pc.lower()..=pc.upper());
      let lower = extent.lower() + rng.gen_range(0.0..=(span - size).max(0.0));
      factors.push(Interval::new(lower, lower + size)?);
    }
    set.add(Region::new(factors, format!("region-{i}"))?)?;
  }
  Ok(set)
}
