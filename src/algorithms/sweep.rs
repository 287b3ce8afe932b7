use std::collections::HashMap;

use crate::algorithms::timeline::{RegionEvtKind, Timeline};
use crate::data::{Region, RegionSet};
use crate::Error;

/// The set of regions whose `Begin` has fired and whose `End` has not, at a
/// given point in the sweep, keyed by region identifier.
pub type ActiveSet<'a> = HashMap<&'a str, &'a Region>;

/// Callbacks invoked by [`SweepDriver`] as it walks a [`Timeline`].
///
/// This is the one place in the sweep where dynamic dispatch over behaviour
/// is warranted — everything else in the driver is a fixed, generic
/// iteration. Observers that need to retain a region past the lifetime of a
/// callback should clone it.
pub trait SweepObserver {
  /// What `on_done` hands back to the driver's caller.
  type Output;

  /// Called once, before any region event.
  fn on_init(&mut self, dimension: usize);

  /// Called for every region already active when `incoming`'s `Begin`
  /// fires, once per active region, before `incoming` itself is inserted
  /// into the active set.
  fn on_candidate(&mut self, active: &Region, incoming: &Region) -> Result<(), Error>;

  /// Called when `region` becomes active, after `on_candidate` has been
  /// dispatched against every region already active. `active_set` contains
  /// every region whose Begin has fired and End has not — including
  /// `region` itself, already inserted.
  fn on_begin(&mut self, region: &Region, active_set: &ActiveSet<'_>);

  /// Called when `region` becomes inactive, invoked *after* `region` has
  /// been removed from `active_set` — implementations should not rely on
  /// its presence there.
  fn on_end(&mut self, region: &Region, active_set: &ActiveSet<'_>);

  /// Called once, after the `Done` event. Returns the observer's result.
  fn on_done(&mut self) -> Self::Output;
}

/// Generic one-pass sweep: walks a [`Timeline`], maintains the active set,
/// and dispatches to a [`SweepObserver`].
///
/// The active set is keyed by region identifier with O(1) insertion and
/// removal; no ordering within it is required since every active region is
/// a candidate against the incoming one.
pub struct SweepDriver;

impl SweepDriver {
  /// Run the sweep over `regions` on `sweep_dim`, dispatching to `observer`.
  pub fn run<O: SweepObserver>(
    regions: &RegionSet,
    sweep_dim: usize,
    observer: &mut O,
  ) -> Result<O::Output, Error> {
    let timeline = Timeline::new(regions)?;
    let events = timeline.events(sweep_dim)?;

    let mut active: ActiveSet<'_> = HashMap::new();

    for event in &events {
      match event.kind() {
        RegionEvtKind::Init => observer.on_init(sweep_dim),
        RegionEvtKind::Begin => {
          let region = event.context();
          for &other in active.values() {
            observer.on_candidate(other, region)?;
          }
          active.insert(region.id(), region);
          observer.on_begin(region, &active);
        }
        RegionEvtKind::End => {
          let region = event.context();
          active.remove(region.id());
          observer.on_end(region, &active);
        }
        RegionEvtKind::Done => {}
      }
    }
    Ok(observer.on_done())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Interval;
  use crate::testing::strategies::arb_region_set;
  use proptest::prelude::*;
  use test_strategy::proptest;

  /// Counts `on_candidate` invocations; builds nothing else.
  struct CandidateCounter {
    count: usize,
  }

  impl SweepObserver for CandidateCounter {
    type Output = usize;

    fn on_init(&mut self, _dimension: usize) {
      self.count = 0;
    }

    fn on_candidate(&mut self, _active: &Region, _incoming: &Region) -> Result<(), Error> {
      self.count += 1;
      Ok(())
    }

    fn on_begin(&mut self, _region: &Region, _active_set: &ActiveSet<'_>) {}

    fn on_end(&mut self, _region: &Region, _active_set: &ActiveSet<'_>) {}

    fn on_done(&mut self) -> usize {
      self.count
    }
  }

  fn true_overlap_count(rs: &RegionSet) -> usize {
    let mut count = 0;
    for a in rs {
      for b in rs {
        if a.id() < b.id() && a.is_intersecting(b, false).unwrap() {
          count += 1;
        }
      }
    }
    count
  }

  /// Property 7 (spec.md §8): in a 1-D sweep, the number of candidate-pair
  /// invocations equals the number of true overlapping pairs.
  #[proptest]
  fn candidate_count_equals_true_overlap_count_1d(
    #[strategy(arb_region_set(1, 2..16, 0.0..200.0, 0.02..0.3))] rs: RegionSet,
  ) {
    let mut counter = CandidateCounter { count: 0 };
    let reported = SweepDriver::run(&rs, 0, &mut counter).unwrap();
    prop_assert_eq!(reported, true_overlap_count(&rs));
  }

  fn region(id: &str, bounds: &[(f64, f64)]) -> Region {
    let factors = bounds
      .iter()
      .map(|&(a, b)| Interval::new(a, b).unwrap())
      .collect();
    Region::new(factors, id).unwrap()
  }

  #[test]
  fn active_set_contains_region_during_its_own_on_begin() {
    struct Probe {
      seen: bool,
    }
    impl SweepObserver for Probe {
      type Output = bool;
      fn on_init(&mut self, _dimension: usize) {}
      fn on_candidate(&mut self, _active: &Region, _incoming: &Region) -> Result<(), Error> {
        Ok(())
      }
      fn on_begin(&mut self, region: &Region, active_set: &ActiveSet<'_>) {
        self.seen = active_set.contains_key(region.id());
      }
      fn on_end(&mut self, region: &Region, active_set: &ActiveSet<'_>) {
        self.seen = self.seen && !active_set.contains_key(region.id());
      }
      fn on_done(&mut self) -> bool {
        self.seen
      }
    }
    let mut rs = RegionSet::new(1).unwrap();
    rs.add(region("a", &[(0.0, 10.0)])).unwrap();
    let mut probe = Probe { seen: false };
    assert!(SweepDriver::run(&rs, 0, &mut probe).unwrap());
  }
}
