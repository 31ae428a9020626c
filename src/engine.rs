//! Phase orchestration for the parallel engine.
//!
//! Each phase is a fork-join pass with an implicit barrier at its end.
//! Ordering is load-bearing: classification and sizing complete before the
//! store is allocated, the store's routing tables are frozen before the
//! first record is inserted, and insertion fully joins before any bucket is
//! read for sorting or combining.

use crate::error::SemisortError;
use crate::phases::capacity::{light_sample_counts, CapacityModel};
use crate::phases::classify::Classification;
use crate::phases::combine::combine;
use crate::phases::fingerprint::fingerprints_and_sample;
use crate::phases::store::{insert_all, BucketStore};
use crate::tuning::ThresholdPolicy;
use crate::{Keyed, TailTuning};
use rayon::prelude::*;

/// Hard cap on the light range count: the original 2^16 partition of the
/// fingerprint space.
const MAX_LIGHT_RANGES: usize = 65536;

/// O(n / log2(n)^2) light ranges, so an average range holds about log2(n)^2
/// records, the same magnitude the heavy threshold implies.
fn default_light_ranges(n: usize) -> usize {
    let lg = n.max(2).ilog2() as usize;

    (n / (lg * lg).max(1)).clamp(16, MAX_LIGHT_RANGES)
}

pub struct Engine<'a> {
    parallel: bool,
    seed: u64,
    tuning: TailTuning,
    num_light_ranges: Option<usize>,
    threshold: &'a (dyn ThresholdPolicy + Send + Sync),
}

impl<'a> Engine<'a> {
    pub fn new(
        parallel: bool,
        seed: u64,
        tuning: TailTuning,
        num_light_ranges: Option<usize>,
        threshold: &'a (dyn ThresholdPolicy + Send + Sync),
    ) -> Self {
        Self {
            parallel,
            seed,
            tuning,
            num_light_ranges,
            threshold,
        }
    }

    pub fn semisort<T>(&self, records: &mut [T]) -> Result<(), SemisortError>
    where
        T: Keyed + Copy + Send + Sync,
    {
        let n = records.len();
        debug_assert!(n > 1);

        // Inverse sampling rate: draw one fingerprint in floor(log2 n).
        let rate = (n.ilog2() as usize).max(1);

        let (fingerprints, mut sample) =
            fingerprints_and_sample(records, self.seed, rate, self.parallel);

        if self.parallel {
            sample.par_sort_unstable();
        } else {
            sample.sort_unstable();
        }

        let threshold = self.threshold.heavy_threshold(n);
        let classification = Classification::from_sorted_sample(&sample, threshold);

        let num_ranges = self
            .num_light_ranges
            .unwrap_or_else(|| default_light_ranges(n))
            .max(1);
        let model = CapacityModel::new(n, self.tuning, rate);
        let light_counts = light_sample_counts(&sample, &classification, num_ranges);

        #[cfg(feature = "work_profiles")]
        let sample_len = sample.len();
        drop(sample);

        let store = BucketStore::allocate(&classification, &light_counts, &model)?;

        #[cfg(feature = "work_profiles")]
        println!(
            "SEMISORT: n={} sample={} heavy={} ranges={} slots={}",
            n,
            sample_len,
            classification.num_heavy(),
            num_ranges,
            store.total_slots()
        );

        insert_all(&store, &fingerprints, self.parallel)?;
        drop(fingerprints);

        let permutation = combine(records, &store, self.parallel);
        debug_assert_eq!(permutation.len(), n);

        apply_permutation(records, &permutation)
    }
}

/// Rewrites `records` as `records[permutation[0]], records[permutation[1]], ..`
/// through one scratch buffer.
fn apply_permutation<T>(records: &mut [T], permutation: &[usize]) -> Result<(), SemisortError>
where
    T: Copy,
{
    let mut scratch = Vec::new();
    scratch.try_reserve_exact(records.len())?;
    scratch.extend(permutation.iter().map(|&i| records[i]));

    records.copy_from_slice(&scratch);

    Ok(())
}
