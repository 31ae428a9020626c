//! The sequential reference baseline.
//!
//! Groups records through an exact hash table instead of sampling and
//! bucketing: one pass collects the occurrence list of every key, a second
//! pass expands the lists back into a grouped sequence. Deterministic for a
//! fixed seed, used for correctness cross-checking and as the small-input
//! fallback of the builder.

use crate::Keyed;
use ahash::RandomState;
use std::collections::HashMap;

const DEFAULT_SEED: u64 = 0x5345_4d49_534f_5254;

/// Semisorts in place by exact key counting. No failure modes beyond
/// ordinary allocation; output group order follows the (seeded, fixed) hash
/// table iteration order.
pub fn sequential_semisort<T>(records: &mut [T])
where
    T: Keyed + Copy,
{
    sequential_semisort_seeded(records, DEFAULT_SEED);
}

pub(crate) fn sequential_semisort_seeded<T>(records: &mut [T], seed: u64)
where
    T: Keyed + Copy,
{
    if records.len() <= 1 {
        return;
    }

    let hasher = RandomState::with_seeds(
        seed,
        seed ^ 0x9e37_79b9_7f4a_7c15,
        seed.rotate_left(17),
        seed.rotate_right(23),
    );

    let mut groups: HashMap<&T::Key, Vec<usize>, RandomState> =
        HashMap::with_hasher(hasher);
    for (i, record) in records.iter().enumerate() {
        groups.entry(record.key()).or_default().push(i);
    }

    let mut scratch = Vec::with_capacity(records.len());
    for group in groups.into_values() {
        scratch.extend(group.into_iter().map(|i| records[i]));
    }

    records.copy_from_slice(&scratch);
}
