//! Per-bucket local sort and final combination.
//!
//! Runs strictly after the insertion phase has joined. Light buckets are
//! sorted by key so distinct keys sharing a hash range come out grouped;
//! heavy buckets hold a single key and are emitted as-is. Buckets are
//! concatenated in a fixed order: heavy buckets by ascending fingerprint,
//! then light buckets by ascending range id. Downstream only relies on
//! grouping, but a deterministic order keeps single-threaded runs fully
//! reproducible.

use crate::phases::store::{BucketStore, SlotArray};
use crate::Keyed;
use rayon::prelude::*;

fn gather_heavy(store: &BucketStore, parallel: bool) -> Vec<Vec<usize>> {
    let buckets = store.heavy_buckets();

    if parallel {
        buckets.par_iter().map(|b| b.occupied().collect()).collect()
    } else {
        buckets.iter().map(|b| b.occupied().collect()).collect()
    }
}

fn gather_light<T>(records: &[T], store: &BucketStore, parallel: bool) -> Vec<Vec<usize>>
where
    T: Keyed + Sync,
{
    let sort_bucket = |bucket: &SlotArray| {
        let mut group: Vec<usize> = bucket.occupied().collect();
        group.sort_unstable_by(|&a, &b| records[a].key().cmp(records[b].key()));
        group
    };

    let buckets = store.light_buckets();

    if parallel {
        buckets.par_iter().map(sort_bucket).collect()
    } else {
        buckets.iter().map(sort_bucket).collect()
    }
}

/// Produces the semisorted permutation of record indices: every occupied
/// slot exactly once, grouped by key.
pub fn combine<T>(records: &[T], store: &BucketStore, parallel: bool) -> Vec<usize>
where
    T: Keyed + Sync,
{
    let heavy = gather_heavy(store, parallel);
    let light = gather_light(records, store, parallel);

    let mut permutation = Vec::with_capacity(records.len());
    for group in heavy.into_iter().chain(light) {
        permutation.extend(group);
    }

    permutation
}
