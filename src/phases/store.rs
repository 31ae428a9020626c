//! The bucket store and the lock-free insertion pass.
//!
//! Slots hold record indices rather than record values. `usize::MAX` is the
//! empty sentinel, and since a record index is always `< n` the sentinel can
//! never collide with legitimate data. All slot arrays are owned by the
//! store, so they are released on every exit path, including a failed
//! insertion.
//!
//! Routing state (the sorted heavy fingerprint array and the range
//! arithmetic) is frozen before the first insert; insertion races only on
//! individual slots, via compare-and-swap, with the probe count bounded by
//! the bucket capacity.

use crate::error::{BucketId, SemisortError};
use crate::phases::capacity::CapacityModel;
use crate::phases::classify::Classification;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const EMPTY_SLOT: usize = usize::MAX;

/// The light hash range a fingerprint falls into: a fixed partition of the
/// 64-bit fingerprint space into `num_ranges` equal intervals.
#[inline]
pub fn range_of(fp: u64, num_ranges: usize) -> usize {
    ((fp as u128 * num_ranges as u128) >> 64) as usize
}

/// A fixed-capacity slot array. Capacity never changes after allocation.
pub struct SlotArray {
    slots: Box<[AtomicUsize]>,
    /// Probe start hint. Purely an optimization: correctness only relies on
    /// the CAS loop visiting every slot at most once.
    cursor: AtomicUsize,
}

impl SlotArray {
    fn allocate(capacity: usize) -> Result<Self, SemisortError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || AtomicUsize::new(EMPTY_SLOT));

        Ok(Self {
            slots: slots.into_boxed_slice(),
            cursor: AtomicUsize::new(0),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Claims an empty slot for `record` by linear-probe CAS against the
    /// empty sentinel, wrapping once around the array. Returns false iff the
    /// bucket is full: slots never go back to empty, so observing every slot
    /// occupied is conclusive.
    pub fn insert(&self, record: usize) -> bool {
        debug_assert_ne!(record, EMPTY_SLOT);

        let capacity = self.slots.len();
        let mut idx = self.cursor.load(Ordering::Relaxed);

        for _ in 0..capacity {
            if idx >= capacity {
                idx = 0;
            }

            let slot = &self.slots[idx];
            if slot.load(Ordering::Relaxed) == EMPTY_SLOT
                && slot
                    .compare_exchange(EMPTY_SLOT, record, Ordering::Relaxed, Ordering::Relaxed)
                    .is_ok()
            {
                self.cursor.store(idx + 1, Ordering::Relaxed);
                return true;
            }

            idx += 1;
        }

        false
    }

    /// Occupied record indices, in slot order. Only meaningful after the
    /// insertion phase has fully joined.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .filter(|&record| record != EMPTY_SLOT)
    }
}

/// One bucket per heavy fingerprint (ascending fingerprint order) plus one
/// bucket per light hash range (ascending range id).
pub struct BucketStore {
    heavy_fps: Vec<u64>,
    heavy: Vec<SlotArray>,
    light: Vec<SlotArray>,
}

impl BucketStore {
    /// Allocates every bucket up front from the sizing model. Nothing may be
    /// inserted before this returns, and no capacity changes afterwards.
    pub fn allocate(
        classification: &Classification,
        light_counts: &[usize],
        model: &CapacityModel,
    ) -> Result<Self, SemisortError> {
        let mut heavy = Vec::new();
        heavy.try_reserve_exact(classification.num_heavy())?;
        for &s in classification.heavy_sample_counts() {
            heavy.push(SlotArray::allocate(model.capacity(s))?);
        }

        let mut light = Vec::new();
        light.try_reserve_exact(light_counts.len())?;
        for &s in light_counts {
            light.push(SlotArray::allocate(model.capacity(s))?);
        }

        Ok(Self {
            heavy_fps: classification.heavy_fps().to_vec(),
            heavy,
            light,
        })
    }

    #[inline]
    fn target(&self, fp: u64) -> (&SlotArray, BucketId) {
        match self.heavy_fps.binary_search(&fp) {
            Ok(i) => (&self.heavy[i], BucketId::Heavy(fp)),
            Err(_) => {
                let range = range_of(fp, self.light.len());
                (&self.light[range], BucketId::Light(range))
            }
        }
    }

    /// Routes one record to its bucket and inserts it.
    #[inline]
    pub fn insert(&self, fp: u64, record: usize) -> Result<(), SemisortError> {
        let (bucket, id) = self.target(fp);

        if bucket.insert(record) {
            Ok(())
        } else {
            Err(SemisortError::CapacityExceeded {
                bucket: id,
                capacity: bucket.capacity(),
            })
        }
    }

    pub fn heavy_buckets(&self) -> &[SlotArray] {
        &self.heavy
    }

    pub fn light_buckets(&self) -> &[SlotArray] {
        &self.light
    }

    #[cfg(feature = "work_profiles")]
    pub fn total_slots(&self) -> usize {
        self.heavy.iter().map(SlotArray::capacity).sum::<usize>()
            + self.light.iter().map(SlotArray::capacity).sum::<usize>()
    }
}

/// The insertion phase: one pass over all fingerprints, routing record `i`
/// by `fingerprints[i]`. A capacity violation short-circuits the rest of the
/// pass and surfaces as the typed error.
pub fn insert_all(
    store: &BucketStore,
    fingerprints: &[u64],
    parallel: bool,
) -> Result<(), SemisortError> {
    if parallel {
        fingerprints
            .par_iter()
            .enumerate()
            .try_for_each(|(record, &fp)| store.insert(fp, record))
    } else {
        fingerprints
            .iter()
            .enumerate()
            .try_for_each(|(record, &fp)| store.insert(fp, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn range_of_covers_and_orders_the_space() {
        let ranges = 65536;

        assert_eq!(range_of(0, ranges), 0);
        assert_eq!(range_of(u64::MAX, ranges), ranges - 1);

        let mut prev = 0;
        for fp in (0..u64::MAX - 1024).step_by(1 << 50) {
            let r = range_of(fp, ranges);
            assert!(r >= prev && r < ranges);
            prev = r;
        }
    }

    #[test]
    fn slot_array_fills_to_capacity_then_rejects() {
        let bucket = SlotArray::allocate(4).unwrap();

        for record in 0..4 {
            assert!(bucket.insert(record));
        }
        assert!(!bucket.insert(4));

        let mut occupied: Vec<usize> = bucket.occupied().collect();
        occupied.sort_unstable();
        assert_eq!(occupied, vec![0, 1, 2, 3]);
    }

    #[test]
    fn concurrent_insertion_loses_nothing() {
        let n = 50_000;
        let bucket = SlotArray::allocate(n).unwrap();

        (0..n)
            .into_par_iter()
            .for_each(|record| assert!(bucket.insert(record)));

        let mut occupied: Vec<usize> = bucket.occupied().collect();
        occupied.sort_unstable();
        assert_eq!(occupied, (0..n).collect::<Vec<usize>>());
    }

    #[test]
    fn zero_capacity_bucket_rejects_immediately() {
        let bucket = SlotArray::allocate(0).unwrap();
        assert!(!bucket.insert(0));
    }
}
