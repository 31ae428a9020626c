//! Key hashing and sample drawing, fused into one pass over the input.
//!
//! Every record's key is mapped to a 64-bit fingerprint with a seeded ahash
//! state, and in the same pass each fingerprint is included in the sample
//! independently with probability 1/rate. Sampling decisions come from a
//! small per-chunk generator seeded from (run seed, chunk index), so the
//! draw is reproducible and contention-free no matter how many workers rayon
//! schedules, and identical between the parallel and single-threaded paths.

use crate::Keyed;
use ahash::RandomState;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::hash::BuildHasher;

/// Chunk granularity for the fused hash + draw pass. Fixed (not derived from
/// the worker count) so sampling is deterministic for a given seed.
const DRAW_CHUNK: usize = 4096;

fn hasher_for(seed: u64) -> RandomState {
    RandomState::with_seeds(
        seed,
        seed ^ 0x9e37_79b9_7f4a_7c15,
        seed.rotate_left(17),
        seed.rotate_right(23),
    )
}

fn chunk_rng(seed: u64, chunk: usize) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ (chunk as u64).wrapping_mul(0x2545_f491_4f6c_dd1d))
}

fn hash_chunk<T>(
    hasher: &RandomState,
    records: &[T],
    out: &mut [u64],
    rng: &mut SmallRng,
    rate: usize,
) -> Vec<u64>
where
    T: Keyed,
{
    let mut picks = Vec::new();

    for (record, slot) in records.iter().zip(out.iter_mut()) {
        let fp = hasher.hash_one(record.key());
        *slot = fp;

        if rng.gen_range(0..rate) == 0 {
            picks.push(fp);
        }
    }

    picks
}

/// Returns every record's fingerprint (input order) plus the unsorted sample.
///
/// `rate` is the inverse sampling probability, normally floor(log2 n); a rate
/// of 1 samples everything.
pub fn fingerprints_and_sample<T>(
    records: &[T],
    seed: u64,
    rate: usize,
    parallel: bool,
) -> (Vec<u64>, Vec<u64>)
where
    T: Keyed + Send + Sync,
{
    debug_assert!(rate >= 1);

    let hasher = hasher_for(seed);
    let mut fingerprints = vec![0u64; records.len()];

    let picks: Vec<Vec<u64>> = if parallel {
        fingerprints
            .par_chunks_mut(DRAW_CHUNK)
            .zip(records.par_chunks(DRAW_CHUNK))
            .enumerate()
            .map(|(chunk, (out, records))| {
                let mut rng = chunk_rng(seed, chunk);
                hash_chunk(&hasher, records, out, &mut rng, rate)
            })
            .collect()
    } else {
        fingerprints
            .chunks_mut(DRAW_CHUNK)
            .zip(records.chunks(DRAW_CHUNK))
            .enumerate()
            .map(|(chunk, (out, records))| {
                let mut rng = chunk_rng(seed, chunk);
                hash_chunk(&hasher, records, out, &mut rng, rate)
            })
            .collect()
    };

    (fingerprints, picks.concat())
}
