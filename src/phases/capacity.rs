//! Bucket capacity sizing from observed sample counts.
//!
//! Capacities come from a balls-into-bins tail bound: for a bucket with `s`
//! observed sample members, the true count is below
//! `s + c*log2(n) + sqrt(c^2*log2(n)^2 + 2*s*c*log2(n))` rescaled by the
//! inverse sample rate, except with the residual probability implied by the
//! Chernoff bound. `alpha` multiplies the whole bound as a safety margin.
//! Every bucket is sized before insertion begins; capacities are immutable
//! afterwards.

use crate::phases::classify::Classification;
use crate::phases::store::range_of;
use crate::TailTuning;

pub struct CapacityModel {
    alpha: f64,
    shape_log: f64,
    rate: f64,
    n: usize,
}

impl CapacityModel {
    pub fn new(n: usize, tuning: TailTuning, rate: usize) -> Self {
        Self {
            alpha: tuning.alpha,
            shape_log: tuning.shape * (n.max(2) as f64).log2(),
            rate: rate as f64,
            n,
        }
    }

    /// Slot capacity for a bucket with `s` sample members (`s = 0` gives the
    /// default size for ranges the sample never hit, on the order of
    /// alpha * 2c * log2(n)^2). Never below 1, never above n: a bucket can
    /// never be asked to hold more than every record.
    pub fn capacity(&self, s: usize) -> usize {
        let s = s as f64;
        let t = self.shape_log;
        let bound = self.alpha * (s + t + (t * t + 2.0 * s * t).sqrt()) * self.rate;

        (bound.ceil() as usize).clamp(1, self.n)
    }
}

/// Sample occupancy of every light hash range. Heavy runs are skipped so a
/// heavy fingerprint never inflates the range it hashes into.
pub fn light_sample_counts(
    sample: &[u64],
    classification: &Classification,
    num_ranges: usize,
) -> Vec<usize> {
    let mut counts = vec![0usize; num_ranges];

    let mut start = 0;
    while start < sample.len() {
        let fp = sample[start];
        let mut end = start + 1;
        while end < sample.len() && sample[end] == fp {
            end += 1;
        }

        if classification.heavy_index(fp).is_none() {
            counts[range_of(fp, num_ranges)] += end - start;
        }

        start = end;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(n: usize, rate: usize) -> CapacityModel {
        CapacityModel::new(n, TailTuning::default(), rate)
    }

    #[test]
    fn capacity_covers_rescaled_sample_count() {
        let n = 1 << 20;
        let m = model(n, 20);

        // alpha = 2 means at least twice the naive estimate s * rate.
        for s in [1usize, 5, 50, 500] {
            assert!(m.capacity(s) >= (2 * s * 20).min(n));
        }
    }

    #[test]
    fn capacity_is_monotonic_in_sample_count() {
        let m = model(1 << 24, 24);

        let mut prev = 0;
        for s in 0..200 {
            let cap = m.capacity(s);
            assert!(cap >= prev);
            prev = cap;
        }
    }

    #[test]
    fn zero_sample_default_is_positive_and_bounded() {
        let m = model(1 << 16, 16);
        let cap = m.capacity(0);

        assert!(cap >= 1);
        assert!(cap <= 1 << 16);
    }

    #[test]
    fn capacity_never_exceeds_n() {
        let n = 1000;
        let m = model(n, 9);

        assert_eq!(m.capacity(100_000), n);
    }

    #[test]
    fn tight_tuning_allocates_less() {
        let chernoff = CapacityModel::new(1 << 24, TailTuning::CHERNOFF, 24);
        let tight = CapacityModel::new(1 << 24, TailTuning::TIGHT, 24);

        assert!(tight.capacity(100) < chernoff.capacity(100));
    }

    #[test]
    fn light_counts_skip_heavy_runs() {
        let (a, b, c) = (1u64 << 62, 2u64 << 62, 3u64 << 62);

        // Run of four `a`s (heavy at threshold 3), two `b`s, one `c`.
        let sample = [a, a, a, a, b, b, c];
        let classification = Classification::from_sorted_sample(&sample, 3);

        let counts = light_sample_counts(&sample, &classification, 16);
        assert_eq!(counts.iter().sum::<usize>(), 3);
        assert_eq!(counts[range_of(b, 16)], 2);
        assert_eq!(counts[range_of(c, 16)], 1);
        assert_eq!(counts[range_of(a, 16)], 0);
    }
}
