//! Heavy/light classification from the sorted sample.
//!
//! One run-length scan over the sorted sample, computed once per invocation
//! and frozen before the insertion phase starts. Lookups afterwards are
//! binary searches over an immutable sorted array, so routing during the
//! parallel insertion pass never touches shared mutable state.

/// The frozen classification table: every fingerprint whose sample run
/// length strictly exceeded the threshold, ascending, with its observed
/// sample count. Everything absent is light.
pub struct Classification {
    heavy_fps: Vec<u64>,
    heavy_sample_counts: Vec<usize>,
}

impl Classification {
    /// Scans a sorted sample for run boundaries. A run of length > threshold
    /// marks its fingerprint heavy.
    pub fn from_sorted_sample(sample: &[u64], threshold: usize) -> Self {
        debug_assert!(sample.windows(2).all(|w| w[0] <= w[1]));

        let mut heavy_fps = Vec::new();
        let mut heavy_sample_counts = Vec::new();

        let mut start = 0;
        while start < sample.len() {
            let fp = sample[start];
            let mut end = start + 1;
            while end < sample.len() && sample[end] == fp {
                end += 1;
            }

            if end - start > threshold {
                heavy_fps.push(fp);
                heavy_sample_counts.push(end - start);
            }

            start = end;
        }

        Self {
            heavy_fps,
            heavy_sample_counts,
        }
    }

    /// Index of `fp` among the heavy fingerprints, if it is heavy. The index
    /// doubles as the heavy bucket id.
    #[inline]
    pub fn heavy_index(&self, fp: u64) -> Option<usize> {
        self.heavy_fps.binary_search(&fp).ok()
    }

    #[inline]
    pub fn heavy_fps(&self) -> &[u64] {
        &self.heavy_fps
    }

    #[inline]
    pub fn heavy_sample_counts(&self) -> &[usize] {
        &self.heavy_sample_counts
    }

    #[inline]
    pub fn num_heavy(&self) -> usize {
        self.heavy_fps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sample_has_no_heavy_keys() {
        let c = Classification::from_sorted_sample(&[], 3);
        assert_eq!(c.num_heavy(), 0);
    }

    #[test]
    fn run_length_must_strictly_exceed_threshold() {
        // Runs: 5 x3, 9 x4.
        let sample = [5, 5, 5, 9, 9, 9, 9];

        let c = Classification::from_sorted_sample(&sample, 3);
        assert_eq!(c.heavy_fps(), &[9]);
        assert_eq!(c.heavy_sample_counts(), &[4]);
        assert_eq!(c.heavy_index(9), Some(0));
        assert_eq!(c.heavy_index(5), None);
    }

    #[test]
    fn runs_at_sample_edges_are_measured() {
        // Heavy run at the very start and very end.
        let sample = [1, 1, 1, 1, 2, 3, 3, 3, 3, 3];

        let c = Classification::from_sorted_sample(&sample, 3);
        assert_eq!(c.heavy_fps(), &[1, 3]);
        assert_eq!(c.heavy_sample_counts(), &[4, 5]);
    }

    #[test]
    fn heavy_fingerprints_stay_sorted() {
        let sample = [2, 2, 2, 7, 7, 7, 40, 40, 40, u64::MAX, u64::MAX, u64::MAX];

        let c = Classification::from_sorted_sample(&sample, 2);
        let fps = c.heavy_fps();
        assert!(fps.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(fps.len(), 4);
    }

    #[test]
    fn threshold_zero_makes_every_sampled_key_heavy() {
        let sample = [1, 2, 3];
        let c = Classification::from_sorted_sample(&sample, 0);
        assert_eq!(c.num_heavy(), 3);
    }
}
