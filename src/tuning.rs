/// Constants of the balls-into-bins tail bound used to size buckets.
///
/// `alpha` is a safety multiplier on the whole bound; `shape` is the
/// Chernoff-bound shape constant (`c` in the sizing formula). Larger values
/// trade memory for a lower residual overflow probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailTuning {
    pub alpha: f64,
    pub shape: f64,
}

impl TailTuning {
    /// Conservative defaults. Overflow is effectively impossible for inputs
    /// large enough to leave the sequential fast path.
    pub const CHERNOFF: TailTuning = TailTuning {
        alpha: 2.0,
        shape: 2.0,
    };

    /// Tighter constants that allocate roughly half the slack of
    /// [`TailTuning::CHERNOFF`], at a higher (still small) overflow risk.
    pub const TIGHT: TailTuning = TailTuning {
        alpha: 1.1,
        shape: 0.8664,
    };
}

impl Default for TailTuning {
    fn default() -> Self {
        TailTuning::CHERNOFF
    }
}

/// ThresholdPolicy decides how many sample occurrences make a key heavy.
///
/// A fingerprint whose run length in the sorted sample strictly exceeds
/// `heavy_threshold(n)` gets a dedicated bucket.
pub trait ThresholdPolicy {
    fn heavy_threshold(&self, n: usize) -> usize;
}

/// The default policy: t = max(1, floor(log2 n)).
///
/// With the sample rate at 1/log2(n), observing more than log2(n) sample hits
/// implies a true population count around log2(n)^2 or more, enough to pay
/// for an exclusively-owned bucket.
pub struct LogThreshold;

impl ThresholdPolicy for LogThreshold {
    #[inline]
    fn heavy_threshold(&self, n: usize) -> usize {
        match n {
            0 | 1 => 1,
            _ => (n.ilog2() as usize).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_threshold_never_degenerate() {
        let policy = LogThreshold;

        assert_eq!(policy.heavy_threshold(0), 1);
        assert_eq!(policy.heavy_threshold(1), 1);
        assert_eq!(policy.heavy_threshold(2), 1);
        assert_eq!(policy.heavy_threshold(1024), 10);
        assert_eq!(policy.heavy_threshold(10_000_000), 23);
    }

    #[test]
    fn default_tuning_is_chernoff() {
        assert_eq!(TailTuning::default(), TailTuning::CHERNOFF);
    }
}
