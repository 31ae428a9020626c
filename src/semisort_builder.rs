use crate::engine::Engine;
use crate::error::SemisortError;
use crate::sequential::sequential_semisort_seeded;
use crate::tuning::{LogThreshold, TailTuning, ThresholdPolicy};
use crate::Keyed;
use std::time::{SystemTime, UNIX_EPOCH};

/// Inputs at or below this size skip the engine entirely and take the
/// sequential baseline; the log-based threshold math has nothing useful to
/// say about them.
const SEQUENTIAL_CUTOFF: usize = 128;

pub struct SemisortBuilder<'a, T> {
    data: &'a mut [T],
    parallel: bool,
    seed: Option<u64>,
    tuning: TailTuning,
    num_light_ranges: Option<usize>,
    threshold: &'a (dyn ThresholdPolicy + Send + Sync),
}

impl<'a, T> SemisortBuilder<'a, T>
where
    T: Keyed + Copy + Send + Sync,
{
    pub(crate) fn new(data: &'a mut [T]) -> Self {
        Self {
            data,
            parallel: true,
            seed: None,
            tuning: TailTuning::default(),
            num_light_ranges: None,
            threshold: &LogThreshold,
        }
    }

    /// Pins the run seed. The default is wall-clock derived, so pin this for
    /// reproducible runs; every random decision in the pipeline flows from
    /// this one value.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);

        self
    }

    /// Replaces both tail-bound constants at once.
    pub fn with_tuning(mut self, tuning: TailTuning) -> Self {
        self.tuning = tuning;

        self
    }

    /// Safety multiplier on every bucket capacity (alpha >= 1 recommended).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.tuning.alpha = alpha;

        self
    }

    /// Chernoff shape constant of the tail bound (`c` in the sizing formula).
    pub fn with_shape(mut self, shape: f64) -> Self {
        self.tuning.shape = shape;

        self
    }

    /// Fixed number of light hash ranges, overriding the n-derived default.
    pub fn with_light_ranges(mut self, num_light_ranges: usize) -> Self {
        self.num_light_ranges = Some(num_light_ranges);

        self
    }

    /// Overrides the log2(n) heavy-key threshold.
    pub fn with_threshold_policy(mut self, threshold: &'a (dyn ThresholdPolicy + Send + Sync)) -> Self {
        self.threshold = threshold;

        self
    }

    /// Runs the identical phase sequence with or without rayon. Sampling
    /// decisions do not depend on this, only throughput and slot-claim order.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;

        self
    }

    pub fn sort(self) -> Result<(), SemisortError> {
        // By definition, this is already semisorted.
        if self.data.len() <= 1 {
            return Ok(());
        }

        let seed = match self.seed {
            Some(seed) => seed,
            None => time_seed(),
        };

        if self.data.len() <= SEQUENTIAL_CUTOFF {
            sequential_semisort_seeded(self.data, seed);
            return Ok(());
        }

        let engine = Engine::new(
            self.parallel,
            seed,
            self.tuning,
            self.num_light_ranges,
            self.threshold,
        );

        engine.semisort(self.data)
    }
}

fn time_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64,
        Err(_) => 0x5ee_d5ee_d5ee,
    }
}
