use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

/// Identity of a bucket in the store: either the dedicated bucket for one
/// heavy fingerprint, or the shared bucket for one light hash range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketId {
    Heavy(u64),
    Light(usize),
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketId::Heavy(fp) => write!(f, "heavy({fp:#018x})"),
            BucketId::Light(range) => write!(f, "light(range {range})"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SemisortError {
    /// A bucket's slot array was exhausted during insertion: the tail-bound
    /// sizing underestimated the true occupancy. Retrying the whole call with
    /// a larger `alpha` enlarges every bucket.
    #[error("bucket {bucket} exceeded its capacity of {capacity} slots")]
    CapacityExceeded { bucket: BucketId, capacity: usize },

    /// Allocating bucket storage failed.
    #[error("failed to allocate bucket storage")]
    AllocationFailed(#[from] TryReserveError),
}
