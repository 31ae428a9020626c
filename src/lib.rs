//! # semisort
//!
//! semisort is a randomized parallel semisort for keyed records: it produces a
//! permutation in which all records sharing a key are contiguous, without the
//! cost of a full comparison or radix sort. Grouping is the only guarantee;
//! the relative order of distinct key groups is unspecified.
//!
//! ## Usage
//!
//! In the simplest case, call `semisort()` on a `Vec<T>` or `[T]` where `T`
//! implements [`Keyed`]. For custom record types, implement `Keyed` yourself.
//!
//! ```
//! use semisort::Semisort;
//!
//! let mut values = vec![3u64, 1, 3, 2, 1, 3];
//! values.semisort().unwrap();
//! ```
//!
//! ### Implementing `Keyed`
//!
//! `Keyed` names the key a record is grouped by. The key must be hashable and
//! totally ordered (the order is only used as a tiebreak inside a shared
//! bucket, never exposed as an output guarantee).
//!
//! ```
//! use semisort::Keyed;
//!
//! #[derive(Clone, Copy)]
//! struct Edge {
//!     src: u32,
//!     dst: u32,
//! }
//!
//! impl Keyed for Edge {
//!     type Key = u32;
//!
//!     #[inline]
//!     fn key(&self) -> &u32 {
//!         &self.src
//!     }
//! }
//! ```
//!
//! ### Configuration
//!
//! The builder exposes the algorithm's tuning surface: the run seed, the
//! balls-into-bins tail-bound constants, the light hash-range count, and the
//! heavy-key threshold policy.
//!
//! ```
//! use semisort::Semisort;
//!
//! let mut values = vec![5u32; 1000];
//! values
//!     .semisort_builder()
//!     .with_seed(42)
//!     .with_parallel(false)
//!     .sort()
//!     .unwrap();
//! ```

#[cfg(test)]
mod test_utils;

mod engine;
mod error;
mod keyed;
mod keyed_impl;
mod phases;
mod semisort;
mod semisort_builder;
mod sequential;
mod tuning;

pub use error::{BucketId, SemisortError};
pub use keyed::Keyed;
pub use semisort::Semisort;
pub use semisort_builder::SemisortBuilder;
pub use sequential::sequential_semisort;
pub use tuning::{LogThreshold, TailTuning, ThresholdPolicy};
