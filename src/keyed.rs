use std::hash::Hash;

/// Keyed names the key a record is grouped by.
///
/// The key must be hashable (for fingerprinting) and totally ordered (as a
/// tiebreak when distinct keys share a hash-range bucket). Equal keys must
/// hash equally, which the `Hash`/`Eq` contract already guarantees.
pub trait Keyed {
    type Key: Hash + Ord + Sync + ?Sized;

    fn key(&self) -> &Self::Key;
}
