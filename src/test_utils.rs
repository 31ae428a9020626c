use crate::Keyed;
use block_pseudorand::block_rand;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

/// Asserts the grouping property: every distinct key forms exactly one
/// contiguous run.
pub fn assert_grouped<T>(records: &[T])
where
    T: Keyed,
    T::Key: Debug,
{
    let mut seen: HashSet<&T::Key> = HashSet::new();
    let mut prev: Option<&T::Key> = None;

    for record in records {
        let key = record.key();

        if prev != Some(key) {
            assert!(
                seen.insert(key),
                "key {key:?} appears in more than one run"
            );
            prev = Some(key);
        }
    }
}

/// Asserts the permutation property: `actual` holds exactly the records of
/// `expected`, compared as multisets of keys.
pub fn assert_same_multiset<T>(expected: &[T], actual: &[T])
where
    T: Keyed,
    T::Key: Debug,
{
    assert_eq!(expected.len(), actual.len());

    let mut counts: HashMap<&T::Key, isize> = HashMap::new();
    for record in expected {
        *counts.entry(record.key()).or_default() += 1;
    }
    for record in actual {
        *counts.entry(record.key()).or_default() -= 1;
    }

    for (key, count) in counts {
        assert_eq!(count, 0, "key {key:?} count drifted by {count}");
    }
}

/// Bulk random keys drawn from a bounded domain, so duplication is
/// controlled by `domain` relative to `n`.
pub fn gen_keys(n: usize, domain: u64) -> Vec<u64> {
    block_rand::<u64>(n)
        .into_iter()
        .map(|v| v % domain)
        .collect()
}
