use crate::Keyed;

macro_rules! self_keyed {
    ($($t:ty),*) => {
        $(
            impl Keyed for $t {
                type Key = $t;

                #[inline]
                fn key(&self) -> &$t {
                    self
                }
            }
        )*
    };
}

self_keyed!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);

impl<const N: usize> Keyed for [u8; N] {
    type Key = [u8; N];

    #[inline]
    fn key(&self) -> &[u8; N] {
        self
    }
}

impl Keyed for &str {
    type Key = str;

    #[inline]
    fn key(&self) -> &str {
        self
    }
}

/// Pairs group by their first element, so `(key, payload)` records work
/// without a custom impl.
impl<K, V> Keyed for (K, V)
where
    K: std::hash::Hash + Ord + Sync,
{
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.0
    }
}
