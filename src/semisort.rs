use crate::error::SemisortError;
use crate::semisort_builder::SemisortBuilder;
use crate::Keyed;

pub trait Semisort<T> {
    /// semisort permutes the collection in place so that all records sharing
    /// a key become contiguous, based on the `semisort::Keyed` implementation
    /// of `T`. Only grouping is guaranteed; the order between distinct key
    /// groups is unspecified and may differ run to run.
    ///
    /// ```
    /// use semisort::Semisort;
    ///
    /// let mut values = vec![2u32, 9, 2, 9, 2];
    /// values.semisort().unwrap();
    ///
    /// assert!(values == [2, 2, 2, 9, 9] || values == [9, 9, 2, 2, 2]);
    /// ```
    fn semisort(&mut self) -> Result<(), SemisortError>;

    fn semisort_builder(&'_ mut self) -> SemisortBuilder<'_, T>;
}

impl<T> Semisort<T> for Vec<T>
where
    T: Keyed + Copy + Send + Sync,
{
    fn semisort(&mut self) -> Result<(), SemisortError> {
        self.semisort_builder().sort()
    }

    fn semisort_builder(&'_ mut self) -> SemisortBuilder<'_, T> {
        SemisortBuilder::new(self)
    }
}

impl<T> Semisort<T> for [T]
where
    T: Keyed + Copy + Send + Sync,
{
    fn semisort(&mut self) -> Result<(), SemisortError> {
        self.semisort_builder().sort()
    }

    fn semisort_builder(&'_ mut self) -> SemisortBuilder<'_, T> {
        SemisortBuilder::new(self)
    }
}
