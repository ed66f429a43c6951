use crate::summary::core::ReadRecord;

/// A sink for parsed reads whose partial results can be combined.
///
/// Implementations must make `merge_with` behave as if every record seen by
/// `other` had been passed to `self.accept`, in any order.
pub trait StatsCollector: Send + 'static {
    /// Fold one accepted read into the running statistics
    fn accept(&mut self, record: &ReadRecord);

    /// Absorb the statistics gathered by another collector of the same type
    fn merge_with(&mut self, other: Self)
    where
        Self: Sized;
}
