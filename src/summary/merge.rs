use super::collectors::{Accumulator, StatsCollector};

/// Fold per-file accumulators into one, in iteration order.
///
/// Totals, lengths and buckets add up, identifiers form a set union and
/// source names are concatenated. Returns `None` when given nothing.
pub fn merge<I>(accumulators: I) -> Option<Accumulator>
where
    I: IntoIterator<Item = Accumulator>,
{
    accumulators.into_iter().reduce(|mut merged, next| {
        merged.merge_with(next);
        merged
    })
}
