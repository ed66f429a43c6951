/// N50 of a set of read lengths: the length at which the running sum of the
/// lengths, taken longest first, first reaches half of `total_bases`.
///
/// Sorts `lengths` in place (descending, stable). Returns `None` for an
/// empty set.
pub fn n50(lengths: &mut [u64], total_bases: u64) -> Option<u64> {
    lengths.sort_by(|a, b| b.cmp(a));

    // running >= total / 2, without leaving integers
    let target = total_bases - total_bases / 2;
    let mut running: u64 = 0;
    for &len in lengths.iter() {
        running += len;
        if running >= target {
            return Some(len);
        }
    }
    None
}
