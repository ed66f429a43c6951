/// Row-level bookkeeping for one parsed input. None of these are errors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub accepted: u64,
    pub embedded_headers: u64,
    pub short_rows: u64,
    pub bad_lengths: u64,
}

impl ParseStats {
    pub fn skipped(&self) -> u64 {
        self.embedded_headers + self.short_rows + self.bad_lengths
    }
}
