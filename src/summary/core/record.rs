/// One read as described by a row of a sequencing summary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadRecord {
    pub length: u64,
    pub quality: Option<f64>,
    pub source_tag: Option<String>,
}

impl ReadRecord {
    pub fn new(length: u64) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = Some(tag.into());
        self
    }

    /// Flowcell/instrument token: the part of the source file name before the
    /// first `_`, e.g. `PAW12345` for `PAW12345_pass_abc_0.pod5`.
    pub fn instrument_id(&self) -> Option<&str> {
        self.source_tag
            .as_deref()
            .and_then(|tag| tag.split('_').next())
            .filter(|id| !id.is_empty())
    }
}
