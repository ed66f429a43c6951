pub(crate) mod profile;
pub(crate) mod record;
pub(crate) mod stats;

pub use profile::{
    BucketDef, ColumnSpec, ProfileKind, SummaryProfile, Tally, Threshold,
    DEFAULT_LONG_READ_THRESHOLD, IDENTIFIER_COLUMNS, LENGTH_COLUMN, QUALITY_COLUMN,
};
pub use record::ReadRecord;
pub use stats::ParseStats;
