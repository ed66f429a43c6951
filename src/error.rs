use std::path::PathBuf;

/// Failures surfaced while turning sequencing summaries into QC rows.
///
/// Malformed rows never show up here: they are dropped while parsing and
/// only counted in [`ParseStats`](crate::summary::ParseStats).
#[derive(thiserror::Error, Debug)]
pub enum SummaryError {
    #[error("cannot read {}: {source}", path.display())]
    StreamUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{column}' not found in header of {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("no valid records in {label}")]
    NoValidRecords { label: String },

    #[error("genome size must be a positive number of gigabases, got {0}")]
    InvalidGenomeSize(f64),
}

pub type Result<T> = std::result::Result<T, SummaryError>;
