use super::collectors::Accumulator;
use super::core::ProfileKind;
use super::n50::n50;
use crate::error::{Result, SummaryError};

const GIGA: f64 = 1e9;
const MEGA: f64 = 1e6;

///
/// Finalized statistics for one output row, ready to be placed in a
/// [`ReportTable`](crate::export::formats::table::ReportTable).
///
/// # Fields
///
/// * `label` (`String`) - Row label before the label policy is applied: the
///   `--name` value or the comma-joined source paths.
/// * `identifiers` (`Vec<String>`) - Distinct flowcell ids, sorted.
/// * `total_reads` / `total_bases` (`u64`) - Raw totals over accepted reads.
/// * `total_gbp` (`f64`) - Total bases in gigabases, two decimals.
/// * `n50` (`u64`) - N50 of the accepted read lengths.
/// * `total_reads_millions` (`Option<f64>`) - Quality variant only.
/// * `coverage` (`Option<f64>`) - Length variant only: total bases over the
///   genome size.
/// * `buckets` (`Vec<(String, f64)>`) - `(label, value)` in profile order,
///   already scaled and rounded.
/// * `long_reads` (`Option<u64>`) - Length variant only: reads at or above
///   the very-long-read threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub label: String,
    pub identifiers: Vec<String>,
    pub total_reads: u64,
    pub total_bases: u64,
    pub total_gbp: f64,
    pub n50: u64,
    pub total_reads_millions: Option<f64>,
    pub coverage: Option<f64>,
    pub buckets: Vec<(String, f64)>,
    pub long_reads: Option<u64>,
}

/// Round to two decimals on the exact binary value, ties to even.
///
/// `0.015` is stored just below the tie and becomes `0.01`; an exact tie
/// such as `0.125` becomes `0.12`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Turn an accumulator into a result row labelled `label`.
///
/// Fails with [`SummaryError::NoValidRecords`] when no reads, or only
/// zero-length reads, were accepted.
pub fn finalize(acc: &Accumulator, label: impl Into<String>) -> Result<AggregateResult> {
    let label = label.into();
    if acc.total_reads() == 0 || acc.total_bases() == 0 {
        return Err(SummaryError::NoValidRecords { label });
    }

    let mut lengths = acc.lengths().to_vec();
    let n50 = n50(&mut lengths, acc.total_bases())
        .ok_or_else(|| SummaryError::NoValidRecords { label: label.clone() })?;

    let profile = acc.profile();
    let divisor = match profile.kind() {
        ProfileKind::Reads => MEGA,
        ProfileKind::Coverage { genome_size } => genome_size,
    };
    let buckets = profile
        .buckets()
        .iter()
        .zip(acc.bucket_values())
        .map(|(def, &value)| (def.label.clone(), round2(value as f64 / divisor)))
        .collect();

    let (total_reads_millions, coverage, long_reads) = match profile.kind() {
        ProfileKind::Reads => (Some(round2(acc.total_reads() as f64 / MEGA)), None, None),
        ProfileKind::Coverage { genome_size } => (
            None,
            Some(round2(acc.total_bases() as f64 / genome_size)),
            Some(acc.reads_at_least(profile.long_read_threshold())),
        ),
    };

    Ok(AggregateResult {
        label,
        identifiers: acc.identifiers().iter().cloned().collect(),
        total_reads: acc.total_reads(),
        total_bases: acc.total_bases(),
        total_gbp: round2(acc.total_bases() as f64 / GIGA),
        n50,
        total_reads_millions,
        coverage,
        buckets,
        long_reads,
    })
}

/// How result labels are rewritten before output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPolicy {
    /// Keep only the second `/`-separated segment of each path.
    pub shorten: bool,
    /// Appended as `_<suffix>` when non-empty.
    pub suffix: Option<String>,
}

impl LabelPolicy {
    pub fn new(shorten: bool, suffix: Option<String>) -> Self {
        Self { shorten, suffix }
    }

    pub fn apply(&self, label: &str) -> String {
        let mut out = if self.shorten {
            label
                .split(',')
                .map(|item| item.split('/').nth(1).unwrap_or(item))
                .collect::<Vec<_>>()
                .join(",")
        } else {
            label.to_string()
        };

        if let Some(suffix) = self.suffix.as_deref().filter(|s| !s.is_empty()) {
            out.push('_');
            out.push_str(suffix);
        }
        out
    }
}
