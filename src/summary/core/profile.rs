use super::record::ReadRecord;
use crate::error::{Result, SummaryError};
use std::sync::Arc;

pub const LENGTH_COLUMN: &str = "sequence_length_template";
pub const QUALITY_COLUMN: &str = "mean_qscore_template";
pub const IDENTIFIER_COLUMNS: [&str; 2] = ["filename_pod5", "filename"];

/// Reads at or above this length are reported as "whales".
pub const DEFAULT_LONG_READ_THRESHOLD: u64 = 1_000_000;

const QUALITY_CUTOFFS: [u32; 5] = [5, 10, 15, 20, 25];
const LENGTH_CUTOFFS_KB: [u64; 5] = [20, 40, 60, 80, 100];

/// Predicate a read has to satisfy to land in a bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    MinQuality(f64),
    MinLength(u64),
}

/// What a bucket adds up for every read it admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Reads,
    Bases,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketDef {
    pub label: String,
    pub threshold: Threshold,
    pub tally: Tally,
}

impl BucketDef {
    pub fn new(label: impl Into<String>, threshold: Threshold, tally: Tally) -> Self {
        Self {
            label: label.into(),
            threshold,
            tally,
        }
    }

    pub fn admits(&self, record: &ReadRecord) -> bool {
        match self.threshold {
            Threshold::MinQuality(min) => record.quality.is_some_and(|q| q >= min),
            Threshold::MinLength(min) => record.length >= min,
        }
    }

    /// Amount this record adds to the bucket, zero when it is not admitted.
    pub fn contribution(&self, record: &ReadRecord) -> u64 {
        if !self.admits(record) {
            return 0;
        }
        match self.tally {
            Tally::Reads => 1,
            Tally::Bases => record.length,
        }
    }
}

/// Header names the row parser resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub length: String,
    pub quality: Option<String>,
    /// Tried in order, the first one present in the header wins.
    pub identifier: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileKind {
    /// Counts reported in millions of reads.
    Reads,
    /// Base sums reported as depth over a genome of `genome_size` bases.
    Coverage { genome_size: f64 },
}

#[derive(Debug)]
struct ProfileInner {
    kind: ProfileKind,
    columns: ColumnSpec,
    buckets: Vec<BucketDef>,
    long_read_threshold: u64,
}

/// Everything that distinguishes one metric variant from the other.
/// Cloning shares the definition.
#[derive(Debug, Clone)]
pub struct SummaryProfile {
    inner: Arc<ProfileInner>,
}

impl SummaryProfile {
    /// Quality-bucket variant: read counts at mean qscore >= 5..25.
    pub fn reads() -> Self {
        let buckets = QUALITY_CUTOFFS
            .iter()
            .map(|&q| {
                BucketDef::new(
                    format!("q{}_reads_M", q),
                    Threshold::MinQuality(q as f64),
                    Tally::Reads,
                )
            })
            .collect();

        Self::from_parts(
            ProfileKind::Reads,
            ColumnSpec {
                length: LENGTH_COLUMN.to_string(),
                quality: Some(QUALITY_COLUMN.to_string()),
                identifier: Vec::new(),
            },
            buckets,
            DEFAULT_LONG_READ_THRESHOLD,
        )
    }

    /// Length-bucket variant: base sums at >= 20..100 kb over a genome of
    /// `genome_size_gb` gigabases.
    pub fn coverage(genome_size_gb: f64) -> Result<Self> {
        Self::coverage_with_threshold(genome_size_gb, DEFAULT_LONG_READ_THRESHOLD)
    }

    pub fn coverage_with_threshold(genome_size_gb: f64, long_read_threshold: u64) -> Result<Self> {
        if !genome_size_gb.is_finite() || genome_size_gb <= 0.0 {
            return Err(SummaryError::InvalidGenomeSize(genome_size_gb));
        }

        let buckets = LENGTH_CUTOFFS_KB
            .iter()
            .map(|&kb| {
                BucketDef::new(
                    format!("{}kb+", kb),
                    Threshold::MinLength(kb * 1000),
                    Tally::Bases,
                )
            })
            .collect();

        Ok(Self::from_parts(
            ProfileKind::Coverage {
                genome_size: genome_size_gb * 1e9,
            },
            ColumnSpec {
                length: LENGTH_COLUMN.to_string(),
                quality: None,
                identifier: IDENTIFIER_COLUMNS.iter().map(|c| c.to_string()).collect(),
            },
            buckets,
            long_read_threshold,
        ))
    }

    pub fn from_parts(
        kind: ProfileKind,
        columns: ColumnSpec,
        buckets: Vec<BucketDef>,
        long_read_threshold: u64,
    ) -> Self {
        Self {
            inner: Arc::new(ProfileInner {
                kind,
                columns,
                buckets,
                long_read_threshold,
            }),
        }
    }

    pub fn kind(&self) -> ProfileKind {
        self.inner.kind
    }

    pub fn columns(&self) -> &ColumnSpec {
        &self.inner.columns
    }

    pub fn buckets(&self) -> &[BucketDef] {
        &self.inner.buckets
    }

    pub fn long_read_threshold(&self) -> u64 {
        self.inner.long_read_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_bucket_requires_a_score() {
        let bucket = BucketDef::new("q10", Threshold::MinQuality(10.0), Tally::Reads);
        assert!(!bucket.admits(&ReadRecord::new(500)));
        assert!(!bucket.admits(&ReadRecord::new(500).with_quality(9.99)));
        assert!(bucket.admits(&ReadRecord::new(500).with_quality(10.0)));
        assert_eq!(bucket.contribution(&ReadRecord::new(500).with_quality(12.0)), 1);
    }

    #[test]
    fn length_bucket_sums_bases() {
        let bucket = BucketDef::new("20kb+", Threshold::MinLength(20_000), Tally::Bases);
        assert_eq!(bucket.contribution(&ReadRecord::new(19_999)), 0);
        assert_eq!(bucket.contribution(&ReadRecord::new(20_000)), 20_000);
    }

    #[test]
    fn coverage_profile_rejects_bad_genome_size() {
        assert!(matches!(
            SummaryProfile::coverage(0.0),
            Err(SummaryError::InvalidGenomeSize(_))
        ));
        assert!(SummaryProfile::coverage(f64::NAN).is_err());
        assert!(SummaryProfile::coverage(-3.1).is_err());
    }

    #[test]
    fn builtin_profiles_have_ordered_buckets() {
        let labels: Vec<_> = SummaryProfile::reads()
            .buckets()
            .iter()
            .map(|b| b.label.clone())
            .collect();
        assert_eq!(
            labels,
            ["q5_reads_M", "q10_reads_M", "q15_reads_M", "q20_reads_M", "q25_reads_M"]
        );

        let profile = SummaryProfile::coverage(3.1).unwrap();
        assert_eq!(profile.buckets()[4].label, "100kb+");
        assert_eq!(profile.buckets()[4].threshold, Threshold::MinLength(100_000));
        match profile.kind() {
            ProfileKind::Coverage { genome_size } => assert_eq!(genome_size, 3.1e9),
            other => panic!("unexpected kind {:?}", other),
        }
    }
}
