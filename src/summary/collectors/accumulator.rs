use super::base::StatsCollector;
use crate::summary::core::{ReadRecord, SummaryProfile};
use std::collections::BTreeSet;

/// Running statistics for one input, or for several after merging.
///
/// Every accepted length is kept: N50 needs the complete multiset.
#[derive(Debug, Clone)]
pub struct Accumulator {
    profile: SummaryProfile,
    total_reads: u64,
    total_bases: u64,
    lengths: Vec<u64>,
    buckets: Vec<u64>,
    identifiers: BTreeSet<String>,
    source_names: Vec<String>,
}

impl Accumulator {
    pub fn new(profile: SummaryProfile) -> Self {
        let buckets = vec![0; profile.buckets().len()];
        Self {
            profile,
            total_reads: 0,
            total_bases: 0,
            lengths: Vec::new(),
            buckets,
            identifiers: BTreeSet::new(),
            source_names: Vec::new(),
        }
    }

    /// Empty accumulator labelled with the input it will be filled from.
    pub fn for_source(profile: SummaryProfile, name: impl Into<String>) -> Self {
        let mut acc = Self::new(profile);
        acc.source_names.push(name.into());
        acc
    }

    pub fn profile(&self) -> &SummaryProfile {
        &self.profile
    }

    pub fn total_reads(&self) -> u64 {
        self.total_reads
    }

    pub fn total_bases(&self) -> u64 {
        self.total_bases
    }

    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    /// Bucket values in profile order.
    pub fn bucket_values(&self) -> &[u64] {
        &self.buckets
    }

    pub fn bucket(&self, label: &str) -> Option<u64> {
        self.profile
            .buckets()
            .iter()
            .position(|def| def.label == label)
            .map(|idx| self.buckets[idx])
    }

    /// Distinct flowcell/instrument ids, sorted.
    pub fn identifiers(&self) -> &BTreeSet<String> {
        &self.identifiers
    }

    pub fn source_names(&self) -> &[String] {
        &self.source_names
    }

    /// Source names joined with `,` in processing order.
    pub fn source_label(&self) -> String {
        self.source_names.join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.total_reads == 0
    }

    /// Reads at or above `min_length`.
    pub fn reads_at_least(&self, min_length: u64) -> u64 {
        self.lengths.iter().filter(|&&len| len >= min_length).count() as u64
    }
}

impl StatsCollector for Accumulator {
    fn accept(&mut self, record: &ReadRecord) {
        self.total_reads += 1;
        self.total_bases += record.length;
        self.lengths.push(record.length);

        for (value, def) in self.buckets.iter_mut().zip(self.profile.buckets()) {
            *value += def.contribution(record);
        }

        if let Some(id) = record.instrument_id() {
            if !self.identifiers.contains(id) {
                self.identifiers.insert(id.to_string());
            }
        }
    }

    fn merge_with(&mut self, other: Self) {
        debug_assert_eq!(self.profile.buckets(), other.profile.buckets());

        self.total_reads += other.total_reads;
        self.total_bases += other.total_bases;
        self.lengths.extend(other.lengths);
        for (value, extra) in self.buckets.iter_mut().zip(other.buckets) {
            *value += extra;
        }
        self.identifiers.extend(other.identifiers);
        self.source_names.extend(other.source_names);
    }
}
