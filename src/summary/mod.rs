//! Per-read sequencing summary statistics: parse, accumulate, merge, report.

pub mod collectors;
pub mod core;
pub mod merge;
pub mod n50;
pub mod pipeline;
pub mod readers;
pub mod report;
pub mod threading;

// Re-export commonly used items
pub use collectors::{Accumulator, StatsCollector};
pub use core::{ParseStats, ReadRecord, SummaryProfile};
pub use pipeline::{
    accumulate_path, accumulate_unit, run_aggregated, run_per_file, run_units, AggregatedRun,
    UnitOutcome,
};
pub use report::{finalize, AggregateResult, LabelPolicy};
