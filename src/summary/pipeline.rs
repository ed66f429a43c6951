use super::collectors::{Accumulator, StatsCollector};
use super::core::SummaryProfile;
use super::merge::merge;
use super::readers::{open_path, SummaryTableReader};
use super::report::{finalize, AggregateResult};
use super::threading::FilePool;
use crate::error::{Result as SummaryResult, SummaryError};
use anyhow::Result;
use indicatif::ProgressBar;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Feed every record of one table into a fresh accumulator.
///
/// `path` names the unit: it becomes the accumulator's source name and is
/// used in errors.
pub fn accumulate_unit<R: BufRead>(
    reader: R,
    path: &Path,
    profile: &SummaryProfile,
) -> SummaryResult<Accumulator> {
    let mut table = SummaryTableReader::new(reader, path, profile)?;
    let mut acc = Accumulator::for_source(profile.clone(), path.to_string_lossy());

    for record in table.by_ref() {
        acc.accept(&record?);
    }

    let stats = table.stats();
    log::debug!(
        "{}: {} reads accepted, {} rows skipped ({} embedded headers, {} short, {} bad lengths)",
        path.display(),
        stats.accepted,
        stats.skipped(),
        stats.embedded_headers,
        stats.short_rows,
        stats.bad_lengths
    );
    if !table.has_identifier_column() && !profile.columns().identifier.is_empty() {
        log::debug!("{}: no flowcell column in header", path.display());
    }

    Ok(acc)
}

/// Open `path` (plain or compressed) and accumulate it.
pub fn accumulate_path(path: &Path, profile: &SummaryProfile) -> SummaryResult<Accumulator> {
    let reader = open_path(path)?;
    accumulate_unit(reader, path, profile)
}

/// Outcome of accumulating one input file.
#[derive(Debug)]
pub struct UnitOutcome {
    pub path: PathBuf,
    pub outcome: SummaryResult<Accumulator>,
}

/// Accumulate every path, one accumulator per file, in input order.
///
/// With more than one thread the files are spread over a [`FilePool`];
/// the returned order does not depend on the thread count.
pub fn run_units(
    paths: &[PathBuf],
    profile: &SummaryProfile,
    threads: usize,
    progress: &ProgressBar,
) -> Result<Vec<UnitOutcome>> {
    progress.set_length(paths.len() as u64);

    if threads <= 1 || paths.len() <= 1 {
        return Ok(paths
            .iter()
            .map(|path| {
                progress.set_message(format!("Reading {}", path.display()));
                let outcome = accumulate_path(path, profile);
                progress.inc(1);
                UnitOutcome {
                    path: path.clone(),
                    outcome,
                }
            })
            .collect());
    }

    let pool = FilePool::new(profile.clone(), threads.min(paths.len()), progress);
    for (index, path) in paths.iter().enumerate() {
        pool.send(index, path.clone())?;
    }

    Ok(pool
        .finish()?
        .into_iter()
        .map(|(index, outcome)| UnitOutcome {
            path: paths[index].clone(),
            outcome,
        })
        .collect())
}

/// Directory mode: one finalized result per input file.
pub fn run_per_file(
    paths: &[PathBuf],
    profile: &SummaryProfile,
    threads: usize,
    progress: &ProgressBar,
) -> Result<Vec<(PathBuf, SummaryResult<AggregateResult>)>> {
    Ok(run_units(paths, profile, threads, progress)?
        .into_iter()
        .map(|unit| {
            let result = unit
                .outcome
                .and_then(|acc| finalize(&acc, acc.source_label()));
            (unit.path, result)
        })
        .collect())
}

/// Aggregated mode: every readable file merged into one accumulator.
#[derive(Debug)]
pub struct AggregatedRun {
    pub merged: Accumulator,
    /// Files that contributed nothing because they failed.
    pub failures: Vec<SummaryError>,
}

impl AggregatedRun {
    /// Finalize the merged statistics, labelled `name` or, by default, the
    /// comma-joined names of the contributing files.
    pub fn finalize(&self, name: Option<&str>) -> SummaryResult<AggregateResult> {
        let label = match name {
            Some(name) => name.to_string(),
            None => self.merged.source_label(),
        };
        finalize(&self.merged, label)
    }
}

pub fn run_aggregated(
    paths: &[PathBuf],
    profile: &SummaryProfile,
    threads: usize,
    progress: &ProgressBar,
) -> Result<AggregatedRun> {
    let mut failures = Vec::new();
    let mut contributing = Vec::with_capacity(paths.len());

    for unit in run_units(paths, profile, threads, progress)? {
        match unit.outcome {
            Ok(acc) => contributing.push(acc),
            Err(e) => failures.push(e),
        }
    }

    let merged = merge(contributing).unwrap_or_else(|| Accumulator::new(profile.clone()));
    Ok(AggregatedRun { merged, failures })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "filename_pod5\tread_id\tsequence_length_template\tmean_qscore_template\n\
                         PAW1_a.pod5\tr1\t1000\t12.0\n\
                         PAW1_a.pod5\tr2\t500\t8.0\n\
                         PAW2_b.pod5\tr3\t300\t21.0\n\
                         PAW2_b.pod5\tr4\t200\t3.0\n";

    #[test]
    fn embedded_header_and_short_row_do_not_change_totals() {
        let noisy = format!(
            "{}filename_pod5\tread_id\tsequence_length_template\tmean_qscore_template\nPAW3_c.pod5\tr5\n",
            TABLE
        );
        let profile = SummaryProfile::coverage(1.0).unwrap();
        let clean = accumulate_unit(TABLE.as_bytes(), Path::new("clean.txt"), &profile).unwrap();
        let noisy = accumulate_unit(noisy.as_bytes(), Path::new("noisy.txt"), &profile).unwrap();

        assert_eq!(clean.total_reads(), noisy.total_reads());
        assert_eq!(clean.total_bases(), noisy.total_bases());
        assert_eq!(clean.bucket_values(), noisy.bucket_values());
        assert_eq!(clean.identifiers(), noisy.identifiers());
        assert_eq!(
            finalize(&clean, "x").unwrap(),
            finalize(&noisy, "x").unwrap()
        );
    }

    #[test]
    fn accumulate_unit_names_the_source() {
        let acc =
            accumulate_unit(TABLE.as_bytes(), Path::new("runA/s1/t.txt"), &SummaryProfile::reads())
                .unwrap();
        assert_eq!(acc.source_names(), ["runA/s1/t.txt"]);
        assert_eq!(acc.total_bases(), 2000);
        assert_eq!(acc.bucket("q10_reads_M"), Some(2));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = accumulate_path(Path::new("/nonexistent/summary.txt"), &SummaryProfile::reads())
            .unwrap_err();
        assert!(matches!(err, SummaryError::StreamUnreadable { .. }));
    }
}
