use crate::cli::{SummaryArgs, YesNo};
use crate::config::Config;
use crate::error::SummaryError;
use crate::export::formats::table::ReportTable;
use crate::export::write_table;
use crate::summary::{run_aggregated, run_per_file, LabelPolicy, SummaryProfile};
use crate::utils::discovery::{find_summary_files, SummaryFileMatcher};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Settings shared by both summary commands after merging flags and config.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub policy: LabelPolicy,
    pub threads: usize,
}

impl RunSettings {
    pub(crate) fn resolve(args: &SummaryArgs, config: &Config) -> Self {
        let shorten = match args.shortname {
            Some(choice) => choice == YesNo::Yes,
            None => config.shortname,
        };
        let suffix = if args.no_append {
            None
        } else {
            Some(args.append.clone().unwrap_or_else(|| config.append.clone()))
        };

        Self {
            policy: LabelPolicy::new(shorten, suffix),
            threads: args.threads.unwrap_or(config.threads).max(1),
        }
    }
}

/// Directories named by `patterns`, each expanded as a glob pattern.
/// A plain path matches itself when it exists.
pub(crate) fn expand_dir_patterns(patterns: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    for pattern in patterns {
        let text = pattern.to_string_lossy();
        let matches = match glob::glob(&text) {
            Ok(paths) => paths,
            Err(e) => {
                log::warn!("Invalid directory pattern {}: {}", text, e);
                continue;
            }
        };

        let mut matched_any = false;
        for entry in matches {
            match entry {
                Ok(path) if path.is_dir() => {
                    matched_any = true;
                    dirs.push(path);
                }
                Ok(path) => log::warn!("{} is not a directory, skipping", path.display()),
                Err(e) => log::warn!("Cannot read {}: {}", e.path().display(), e.error()),
            }
        }
        if !matched_any {
            log::warn!("No directory matches {}", text);
        }
    }

    dirs.sort();
    dirs.dedup();
    dirs
}

/// Summary files below every directory matched by `patterns`, directory by
/// directory.
pub(crate) fn directory_inputs(
    patterns: &[PathBuf],
    matcher: &SummaryFileMatcher,
) -> Result<Vec<PathBuf>> {
    let dirs = expand_dir_patterns(patterns);
    if dirs.is_empty() {
        bail!(
            "No directories match: {}",
            patterns
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let mut files = Vec::new();
    for dir in &dirs {
        let found = find_summary_files(dir, matcher);
        if found.is_empty() {
            log::warn!("No sequencing summary files found in directory {}", dir.display());
        }
        files.extend(found);
    }
    Ok(files)
}

/// Build the result table: one row per discovered file with `--dir`,
/// otherwise a single merged row for the positional files.
pub(crate) fn build_table(
    profile: &SummaryProfile,
    matcher: &SummaryFileMatcher,
    args: &SummaryArgs,
    settings: &RunSettings,
) -> Result<ReportTable> {
    let mut table = ReportTable::new(profile);
    let progress = ProgressBarBuilder::new("Reading summaries")
        .with_template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .with_length(0)
        .with_tick()
        .build()?;

    if !args.dirs.is_empty() {
        if !args.files.is_empty() {
            log::warn!("--dir given, ignoring {} positional file(s)", args.files.len());
        }

        let paths = directory_inputs(&args.dirs, matcher)?;
        for (path, result) in run_per_file(&paths, profile, settings.threads, &progress)? {
            match result {
                Ok(result) => table.push(&result, &settings.policy.apply(&result.label)),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        if table.is_empty() {
            log::warn!("No file produced a result row");
        }
    } else {
        let run = run_aggregated(&args.files, profile, settings.threads, &progress)?;
        for failure in &run.failures {
            log::warn!("{}", failure);
        }

        let result = match run.finalize(args.name.as_deref()) {
            Ok(result) => result,
            Err(SummaryError::NoValidRecords { .. }) => bail!("No data processed"),
            Err(e) => return Err(e.into()),
        };
        table.push(&result, &settings.policy.apply(&result.label));
    }

    progress.finish_and_clear();
    Ok(table)
}

pub(crate) fn write_output(
    table: &ReportTable,
    args: &SummaryArgs,
    command: &str,
) -> Result<()> {
    match &args.output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_table(table, args.format, command, &mut writer)
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer: Box<dyn Write> = Box::new(stdout.lock());
            write_table(table, args.format, command, &mut writer)
        }
    }
}
