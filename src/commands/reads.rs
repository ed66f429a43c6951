use crate::cli::SummaryArgs;
use crate::commands::summary::{build_table, write_output, RunSettings};
use crate::config::Config;
use crate::summary::SummaryProfile;
use crate::utils::discovery::SummaryFileMatcher;
use anyhow::Result;

/// Yield, N50 and per-qscore read counts for one or more summary files.
pub fn run(args: &SummaryArgs, config: &Config) -> Result<()> {
    let profile = SummaryProfile::reads();
    let settings = RunSettings::resolve(args, config);
    let matcher = SummaryFileMatcher::sequencing_summaries();

    let table = build_table(&profile, &matcher, args, &settings)?;
    write_output(&table, args, "reads")
}
