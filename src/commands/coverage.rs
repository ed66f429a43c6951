use crate::cli::SummaryArgs;
use crate::commands::summary::{build_table, write_output, RunSettings};
use crate::config::Config;
use crate::summary::SummaryProfile;
use crate::utils::discovery::SummaryFileMatcher;
use anyhow::Result;

/// Coverage and long-read coverage against a genome of `genome_size` Gb.
pub fn run(genome_size: f64, args: &SummaryArgs, config: &Config) -> Result<()> {
    let profile = SummaryProfile::coverage_with_threshold(genome_size, config.long_read_threshold)?;
    let settings = RunSettings::resolve(args, config);
    let matcher = SummaryFileMatcher::sequencing_summaries().with_suffix("_summary.txt.gz");

    log::info!("Genome size: {} Gb", genome_size);
    let table = build_table(&profile, &matcher, args, &settings)?;
    write_output(&table, args, "coverage")
}
