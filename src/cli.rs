use crate::export::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runqc", author, version, about, long_about = None)]
pub struct Args {
    /// Log per-file parsing details
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Yield, N50 and read counts (in millions) per mean-qscore bin
    Reads {
        #[command(flatten)]
        summary: SummaryArgs,
    },

    /// Yield, N50, coverage and long-read coverage for a genome of known size
    Coverage {
        /// Genome size in gigabases
        #[arg(long = "size", value_name = "GB")]
        genome_size: f64,

        #[command(flatten)]
        summary: SummaryArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum YesNo {
    Yes,
    No,
}

#[derive(clap::Args, Clone, Debug)]
pub struct SummaryArgs {
    /// Sequencing summary files (plain or compressed), reported as one merged row
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Sample name for the merged row instead of the joined file names
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Directory or quoted wildcard pattern (e.g. "*EnTEX*") searched recursively
    /// for summary files, one row per file (repeatable)
    #[arg(long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Keep only the second '/'-separated field of each file path [config default: yes]
    #[arg(long, value_enum)]
    pub shortname: Option<YesNo>,

    /// String appended to the sample name as "_<STR>" [config default: fast]
    #[arg(long, value_name = "STR")]
    pub append: Option<String>,

    /// Do not append anything to the sample name (overrides --append)
    #[arg(long)]
    pub no_append: bool,

    /// Number of files read in parallel [config default: 1]
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Write the table here instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,
}

impl SummaryArgs {
    /// Nothing to summarize was given.
    pub fn has_no_inputs(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}
