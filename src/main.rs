use clap::{CommandFactory, Parser};
use runqc_tools::cli::{self, Commands};
use runqc_tools::commands;
use runqc_tools::config::Config;
use std::time::Instant;

fn main() {
    let args = cli::Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    let (name, summary) = match &args.command {
        Commands::Reads { summary } => ("reads", summary),
        Commands::Coverage { summary, .. } => ("coverage", summary),
    };
    if summary.has_no_inputs() {
        let mut cmd = cli::Args::command();
        if let Some(sub) = cmd.find_subcommand_mut(name) {
            if let Err(e) = sub.print_help() {
                log::error!("Failed to print help: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = Config::load();
    let start = Instant::now();

    let result = match &args.command {
        Commands::Reads { summary } => commands::reads::run(summary, &config),
        Commands::Coverage {
            genome_size,
            summary,
        } => commands::coverage::run(*genome_size, summary, &config),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }

    log::info!(
        "Total time for the program: {:.3} seconds",
        start.elapsed().as_secs_f64()
    );
}
