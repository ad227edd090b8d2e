use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    jonas_scrape::logging::init().context("init logging")?;

    let cli = jonas_scrape::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        jonas_scrape::cli::Command::Scrape(args) => {
            let report = jonas_scrape::scrape::run(args).context("scrape")?;
            tracing::debug!(
                records = report.records.len(),
                failures = report.failures.len(),
                "scrape finished"
            );
        }
        jonas_scrape::cli::Command::Parse(args) => {
            jonas_scrape::scrape::parse(args).context("parse")?;
        }
    }

    Ok(())
}
