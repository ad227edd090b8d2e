use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every target manuscript and write the records file.
    Scrape(ScrapeArgs),
    /// Extract a record from a saved catalog page (no network).
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// YAML configuration file (default: built-in settings).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output JSON file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Manuscript (projet) id to scrape; repeat to list several.
    /// Replaces the configured targets.
    #[arg(long = "id")]
    pub ids: Vec<u64>,

    /// Delay between requests (politeness).
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Manuscript detail page URL; the id is appended as `projet=`.
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Saved HTML of a manuscript detail page.
    #[arg(long)]
    pub html: PathBuf,

    /// Manuscript (projet) id the page belongs to.
    #[arg(long)]
    pub id: u64,

    /// YAML configuration file (default: built-in settings).
    #[arg(long)]
    pub config: Option<PathBuf>,
}
