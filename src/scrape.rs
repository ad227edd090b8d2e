use anyhow::Context as _;
use scraper::Html;

use crate::batch::BatchReport;
use crate::cli::{ParseArgs, ScrapeArgs};
use crate::config::ScrapeConfig;
use crate::fetch::{HttpSource, target_url};
use crate::record::extract_record;

pub fn run(args: ScrapeArgs) -> anyhow::Result<BatchReport> {
    let mut config =
        ScrapeConfig::load_or_default(args.config.as_deref()).context("load config")?;
    if let Some(out) = args.out {
        config.output = out;
    }
    if !args.ids.is_empty() {
        config.targets = args.ids;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.delay_ms = delay_ms;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    tracing::debug!(?config, "scrape config");

    let source = HttpSource::new(&config).context("build http client")?;
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    crate::batch::run(&source, &config, &mut stdout.lock(), &mut stderr.lock())
}

pub fn parse(args: ParseArgs) -> anyhow::Result<()> {
    let config = ScrapeConfig::load_or_default(args.config.as_deref()).context("load config")?;
    let html = std::fs::read(&args.html)
        .with_context(|| format!("read html: {}", args.html.display()))?;
    let doc = Html::parse_document(&String::from_utf8_lossy(&html));
    let url = target_url(&config, args.id)?;

    let record = extract_record(args.id, url.as_str(), &doc, &config);
    let json = serde_json::to_string_pretty(&record).context("serialize record")?;
    println!("{json}");
    Ok(())
}
