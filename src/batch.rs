use std::io::Write;
use std::path::Path;

use anyhow::Context as _;

use crate::config::ScrapeConfig;
use crate::fetch::{FetchError, PageSource, target_url};
use crate::formats::CatalogRecord;
use crate::record::build_record;

/// A target that could not be fetched.
#[derive(Debug)]
pub struct TargetFailure {
    pub id: u64,
    pub error: FetchError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<CatalogRecord>,
    pub failures: Vec<TargetFailure>,
}

/// Scrapes every configured target in order and writes the records file.
///
/// Progress goes to `out`, per-target failures and the final warning to
/// `err`. A failed target is reported and skipped; only a failure to write
/// the output file (or an unusable base URL, checked before any request)
/// aborts the run.
pub fn run<S, O, E>(
    source: &S,
    config: &ScrapeConfig,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<BatchReport>
where
    S: PageSource + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let targets = config
        .targets
        .iter()
        .map(|&id| target_url(config, id).map(|url| (id, url)))
        .collect::<anyhow::Result<Vec<_>>>()
        .context("resolve target urls")?;

    console(writeln!(
        out,
        "Scraping {} manuscript(s) from Jonas IRHT-CNRS...",
        targets.len()
    ));
    console(writeln!(out, "Output: {}\n", config.output.display()));

    let mut report = BatchReport::default();
    for (idx, (id, url)) in targets.into_iter().enumerate() {
        if idx > 0 && !config.delay().is_zero() {
            std::thread::sleep(config.delay());
        }

        console(writeln!(out, "  → Fetching {url}"));
        tracing::debug!(id, %url, "fetch target");

        match build_record(source, id, &url, config) {
            Ok(record) => {
                console(report_record(out, &record));
                report.records.push(record);
            }
            Err(error) => {
                console(writeln!(
                    err,
                    "    ✗ {} error for ID {id}: {error}",
                    error.kind()
                ));
                report.failures.push(TargetFailure { id, error });
            }
        }
    }

    write_records(&config.output, &report.records).context("write records")?;

    console(writeln!(
        out,
        "\nDone. Wrote {} record(s) to {}",
        report.records.len(),
        config.output.display()
    ));
    if !report.failures.is_empty() {
        console(writeln!(
            err,
            "WARNING: {} manuscript(s) failed to scrape.",
            report.failures.len()
        ));
    }

    Ok(report)
}

/// Console reporting never aborts a run (e.g. stdout piped into `head`).
fn console(result: std::io::Result<()>) {
    if let Err(err) = result {
        tracing::warn!(%err, "console write failed");
    }
}

fn report_record<O: Write + ?Sized>(out: &mut O, record: &CatalogRecord) -> std::io::Result<()> {
    let or_dash = |value: &str| {
        if value.is_empty() {
            "—".to_owned()
        } else {
            value.to_owned()
        }
    };
    let shelfmark = if record.shelfmark.is_empty() {
        "(no shelfmark)"
    } else {
        record.shelfmark.as_str()
    };

    writeln!(out, "    ✓ {shelfmark}")?;
    writeln!(
        out,
        "      Date: {}  |  Support: {}  |  Origin: {}",
        or_dash(&record.date),
        or_dash(&record.support),
        or_dash(&record.origin)
    )?;
    writeln!(
        out,
        "      Works found: {}  |  Saints identified: {:?}",
        record.contents.len(),
        record.saints
    )
}

/// Writes `records` as pretty JSON, replacing `path` in one rename.
pub fn write_records(path: &Path, records: &[CatalogRecord]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("create output dir: {}", parent.display()))?;

    let mut file = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    serde_json::to_writer_pretty(&mut file, records).context("serialize records")?;
    file.write_all(b"\n").context("write records newline")?;
    file.flush().context("flush records")?;
    file.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("persist records: {}", path.display()))?;

    Ok(())
}
