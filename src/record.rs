use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::config::ScrapeConfig;
use crate::contents::extract_contents;
use crate::dom::{compact_text, joined_text};
use crate::fetch::{FetchError, PageSource};
use crate::formats::CatalogRecord;
use crate::label::{resolve, resolve_first};
use crate::saints::identify_saints;

const DATE_LABELS: &[&str] = &["Datation détaillée", "Datation", "Date"];
const LANGUAGE_LABELS: &[&str] = &["Langue principale", "Langue"];
const SUPPORT_LABELS: &[&str] = &["Type support", "Support"];
const SCRIPT_LABELS: &[&str] = &["Type d'écriture", "Écriture"];
// "Origine géographique" heads a section; the value sits under the
// "Localisation par la langue" sub-label.
const ORIGIN_LABELS: &[&str] = &[
    "Localisation par la langue",
    "Localisation",
    "Origine géographique",
];
const PROVENANCE_LABELS: &[&str] = &["Possesseur", "Provenance ancienne"];

/// Fallback length of the short date when no century prefix is found.
const SHORT_DATE_FALLBACK_CHARS: usize = 12;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("h1 selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector"));

static CENTURY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+e\s*s\.?").expect("century regex"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digits regex"));

/// Fetches one catalog page and extracts its record.
pub fn build_record<S: PageSource + ?Sized>(
    source: &S,
    id: u64,
    url: &Url,
    config: &ScrapeConfig,
) -> Result<CatalogRecord, FetchError> {
    let html = source.fetch(url)?;
    let doc = Html::parse_document(&html);
    Ok(extract_record(id, url.as_str(), &doc, config))
}

/// Extracts a record from an already parsed page. Never fails: fields the
/// page does not carry are left empty.
pub fn extract_record(id: u64, url: &str, doc: &Html, config: &ScrapeConfig) -> CatalogRecord {
    let date = resolve_first(doc, DATE_LABELS);
    let contents = extract_contents(doc, config);
    let saints = identify_saints(&contents, &config.saints);

    CatalogRecord {
        jonas_id: id,
        jonas_url: url.to_owned(),
        shelfmark: shelfmark(doc),
        date_short: short_date(&date),
        date,
        language: resolve_first(doc, LANGUAGE_LABELS),
        support: resolve_first(doc, SUPPORT_LABELS),
        dimensions: dimensions(&resolve(doc, "Hauteur page"), &resolve(doc, "Largeur page")),
        folios: resolve(doc, "Nombre de feuillets"),
        columns: resolve(doc, "Nombre de colonnes"),
        script: resolve_first(doc, SCRIPT_LABELS),
        origin: resolve_first(doc, ORIGIN_LABELS),
        provenance: resolve_first(doc, PROVENANCE_LABELS),
        saints,
        contents,
        transcription_file: String::new(),
    }
}

/// Page heading, else the document title.
fn shelfmark(doc: &Html) -> String {
    let heading = doc.select(&H1).next().map(joined_text).unwrap_or_default();
    if !heading.is_empty() {
        return heading;
    }
    doc.select(&TITLE).next().map(compact_text).unwrap_or_default()
}

/// `"{height} × {width} mm"` from the first number of each field, or `""`
/// unless both carry one.
pub fn dimensions(height: &str, width: &str) -> String {
    let first_number = |field: &str| DIGITS.find(field).map(|m| m.as_str().to_owned());
    match (first_number(height), first_number(width)) {
        (Some(h), Some(w)) => format!("{h} × {w} mm"),
        _ => String::new(),
    }
}

/// Century prefix such as `"13e s."`, else the first characters of `date`.
pub fn short_date(date: &str) -> String {
    match CENTURY.find(date) {
        Some(century) => century.as_str().to_owned(),
        None => date.chars().take(SHORT_DATE_FALLBACK_CHARS).collect(),
    }
}
