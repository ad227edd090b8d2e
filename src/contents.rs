use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::ScrapeConfig;
use crate::dom::{compact_text, enclosing, has_class, joined_text, next_sibling_named};
use crate::formats::WorkEntry;
use crate::title::parse_title;

/// Class of the `div` grouping one work's link with its metadata table.
const ENTRY_CONTAINER_CLASS: &str = "temoin";

const FOLIO_MAX_CHARS: usize = 100;
const DATE_MAX_CHARS: usize = 100;
const INCIPIT_MAX_CHARS: usize = 400;
const EXPLICIT_MAX_CHARS: usize = 400;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("cell selector"));

static WORK_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/consulter/oeuvre/detail_oeuvre\.php").expect("work link regex"));
static WORK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"oeuvre=(\d+)").expect("work id regex"));
static FOLIO_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)f(?:f)?\.?\s*(\d+\s*[rv]?[ab]?)\s*[-–—]\s*(?:f(?:f)?\.?\s*)?(\d+\s*[rv]?[ab]?)",
    )
    .expect("folio range regex")
});

/// Works listed on a manuscript page, one per distinct work id, in page order.
pub fn extract_contents(doc: &Html, config: &ScrapeConfig) -> Vec<WorkEntry> {
    let mut seen = HashSet::new();
    let mut contents = Vec::new();

    for link in doc.select(&ANCHOR) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !WORK_LINK.is_match(href) {
            continue;
        }

        let href = normalize_href(href);
        let Some(work_id) = work_id(href) else {
            tracing::debug!(%href, "work link without id; skipping");
            continue;
        };
        if !seen.insert(work_id.to_owned()) {
            continue;
        }

        let raw_title = compact_text(link);
        let parsed = parse_title(&raw_title);
        let mut work = WorkEntry {
            author: parsed.author,
            title: parsed.title,
            raw_title,
            jonas_oeuvre_url: format!("{}?oeuvre={work_id}", config.work_base_url),
            ..WorkEntry::default()
        };

        match entry_container(link, config.container_depth) {
            Some(container) => fill_metadata(&mut work, container),
            None => tracing::debug!(work_id, "no entry container; metadata left empty"),
        }

        contents.push(work);
    }

    contents
}

/// Rewrites the catalog's relative prefixes to a site-absolute path.
fn normalize_href(href: &str) -> &str {
    if href.starts_with("../../") {
        // keep the second slash: `../../consulter/…` -> `/consulter/…`
        &href[5..]
    } else if href.starts_with("..") {
        href.trim_start_matches('.')
    } else {
        href
    }
}

fn work_id(href: &str) -> Option<&str> {
    WORK_ID
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn entry_container(link: ElementRef<'_>, max_levels: usize) -> Option<ElementRef<'_>> {
    enclosing(link, max_levels, |el| {
        el.value().name() == "div" && has_class(el, ENTRY_CONTAINER_CLASS)
    })
}

/// Reads label/value cell pairs; a later pair with the same label wins.
fn fill_metadata(work: &mut WorkEntry, container: ElementRef<'_>) {
    for cell in container.select(&CELL) {
        let Some(value_cell) = next_sibling_named(cell, "td") else {
            continue;
        };
        let label = compact_text(cell).to_lowercase();
        let label_chars = label.chars().count();
        let value = joined_text(value_cell);

        if label.contains("folio") && label_chars < 40 {
            work.folio = truncate(&value, FOLIO_MAX_CHARS);
        } else if label.contains("datation") || (label.contains("date") && label.contains("tation"))
        {
            work.date = truncate(&value, DATE_MAX_CHARS);
        } else if label.starts_with("incipit") && label_chars < 50 {
            work.incipit = truncate(&value, INCIPIT_MAX_CHARS);
        } else if label.starts_with("explicit") && label_chars < 50 {
            work.explicit = truncate(&value, EXPLICIT_MAX_CHARS);
        }
    }

    if work.folio.is_empty()
        && let Some(range) = FOLIO_RANGE.find(&joined_text(container))
    {
        work.folio = range.as_str().trim().to_owned();
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
