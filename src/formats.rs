use serde::{Deserialize, Serialize};

/// One manuscript as written to the output file. Field order is the
/// serialized key order; missing data is an empty string or list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub jonas_id: u64,
    pub jonas_url: String,
    pub shelfmark: String,
    pub date: String,
    pub date_short: String,
    pub language: String,
    pub support: String,
    pub dimensions: String,
    pub folios: String,
    pub columns: String,
    pub script: String,
    pub origin: String,
    pub provenance: String,
    pub saints: Vec<String>,
    pub contents: Vec<WorkEntry>,
    /// Filled in by the transcription workflow, never by the scraper.
    pub transcription_file: String,
}

/// One work attested in a manuscript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub author: String,
    pub title: String,
    pub raw_title: String,
    pub jonas_oeuvre_url: String,
    pub folio: String,
    pub date: String,
    pub incipit: String,
    pub explicit: String,
}
