use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::saints::{KeywordTable, SaintKeywords};

pub const DEFAULT_BASE_URL: &str =
    "https://jonas.irht.cnrs.fr/consulter/manuscrit/detail_manuscrit.php";
pub const DEFAULT_WORK_BASE_URL: &str =
    "https://jonas.irht.cnrs.fr/consulter/oeuvre/detail_oeuvre.php";
pub const DEFAULT_OUTPUT: &str = "docs/data/manuscripts.json";

/// Everything a scrape run needs, passed explicitly to each stage.
///
/// Every field has a built-in default, so a YAML file only needs to list
/// what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeConfig {
    /// Manuscript detail page; the target id is appended as `projet=`.
    pub base_url: String,
    /// Work detail page; the work id is appended as `oeuvre=`.
    pub work_base_url: String,
    pub targets: Vec<u64>,
    pub saints: KeywordTable,
    pub output: PathBuf,
    /// Pause between two consecutive requests.
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// How many ancestors of a work link are searched for its entry block.
    pub container_depth: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            work_base_url: DEFAULT_WORK_BASE_URL.to_owned(),
            targets: vec![71291],
            saints: default_saints(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delay_ms: 2500,
            timeout_secs: 30,
            user_agent: concat!(
                "jonas-scrape/",
                env!("CARGO_PKG_VERSION"),
                " (hagiography research scraper)"
            )
            .to_owned(),
            accept_language: "fr-FR,fr;q=0.9,en;q=0.8".to_owned(),
            container_depth: 6,
        }
    }
}

impl ScrapeConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        serde_yaml::from_str(&yaml).with_context(|| format!("parse config: {}", path.display()))
    }

    /// Loads `path` when given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_saints() -> KeywordTable {
    let table = [
        ("saint-martin", &["martin"][..]),
        ("saint-catherine", &["catherine", "katherina"][..]),
        ("saint-nicholas", &["nicolas", "nicholas", "nicolai"][..]),
        ("saint-margaret", &["marguerite", "margaret", "margareta"][..]),
    ];
    table
        .into_iter()
        .map(|(id, keywords)| SaintKeywords {
            id: id.to_owned(),
            keywords: keywords.iter().map(|kw| (*kw).to_owned()).collect(),
        })
        .collect()
}
