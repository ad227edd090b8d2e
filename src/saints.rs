use serde::{Deserialize, Serialize};

use crate::formats::WorkEntry;

/// Keywords identifying one saint's Lives in work titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaintKeywords {
    /// Saint page identifier, e.g. `saint-martin`.
    pub id: String,
    /// Substrings searched in work titles, case-insensitively.
    pub keywords: Vec<String>,
}

pub type KeywordTable = Vec<SaintKeywords>;

/// Saint ids whose keywords occur in any work title, in order of first match.
pub fn identify_saints(works: &[WorkEntry], table: &[SaintKeywords]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for work in works {
        let title = work.title.to_lowercase();
        for saint in table {
            if found.contains(&saint.id) {
                continue;
            }
            if saint
                .keywords
                .iter()
                .any(|keyword| title.contains(&keyword.to_lowercase()))
            {
                tracing::debug!(saint = %saint.id, title = %work.title, "saint matched");
                found.push(saint.id.clone());
            }
        }
    }

    found
}
