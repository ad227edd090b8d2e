use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::dom::{compact_text, joined_text, next_sibling_named};

/// Label cells at least this long are prose, not labels (td/td pairing only).
const MAX_CELL_LABEL_CHARS: usize = 80;

static DT: LazyLock<Selector> = LazyLock::new(|| selector("dt"));
static TH: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static TD: LazyLock<Selector> = LazyLock::new(|| selector("td"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|err| panic!("invalid built-in selector {css:?}: {err}"))
}

/// Finds the value displayed next to `label`, or `""`.
///
/// Catalog pages mix three layouts for label/value pairs, tried in order:
/// `dt`/`dd` definition lists, `th`/`td` header rows, and plain `td`/`td`
/// rows where the label cell is short.
pub fn resolve(doc: &Html, label: &str) -> String {
    let label = label.to_lowercase();

    let paired = [(&*DT, "dd"), (&*TH, "td")];
    for (term_selector, value_tag) in paired {
        for term in doc.select(term_selector) {
            if !label_matches(term, &label) {
                continue;
            }
            if let Some(value) = next_sibling_named(term, value_tag).map(joined_text)
                && !value.is_empty()
            {
                return value;
            }
        }
    }

    for cell in doc.select(&TD) {
        let text = compact_text(cell);
        if text.chars().count() >= MAX_CELL_LABEL_CHARS || !text.to_lowercase().contains(&label) {
            continue;
        }
        if let Some(value) = next_sibling_named(cell, "td").map(joined_text)
            && !value.is_empty()
        {
            return value;
        }
    }

    String::new()
}

/// First non-empty [`resolve`] result over a chain of label aliases.
pub fn resolve_first(doc: &Html, labels: &[&str]) -> String {
    labels
        .iter()
        .map(|label| resolve(doc, label))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn label_matches(term: ElementRef<'_>, label: &str) -> bool {
    compact_text(term).to_lowercase().contains(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_definition_list_pairs() {
        let doc = Html::parse_document(
            "<dl><dt>Datation détaillée</dt><dd> 13e s. <i>(vers 1240)</i></dd></dl>",
        );
        assert_eq!(resolve(&doc, "datation DÉTAILLÉE"), "13e s. (vers 1240)");
    }

    #[test]
    fn resolves_header_cell_pairs() {
        let doc = Html::parse_document(
            "<table><tr><th>Type support</th><td>parchemin</td></tr></table>",
        );
        assert_eq!(resolve(&doc, "Type support"), "parchemin");
    }

    #[test]
    fn resolves_plain_cell_pairs_and_skips_long_cells() {
        let long_label = format!("Langue {}", "x".repeat(90));
        let doc = Html::parse_document(&format!(
            "<table>\
               <tr><td>{long_label}</td><td>latin</td></tr>\
               <tr><td>Langue principale</td><td>français</td></tr>\
             </table>"
        ));
        assert_eq!(resolve(&doc, "Langue"), "français");
    }

    #[test]
    fn empty_values_fall_through_to_later_strategies() {
        let doc = Html::parse_document(
            "<dl><dt>Possesseur</dt><dd>  </dd></dl>\
             <table><tr><td>Possesseur</td><td>Abbaye de Corbie</td></tr></table>",
        );
        assert_eq!(resolve(&doc, "Possesseur"), "Abbaye de Corbie");
    }

    #[test]
    fn missing_label_yields_empty_string() {
        let doc = Html::parse_document("<p>Nothing here</p>");
        assert_eq!(resolve(&doc, "Langue"), "");
    }

    #[test]
    fn resolve_first_takes_first_non_empty_alias() {
        let doc = Html::parse_document(
            "<table><tr><th>Datation</th><td>14e s.</td></tr></table>",
        );
        assert_eq!(
            resolve_first(&doc, &["Datation détaillée", "Datation", "Date"]),
            "14e s."
        );
        assert_eq!(resolve_first(&doc, &["Hauteur page"]), "");
    }
}
