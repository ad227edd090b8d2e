//! Small tree helpers over `scraper` elements.
//!
//! The extraction heuristics only ever need text, sibling and ancestor
//! lookups, so they go through these functions instead of reaching into
//! the parser's node types directly.

use scraper::ElementRef;

/// Descendant text, each node trimmed, joined with single spaces.
pub fn joined_text(el: ElementRef<'_>) -> String {
    collect_text(el, " ")
}

/// Descendant text, each node trimmed, concatenated without separator.
pub fn compact_text(el: ElementRef<'_>) -> String {
    collect_text(el, "")
}

fn collect_text(el: ElementRef<'_>, separator: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Next following sibling element named `tag`; other siblings are skipped.
pub fn next_sibling_named<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == tag)
}

/// First ancestor matching `predicate` within `max_levels` steps up,
/// starting at the parent.
pub fn enclosing<'a, F>(el: ElementRef<'a>, max_levels: usize, predicate: F) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    el.ancestors()
        .take(max_levels)
        .filter_map(ElementRef::wrap)
        .find(|ancestor| predicate(*ancestor))
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
