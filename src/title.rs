/// Trailing segment the catalog appends to work titles; carries no title data.
const INCIPIT_REFERENCE_PREFIX: &str = "Incipit référence";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub author: String,
    pub title: String,
}

/// Splits a catalog work label of the form `Author|Title|Incipit référence…`.
///
/// A single remaining segment is the title (no author). Segments past the
/// second are ignored.
pub fn parse_title(raw: &str) -> ParsedTitle {
    let mut segments = raw
        .split('|')
        .map(str::trim)
        .filter(|segment| !segment.starts_with(INCIPIT_REFERENCE_PREFIX));

    match (segments.next(), segments.next()) {
        (Some(author), Some(title)) => ParsedTitle {
            author: author.to_owned(),
            title: title.to_owned(),
        },
        (Some(title), None) => ParsedTitle {
            author: String::new(),
            title: title.to_owned(),
        },
        (None, _) => ParsedTitle {
            author: String::new(),
            title: raw.to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title_has_no_author() {
        let parsed = parse_title("Vie de sainte Marguerite");
        assert_eq!(parsed.author, "");
        assert_eq!(parsed.title, "Vie de sainte Marguerite");
    }

    #[test]
    fn author_and_title_drop_incipit_reference() {
        let parsed =
            parse_title("Anonyme|Vie de saint Nicolas|Incipit référence de l'oeuvre: Seignurs");
        assert_eq!(parsed.author, "Anonyme");
        assert_eq!(parsed.title, "Vie de saint Nicolas");
    }

    #[test]
    fn extra_segments_are_ignored() {
        let parsed = parse_title(" Wace | Vie de saint Nicolas | version courte ");
        assert_eq!(parsed.author, "Wace");
        assert_eq!(parsed.title, "Vie de saint Nicolas");
    }

    #[test]
    fn title_with_only_incipit_reference_keeps_preceding_segment() {
        let parsed = parse_title("Vie de saint Martin|Incipit référence de l'oeuvre: Qui");
        assert_eq!(parsed.author, "");
        assert_eq!(parsed.title, "Vie de saint Martin");
    }

    #[test]
    fn all_segments_discarded_falls_back_to_raw() {
        let raw = "Incipit référence de l'oeuvre: Ci comence";
        let parsed = parse_title(raw);
        assert_eq!(parsed.author, "");
        assert_eq!(parsed.title, raw);
    }
}
