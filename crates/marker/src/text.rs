use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("BUG: invalid TAG_RE regex literal"));

/// Turns the raw inner markup of a heading into a plain display label:
/// tags are removed, entities decoded and whitespace collapsed.
pub fn display_text(content: &str) -> String {
    let without_tags = TAG_RE.replace_all(content, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    decoded
        .split(|c: char| c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_entities() {
        assert_eq!(
            display_text("Fish &amp; <em>Chips</em>\n  again"),
            "Fish & Chips again"
        );
    }

    #[test]
    fn non_breaking_space_collapses() {
        assert_eq!(display_text("A&nbsp;&nbsp;B"), "A B");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(display_text("Introduction"), "Introduction");
    }
}
