//! Inserts a recoverable marker into every heading element of a markup
//! document.
//!
//! This is a best-effort scanner, not a markup parser: it expects
//! well-formed, non-nested `<h1>`..`<h6>` elements.

use crate::scheme::MarkerScheme;
use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use toclink_types::Heading;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<h([1-6])((?:\s[^>]*)?)>)(.*?)(</h[1-6]\s*>)")
        .expect("BUG: invalid HEADING_RE regex literal")
});

static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("BUG: invalid ID_ATTR_RE regex literal")
});

/// Prefix of identifiers synthesized for headings that carry no `id`.
pub const SYNTHETIC_ID_PREFIX: &str = "tmp_";

/// The result of a tagging run.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedMarkup {
    /// The rewritten markup with one marker anchor per heading.
    pub markup: String,
    /// Every matched heading, in document order.
    pub headings: Vec<Heading>,
}

#[derive(Debug, Clone, Default)]
pub struct Tagger {
    scheme: MarkerScheme,
}

impl Tagger {
    pub fn new(scheme: MarkerScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &MarkerScheme {
        &self.scheme
    }

    /// Rewrites every heading so it ends with a zero-content anchor whose
    /// target is the heading's marker, and collects the headings.
    ///
    /// The anchor is spliced in before the closing tag; both tags and all
    /// text outside heading elements are passed through unchanged.
    pub fn tag(&self, markup: &str) -> TaggedMarkup {
        let mut headings: Vec<Heading> = Vec::new();

        let tagged = HEADING_RE.replace_all(markup, |caps: &Captures<'_>| {
            let start_tag = &caps[1];
            let level = caps[2].parse::<u8>().unwrap_or(1);
            let attributes = caps.get(3).map_or("", |m| m.as_str());
            let content = &caps[4];
            let end_tag = &caps[5];

            let identifier = existing_id(attributes)
                .unwrap_or_else(|| format!("{}{}", SYNTHETIC_ID_PREFIX, headings.len()));

            let marker = self.scheme.heading_marker(&identifier);
            headings.push(Heading::new(level, identifier, content));

            format!("{start_tag}{content}<a href=\"{marker}\">&nbsp;</a>{end_tag}")
        });

        debug!("[TAGGER] Tagged {} heading(s).", headings.len());

        TaggedMarkup {
            markup: tagged.into_owned(),
            headings,
        }
    }
}

fn existing_id(attributes: &str) -> Option<String> {
    let caps = ID_ATTR_RE.captures(attributes)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}
