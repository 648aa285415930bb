use serde::Serialize;
use std::path::Path;

/// Page geometry forwarded verbatim to the renderer. Values keep their
/// units (`"1in"`, `"20mm"`); converting them is the renderer's business.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub margin_top: Option<String>,
    pub margin_right: Option<String>,
    pub margin_bottom: Option<String>,
    pub margin_left: Option<String>,
    pub paper_width: Option<String>,
    pub paper_height: Option<String>,
}

impl PageOptions {
    /// The paper size, only when both dimensions are present.
    pub fn paper_size(&self) -> Option<(&str, &str)> {
        match (&self.paper_width, &self.paper_height) {
            (Some(width), Some(height)) => Some((width, height)),
            _ => None,
        }
    }
}

/// A single render job.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// The markup file to render. Relative resources resolve against its directory.
    pub input: &'a Path,
    pub page: &'a PageOptions,
}

impl<'a> RenderRequest<'a> {
    pub fn new(input: &'a Path, page: &'a PageOptions) -> Self {
        Self { input, page }
    }
}

/// Structured table of contents data handed to a [`TocTransform`](crate::TocTransform).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocDocument {
    pub title: String,
    pub lang: String,
    pub style_sheet: Option<String>,
    pub items: Vec<TocRecord>,
}

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocRecord {
    /// Display text of the heading.
    pub title: String,
    pub level: u8,
    /// One-based page number in the content document.
    pub page: usize,
    /// Placeholder marker carrying the encoded destination. Rendered as the
    /// entry's link target and resolved after the TOC itself is rendered.
    pub link: String,
    pub children: Vec<TocRecord>,
}

impl TocDocument {
    /// Total number of records at every depth.
    pub fn record_count(&self) -> usize {
        fn count(records: &[TocRecord]) -> usize {
            records.iter().map(|r| 1 + count(&r.children)).sum()
        }
        count(&self.items)
    }
}
