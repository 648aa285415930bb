//! The destination extractor.
//!
//! After the tagged markup has been rendered, every heading marker shows up
//! as a URI link annotation. The extractor maps each one back to its heading,
//! records where on which page it landed, and removes it from the document.

use crate::error::PipelineError;
use log::{debug, info};
use lopdf::Document;
use std::collections::HashMap;
use toclink_marker::MarkerScheme;
use toclink_pdf_composer::{LinkDisposition, page_ids, rewrite_uri_links};
use toclink_types::{Destination, Entry, Heading, Point};

/// Vertical distance above a marker's lower edge that a destination points at,
/// so a jump lands slightly above the heading text.
pub const DESTINATION_Y_OFFSET: f64 = 36.0;

/// What an extraction run found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Headings bound to a destination, in heading order.
    pub entries: Vec<Entry>,
    /// Marker annotations removed from the document.
    pub markers_stripped: usize,
    /// Markers whose identifier matched no heading.
    pub unresolved: usize,
}

pub struct DestinationExtractor<'a> {
    scheme: &'a MarkerScheme,
}

impl<'a> DestinationExtractor<'a> {
    pub fn new(scheme: &'a MarkerScheme) -> Self {
        Self { scheme }
    }

    /// Scans every page of `doc`, binds heading markers to `headings` and
    /// strips every marker annotation, resolved or not.
    ///
    /// When several headings share an identifier only the first is bound.
    /// When several annotations carry the same identifier (a link the
    /// renderer split across lines or pages) the first one in page order
    /// wins and later ones never overwrite it, so a heading resolves to
    /// where it starts. Headings without a matching marker are left out.
    pub fn extract(&self, doc: &mut Document, headings: &[Heading]) -> Result<Extraction, PipelineError> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(headings.len());
        for (i, heading) in headings.iter().enumerate() {
            index.entry(heading.identifier.as_str()).or_insert(i);
        }

        let mut slots: Vec<Option<Destination>> = vec![None; headings.len()];
        let mut unresolved = 0;
        let pages = page_ids(doc);

        let stats = rewrite_uri_links(doc, &pages, |link| {
            let Some(payload) = self.scheme.payload(&link.uri) else {
                return LinkDisposition::Keep;
            };
            let identifier = self.scheme.decode_identifier(payload);
            match index.get(identifier.as_str()) {
                Some(&i) => {
                    if slots[i].is_none() {
                        let point = Point::new(0.0, link.rect.min_y() + DESTINATION_Y_OFFSET);
                        slots[i] = Some(Destination::new(link.page_index, point));
                    }
                }
                None => unresolved += 1,
            }
            LinkDisposition::Remove
        })?;

        let entries: Vec<Entry> = headings
            .iter()
            .zip(slots)
            .filter_map(|(heading, slot)| slot.map(|dest| Entry::new(heading.clone(), dest)))
            .collect();

        if unresolved > 0 {
            debug!("[EXTRACT] {} marker(s) matched no heading.", unresolved);
        }
        info!(
            "[EXTRACT] Bound {} of {} heading(s) across {} page(s); stripped {} marker(s).",
            entries.len(),
            headings.len(),
            pages.len(),
            stats.removed
        );

        Ok(Extraction {
            entries,
            markers_stripped: stats.removed,
            unresolved,
        })
    }
}
