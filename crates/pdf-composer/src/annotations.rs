//! Scanning and rewriting of URI link annotations.
//!
//! Renderers turn every `<a href>` into a `/Link` annotation carrying a
//! `/URI` action. These helpers find those annotations page by page and let
//! the caller decide, per link, whether it stays, disappears, or is swapped
//! for another annotation dictionary.

use crate::error::ComposerError;
use log::trace;
use lopdf::{Dictionary, Document, Object, ObjectId};
use toclink_types::Rect;

/// A URI link annotation found on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct UriLink {
    /// Zero-based index into the page list the scan was run over.
    pub page_index: usize,
    pub uri: String,
    pub rect: Rect,
}

/// What to do with a scanned link.
#[derive(Debug, Clone)]
pub enum LinkDisposition {
    Keep,
    Remove,
    Replace(Dictionary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkRewriteStats {
    pub scanned: usize,
    pub kept: usize,
    pub removed: usize,
    pub replaced: usize,
}

/// Where a page keeps its `Annots` array.
enum AnnotsSlot {
    Inline,
    Indirect(ObjectId),
}

/// Collects every URI link on the given pages in page-major order.
pub fn collect_uri_links(doc: &Document, page_ids: &[ObjectId]) -> Result<Vec<UriLink>, ComposerError> {
    let mut links = Vec::new();
    for (page_index, &page_id) in page_ids.iter().enumerate() {
        if let Some((annots, _)) = page_annotations(doc, page_id)? {
            links.extend(annots.iter().filter_map(|entry| uri_link(doc, entry, page_index)));
        }
    }
    Ok(links)
}

/// Visits every URI link on the given pages and applies the caller's
/// disposition to it. Annotations that are not URI links are left alone.
pub fn rewrite_uri_links<F>(
    doc: &mut Document,
    page_ids: &[ObjectId],
    mut decide: F,
) -> Result<LinkRewriteStats, ComposerError>
where
    F: FnMut(&UriLink) -> LinkDisposition,
{
    let mut stats = LinkRewriteStats::default();

    for (page_index, &page_id) in page_ids.iter().enumerate() {
        let Some((annots, slot)) = page_annotations(doc, page_id)? else {
            continue;
        };

        let mut retained = Vec::with_capacity(annots.len());
        let mut changed = false;
        for entry in annots {
            let Some(link) = uri_link(doc, &entry, page_index) else {
                retained.push(entry);
                continue;
            };
            stats.scanned += 1;
            match decide(&link) {
                LinkDisposition::Keep => {
                    stats.kept += 1;
                    retained.push(entry);
                }
                LinkDisposition::Remove => {
                    trace!("[COMPOSER] Removing link to '{}' on page {}.", link.uri, page_index);
                    stats.removed += 1;
                    changed = true;
                }
                LinkDisposition::Replace(replacement) => {
                    stats.replaced += 1;
                    changed = true;
                    match entry {
                        Object::Reference(annot_id) => {
                            doc.objects.insert(annot_id, Object::Dictionary(replacement));
                            retained.push(entry);
                        }
                        _ => retained.push(Object::Dictionary(replacement)),
                    }
                }
            }
        }

        if changed {
            store_annotations(doc, page_id, slot, retained)?;
        }
    }

    Ok(stats)
}

fn page_annotations(doc: &Document, page_id: ObjectId) -> Result<Option<(Vec<Object>, AnnotsSlot)>, ComposerError> {
    let page = doc.get_dictionary(page_id)?;
    let Ok(annots) = page.get(b"Annots") else {
        return Ok(None);
    };
    let found = match annots {
        Object::Array(entries) => (entries.clone(), AnnotsSlot::Inline),
        Object::Reference(array_id) => {
            let entries = doc.get_object(*array_id)?.as_array()?.clone();
            (entries, AnnotsSlot::Indirect(*array_id))
        }
        _ => return Ok(None),
    };
    Ok(Some(found))
}

fn store_annotations(
    doc: &mut Document,
    page_id: ObjectId,
    slot: AnnotsSlot,
    annots: Vec<Object>,
) -> Result<(), ComposerError> {
    match slot {
        AnnotsSlot::Indirect(array_id) => {
            doc.objects.insert(array_id, Object::Array(annots));
        }
        AnnotsSlot::Inline => {
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            if annots.is_empty() {
                page.remove(b"Annots");
            } else {
                page.set("Annots", annots);
            }
        }
    }
    Ok(())
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn uri_link(doc: &Document, entry: &Object, page_index: usize) -> Option<UriLink> {
    let annot = resolve(doc, entry)?.as_dict().ok()?;
    if annot.get(b"Subtype").and_then(Object::as_name).ok()? != b"Link" {
        return None;
    }
    let action = resolve(doc, annot.get(b"A").ok()?)?.as_dict().ok()?;
    if action.get(b"S").and_then(Object::as_name).ok()? != b"URI" {
        return None;
    }
    let uri = lopdf::decode_text_string(resolve(doc, action.get(b"URI").ok()?)?).ok()?;
    let rect = parse_rect(doc, annot.get(b"Rect").ok()?)?;
    Some(UriLink { page_index, uri, rect })
}

fn parse_rect(doc: &Document, obj: &Object) -> Option<Rect> {
    let values = resolve(doc, obj)?.as_array().ok()?;
    let coords = values
        .iter()
        .map(|v| resolve(doc, v).and_then(|v| v.as_float().ok()).map(f64::from))
        .collect::<Option<Vec<f64>>>()?;
    match coords.as_slice() {
        &[x1, y1, x2, y2] => Some(Rect::from_corners((x1, y1), (x2, y2))),
        _ => None,
    }
}
