//! The outline emitter: a filtered heading tree becomes the document's
//! native navigation outline.

use crate::error::PipelineError;
use log::info;
use lopdf::{Document, ObjectId};
use toclink_marker::display_text;
use toclink_pdf_composer::{OutlineItem, write_outline};
use toclink_tree::{NodeId, Tree};
use toclink_types::Entry;

/// Maps every node under the root to an outline item labelled with the
/// heading's display text, keeping child order.
pub fn outline_items(tree: &Tree<Entry>) -> Vec<OutlineItem> {
    items_under(tree, tree.root())
}

fn items_under(tree: &Tree<Entry>, parent: NodeId) -> Vec<OutlineItem> {
    tree.children(parent)
        .iter()
        .filter_map(|&id| {
            let entry = tree.value(id)?;
            Some(
                OutlineItem::new(display_text(&entry.heading.content), entry.destination)
                    .with_children(items_under(tree, id)),
            )
        })
        .collect()
}

/// Writes the outline for `tree` into `doc`.
///
/// `content_pages` are the page objects destinations were extracted against;
/// they stay valid when other pages are later spliced in front of them.
pub fn emit_outline(
    doc: &mut Document,
    tree: &Tree<Entry>,
    content_pages: &[ObjectId],
) -> Result<Option<ObjectId>, PipelineError> {
    let items = outline_items(tree);
    let root = write_outline(doc, &items, content_pages)?;
    info!("[OUTLINE] Emitted outline with {} entries.", tree.len());
    Ok(root)
}
