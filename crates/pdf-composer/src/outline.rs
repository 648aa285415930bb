//! Writing the document outline (the viewer's bookmark panel).

use crate::actions::xyz_destination;
use crate::error::ComposerError;
use log::{debug, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use toclink_types::Destination;

/// A node of the outline to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineItem {
    pub title: String,
    pub destination: Destination,
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    pub fn new(title: impl Into<String>, destination: Destination) -> Self {
        Self { title: title.into(), destination, children: Vec::new() }
    }

    pub fn with_children(mut self, children: Vec<OutlineItem>) -> Self {
        self.children = children;
        self
    }
}

/// Writes `items` as the document outline and registers it in the catalog.
///
/// `page_ids` maps each destination's `page_index` to a page object; an item
/// whose page index falls outside it is still written, without a `Dest`.
/// Returns `None` when there is nothing to write.
pub fn write_outline(
    doc: &mut Document,
    items: &[OutlineItem],
    page_ids: &[ObjectId],
) -> Result<Option<ObjectId>, ComposerError> {
    if items.is_empty() {
        return Ok(None);
    }

    let outline_root_id = doc.new_object_id();
    let (first_id, last_id) = write_level(doc, items, outline_root_id, page_ids);
    doc.objects.insert(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines",
            "First" => first_id,
            "Last" => last_id,
            "Count" => items.len() as i64,
        }
        .into(),
    );

    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
    catalog.set("Outlines", outline_root_id);
    catalog.set("PageMode", "UseOutlines");

    debug!("[COMPOSER] Wrote outline with {} top-level item(s).", items.len());
    Ok(Some(outline_root_id))
}

/// Writes one sibling list under `parent_id`, returning the first and last ids.
fn write_level(
    doc: &mut Document,
    items: &[OutlineItem],
    parent_id: ObjectId,
    page_ids: &[ObjectId],
) -> (ObjectId, ObjectId) {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => lopdf::text_string(&item.title),
            "Parent" => parent_id,
        };
        match page_ids.get(item.destination.page_index) {
            Some(&page_id) => dict.set("Dest", xyz_destination(page_id, item.destination.point)),
            None => warn!(
                "[COMPOSER] Outline item '{}' points at page {} which does not exist.",
                item.title,
                item.destination.page_number()
            ),
        }
        if i > 0 {
            dict.set("Prev", ids[i - 1]);
        }
        if i + 1 < ids.len() {
            dict.set("Next", ids[i + 1]);
        }
        if !item.children.is_empty() {
            let (first, last) = write_level(doc, &item.children, ids[i], page_ids);
            dict.set("First", first);
            dict.set("Last", last);
            // Negative count: the entry starts collapsed.
            dict.set("Count", -(item.children.len() as i64));
        }
        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    (ids[0], ids[ids.len() - 1])
}

/// Reads the outline back as `(depth, title)` pairs in pre-order.
pub fn outline_titles(doc: &Document) -> Result<Vec<(usize, String)>, ComposerError> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_dictionary(root_id)?;
    let Ok(outlines_id) = catalog.get(b"Outlines").and_then(Object::as_reference) else {
        return Ok(Vec::new());
    };
    let mut titles = Vec::new();
    collect_titles(doc, doc.get_dictionary(outlines_id)?, 1, &mut titles)?;
    Ok(titles)
}

fn collect_titles(
    doc: &Document,
    parent: &Dictionary,
    depth: usize,
    titles: &mut Vec<(usize, String)>,
) -> Result<(), ComposerError> {
    let mut next = parent.get(b"First").and_then(Object::as_reference).ok();
    while let Some(id) = next {
        let item = doc.get_dictionary(id)?;
        titles.push((depth, lopdf::decode_text_string(item.get(b"Title")?)?));
        collect_titles(doc, item, depth + 1, titles)?;
        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::page_ids;
    use crate::test_utils::create_dummy_pdf;
    use toclink_types::Point;

    fn dest(page_index: usize) -> Destination {
        Destination::new(page_index, Point::new(0.0, 700.0))
    }

    #[test]
    fn writes_nested_outline() {
        let mut doc = create_dummy_pdf(3, "Page");
        let pages = page_ids(&doc);
        let items = vec![
            OutlineItem::new("Intro", dest(0))
                .with_children(vec![OutlineItem::new("A", dest(0)), OutlineItem::new("B", dest(1))]),
            OutlineItem::new("Conclusion", dest(2)),
        ];

        let root = write_outline(&mut doc, &items, &pages).unwrap().unwrap();

        let outlines = doc.get_dictionary(root).unwrap();
        assert_eq!(outlines.get(b"Count").unwrap().as_i64().unwrap(), 2);
        assert_eq!(
            outline_titles(&doc).unwrap(),
            vec![
                (1, "Intro".to_string()),
                (2, "A".to_string()),
                (2, "B".to_string()),
                (1, "Conclusion".to_string()),
            ]
        );

        let root_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let catalog = doc.get_dictionary(root_id).unwrap();
        assert_eq!(catalog.get(b"PageMode").unwrap().as_name().unwrap(), b"UseOutlines");
    }

    #[test]
    fn destinations_reference_the_mapped_page() {
        let mut doc = create_dummy_pdf(2, "Page");
        let pages = page_ids(&doc);
        let root = write_outline(&mut doc, &[OutlineItem::new("Second", dest(1))], &pages)
            .unwrap()
            .unwrap();

        let first = doc.get_dictionary(root).unwrap().get(b"First").unwrap().as_reference().unwrap();
        let item = doc.get_dictionary(first).unwrap();
        let d = item.get(b"Dest").unwrap().as_array().unwrap();
        assert_eq!(d[0].as_reference().unwrap(), pages[1]);
        assert_eq!(d[3].as_float().unwrap(), 700.0);
    }

    #[test]
    fn out_of_range_page_omits_dest() {
        let mut doc = create_dummy_pdf(1, "Page");
        let pages = page_ids(&doc);
        let root = write_outline(&mut doc, &[OutlineItem::new("Ghost", dest(9))], &pages)
            .unwrap()
            .unwrap();
        let first = doc.get_dictionary(root).unwrap().get(b"First").unwrap().as_reference().unwrap();
        assert!(!doc.get_dictionary(first).unwrap().has(b"Dest"));
    }

    #[test]
    fn non_ascii_titles_survive_the_round_trip() {
        let mut doc = create_dummy_pdf(1, "Page");
        let pages = page_ids(&doc);
        write_outline(&mut doc, &[OutlineItem::new("Über 第一章", dest(0))], &pages).unwrap();
        assert_eq!(outline_titles(&doc).unwrap(), vec![(1, "Über 第一章".to_string())]);
    }

    #[test]
    fn empty_outline_writes_nothing() {
        let mut doc = create_dummy_pdf(1, "Page");
        let pages = page_ids(&doc);
        assert!(write_outline(&mut doc, &[], &pages).unwrap().is_none());
        assert!(outline_titles(&doc).unwrap().is_empty());
    }
}
