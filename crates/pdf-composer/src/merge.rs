//! Splicing the pages of one document into another.

use crate::error::ComposerError;
use log::debug;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards the walk up the page tree against malformed, cyclic `Parent` links.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// A helper struct to manage the state of copying objects between documents.
struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self { source_doc, target_doc, id_map: HashMap::new() }
    }

    /// Deep copies an object from the source document to the target document.
    /// It recursively copies all referenced objects, ensuring that each object
    /// is only copied once by tracking it in the `id_map`. Pages reached
    /// through a reference (a link destination, say) go through `copy_page`.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }
        let obj = self.source_doc.get_object(source_id)?;
        if is_page(obj) {
            return self.copy_page(source_id);
        }
        let obj = obj.clone();
        self.copy_as(source_id, obj)
    }

    /// Copies a page without its `Parent` link, so the source page tree is
    /// left behind. Inherited attributes are materialized on the page first.
    fn copy_page(&mut self, page_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&page_id) {
            return Ok(*target_id);
        }
        let mut page = self.source_doc.get_dictionary(page_id)?.clone();
        for key in INHERITABLE_PAGE_KEYS {
            if !page.has(key) {
                if let Some(value) = inherited_attribute(self.source_doc, page_id, key) {
                    page.set(key.to_vec(), value.clone());
                }
            }
        }
        page.remove(b"Parent");
        self.copy_as(page_id, Object::Dictionary(page))
    }

    fn copy_as(&mut self, source_id: ObjectId, obj: Object) -> Result<ObjectId, lopdf::Error> {
        // Reserve the target id before recursing so cyclic references
        // (page -> annotation -> page) resolve to it.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let new_obj = self.remap_references(obj)?;
        self.target_doc.objects.insert(new_id, new_obj);
        Ok(new_id)
    }

    /// Traverses an object and replaces any `Object::Reference` with a new ID
    /// from the target document by recursively calling `copy_object`.
    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => {
                let new_id = self.copy_object(id)?;
                Ok(Object::Reference(new_id))
            }
            Object::Array(arr) => {
                let new_arr = arr
                    .into_iter()
                    .map(|o| self.remap_references(o))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(new_arr))
            }
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }
}

fn is_page(obj: &Object) -> bool {
    obj.as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Page")
}

fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let parent_id = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
    }
    None
}

/// Returns the page object ids of `doc` in page order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Inserts all pages of `source` in front of the first page of `target`.
///
/// Every source page and the objects it references (content streams,
/// resources, annotations) are deep-copied under fresh ids. Existing target
/// page objects keep their ids, so destinations and outline entries that
/// point at them stay valid when pages are prepended.
///
/// Returns the ids of the copied pages in the target document, in order.
pub fn prepend_pages(target: &mut Document, source: &Document) -> Result<Vec<ObjectId>, ComposerError> {
    let source_pages = page_ids(source);
    if source_pages.is_empty() {
        return Ok(Vec::new());
    }

    let mut copier = ObjectCopier::new(source, target);
    let mut copied_page_ids = Vec::with_capacity(source_pages.len());
    for page_id in source_pages {
        copied_page_ids.push(copier.copy_page(page_id)?);
    }

    let root_id = target.trailer.get(b"Root")?.as_reference()?;
    let pages_id = target.get_dictionary(root_id)?.get(b"Pages")?.as_reference()?;
    let pages_dict = target.get_object_mut(pages_id)?.as_dict_mut()?;

    let kids = pages_dict.get(b"Kids")?.as_array()?.clone();
    let original_count = pages_dict.get(b"Count")?.as_i64()?;
    let new_kids: Vec<Object> = copied_page_ids.iter().copied().map(Object::Reference).collect();

    let kids: Vec<Object> = new_kids.into_iter().chain(kids).collect();

    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Count", original_count + copied_page_ids.len() as i64);

    for &page_id in &copied_page_ids {
        if let Ok(Object::Dictionary(page_dict)) = target.get_object_mut(page_id) {
            page_dict.set("Parent", Object::Reference(pages_id));
        }
    }

    debug!("[COMPOSER] Prepended {} page(s).", copied_page_ids.len());
    Ok(copied_page_ids)
}
