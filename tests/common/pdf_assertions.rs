use lopdf::{Document as LopdfDocument, Object, ObjectId};

/// Where a link annotation leads.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    Uri(String),
    /// One-based page number and top coordinate of a `GoTo` destination.
    GoTo { page: u32, top: f32 },
}

fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// One-based page number of a page object.
pub fn page_number_of(doc: &LopdfDocument, page_id: ObjectId) -> Option<u32> {
    doc.get_pages()
        .into_iter()
        .find_map(|(number, id)| (id == page_id).then_some(number))
}

/// All link annotations of a page, in annotation order.
pub fn page_links(doc: &LopdfDocument, page_number: u32) -> Vec<LinkTarget> {
    let Some(&page_id) = doc.get_pages().get(&page_number) else {
        return Vec::new();
    };
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };
    let Some(annots) = page
        .get(b"Annots")
        .ok()
        .and_then(|a| resolve(doc, a))
        .and_then(|a| a.as_array().ok())
    else {
        return Vec::new();
    };

    annots
        .iter()
        .filter_map(|entry| {
            let annot = resolve(doc, entry)?.as_dict().ok()?;
            let action = resolve(doc, annot.get(b"A").ok()?)?.as_dict().ok()?;
            match action.get(b"S").ok()?.as_name().ok()? {
                b"URI" => {
                    let uri = lopdf::decode_text_string(action.get(b"URI").ok()?).ok()?;
                    Some(LinkTarget::Uri(uri))
                }
                b"GoTo" => {
                    let dest = action.get(b"D").ok()?.as_array().ok()?;
                    let page = page_number_of(doc, dest.first()?.as_reference().ok()?)?;
                    let top = dest.get(3)?.as_float().ok()?;
                    Some(LinkTarget::GoTo { page, top })
                }
                _ => None,
            }
        })
        .collect()
}

/// Every link in the document as `(page number, target)` pairs.
pub fn all_links(doc: &LopdfDocument) -> Vec<(u32, LinkTarget)> {
    let page_count = doc.get_pages().len() as u32;
    (1..=page_count)
        .flat_map(|page| page_links(doc, page).into_iter().map(move |link| (page, link)))
        .collect()
}

pub fn count_internal_links(doc: &LopdfDocument) -> usize {
    all_links(doc)
        .iter()
        .filter(|(_, link)| matches!(link, LinkTarget::GoTo { .. }))
        .count()
}

/// The raw content stream of a page as text.
pub fn page_content(doc: &LopdfDocument, page_number: u32) -> String {
    doc.get_pages()
        .get(&page_number)
        .and_then(|&id| doc.get_page_content(id).ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
