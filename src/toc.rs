//! The table of contents emitter and the cross-document linker.
//!
//! A filtered heading tree is serialized into a [`TocDocument`] whose
//! records carry a placeholder link encoding the heading's destination.
//! Once the transform's markup has been rendered and its pages spliced in
//! front of the content, [`TocLinker`] turns each placeholder into a
//! `GoTo` link at the content page it names.

use crate::error::PipelineError;
use crate::pipeline::config::TocOptions;
use log::{info, warn};
use lopdf::{Document, ObjectId};
use toclink_marker::{MarkerScheme, display_text};
use toclink_pdf_composer::{LinkDisposition, LinkRewriteStats, goto_link_annotation, rewrite_uri_links};
use toclink_render_core::{TocDocument, TocRecord};
use toclink_tree::{NodeId, Tree};
use toclink_types::Entry;

/// Serializes `tree` into the data handed to the TOC transform.
pub fn serialize_toc(tree: &Tree<Entry>, scheme: &MarkerScheme, options: &TocOptions) -> TocDocument {
    TocDocument {
        title: options.title.clone(),
        lang: options.language.clone(),
        style_sheet: options.user_style_sheet.clone(),
        items: records_under(tree, tree.root(), scheme),
    }
}

fn records_under(tree: &Tree<Entry>, parent: NodeId, scheme: &MarkerScheme) -> Vec<TocRecord> {
    tree.children(parent)
        .iter()
        .filter_map(|&id| {
            let entry = tree.value(id)?;
            Some(TocRecord {
                title: display_text(&entry.heading.content),
                level: entry.level(),
                page: entry.destination.page_number(),
                link: scheme.destination_marker(&entry.destination),
                children: records_under(tree, id, scheme),
            })
        })
        .collect()
}

/// Resolves placeholder links on rendered TOC pages.
pub struct TocLinker<'a> {
    scheme: &'a MarkerScheme,
}

impl<'a> TocLinker<'a> {
    pub fn new(scheme: &'a MarkerScheme) -> Self {
        Self { scheme }
    }

    /// Replaces every placeholder on `toc_pages` with a link annotation over
    /// the same area that jumps to the encoded destination in
    /// `content_pages`. Placeholders that fail to decode or name a missing
    /// page are stripped. Other links are left untouched.
    pub fn link(
        &self,
        doc: &mut Document,
        toc_pages: &[ObjectId],
        content_pages: &[ObjectId],
    ) -> Result<LinkRewriteStats, PipelineError> {
        let stats = rewrite_uri_links(doc, toc_pages, |link| {
            let Some(payload) = self.scheme.payload(&link.uri) else {
                return LinkDisposition::Keep;
            };
            let destination = match self.scheme.decode_destination(payload) {
                Ok(destination) => destination,
                Err(e) => {
                    warn!("[TOC] Dropping undecodable placeholder '{}': {}", link.uri, e);
                    return LinkDisposition::Remove;
                }
            };
            match content_pages.get(destination.page_index) {
                Some(&page_id) => {
                    LinkDisposition::Replace(goto_link_annotation(&link.rect, page_id, destination.point))
                }
                None => {
                    warn!(
                        "[TOC] Placeholder points at page {} but the content has {} page(s).",
                        destination.page_number(),
                        content_pages.len()
                    );
                    LinkDisposition::Remove
                }
            }
        })?;

        info!(
            "[TOC] Linked {} placeholder(s) on {} page(s); dropped {}.",
            stats.replaced,
            toc_pages.len(),
            stats.removed
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, StringFormat, dictionary};
    use toclink_pdf_composer::{collect_uri_links, page_ids, prepend_pages};
    use toclink_tree::build_entry_tree;
    use toclink_types::{Destination, FilterConfig, Heading, Point};

    fn entry(level: u8, id: &str, page: usize) -> Entry {
        Entry::new(
            Heading::new(level, id, id.to_uppercase()),
            Destination::new(page, Point::new(0.0, 500.0)),
        )
    }

    fn sample_tree() -> Tree<Entry> {
        build_entry_tree(vec![
            entry(1, "intro", 0),
            entry(2, "a", 0),
            entry(2, "b", 1),
            entry(1, "conclusion", 2),
        ])
    }

    fn blank_pages(count: usize, links: &[&str]) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let mut kids = Vec::new();
        for i in 0..count {
            let annots: Vec<Object> = if i == 0 {
                links
                    .iter()
                    .map(|uri| {
                        dictionary! {
                            "Type" => "Annot",
                            "Subtype" => "Link",
                            "Rect" => vec![Object::Real(72.0), Object::Real(600.0), Object::Real(500.0), Object::Real(614.0)],
                            "A" => dictionary! {
                                "S" => "URI",
                                "URI" => Object::String(uri.as_bytes().to_vec(), StringFormat::Literal),
                            },
                        }
                        .into()
                    })
                    .collect()
            } else {
                Vec::new()
            };
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Annots" => annots,
            });
            kids.push(Object::Reference(page_id));
        }
        doc.objects.insert(
            pages_id,
            dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count as i64 }.into(),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn serializes_nested_records_with_one_based_pages() {
        let scheme = MarkerScheme::default();
        let toc = serialize_toc(&sample_tree(), &scheme, &TocOptions::default());

        assert_eq!(toc.title, "Table of Contents");
        assert_eq!(toc.lang, "en");
        assert_eq!(toc.items.len(), 2);
        assert_eq!(toc.items[0].title, "INTRO");
        assert_eq!(toc.items[0].page, 1);
        assert_eq!(toc.items[0].children[1].page, 2);
        assert_eq!(toc.items[1].page, 3);
        assert_eq!(toc.record_count(), 4);
    }

    #[test]
    fn record_links_decode_back_to_destinations() {
        let scheme = MarkerScheme::default();
        let toc = serialize_toc(&sample_tree(), &scheme, &TocOptions::default());

        let link = &toc.items[1].link;
        let payload = scheme.payload(link).unwrap();
        let dest = scheme.decode_destination(payload).unwrap();
        assert_eq!(dest, Destination::new(2, Point::new(0.0, 500.0)));
    }

    #[test]
    fn filter_limits_records() {
        let scheme = MarkerScheme::default();
        let tree = sample_tree().filtered(&FilterConfig::new([1], 6));
        let toc = serialize_toc(&tree, &scheme, &TocOptions::default());
        assert_eq!(toc.record_count(), 2);
        assert!(toc.items.iter().all(|r| r.children.is_empty()));
    }

    #[test]
    fn links_placeholders_to_content_pages() {
        let scheme = MarkerScheme::default();
        let mut content = blank_pages(3, &[]);
        let content_pages = page_ids(&content);

        let placeholder = scheme.destination_marker(&Destination::new(2, Point::new(0.0, 420.0)));
        let toc_doc = blank_pages(1, &[placeholder.as_str(), "https://example.com"]);
        let toc_pages = prepend_pages(&mut content, &toc_doc).unwrap();

        let stats = TocLinker::new(&scheme).link(&mut content, &toc_pages, &content_pages).unwrap();

        assert_eq!(stats.replaced, 1);
        assert_eq!(stats.kept, 1);
        let annots = content
            .get_dictionary(toc_pages[0])
            .unwrap()
            .get(b"Annots")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        let goto = annots
            .iter()
            .filter_map(|a| a.as_reference().ok().and_then(|id| content.get_dictionary(id).ok()).or_else(|| a.as_dict().ok()))
            .find_map(|annot| {
                let action = annot.get(b"A").ok()?.as_dict().ok()?;
                (action.get(b"S").ok()?.as_name().ok()? == b"GoTo").then(|| action.clone())
            })
            .expect("a GoTo link");
        let dest = goto.get(b"D").unwrap().as_array().unwrap();
        assert_eq!(dest[0].as_reference().unwrap(), content_pages[2]);
        assert_eq!(dest[3].as_float().unwrap(), 420.0);
    }

    #[test]
    fn strips_out_of_range_and_garbage_placeholders() {
        let scheme = MarkerScheme::default();
        let mut doc = blank_pages(1, &[]);
        let content_pages = page_ids(&doc);

        let beyond = scheme.destination_marker(&Destination::new(9, Point::zero()));
        let toc_doc = blank_pages(1, &[beyond.as_str(), "http://dummy/#%%%not-a-token"]);
        let toc_pages = prepend_pages(&mut doc, &toc_doc).unwrap();

        let stats = TocLinker::new(&scheme).link(&mut doc, &toc_pages, &content_pages).unwrap();

        assert_eq!(stats.removed, 2);
        assert!(collect_uri_links(&doc, &toc_pages).unwrap().is_empty());
    }
}
