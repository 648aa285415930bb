//! Outline XML in the `http://wkhtmltopdf.org/outline` vocabulary, for
//! inspecting the data a TOC template receives.

use crate::error::RenderError;
use crate::types::{TocDocument, TocRecord};
use serde::Serialize;

pub const OUTLINE_NAMESPACE: &str = "http://wkhtmltopdf.org/outline";

#[derive(Serialize)]
#[serde(rename = "outline")]
struct OutlineXml<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    item: ItemXml<'a>,
}

#[derive(Serialize)]
struct ItemXml<'a> {
    #[serde(rename = "@title")]
    title: &'a str,
    #[serde(rename = "@page", skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
    #[serde(rename = "@link", skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
    item: Vec<ItemXml<'a>>,
}

impl<'a> ItemXml<'a> {
    fn from_record(record: &'a TocRecord) -> Self {
        Self {
            title: &record.title,
            page: Some(record.page),
            link: Some(&record.link),
            item: record.children.iter().map(ItemXml::from_record).collect(),
        }
    }
}

/// Serializes the table of contents as `outline > item(root) > item…`.
/// The root item has an empty title and no page, mirroring the tree's
/// synthetic root.
pub fn to_outline_xml(toc: &TocDocument) -> Result<String, RenderError> {
    let outline = OutlineXml {
        xmlns: OUTLINE_NAMESPACE,
        item: ItemXml {
            title: "",
            page: None,
            link: None,
            item: toc.items.iter().map(ItemXml::from_record).collect(),
        },
    };
    let body = quick_xml::se::to_string(&outline).map_err(|e| RenderError::Xml(e.to_string()))?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}\n"))
}
