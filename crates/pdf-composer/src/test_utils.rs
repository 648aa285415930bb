use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, StringFormat, Stream, dictionary};

/// Creates a simple dummy PDF document with a specified number of pages.
/// Each page has a unique text content "<prefix> X".
pub fn create_dummy_pdf(num_pages: u32, text_prefix: &str) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids = vec![];
    for i in 1..=num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("{} {}", text_prefix, i).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    // MediaBox and Resources live on the page tree node so splicing has to
    // carry inherited attributes over.
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids,
        "Count" => num_pages as i64,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => resources_id,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Adds a URI link annotation to a page, either as an indirect object or
/// inline in the page's `Annots` array.
pub fn add_uri_link(doc: &mut Document, page_id: ObjectId, rect: [f32; 4], uri: &str, indirect: bool) {
    let annot = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect.iter().map(|&v| Object::Real(v)).collect::<Vec<_>>(),
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::String(uri.as_bytes().to_vec(), StringFormat::Literal),
        },
    };
    let entry = if indirect {
        Object::Reference(doc.add_object(annot))
    } else {
        Object::Dictionary(annot)
    };
    let page = doc.get_object_mut(page_id).unwrap().as_dict_mut().unwrap();
    let mut annots = page
        .get(b"Annots")
        .and_then(Object::as_array)
        .cloned()
        .unwrap_or_default();
    annots.push(entry);
    page.set("Annots", annots);
}

pub fn page_text(doc: &Document, page_number: u32) -> String {
    let page_id = doc.get_pages()[&page_number];
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}
