use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, StringFormat, Stream, dictionary};
use regex::Regex;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use std::sync::LazyLock;
use toclink::{DocumentRenderer, RenderError, RenderRequest};

/// Splits simulated pages.
pub const PAGE_BREAK: &str = "<!-- page-break -->";

const PAGE_TOP: f32 = 742.0;
const LINE_HEIGHT: f32 = 20.0;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*"([^"]*)""#).expect("BUG: invalid LINK_RE regex literal")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("BUG: invalid TAG_RE regex literal"));

/// A deterministic stand-in for an HTML-to-PDF engine.
///
/// Pages are split on [`PAGE_BREAK`]; every `<a href>` on a page becomes a
/// URI link annotation, stacked from the top of the page one line apart.
/// The page text is written as a single text run so it can be asserted on.
#[derive(Clone, Default)]
pub struct SimulatedRenderer {
    /// Markup of every render call, in call order.
    pub rendered: Rc<RefCell<Vec<String>>>,
    /// Fail any render whose markup contains this text.
    pub fail_on: Option<String>,
}

impl SimulatedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(text: &str) -> Self {
        Self { fail_on: Some(text.to_string()), ..Self::default() }
    }
}

impl DocumentRenderer for SimulatedRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Document, RenderError> {
        let markup = fs::read_to_string(request.input)?;
        self.rendered.borrow_mut().push(markup.clone());
        if let Some(needle) = &self.fail_on {
            if markup.contains(needle.as_str()) {
                return Err(RenderError::Other(format!("simulated failure on '{}'", needle)));
            }
        }
        Ok(paginate(&markup))
    }
}

fn paginate(markup: &str) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for page_markup in markup.split(PAGE_BREAK) {
        let annots: Vec<Object> = LINK_RE
            .captures_iter(page_markup)
            .enumerate()
            .map(|(line, caps)| {
                let href = html_escape::decode_html_entities(&caps[1]).into_owned();
                let y = PAGE_TOP - LINE_HEIGHT * line as f32;
                let annot = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => vec![Object::Real(72.0), Object::Real(y), Object::Real(540.0), Object::Real(y + 12.0)],
                    "Border" => vec![0.into(), 0.into(), 0.into()],
                    "A" => dictionary! {
                        "Type" => "Action",
                        "S" => "URI",
                        "URI" => Object::String(href.into_bytes(), StringFormat::Literal),
                    },
                };
                Object::Reference(doc.add_object(annot))
            })
            .collect();

        let text = plain_text(page_markup);
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 760.into()]),
                Operation::new("Tj", vec![Object::String(text.into_bytes(), StringFormat::Literal)]),
                Operation::new("ET", vec![]),
            ],
        };
        let encoded = content.encode().unwrap_or_default();
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "Contents" => content_id,
        };
        if !annots.is_empty() {
            page.set("Annots", annots);
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }.into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn plain_text(markup: &str) -> String {
    let stripped = TAG_RE.replace_all(markup, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    decoded
        .split_whitespace()
        .filter(|word| word.is_ascii())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The scenario document: `intro`, `a` and `b` headings spread over three
/// pages so their markers land on pages 0, 0, 1 and 2.
pub fn scenario_markup() -> String {
    [
        r#"<html><body>
<h1 id="intro">Intro</h1>
<p>Welcome.</p>
<h2 id="a">Part <em>A</em></h2>
<p>See <a href="https://example.com">the site</a>.</p>"#,
        r#"<h2 id="b">Part B</h2>
<p>More text.</p>"#,
        r#"<h1 id="conclusion">Conclusion</h1>
</body></html>"#,
    ]
    .join(PAGE_BREAK)
}

pub fn cover_markup() -> &'static str {
    "<html><body><h1>Cover Page</h1></body></html>"
}
