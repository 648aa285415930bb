//! Heading-driven table of contents and outline generation for rendered
//! documents.
//!
//! Headings in the source markup are tagged with recoverable markers, the
//! markup is rendered, and the markers are read back from the rendered
//! document to learn where each heading landed. From there a heading tree
//! is built and projected into a navigation outline and an inline table of
//! contents whose entries link to the headings they list.

pub mod error;
pub mod extract;
pub mod outline;
pub mod pipeline;
pub mod toc;

pub use error::PipelineError;
pub use extract::{DESTINATION_Y_OFFSET, DestinationExtractor, Extraction};
pub use outline::{emit_outline, outline_items};
pub use pipeline::{ConversionReport, Converter, ConverterBuilder, ConverterConfig, Stage, TocOptions};
pub use toc::{TocLinker, serialize_toc};

pub use toclink_marker::{MarkerScheme, Tagger};
pub use toclink_render_core::{
    CommandRenderer, DocumentRenderer, HandlebarsTocTransform, PageOptions, RenderError, RenderRequest,
    TocDocument, TocRecord, TocTransform,
};
pub use toclink_tree::Tree;
pub use toclink_types::{Destination, Entry, FilterConfig, Heading, Point};
