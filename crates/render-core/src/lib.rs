//! Contracts between the linking pipeline and its external collaborators.
//!
//! - [`DocumentRenderer`]: markup in, paginated lopdf document out
//! - [`TocTransform`]: structured [`TocDocument`] in, presentational markup out
//!
//! Concrete collaborators are provided for both: [`CommandRenderer`] runs an
//! HTML-to-PDF program and [`HandlebarsTocTransform`] renders the built-in or
//! a user supplied TOC template. [`to_outline_xml`] dumps the TOC data for
//! debugging templates.

mod command;
mod error;
mod template;
mod traits;
mod types;
mod xml;

pub use command::{
    CommandRenderer, INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER, PAGE_OPTIONS_PLACEHOLDER,
};
pub use error::RenderError;
pub use template::{ENTRY_PARTIAL_NAME, HandlebarsTocTransform};
pub use traits::{DocumentRenderer, TocTransform};
pub use types::{PageOptions, RenderRequest, TocDocument, TocRecord};
pub use xml::{OUTLINE_NAMESPACE, to_outline_xml};
