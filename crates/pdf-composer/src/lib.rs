//! Low-level PDF plumbing on top of `lopdf`.
//!
//! Covers the document surgery the conversion pipeline needs once a renderer
//! has produced its output: finding and rewriting URI link annotations,
//! splicing pages from one document in front of another, and writing the
//! native outline.

pub mod actions;
pub mod annotations;
pub mod error;
pub mod merge;
pub mod outline;

#[cfg(test)]
mod test_utils;

pub use actions::{goto_action, goto_link_annotation, rect_array, xyz_destination};
pub use annotations::{LinkDisposition, LinkRewriteStats, UriLink, collect_uri_links, rewrite_uri_links};
pub use error::ComposerError;
pub use merge::{page_ids, prepend_pages};
pub use outline::{OutlineItem, outline_titles, write_outline};
