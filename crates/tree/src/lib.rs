//! Heading trees.
//!
//! A flat, document-ordered list of leveled headings is turned into a
//! nested [`Tree`] by [`build_tree`], and each output (inline table of
//! contents, navigation outline) gets its own projection via
//! [`Tree::filtered`].
//!
//! Nodes live in an arena and refer to their children by [`NodeId`], so
//! there is no shared ownership and no way to form a cycle.

mod builder;
mod filter;
mod node;
mod tree;

pub use builder::{TreeBuilder, build_tree};
pub use node::{Node, NodeId};
pub use tree::{DepthFirst, Tree};

use toclink_types::Entry;

/// Builds the heading tree for extracted entries, which must already be in
/// heading order.
pub fn build_entry_tree(entries: impl IntoIterator<Item = Entry>) -> Tree<Entry> {
    build_tree(entries.into_iter().map(|entry| (entry.level(), entry)))
}
