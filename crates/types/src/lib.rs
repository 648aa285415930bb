//! Data model shared by the tagging, extraction, tree and emission stages.

pub mod document;
pub mod filter;
pub mod geometry;

pub use document::{Entry, Heading};
pub use filter::{FilterConfig, FilterConfigError};
pub use geometry::{Destination, Point, Rect};
