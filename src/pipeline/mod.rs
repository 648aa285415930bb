//! Conversion pipeline orchestration.
//!
//! - [`ConverterBuilder`]: fluent builder for a [`Converter`]
//! - [`ConverterConfig`] / [`TocOptions`]: what to generate and how
//! - [`Converter`]: runs tag, render, extract, build, filter, emit, link
//!   and assemble for one input
//!
//! # Example
//!
//! ```ignore
//! use toclink::ConverterBuilder;
//!
//! let converter = ConverterBuilder::new()
//!     .with_toc(true)
//!     .with_outline(true)
//!     .build()?;
//!
//! converter.convert("book.html", "book.pdf")?;
//! ```

mod builder;
pub mod config;
mod orchestrator;

pub use builder::ConverterBuilder;
pub use config::{ConverterConfig, TocOptions};
pub use orchestrator::{ConversionReport, Converter, Stage};
