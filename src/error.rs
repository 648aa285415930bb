// src/error.rs
use thiserror::Error;
use toclink_pdf_composer::ComposerError;
use toclink_render_core::RenderError;
use toclink_types::FilterConfigError;

/// A comprehensive error type for the conversion pipeline.
///
/// Only collaborator failures end up here: rendering, the TOC transform,
/// loading or saving documents and the filesystem. Tagging, tree building
/// and filtering cannot fail.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Document composition failed: {0}")]
    Compose(#[from] ComposerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<lopdf::Error> for PipelineError {
    fn from(err: lopdf::Error) -> Self {
        PipelineError::Pdf(err.to_string())
    }
}

impl From<FilterConfigError> for PipelineError {
    fn from(err: FilterConfigError) -> Self {
        PipelineError::Config(err.to_string())
    }
}

impl From<tempfile::PersistError> for PipelineError {
    fn from(err: tempfile::PersistError) -> Self {
        PipelineError::Io(err.error)
    }
}

impl From<tempfile::PathPersistError> for PipelineError {
    fn from(err: tempfile::PathPersistError) -> Self {
        PipelineError::Io(err.error)
    }
}
