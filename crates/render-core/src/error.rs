use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Renderer executable '{name}' not found: {source}")]
    MissingRenderer {
        name: String,
        #[source]
        source: which::Error,
    },
    #[error("Renderer '{}' exited with {status}: {stderr}", program.display())]
    Command {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Invalid TOC template: {0}")]
    TemplateSyntax(#[from] handlebars::TemplateError),
    #[error("TOC template rendering error: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("TOC XML serialization error: {0}")]
    Xml(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
