//! A [`DocumentRenderer`] that shells out to an HTML-to-PDF program.

use crate::error::RenderError;
use crate::traits::DocumentRenderer;
use crate::types::{PageOptions, RenderRequest};
use log::{debug, info};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Replaced by the markup file path.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Replaced by the path the program must write the PDF to.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";
/// Replaced by zero or more page geometry flags.
pub const PAGE_OPTIONS_PLACEHOLDER: &str = "{page-options}";

const WKHTMLTOPDF: &str = "wkhtmltopdf";

/// Runs an external program once per render request and loads the PDF it
/// writes. The call blocks until the program exits.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandRenderer {
    /// `args` may contain [`INPUT_PLACEHOLDER`], [`OUTPUT_PLACEHOLDER`] and
    /// [`PAGE_OPTIONS_PLACEHOLDER`].
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Locates `name` on `PATH`.
    pub fn from_path(name: &str, args: Vec<String>) -> Result<Self, RenderError> {
        let program = which::which(name).map_err(|source| RenderError::MissingRenderer {
            name: name.to_string(),
            source,
        })?;
        Ok(Self::new(program, args))
    }

    /// `wkhtmltopdf`, located on `PATH`.
    pub fn wkhtmltopdf() -> Result<Self, RenderError> {
        Self::from_path(WKHTMLTOPDF, Self::wkhtmltopdf_args())
    }

    /// The argument list used for `wkhtmltopdf` and compatible programs.
    pub fn wkhtmltopdf_args() -> Vec<String> {
        [
            "--quiet",
            "--enable-local-file-access",
            PAGE_OPTIONS_PLACEHOLDER,
            INPUT_PLACEHOLDER,
            OUTPUT_PLACEHOLDER,
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn expand_args(&self, input: &Path, output: &Path, page: &PageOptions) -> Vec<String> {
        let mut expanded = Vec::with_capacity(self.args.len() + 12);
        for arg in &self.args {
            match arg.as_str() {
                PAGE_OPTIONS_PLACEHOLDER => expanded.extend(page_flags(page)),
                _ => expanded.push(
                    arg.replace(INPUT_PLACEHOLDER, &input.to_string_lossy())
                        .replace(OUTPUT_PLACEHOLDER, &output.to_string_lossy()),
                ),
            }
        }
        expanded
    }
}

/// Page geometry in the flag style understood by `wkhtmltopdf`.
fn page_flags(page: &PageOptions) -> Vec<String> {
    let mut flags = Vec::new();
    let margins = [
        ("--margin-top", &page.margin_top),
        ("--margin-right", &page.margin_right),
        ("--margin-bottom", &page.margin_bottom),
        ("--margin-left", &page.margin_left),
    ];
    for (flag, value) in margins {
        if let Some(value) = value {
            flags.push(flag.to_string());
            flags.push(value.clone());
        }
    }
    if let Some((width, height)) = page.paper_size() {
        flags.extend([
            "--page-width".to_string(),
            width.to_string(),
            "--page-height".to_string(),
            height.to_string(),
        ]);
    }
    flags
}

impl DocumentRenderer for CommandRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Document, RenderError> {
        let output = tempfile::Builder::new()
            .prefix("toclink-render-")
            .suffix(".pdf")
            .tempfile()?;
        let args = self.expand_args(request.input, output.path(), request.page);

        info!(
            "[RENDER] Rendering '{}' with '{}'.",
            request.input.display(),
            self.program.display()
        );
        debug!("[RENDER] Arguments: {:?}", args);

        let result = Command::new(&self.program).args(&args).output()?;
        if !result.status.success() {
            return Err(RenderError::Command {
                program: self.program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let document = Document::load(output.path())?;
        debug!("[RENDER] Loaded {} page(s).", document.get_pages().len());
        Ok(document)
    }
}
