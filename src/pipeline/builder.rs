// src/pipeline/builder.rs
use super::config::ConverterConfig;
use super::orchestrator::Converter;
use crate::error::PipelineError;
use log::debug;
use std::path::PathBuf;
use toclink_marker::MarkerScheme;
use toclink_render_core::{
    CommandRenderer, DocumentRenderer, HandlebarsTocTransform, PageOptions, TocTransform,
};
use toclink_types::FilterConfig;

/// A builder for creating a [`Converter`].
#[derive(Default)]
pub struct ConverterBuilder {
    config: ConverterConfig,
    renderer: Option<Box<dyn DocumentRenderer>>,
    transform: Option<Box<dyn TocTransform>>,
}

impl ConverterBuilder {
    /// Creates a new `ConverterBuilder`: no TOC, no outline, `wkhtmltopdf`
    /// as renderer and the built-in TOC layout.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole configuration at once.
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the URI prefix that marks heading and placeholder links.
    pub fn with_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.marker = MarkerScheme::new(prefix);
        self
    }

    pub fn with_toc(mut self, enabled: bool) -> Self {
        self.config.toc.toc = enabled;
        self
    }

    pub fn with_outline(mut self, enabled: bool) -> Self {
        self.config.toc.outline = enabled;
        self
    }

    pub fn with_toc_filter(mut self, filter: FilterConfig) -> Self {
        self.config.toc.toc_filter = filter;
        self
    }

    pub fn with_outline_filter(mut self, filter: FilterConfig) -> Self {
        self.config.toc.outline_filter = filter;
        self
    }

    pub fn with_toc_title(mut self, title: impl Into<String>) -> Self {
        self.config.toc.title = title.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.config.toc.language = language.into();
        self
    }

    pub fn with_user_style_sheet(mut self, href: impl Into<String>) -> Self {
        self.config.toc.user_style_sheet = Some(href.into());
        self
    }

    /// Uses a handlebars template file instead of the built-in TOC layout.
    /// Ignored when a transform is set with [`with_transform`](Self::with_transform).
    pub fn with_toc_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.toc.template = Some(path.into());
        self
    }

    /// Writes the structured TOC data as outline XML to `path` during conversion.
    pub fn with_dump_toc(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.toc.dump_toc = Some(path.into());
        self
    }

    pub fn with_page_options(mut self, page: PageOptions) -> Self {
        self.config.page = page;
        self
    }

    pub fn with_cover(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cover = Some(path.into());
        self
    }

    pub fn keep_temp_files(mut self, keep: bool) -> Self {
        self.config.keep_temp_files = keep;
        self
    }

    pub fn with_renderer<R: DocumentRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_transform<T: TocTransform + 'static>(mut self, transform: T) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Builds the [`Converter`], resolving default collaborators.
    pub fn build(self) -> Result<Converter, PipelineError> {
        if self.config.marker.prefix().is_empty() {
            return Err(PipelineError::Config("marker prefix must not be empty".to_string()));
        }

        let renderer = match self.renderer {
            Some(renderer) => renderer,
            None => {
                let renderer = CommandRenderer::wkhtmltopdf()?;
                debug!("Using renderer at '{}'.", renderer.program().display());
                Box::new(renderer) as Box<dyn DocumentRenderer>
            }
        };

        let transform = match (self.transform, &self.config.toc.template) {
            (Some(transform), _) => transform,
            (None, Some(path)) => {
                debug!("Loading TOC template from '{}'.", path.display());
                Box::new(HandlebarsTocTransform::from_template_file(path)?) as Box<dyn TocTransform>
            }
            (None, None) => Box::new(HandlebarsTocTransform::new()?),
        };

        Ok(Converter::new(self.config, renderer, transform))
    }
}
