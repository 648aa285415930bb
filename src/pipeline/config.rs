use std::path::PathBuf;
use toclink_marker::MarkerScheme;
use toclink_render_core::PageOptions;
use toclink_types::FilterConfig;

pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";
pub const DEFAULT_LANGUAGE: &str = "en";

/// What to generate around the converted content and how.
#[derive(Debug, Clone, PartialEq)]
pub struct TocOptions {
    /// Render an inline table of contents in front of the content.
    pub toc: bool,
    /// Write the navigation outline.
    pub outline: bool,
    pub toc_filter: FilterConfig,
    pub outline_filter: FilterConfig,
    pub title: String,
    pub language: String,
    /// Style sheet linked from the table of contents markup.
    pub user_style_sheet: Option<String>,
    /// A handlebars template replacing the built-in table of contents layout.
    pub template: Option<PathBuf>,
    /// Where to write the structured table of contents as outline XML.
    pub dump_toc: Option<PathBuf>,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            toc: false,
            outline: false,
            toc_filter: FilterConfig::default(),
            outline_filter: FilterConfig::default(),
            title: DEFAULT_TOC_TITLE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            user_style_sheet: None,
            template: None,
            dump_toc: None,
        }
    }
}

impl TocOptions {
    /// Whether headings need to be tagged and extracted at all.
    pub fn needs_headings(&self) -> bool {
        self.toc || self.outline
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConverterConfig {
    pub marker: MarkerScheme,
    pub toc: TocOptions,
    pub page: PageOptions,
    /// Markup rendered on its own and placed before everything else.
    pub cover: Option<PathBuf>,
    /// Leave tagged markup and intermediate files on disk.
    pub keep_temp_files: bool,
}
