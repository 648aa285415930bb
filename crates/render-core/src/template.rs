//! The built-in table of contents transform, backed by handlebars.

use crate::error::RenderError;
use crate::traits::TocTransform;
use crate::types::TocDocument;
use handlebars::Handlebars;
use std::fs;
use std::path::Path;

const TEMPLATE_NAME: &str = "toc";

/// Partial rendering one entry and, recursively, its children.
pub const ENTRY_PARTIAL_NAME: &str = "toc_entry";

const DEFAULT_ENTRY_PARTIAL: &str = r#"<li>
  {{#if title}}
  <a href="{{link}}">
    <div class="entry">
      <div class="chapter">{{title}}</div>
      <div class="page">{{page}}</div>
    </div>
  </a>
  {{/if}}
  {{#if children}}
  <ul>
    {{#each children}}{{> toc_entry}}{{/each}}
  </ul>
  {{/if}}
</li>
"#;

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{lang}}">
  <head>
    <meta charset="utf-8" />
    <title>{{title}}</title>
    {{#if style_sheet}}<link rel="stylesheet" href="{{style_sheet}}" />{{/if}}
    <style>
      .toc * a {
        display: block;
        color: inherit;
        text-decoration: none;
      }

      .toc * .entry {
        page-break-inside: avoid;
        display: grid;
        grid-template-columns: auto max-content;
        grid-template-areas: "chapter page";
        align-items: end;
        gap: 0 .25rem;
      }

      .toc * .chapter {
        grid-area: chapter;
        position: relative;
        overflow: hidden;
      }

      .toc * .chapter::after {
        position: absolute;
        padding-left: .25ch;
        content: " . . . . . . . . . . . . . . . . . . . . . . . . . . . "
        ". . . . . . . . . . . . . . . . . . . . . . . . . . . . . . . . "
        ". . . . . . . . . . . . . . . . . . . . . . . . . . . . . . . . "
        ". . . . . . . . . . . . . . . . . . . . . . . . . . . . . . . . ";
        text-align: right;
      }

      .toc * .page {
        grid-area: page;
      }
    </style>
  </head>
  <body class="toc">
    <h1>{{title}}</h1>
    <ul>
      {{#each items}}{{> toc_entry}}{{/each}}
    </ul>
  </body>
</html>
"#;

/// Renders a [`TocDocument`] to HTML with a handlebars template.
///
/// Custom templates see the same data as the built-in one (`title`, `lang`,
/// `style_sheet`, `items[]` with `title`, `level`, `page`, `link`,
/// `children[]`) and may use the `toc_entry` partial for recursion.
pub struct HandlebarsTocTransform {
    registry: Handlebars<'static>,
}

impl HandlebarsTocTransform {
    /// The built-in dotted-leader layout.
    pub fn new() -> Result<Self, RenderError> {
        Self::from_template_source(DEFAULT_TEMPLATE)
    }

    pub fn from_template_source(source: &str) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_partial(ENTRY_PARTIAL_NAME, DEFAULT_ENTRY_PARTIAL)?;
        registry.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self { registry })
    }

    pub fn from_template_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::from_template_source(&source)
    }
}

impl TocTransform for HandlebarsTocTransform {
    fn transform(&self, toc: &TocDocument) -> Result<String, RenderError> {
        Ok(self.registry.render(TEMPLATE_NAME, toc)?)
    }
}
