// src/pipeline/orchestrator.rs
use super::config::ConverterConfig;
use crate::error::PipelineError;
use crate::extract::DestinationExtractor;
use crate::outline::emit_outline;
use crate::toc::{TocLinker, serialize_toc};
use log::{debug, info};
use lopdf::Document;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use toclink_marker::Tagger;
use toclink_pdf_composer::{page_ids, prepend_pages};
use toclink_render_core::{DocumentRenderer, RenderRequest, TocTransform, to_outline_xml};
use toclink_tree::build_entry_tree;

/// The states a conversion run moves through, in order. Outline emission
/// and the table of contents branch are each skipped when not requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Tagged,
    ContentRendered,
    Extracted,
    TreeBuilt,
    Filtered,
    OutlineEmitted,
    TocSerialized,
    TocRendered,
    TocLinked,
    Assembled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A summary of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Headings found by the tagger.
    pub headings: usize,
    /// Headings bound to a rendered destination.
    pub entries: usize,
    pub cover_pages: usize,
    pub toc_pages: usize,
    pub content_pages: usize,
    /// Links resolved on the table of contents pages.
    pub toc_links: usize,
    pub outline_written: bool,
    /// States entered during the run, in order.
    pub stages: Vec<Stage>,
}

impl ConversionReport {
    fn enter(&mut self, stage: Stage) {
        match self.stages.last() {
            Some(previous) => debug!("[CONVERTER] {} -> {}", previous, stage),
            None => debug!("[CONVERTER] -> {}", stage),
        }
        self.stages.push(stage);
    }

    pub fn total_pages(&self) -> usize {
        self.cover_pages + self.toc_pages + self.content_pages
    }
}

/// Converts markup into a paginated document with an optional table of
/// contents, navigation outline and cover page.
pub struct Converter {
    config: ConverterConfig,
    renderer: Box<dyn DocumentRenderer>,
    transform: Box<dyn TocTransform>,
}

impl Converter {
    pub(crate) fn new(
        config: ConverterConfig,
        renderer: Box<dyn DocumentRenderer>,
        transform: Box<dyn TocTransform>,
    ) -> Self {
        Self { config, renderer, transform }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Converts `input` and writes the result to `output`.
    ///
    /// The document is saved to a temporary file next to `output` and moved
    /// into place only once it has been written completely, so a failed run
    /// never leaves a partial file at `output`.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionReport, PipelineError> {
        let output = output.as_ref();
        let (mut doc, report) = self.convert_to_document(input)?;

        let mut staged = NamedTempFile::new_in(parent_dir(output))?;
        doc.save_to(staged.as_file_mut())?;
        staged.persist(output)?;

        info!(
            "[CONVERTER] Wrote {} page(s) to '{}'.",
            report.total_pages(),
            output.display()
        );
        Ok(report)
    }

    /// Runs the whole pipeline and returns the assembled document.
    pub fn convert_to_document<P: AsRef<Path>>(
        &self,
        input: P,
    ) -> Result<(Document, ConversionReport), PipelineError> {
        let input = input.as_ref();
        let mut report = ConversionReport::default();
        let work_dir = tempfile::Builder::new().prefix("toclink-").tempdir()?;

        let mut doc = if self.config.toc.needs_headings() {
            self.convert_with_headings(input, work_dir.path(), &mut report)?
        } else {
            info!("[CONVERTER] No TOC or outline requested; rendering '{}' as is.", input.display());
            let doc = self.render(input)?;
            report.content_pages = doc.get_pages().len();
            doc
        };

        if let Some(cover) = &self.config.cover {
            let cover_doc = self.render(cover)?;
            report.cover_pages = prepend_pages(&mut doc, &cover_doc)?.len();
            info!("[CONVERTER] Added {} cover page(s).", report.cover_pages);
        }

        doc.prune_objects();
        report.enter(Stage::Assembled);

        if self.config.keep_temp_files {
            let kept = work_dir.keep();
            info!("[CONVERTER] Keeping intermediate files in '{}'.", kept.display());
        }
        Ok((doc, report))
    }

    fn convert_with_headings(
        &self,
        input: &Path,
        work_dir: &Path,
        report: &mut ConversionReport,
    ) -> Result<Document, PipelineError> {
        let options = &self.config.toc;
        let scheme = &self.config.marker;

        let source = fs::read_to_string(input)?;
        let tagged = Tagger::new(scheme.clone()).tag(&source);
        report.headings = tagged.headings.len();
        info!("[TAGGER] Tagged {} heading(s) in '{}'.", tagged.headings.len(), input.display());
        report.enter(Stage::Tagged);

        // Staged beside the input so relative resources still resolve.
        let staged = stage_markup(parent_dir(input), ".toclink-", &tagged.markup)?;
        let rendered = self.render(staged.path());
        self.retain(staged)?;
        let mut doc = rendered?;
        report.content_pages = doc.get_pages().len();
        report.enter(Stage::ContentRendered);

        if tagged.headings.is_empty() {
            info!("[CONVERTER] No headings found; skipping TOC and outline.");
            return Ok(doc);
        }

        let extraction = DestinationExtractor::new(scheme).extract(&mut doc, &tagged.headings)?;
        report.entries = extraction.entries.len();
        report.enter(Stage::Extracted);

        let tree = build_entry_tree(extraction.entries);
        report.enter(Stage::TreeBuilt);

        let outline_tree = options.outline.then(|| tree.filtered(&options.outline_filter));
        let toc_tree = options.toc.then(|| tree.filtered(&options.toc_filter));
        debug!(
            "[CONVERTER] Filtered trees: outline {} ({}), toc {} ({}).",
            outline_tree.as_ref().map_or(0, |t| t.len()),
            options.outline_filter,
            toc_tree.as_ref().map_or(0, |t| t.len()),
            options.toc_filter
        );
        report.enter(Stage::Filtered);

        // Captured before anything is spliced in; these page objects keep
        // their identity when the TOC pages are prepended.
        let content_pages = page_ids(&doc);

        if let Some(outline_tree) = outline_tree {
            report.outline_written = emit_outline(&mut doc, &outline_tree, &content_pages)?.is_some();
            report.enter(Stage::OutlineEmitted);
        }

        if let Some(toc_tree) = toc_tree {
            let toc = serialize_toc(&toc_tree, scheme, options);
            if let Some(dump_path) = &options.dump_toc {
                fs::write(dump_path, to_outline_xml(&toc)?)?;
                info!("[TOC] Dumped {} record(s) to '{}'.", toc.record_count(), dump_path.display());
            }
            report.enter(Stage::TocSerialized);

            let markup = self.transform.transform(&toc)?;
            let staged = stage_markup(work_dir, "toc-", &markup)?;
            let rendered = self.render(staged.path());
            self.retain(staged)?;
            let toc_doc = rendered?;
            report.enter(Stage::TocRendered);

            let toc_pages = prepend_pages(&mut doc, &toc_doc)?;
            report.toc_pages = toc_pages.len();
            let stats = TocLinker::new(scheme).link(&mut doc, &toc_pages, &content_pages)?;
            report.toc_links = stats.replaced;
            report.enter(Stage::TocLinked);
        }

        Ok(doc)
    }

    fn render(&self, input: &Path) -> Result<Document, PipelineError> {
        debug!("[RENDER] Rendering '{}'.", input.display());
        let request = RenderRequest::new(input, &self.config.page);
        Ok(self.renderer.render(&request)?)
    }

    /// Drops a staged file, or keeps it on disk when asked to.
    fn retain(&self, staged: NamedTempFile) -> Result<(), PipelineError> {
        if self.config.keep_temp_files {
            let path = staged.into_temp_path().keep()?;
            info!("[CONVERTER] Kept '{}'.", path.display());
        }
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn stage_markup(dir: &Path, prefix: &str, markup: &str) -> Result<NamedTempFile, PipelineError> {
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".html")
        .tempfile_in(dir)?;
    file.write_all(markup.as_bytes())?;
    file.flush()?;
    Ok(file)
}
