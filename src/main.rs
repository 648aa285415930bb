use clap::Parser;
use log::{error, info};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use toclink::{CommandRenderer, ConverterBuilder, FilterConfig, PageOptions, PipelineError};
use toclink_marker::DEFAULT_MARKER_PREFIX;
use toclink_types::filter::{DEFAULT_MAX_DEPTH, FilterConfigError};

/// Converts HTML to PDF with a linked table of contents and a navigation outline.
#[derive(Parser, Debug)]
#[command(name = "toclink", version, about)]
struct Cli {
    /// Markup file to convert.
    input: PathBuf,
    /// Where to write the PDF.
    output: PathBuf,

    /// Insert a table of contents in front of the content.
    #[arg(long)]
    toc: bool,
    /// Write the document outline (bookmarks).
    #[arg(long)]
    outline: bool,

    /// Heading levels listed in the table of contents, e.g. "1,2,3".
    #[arg(long, value_parser = parse_levels, default_value = "1,2,3")]
    toc_levels: BTreeSet<u8>,
    /// Maximum nesting depth of the table of contents.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    toc_depth: usize,
    /// Heading levels listed in the outline, e.g. "1,2,3".
    #[arg(long, value_parser = parse_levels, default_value = "1,2,3")]
    outline_levels: BTreeSet<u8>,
    /// Maximum nesting depth of the outline.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    outline_depth: usize,

    #[arg(long, default_value = "Table of Contents")]
    toc_title: String,
    /// Language tag of the table of contents markup.
    #[arg(long, default_value = "en")]
    lang: String,
    /// Style sheet linked from the table of contents.
    #[arg(long)]
    user_style_sheet: Option<String>,
    /// Handlebars template replacing the built-in table of contents layout.
    #[arg(long)]
    toc_template: Option<PathBuf>,
    /// Write the table of contents data as outline XML.
    #[arg(long)]
    dump_toc: Option<PathBuf>,

    /// Markup rendered as cover page(s) before everything else.
    #[arg(long)]
    cover: Option<PathBuf>,

    #[arg(long)]
    margin_top: Option<String>,
    #[arg(long)]
    margin_right: Option<String>,
    #[arg(long)]
    margin_bottom: Option<String>,
    #[arg(long)]
    margin_left: Option<String>,
    #[arg(long)]
    page_width: Option<String>,
    #[arg(long)]
    page_height: Option<String>,

    /// HTML-to-PDF program to use instead of `wkhtmltopdf` (same flags).
    #[arg(long)]
    renderer: Option<String>,
    /// URI prefix reserved for marker links.
    #[arg(long, default_value = DEFAULT_MARKER_PREFIX)]
    marker_prefix: String,
    /// Keep tagged markup and intermediate files.
    #[arg(long)]
    keep_temp: bool,
    /// Print a JSON summary of the run to stdout.
    #[arg(long)]
    report: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_levels(list: &str) -> Result<BTreeSet<u8>, FilterConfigError> {
    FilterConfig::parse_levels(list)
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let page = PageOptions {
        margin_top: cli.margin_top,
        margin_right: cli.margin_right,
        margin_bottom: cli.margin_bottom,
        margin_left: cli.margin_left,
        paper_width: cli.page_width,
        paper_height: cli.page_height,
    };

    let mut builder = ConverterBuilder::new()
        .with_toc(cli.toc)
        .with_outline(cli.outline)
        .with_toc_filter(FilterConfig::new(cli.toc_levels, cli.toc_depth))
        .with_outline_filter(FilterConfig::new(cli.outline_levels, cli.outline_depth))
        .with_toc_title(cli.toc_title)
        .with_language(cli.lang)
        .with_marker_prefix(cli.marker_prefix)
        .with_page_options(page)
        .keep_temp_files(cli.keep_temp);

    if let Some(href) = cli.user_style_sheet {
        builder = builder.with_user_style_sheet(href);
    }
    if let Some(template) = cli.toc_template {
        builder = builder.with_toc_template(template);
    }
    if let Some(dump) = cli.dump_toc {
        builder = builder.with_dump_toc(dump);
    }
    if let Some(cover) = cli.cover {
        builder = builder.with_cover(cover);
    }
    if let Some(program) = cli.renderer {
        let renderer = CommandRenderer::from_path(&program, CommandRenderer::wkhtmltopdf_args())?;
        builder = builder.with_renderer(renderer);
    }

    let converter = builder.build()?;
    info!("Converting '{}' to '{}'...", cli.input.display(), cli.output.display());
    let report = converter.convert(&cli.input, &cli.output)?;

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
