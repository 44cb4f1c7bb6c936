//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, warn};

use folio_ast::Block;
use folio_core::{build_site, segment_blocks, BookConfig, SectionId};
use folio_ooxml::load_docx;

/// Output format for inspection reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripts
    Json,
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Publish a DOCX manuscript as a static HTML book", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the HTML site from a DOCX manuscript
    Build {
        /// Input DOCX file
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "docs")]
        output: PathBuf,

        /// Book configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show how the document splits into sections
    Inspect {
        /// Input DOCX file
        input: PathBuf,

        /// Book configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Install the stderr log subscriber (`RUST_LOG`, default `info`)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI application
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            config,
        } => {
            build_command(&input, &output, config.as_deref())?;
        }
        Commands::Inspect {
            input,
            config,
            format,
        } => {
            inspect_command(&input, config.as_deref(), format)?;
        }
    }

    Ok(())
}

/// Load the book configuration, falling back to the built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<BookConfig> {
    match path {
        Some(path) => {
            let config = BookConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            debug!(path = %path.display(), chapters = config.chapter_count(), "loaded config");
            Ok(config)
        }
        None => Ok(BookConfig::default()),
    }
}

/// Execute the build command
pub fn build_command(input: &Path, output_dir: &Path, config: Option<&Path>) -> Result<()> {
    println!("folio v{}", folio_core::VERSION);
    println!("Building: {}", input.display());

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let config = load_config(config)?;
    let blocks = load_docx(input)
        .with_context(|| format!("Failed to read DOCX file: {}", input.display()))?;
    info!(blocks = blocks.len(), "loaded document");

    let site = build_site(&blocks, &config);

    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    for page in &site.pages {
        let path = output_dir.join(&page.file_name);
        fs::write(&path, &page.html)
            .with_context(|| format!("Failed to write page: {}", path.display()))?;
        println!("  Created: {}", path.display());
    }

    let download = output_dir.join(&config.download_name);
    fs::copy(input, &download)
        .with_context(|| format!("Failed to copy document: {}", download.display()))?;
    println!("  Created: {}", download.display());

    println!();
    println!("Build complete!");
    println!("  {} pages", site.pages.len());
    if !site.missing.is_empty() {
        let names: Vec<String> = site.missing.iter().map(ToString::to_string).collect();
        warn!(missing = %names.join(", "), "some sections were not found");
        println!("  {} sections not found: {}", names.len(), names.join(", "));
    }

    Ok(())
}

/// Section partition of a document, for checking anchors against a revision
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub blocks: usize,
    pub paragraphs: usize,
    pub sections: Vec<SectionReport>,
    pub missing: Vec<SectionId>,
}

/// One located section
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub name: SectionId,
    pub start: usize,
    pub end: usize,
    pub count: usize,
    /// Part heading in effect, for chapters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
}

/// Load a document and compute its section partition
pub fn inspect_report(input: &Path, config: Option<&Path>) -> Result<InspectReport> {
    let config = load_config(config)?;
    let blocks = load_docx(input)
        .with_context(|| format!("Failed to read DOCX file: {}", input.display()))?;
    let segmentation = segment_blocks(&blocks, &config.structure);

    let mut report = InspectReport {
        blocks: blocks.len(),
        paragraphs: blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count(),
        sections: Vec::new(),
        missing: Vec::new(),
    };

    for id in SectionId::all(config.chapter_count()) {
        match segmentation.range(id) {
            Some(range) => {
                let part = match id {
                    SectionId::Chapter(n) => segmentation.parts.get(&n).cloned(),
                    _ => None,
                };
                report.sections.push(SectionReport {
                    name: id,
                    start: range.start,
                    end: range.end,
                    count: range.len(),
                    part,
                });
            }
            None => report.missing.push(id),
        }
    }

    Ok(report)
}

/// Execute the inspect command
pub fn inspect_command(input: &Path, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let report = inspect_report(input, config)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("folio v{}", folio_core::VERSION);
            println!("Inspecting: {}", input.display());
            println!(
                "  {} blocks, {} paragraphs",
                report.blocks, report.paragraphs
            );
            println!();
            for section in &report.sections {
                let range = format!("{}..{}", section.start, section.end);
                match &section.part {
                    Some(part) => println!(
                        "  {:<12} {:<12} {:>5} blocks  {}",
                        section.name.to_string(),
                        range,
                        section.count,
                        part
                    ),
                    None => println!(
                        "  {:<12} {:<12} {:>5} blocks",
                        section.name.to_string(),
                        range,
                        section.count
                    ),
                }
            }
            for id in &report.missing {
                println!("  {:<12} missing", id.to_string());
            }
        }
    }

    Ok(())
}
