//! Itinerary PDF CLI tool
//!
//! A command-line tool for writing itinerary drafts and exporting them as PDFs.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use glob::glob;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use itinerary_pdf::date::{parse_date_expression, resolve_date};
use itinerary_pdf::draft::{load_draft, save_draft};
use itinerary_pdf::layout::{Length, Margins, PageGeometry};
use itinerary_pdf::model::Itinerary;
use itinerary_pdf::pdf::{
    default_file_name, export_pdf, extract_metadata, plan_layout, CancelToken, ExportOptions,
    FooterIdentity,
};
use itinerary_pdf::{Error, TextRasterizer};

/// Itinerary PDF - Build trip itineraries and export them as paged PDFs
#[derive(Parser)]
#[command(name = "itinerary-pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Start from the bundled example
    itinerary-pdf example -o singapore.json

    # Check a draft before exporting
    itinerary-pdf validate singapore.json

    # Export to a chosen file and open it
    itinerary-pdf export singapore.json -o trip.pdf --open

    # Export every draft in a folder with default file names
    itinerary-pdf export \"drafts/*.json\"")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Page geometry overrides
#[derive(Args)]
struct GeometryArgs {
    /// Height of the footer band in millimeters
    #[arg(long, default_value_t = 35.0)]
    footer_height: f64,

    /// Page margin in millimeters
    #[arg(long, default_value_t = 10.0)]
    margin: f64,
}

impl GeometryArgs {
    fn geometry(&self) -> PageGeometry {
        PageGeometry {
            margins: Margins::uniform(Length::from_mm(self.margin)),
            footer_height: Length::from_mm(self.footer_height),
            ..PageGeometry::a4()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty draft
    New {
        /// Draft file to create
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the bundled example draft
    Example {
        /// Draft file to create
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check that a draft has every field required for export
    Validate {
        /// Draft file
        draft: PathBuf,
    },

    /// List the blocks of a draft with their measured heights
    Blocks {
        /// Draft file
        draft: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Show how the blocks of a draft are packed onto pages
    Layout {
        /// Draft file
        draft: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Export drafts as PDF
    Export {
        /// Draft files. Supports glob patterns like "*.json"
        #[arg(required = true)]
        drafts: Vec<String>,

        /// Output PDF file path (single draft only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Date for the default file name (e.g., "today", "friday+1", "2026-01-14")
        #[arg(long)]
        date: Option<String>,

        /// JSON file with the company identity printed in the footer
        #[arg(long)]
        identity: Option<PathBuf>,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show information about an exported PDF
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::New { output } => cmd_new(&output),
        Commands::Example { output } => cmd_example(&output),
        Commands::Validate { draft } => cmd_validate(&draft),
        Commands::Blocks { draft, geometry } => cmd_blocks(&draft, &geometry),
        Commands::Layout { draft, geometry } => cmd_layout(&draft, &geometry),
        Commands::Export { drafts, output, date, identity, geometry, open } => {
            cmd_export(drafts, output, date, identity, &geometry, open)
        }
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Expand glob patterns in input paths
fn expand_globs(patterns: Vec<String>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matched = false;
            for entry in glob(&pattern).with_context(|| format!("Invalid pattern: {}", pattern))? {
                match entry {
                    Ok(path) => {
                        paths.push(path);
                        matched = true;
                    }
                    Err(e) => eprintln!("Warning: glob error for {}: {}", pattern, e),
                }
            }
            if !matched {
                bail!("No files matched pattern: {}", pattern);
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    paths.sort();
    Ok(paths)
}

/// Open a file with the system default application
fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

fn read_draft(path: &Path) -> Result<Itinerary> {
    load_draft(path).with_context(|| format!("Failed to load draft {}", path.display()))
}

fn cmd_new(output: &Path) -> Result<()> {
    save_draft(&Itinerary::new(), output)?;
    eprintln!("Created: {}", output.display());
    Ok(())
}

fn cmd_example(output: &Path) -> Result<()> {
    save_draft(&Itinerary::example(), output)?;
    eprintln!("Created: {}", output.display());
    Ok(())
}

fn cmd_validate(draft: &Path) -> Result<()> {
    let itinerary = read_draft(draft)?;
    itinerary.validate()?;
    println!("{}: ready to export", draft.display());
    Ok(())
}

fn cmd_blocks(draft: &Path, geometry: &GeometryArgs) -> Result<()> {
    let itinerary = read_draft(draft)?;
    let plan = plan_layout(&itinerary, &geometry.geometry(), &mut TextRasterizer::new(), &CancelToken::new())?;

    for (i, (block, raster)) in plan.blocks.iter().zip(&plan.rasters).enumerate() {
        println!("{:>3}  {:<8}  {:>7.1} mm  {}", i + 1, block.kind().name(), raster.height, block.label());
    }
    Ok(())
}

fn cmd_layout(draft: &Path, geometry: &GeometryArgs) -> Result<()> {
    let itinerary = read_draft(draft)?;
    let plan = plan_layout(&itinerary, &geometry.geometry(), &mut TextRasterizer::new(), &CancelToken::new())?;

    for page in &plan.pages {
        println!("Page {}", page.number);
        for placement in &page.placements {
            let block = &plan.blocks[placement.block];
            let clipped = if placement.clipped {
                format!("  (clipped from {:.1} mm)", placement.measured)
            } else {
                String::new()
            };
            println!(
                "  y {:>6.1}  h {:>6.1}  {}{}",
                placement.y,
                placement.height,
                block.label(),
                clipped
            );
        }
    }
    eprintln!("{} blocks on {} pages", plan.blocks.len(), plan.page_count());
    Ok(())
}

fn cmd_export(
    drafts: Vec<String>,
    output: Option<PathBuf>,
    date: Option<String>,
    identity: Option<PathBuf>,
    geometry: &GeometryArgs,
    open: bool,
) -> Result<()> {
    let drafts = expand_globs(drafts)?;
    if output.is_some() && drafts.len() > 1 {
        bail!("--output can only be used with a single draft ({} given)", drafts.len());
    }

    let mut options = ExportOptions {
        geometry: geometry.geometry(),
        ..ExportOptions::default()
    };
    if let Some(expr) = date {
        let parsed = parse_date_expression(&expr)?;
        if let Some(resolved) = resolve_date(&parsed)? {
            options.date = resolved;
        }
    }
    if let Some(path) = identity {
        options.identity = FooterIdentity::from_file(&path)
            .with_context(|| format!("Failed to load identity {}", path.display()))?;
    }

    eprintln!("Exporting {} draft(s)...", drafts.len());
    let cancel = CancelToken::new();
    for draft in &drafts {
        let itinerary = read_draft(draft)?;
        let target = match &output {
            Some(path) => path.clone(),
            None => {
                let name = default_file_name(&itinerary, &options.identity, &options.date);
                draft.parent().map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
            }
        };

        let report = match export_pdf(&itinerary, &target, &options, &cancel) {
            Ok(report) => report,
            Err(Error::Validation(missing)) => {
                bail!("{}: missing required fields: {}", draft.display(), missing.join(", "))
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to export {}", draft.display())),
        };

        eprintln!("Output: {} ({} pages)", report.path.display(), report.pages);
        if report.clipped > 0 {
            eprintln!("Warning: {} block(s) were too tall for a page and were clipped", report.clipped);
        }
        if open {
            open_file(&report.path)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let metadata = extract_metadata(input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);
    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }
    if let Some(creator) = metadata.creator {
        println!("Creator: {}", creator);
    }

    Ok(())
}
