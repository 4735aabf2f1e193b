//! Export pipeline
//!
//! validate → build blocks → rasterize each block in order → pack → write.
//! The packing decision for a block is made as soon as its raster is known,
//! and the document lands on disk through a temporary file in the target
//! directory so a failed or cancelled export leaves nothing behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use chrono::{Local, NaiveDate};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use crate::blocks::Block;
use crate::date::file_stamp;
use crate::error::{Error, Result};
use crate::layout::PageGeometry;
use crate::model::Itinerary;
use crate::pack::{Packer, Page};
use crate::raster::{Raster, Rasterizer, TextRasterizer};
use super::footer::FooterIdentity;
use super::writer::{build_document, document_bytes, DocumentInfo};

/// Options for exporting an itinerary
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub geometry: PageGeometry,
    /// Identity printed in every footer
    pub identity: FooterIdentity,
    /// Date used in the default file name
    pub date: NaiveDate,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            identity: FooterIdentity::default(),
            date: Local::now().date_naive(),
        }
    }
}

/// Shared flag that stops an export in progress
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Blocks, their rasters and the pages they were packed onto
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    pub blocks: Vec<Block>,
    pub rasters: Vec<Raster>,
    pub pages: Vec<Page>,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of blocks that did not fit on an empty page
    pub fn clipped_blocks(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| &page.placements)
            .filter(|p| p.clipped)
            .count()
    }
}

/// Rasterize and pack every block of an itinerary
///
/// Does not validate; [`render_pdf`] and [`export_pdf`] do.
pub fn plan_layout(
    itinerary: &Itinerary,
    geometry: &PageGeometry,
    rasterizer: &mut dyn Rasterizer,
    cancel: &CancelToken,
) -> Result<LayoutPlan> {
    let blocks = itinerary.blocks();
    let width = geometry.content_width();
    let mut packer = Packer::new(geometry.pack_settings());
    let mut rasters = Vec::with_capacity(blocks.len());

    for block in &blocks {
        cancel.check()?;
        let raster = rasterizer.rasterize(block, width)?;
        debug!(block = %block.label(), height = raster.height, "block rasterized");
        packer.place(raster.height);
        rasters.push(raster);
    }

    Ok(LayoutPlan {
        blocks,
        rasters,
        pages: packer.finish(),
    })
}

/// A rendered document still in memory
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub plan: LayoutPlan,
}

/// Validate, lay out and serialize an itinerary
pub fn render_pdf(
    itinerary: &Itinerary,
    options: &ExportOptions,
    rasterizer: &mut dyn Rasterizer,
    cancel: &CancelToken,
) -> Result<RenderedPdf> {
    itinerary.validate()?;
    let plan = plan_layout(itinerary, &options.geometry, rasterizer, cancel)?;

    let info = DocumentInfo {
        title: itinerary.overview.trip_title.trim().to_string(),
        author: options.identity.company.clone(),
        creator: env!("CARGO_PKG_NAME").to_string(),
    };
    let mut doc = build_document(&plan.pages, &plan.rasters, &options.geometry, &options.identity, &info)?;
    let bytes = document_bytes(&mut doc)?;
    Ok(RenderedPdf { bytes, plan })
}

/// Result of a completed export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub pages: usize,
    pub blocks: usize,
    pub clipped: usize,
}

/// Export with the built-in rasterizer
pub fn export_pdf(
    itinerary: &Itinerary,
    output: &Path,
    options: &ExportOptions,
    cancel: &CancelToken,
) -> Result<ExportReport> {
    export_pdf_with(itinerary, output, options, &mut TextRasterizer::new(), cancel)
}

/// Export an itinerary to `output`
///
/// The file only appears once the whole document has been written.
pub fn export_pdf_with(
    itinerary: &Itinerary,
    output: &Path,
    options: &ExportOptions,
    rasterizer: &mut dyn Rasterizer,
    cancel: &CancelToken,
) -> Result<ExportReport> {
    let rendered = render_pdf(itinerary, options, rasterizer, cancel)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&rendered.bytes)?;
    file.flush()?;

    cancel.check()?;
    file.persist(output).map_err(|e| Error::Io(e.error))?;

    let report = ExportReport {
        path: output.to_path_buf(),
        pages: rendered.plan.page_count(),
        blocks: rendered.plan.blocks.len(),
        clipped: rendered.plan.clipped_blocks(),
    };
    info!(
        path = %report.path.display(),
        pages = report.pages,
        blocks = report.blocks,
        "itinerary exported"
    );
    Ok(report)
}

fn file_part(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<Brand>_Itinerary_<Customer>_<YYYY-MM-DD>.pdf`
pub fn default_file_name(itinerary: &Itinerary, identity: &FooterIdentity, date: &NaiveDate) -> String {
    let brand = file_part(&identity.brand);
    let mut chars = brand.chars();
    let brand = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => "Trip".to_string(),
    };

    let mut customer = file_part(&itinerary.overview.customer_name);
    if customer.is_empty() {
        customer = "Customer".to_string();
    }
    format!("{}_Itinerary_{}_{}.pdf", brand, customer, file_stamp(date))
}
