//! Itinerary PDF Library
//!
//! Builds a trip itinerary in memory and renders it into a paged PDF.
//! This library provides functionality to:
//! - Edit an itinerary (overview, days, flights, hotels, payment plan, ...)
//! - Save and load JSON drafts
//! - Turn the itinerary into an ordered sequence of content blocks
//! - Pack measured blocks onto fixed-size pages above a footer band
//! - Write the pages as a PDF with a branded footer on every page
//!
//! # Example
//!
//! ```no_run
//! use itinerary_pdf::model::Itinerary;
//! use itinerary_pdf::pdf::{export_pdf, CancelToken, ExportOptions};
//! use std::path::Path;
//!
//! let itinerary = Itinerary::example();
//! let report = export_pdf(
//!     &itinerary,
//!     Path::new("itinerary.pdf"),
//!     &ExportOptions::default(),
//!     &CancelToken::new(),
//! )
//! .expect("Failed to export itinerary");
//! println!("{} pages", report.pages);
//! ```

pub mod blocks;
pub mod date;
pub mod draft;
pub mod error;
pub mod layout;
pub mod model;
pub mod pack;
pub mod pdf;
pub mod raster;

// Re-export commonly used items
pub use blocks::{Block, BlockKind};
pub use error::{Error, Result};
pub use model::Itinerary;
pub use pack::{pack, PackSettings, Packer, Page, Placement};
pub use raster::{Raster, Rasterizer, TextRasterizer};
