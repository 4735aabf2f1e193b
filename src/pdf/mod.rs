//! PDF output: page assembly, footer band, export pipeline and read-back

pub mod export;
pub mod footer;
pub mod metadata;
pub mod writer;

// Re-export commonly used items
pub use export::{
    default_file_name, export_pdf, export_pdf_with, plan_layout, render_pdf, CancelToken,
    ExportOptions, ExportReport, LayoutPlan, RenderedPdf,
};
pub use footer::{footer_ops, FooterIdentity};
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
pub use writer::{build_document, escape_pdf_string, DocumentInfo};
