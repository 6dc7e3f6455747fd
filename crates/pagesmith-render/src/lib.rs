//! Output rendering for pagesmith templates.
//!
//! Provides:
//! - Standalone HTML documents with escaped item markup
//! - Single-page A4 PDF output using the standard PDF fonts
//! - The export pipeline delivering artifacts through a host [`Download`]
//! - The print adapter driving a host [`PrintHost`]

pub mod escape;
pub mod export;
pub mod html;
pub mod metrics;
pub mod pdf;
pub mod print;

pub use escape::escape;
pub use export::{
    Artifact, Download, ExportError, ExportFormat, ExportResult, export, export_to_html,
    export_to_json, export_to_pdf, render,
};
pub use html::{HtmlLayout, render_document};
pub use pdf::{PdfError, PdfOptions, render_pdf};
pub use print::{PrintContext, PrintHost, PrintJob, PrintStage, print_template, render_print_document};
