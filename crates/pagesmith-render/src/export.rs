//! Export pipeline: turns the page items into a downloadable artifact.

use crate::html::{HtmlLayout, render_document};
use crate::pdf::{PdfError, PdfOptions, render_pdf};
use pagesmith_core::{ExportDocument, Item};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("PDF export failed: {0}")]
    Pdf(#[from] PdfError),
    #[error("Failed to deliver {file_name}: {reason}")]
    Delivery { file_name: String, reason: String },
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Html => "text/html",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Suggested file name for an export called `base`.
    pub fn file_name(&self, base: &str) -> String {
        format!("{}.{}", base, self.extension())
    }
}

/// A finished export artifact held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Host mechanism that saves an in-memory file (browser download, file write).
pub trait Download {
    fn save(&mut self, file_name: &str, mime_type: &str, bytes: &[u8]) -> ExportResult<()>;
}

/// Collects artifacts in memory.
impl Download for Vec<Artifact> {
    fn save(&mut self, file_name: &str, mime_type: &str, bytes: &[u8]) -> ExportResult<()> {
        self.push(Artifact {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

/// Render `items` in `format` without delivering them.
pub fn render(items: &[Item], format: ExportFormat, file_name: &str) -> ExportResult<Vec<u8>> {
    match format {
        ExportFormat::Json => Ok(ExportDocument::new(items).to_json()?.into_bytes()),
        ExportFormat::Html => Ok(render_document(items, file_name, HtmlLayout::Export).into_bytes()),
        ExportFormat::Pdf => {
            let options = PdfOptions {
                title: file_name.to_string(),
                ..PdfOptions::default()
            };
            render_pdf(items, &options).map_err(|e| {
                log::error!("PDF generation failed for {}: {}", file_name, e);
                ExportError::from(e)
            })
        }
    }
}

/// Render and deliver `items` as `<file_name>.<ext>`.
///
/// Nothing is delivered when rendering fails.
pub fn export<D: Download + ?Sized>(
    items: &[Item],
    format: ExportFormat,
    file_name: &str,
    sink: &mut D,
) -> ExportResult<()> {
    let bytes = render(items, format, file_name)?;
    let target = format.file_name(file_name);
    sink.save(&target, format.mime_type(), &bytes)?;
    log::info!("Exported {} items to {} ({} bytes)", items.len(), target, bytes.len());
    Ok(())
}

/// Export the page as an indented JSON [`ExportDocument`].
pub fn export_to_json<D: Download + ?Sized>(items: &[Item], file_name: &str, sink: &mut D) -> ExportResult<()> {
    export(items, ExportFormat::Json, file_name, sink)
}

/// Export the page as a standalone HTML document.
pub fn export_to_html<D: Download + ?Sized>(items: &[Item], file_name: &str, sink: &mut D) -> ExportResult<()> {
    export(items, ExportFormat::Html, file_name, sink)
}

/// Export the page as a single A4 PDF page.
pub fn export_to_pdf<D: Download + ?Sized>(items: &[Item], file_name: &str, sink: &mut D) -> ExportResult<()> {
    export(items, ExportFormat::Pdf, file_name, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pagesmith_core::{import_from_json, validate_imported_data};

    struct FailingDownload;

    impl Download for FailingDownload {
        fn save(&mut self, file_name: &str, _mime_type: &str, _bytes: &[u8]) -> ExportResult<()> {
            Err(ExportError::Delivery {
                file_name: file_name.to_string(),
                reason: "disk full".to_string(),
            })
        }
    }

    fn sample_items() -> Vec<Item> {
        vec![
            Item::text("Invoice", "invoiceName", Point::new(10.0, 10.0)),
            Item::image("Logo", "logo", Point::new(500.0, 10.0)),
        ]
    }

    #[test]
    fn test_json_export_round_trips() {
        let items = sample_items();
        let mut downloads: Vec<Artifact> = Vec::new();
        export_to_json(&items, "invoice", &mut downloads).unwrap();

        assert_eq!(downloads.len(), 1);
        let artifact = &downloads[0];
        assert_eq!(artifact.file_name, "invoice.json");
        assert_eq!(artifact.mime_type, "application/json");

        let text = String::from_utf8(artifact.bytes.clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(validate_imported_data(&value));
        assert_eq!(import_from_json(&text).unwrap(), items);
    }

    #[test]
    fn test_html_export() {
        let mut downloads: Vec<Artifact> = Vec::new();
        export_to_html(&sample_items(), "invoice", &mut downloads).unwrap();

        let artifact = &downloads[0];
        assert_eq!(artifact.file_name, "invoice.html");
        assert_eq!(artifact.mime_type, "text/html");
        let html = String::from_utf8(artifact.bytes.clone()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>invoice</title>"));
        assert_eq!(html.matches("class=\"item\"").count(), 2);
    }

    #[test]
    fn test_pdf_export() {
        let mut downloads: Vec<Artifact> = Vec::new();
        export_to_pdf(&sample_items(), "invoice", &mut downloads).unwrap();
        export_to_pdf(&[], "blank", &mut downloads).unwrap();

        assert_eq!(downloads[0].file_name, "invoice.pdf");
        assert_eq!(downloads[0].mime_type, "application/pdf");
        assert!(downloads.iter().all(|a| a.bytes.starts_with(b"%PDF-")));
    }

    #[test]
    fn test_delivery_failure_is_returned() {
        let err = export_to_html(&sample_items(), "invoice", &mut FailingDownload).unwrap_err();
        assert!(matches!(err, ExportError::Delivery { .. }));
        assert!(err.to_string().contains("invoice.html"));
    }
}
