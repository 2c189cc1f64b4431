use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::invoice::InvoiceDocument;
use crate::pdf::TypstRenderer;
use crate::report::TableDocument;
use crate::xlsx::XlsxRenderer;

/// Turns the format-neutral document models into file bytes
pub trait DocumentRenderer {
    fn render_table(&self, document: &TableDocument) -> Result<Vec<u8>>;
    fn render_invoice(&self, document: &InvoiceDocument) -> Result<Vec<u8>>;
    fn extension(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn renderer(&self, pdf: &crate::config::PdfSettings) -> Box<dyn DocumentRenderer> {
        match self {
            ExportFormat::Xlsx => Box::new(XlsxRenderer),
            ExportFormat::Pdf => Box::new(TypstRenderer::new(&pdf.typst, &pdf.paper)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::InvalidArgument(format!(
                "Invalid format '{other}'. Use 'xlsx' or 'pdf'."
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Xlsx => f.write_str("xlsx"),
            ExportFormat::Pdf => f.write_str("pdf"),
        }
    }
}
