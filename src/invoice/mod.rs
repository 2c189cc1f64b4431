mod data;
mod document;

pub use data::{Entity, InvoiceData, PaymentLine, TransactionRef, TransactionStatus};
pub use document::{InvoiceDocument, TableSection};

use tracing::debug;

use crate::error::Result;
use crate::render::DocumentRenderer;
use crate::report::{ColumnSettings, FieldTable};

/// Render a single-transaction document to a buffer.
///
/// Fails with `MissingData` when there are no line items.
pub fn render_invoice<R>(
    data: &InvoiceData,
    line_items: &[R],
    line_fields: &FieldTable<R>,
    line_settings: &ColumnSettings,
    secondary: Option<TableSection>,
    summary_fields: &[(String, String)],
    renderer: &dyn DocumentRenderer,
) -> Result<Vec<u8>> {
    let document = InvoiceDocument::build(
        data,
        line_items,
        line_fields,
        line_settings,
        secondary,
        summary_fields,
    )?;
    let bytes = renderer.render_invoice(&document)?;
    debug!(number = %data.number, bytes = bytes.len(), "rendered invoice");
    Ok(bytes)
}
