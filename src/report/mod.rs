mod column;
pub mod filename;
pub mod format;
mod order;
pub mod table;
mod value;

pub use column::{Alignment, ColumnSetting, ColumnSettings};
pub use filename::export_file_name;
pub use order::{ColumnLayout, Dimension, PinnedDimensions, ViewMode};
pub use table::{Cell, CellStyle, ColumnHeader, Orientation, ReportMeta, TableDocument};
pub use value::{Accessor, CellValue, FieldTable};

use tracing::debug;

use crate::error::Result;
use crate::render::DocumentRenderer;

/// Render a tabular report to a document buffer.
///
/// All validation happens before the renderer is called, so a failed call
/// never leaves a partial document behind.
pub fn render_report<R>(
    records: &[R],
    fields: &FieldTable<R>,
    settings: &ColumnSettings,
    order: &[String],
    meta: &ReportMeta,
    renderer: &dyn DocumentRenderer,
) -> Result<Vec<u8>> {
    let document = TableDocument::build(records, fields, settings, order, meta)?;
    let bytes = renderer.render_table(&document)?;
    debug!(
        title = %meta.title,
        rows = document.rows.len(),
        bytes = bytes.len(),
        "rendered report"
    );
    Ok(bytes)
}
