use serde::Serialize;

use super::data::{Entity, InvoiceData, PaymentLine};
use crate::error::{ExportError, Result};
use crate::report::format::{format_cell, DEFAULT_DATETIME_FORMAT};
use crate::report::table::{extract_columns, Cell, CellStyle, ColumnHeader};
use crate::report::{CellValue, ColumnSettings, FieldTable};

/// A titled table without totals, used for invoice line items and secondary detail
#[derive(Debug, Clone, Serialize)]
pub struct TableSection {
    pub title: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableSection {
    /// Columns follow the order of `settings`; invoices have no separate order step.
    pub fn build<R>(
        title: &str,
        records: &[R],
        fields: &FieldTable<R>,
        settings: &ColumnSettings,
    ) -> Result<Self> {
        let order = settings.fields();
        let (columns, values) = extract_columns(records, fields, settings, &order)?;

        let rows = values
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&columns)
                    .map(|(value, column)| {
                        let negative = settings
                            .get(&column.field)
                            .is_some_and(|s| s.highlight_negative)
                            && value.is_negative();
                        Cell {
                            text: format_cell(&value, column.format.as_deref()),
                            value,
                            style: if negative {
                                CellStyle::Negative
                            } else {
                                CellStyle::Default
                            },
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            title: title.to_string(),
            columns,
            rows,
        })
    }
}

/// Format-neutral single-transaction document
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDocument {
    pub title: String,
    pub seller: Entity,
    pub bill_to: Entity,
    /// Transaction identifiers shown beside the title
    pub facts: Vec<(String, String)>,
    pub lines: TableSection,
    pub secondary: Option<TableSection>,
    pub summary: Vec<(String, String)>,
    pub payments: Vec<PaymentLine>,
    pub remarks: Option<String>,
    pub stamp: Option<String>,
}

impl InvoiceDocument {
    pub fn build<R>(
        data: &InvoiceData,
        line_items: &[R],
        line_fields: &FieldTable<R>,
        line_settings: &ColumnSettings,
        secondary: Option<TableSection>,
        summary_fields: &[(String, String)],
    ) -> Result<Self> {
        if line_items.is_empty() {
            return Err(ExportError::MissingData(format!(
                "No transaction details found for '{}'",
                data.number
            )));
        }

        let lines = TableSection::build("", line_items, line_fields, line_settings)?;

        let mut facts = vec![
            (format!("{} No", short_type(&data.invoice_type)), data.number.clone()),
            ("Date".to_string(), timestamp(data.date)),
        ];
        if let Some(reference) = &data.reference {
            facts.push(("Reference No".to_string(), reference.number.clone()));
            facts.push(("Reference Date".to_string(), timestamp(reference.date)));
        }

        Ok(Self {
            title: data.invoice_type.clone(),
            seller: data.seller.clone(),
            bill_to: data.bill_to.clone().unwrap_or_else(Entity::walk_in),
            facts,
            lines,
            secondary,
            summary: summary_fields.to_vec(),
            payments: data.payment_lines(),
            remarks: data.remarks.clone().filter(|r| !r.trim().is_empty()),
            stamp: data.status.stamp().map(str::to_string),
        })
    }
}

fn timestamp(value: chrono::NaiveDateTime) -> String {
    format_cell(&CellValue::DateTime(value), Some(DEFAULT_DATETIME_FORMAT))
}

// "SALE INVOICE" -> "Invoice", "KITCHEN ISSUE NOTE" -> "Note"
fn short_type(invoice_type: &str) -> String {
    let last = invoice_type.split_whitespace().last().unwrap_or("Document");
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => "Document".to_string(),
    }
}
