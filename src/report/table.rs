use chrono::NaiveDate;
use serde::Serialize;

use super::column::{Alignment, ColumnSettings};
use super::format::{format_cell, DEFAULT_DATE_FORMAT};
use super::value::{CellValue, FieldTable};
use crate::error::{ExportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    Default,
    Negative,
    Total,
    GrandTotal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    #[serde(skip)]
    pub value: CellValue,
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub field: String,
    pub name: String,
    pub align: Alignment,
    #[serde(skip)]
    pub format: Option<String>,
}

/// Title block and filters of a tabular report
#[derive(Debug, Clone, Default)]
pub struct ReportMeta {
    pub title: String,
    pub subtitle: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// `label: value` pairs shown in the header, in order
    pub filter_labels: Vec<(String, String)>,
    pub orientation: Orientation,
}

/// Format-neutral report: what both the spreadsheet and the PDF backend draw
#[derive(Debug, Clone, Serialize)]
pub struct TableDocument {
    pub title: String,
    pub subtitle: Option<String>,
    pub header_lines: Vec<String>,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Vec<Cell>>,
    pub totals: Option<Vec<Cell>>,
    pub orientation: Orientation,
}

impl TableDocument {
    /// Validate inputs and lay out one row per record in `order`.
    ///
    /// Nothing is produced unless every ordered field is configured, has an
    /// accessor, and every total column is numeric for every record.
    pub fn build<R>(
        records: &[R],
        fields: &FieldTable<R>,
        settings: &ColumnSettings,
        order: &[String],
        meta: &ReportMeta,
    ) -> Result<Self> {
        let (columns, values) = extract_columns(records, fields, settings, order)?;

        let mut totalled = false;
        let mut grand_total: Option<&str> = None;
        for (idx, field) in order.iter().enumerate() {
            let Some(setting) = settings.get(field) else {
                continue;
            };
            if setting.is_grand_total {
                if !setting.include_in_total {
                    return Err(ExportError::Configuration(format!(
                        "grand total column '{field}' is not totalled"
                    )));
                }
                if let Some(previous) = grand_total.replace(field.as_str()) {
                    return Err(ExportError::Configuration(format!(
                        "columns '{previous}' and '{field}' are both marked as the grand total"
                    )));
                }
            }
            if !setting.include_in_total {
                continue;
            }
            totalled = true;
            if let Some(pos) = values.iter().position(|row| row[idx].as_number().is_none()) {
                return Err(ExportError::Configuration(format!(
                    "column '{field}' is totalled but record {} is not numeric",
                    pos + 1
                )));
            }
        }

        let rows: Vec<Vec<Cell>> = values
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(order)
                    .map(|(value, field)| {
                        let setting = settings.get(field);
                        let negative =
                            setting.is_some_and(|s| s.highlight_negative) && value.is_negative();
                        let text = format_cell(&value, setting.and_then(|s| s.format.as_deref()));
                        Cell {
                            value,
                            text,
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

        let totals = totalled.then(|| totals_row(&rows, settings, order));

        let mut header_lines = Vec::new();
        if let Some(range) = date_range_line(meta.date_from, meta.date_to) {
            header_lines.push(range);
        }
        header_lines.extend(
            meta.filter_labels
                .iter()
                .map(|(label, value)| format!("{label}: {value}")),
        );

        Ok(Self {
            title: meta.title.clone(),
            subtitle: meta.subtitle.clone(),
            header_lines,
            columns,
            rows,
            totals,
            orientation: meta.orientation,
        })
    }
}

/// Validated headers plus raw values, one inner vector per record
pub(crate) fn extract_columns<R>(
    records: &[R],
    fields: &FieldTable<R>,
    settings: &ColumnSettings,
    order: &[String],
) -> Result<(Vec<ColumnHeader>, Vec<Vec<CellValue>>)> {
    let mut columns = Vec::with_capacity(order.len());
    let mut accessors = Vec::with_capacity(order.len());

    for (idx, field) in order.iter().enumerate() {
        if order[..idx].contains(field) {
            return Err(ExportError::Configuration(format!(
                "column '{field}' appears more than once in the column order"
            )));
        }
        let setting = settings.get(field).ok_or_else(|| {
            ExportError::Configuration(format!("column '{field}' has no column setting"))
        })?;
        let accessor = fields.get(field).ok_or_else(|| {
            ExportError::Configuration(format!("column '{field}' has no value accessor"))
        })?;

        columns.push(ColumnHeader {
            field: field.clone(),
            name: setting.display_name.clone(),
            align: setting.alignment,
            format: setting.format.clone(),
        });
        accessors.push(accessor);
    }

    let values = records
        .iter()
        .map(|record| accessors.iter().map(|get| get(record)).collect())
        .collect();

    Ok((columns, values))
}

fn totals_row(rows: &[Vec<Cell>], settings: &ColumnSettings, order: &[String]) -> Vec<Cell> {
    order
        .iter()
        .enumerate()
        .map(|(idx, field)| match settings.get(field) {
            Some(setting) if setting.include_in_total => {
                let sum: f64 = rows.iter().filter_map(|row| row[idx].value.as_number()).sum();
                let value = CellValue::Number(sum);
                Cell {
                    text: format_cell(&value, setting.format.as_deref()),
                    value,
                    style: if setting.is_grand_total {
                        CellStyle::GrandTotal
                    } else {
                        CellStyle::Total
                    },
                }
            }
            _ => Cell {
                value: CellValue::Empty,
                text: String::new(),
                style: CellStyle::Total,
            },
        })
        .collect()
}

/// `Period: 01-01-2024 to END`; `None` when both bounds are open
pub fn date_range_line(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<String> {
    if from.is_none() && to.is_none() {
        return None;
    }
    let from = from.map_or_else(
        || "START".to_string(),
        |d| d.format(DEFAULT_DATE_FORMAT).to_string(),
    );
    let to = to.map_or_else(
        || "END".to_string(),
        |d| d.format(DEFAULT_DATE_FORMAT).to_string(),
    );
    Some(format!("Period: {from} to {to}"))
}
