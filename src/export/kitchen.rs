use super::columns::{self, ROW_DIMENSIONS};
use super::kind::TransactionKind;
use super::views::ResolvedInvoice;
use crate::error::Result;
use crate::invoice::TableSection;
use crate::report::format::{format_money, format_number};
use crate::report::{ColumnLayout, ColumnSetting, ColumnSettings};

pub fn report_layout(kind: TransactionKind) -> ColumnLayout {
    let number_label = match kind {
        TransactionKind::KitchenProduction => "Batch No",
        TransactionKind::KitchenIssueReturn => "Return No",
        _ => "Issue No",
    };
    let mut settings = vec![
        columns::number(number_label),
        columns::date(),
        columns::text("company", "Company"),
        columns::text("location", "Store"),
        columns::text("kitchen", "Kitchen"),
        columns::count("items", "Items"),
        columns::quantity(),
        columns::grand_total("Value"),
    ];
    settings.extend(columns::audit());
    settings.push(columns::text("remarks", "Remarks"));

    ColumnLayout {
        settings: ColumnSettings::new(settings),
        summary: vec![
            "number", "date", "company", "location", "kitchen", "items", "quantity", "grand_total",
        ],
        all_columns: vec![
            "number", "date", "company", "location", "kitchen", "items", "quantity", "grand_total",
            "created_by", "created_at", "updated_by", "updated_at", "remarks",
        ],
        compact: vec!["number", "date", "kitchen", "quantity"],
        dimensions: ROW_DIMENSIONS.to_vec(),
    }
}

pub fn line_settings() -> ColumnSettings {
    let mut settings: Vec<ColumnSetting> = columns::line_product().into();
    settings.extend([
        columns::line_quantity(),
        columns::line_money("rate", "Cost"),
        columns::line_money("amount", "Value"),
    ]);
    ColumnSettings::new(settings)
}

/// Raw materials consumed by a production batch; other kitchen documents have none
pub fn secondary(invoice: &ResolvedInvoice) -> Result<Option<TableSection>> {
    if invoice.kind != TransactionKind::KitchenProduction || invoice.consumptions.is_empty() {
        return Ok(None);
    }
    let section = TableSection::build(
        "Raw Materials Consumed",
        &invoice.consumptions,
        &columns::line_fields(),
        &line_settings(),
    )?;
    Ok(Some(section))
}

pub fn summary_fields(invoice: &ResolvedInvoice, currency_symbol: &str) -> Vec<(String, String)> {
    let totals = &invoice.totals;
    let mut fields = vec![
        ("Total Quantity".to_string(), format_number(totals.quantity, "#,##0.000")),
        ("Total Value".to_string(), format_money(totals.grand_total, currency_symbol)),
    ];
    if invoice.kind == TransactionKind::KitchenProduction {
        let consumed: f64 = invoice.consumptions.iter().map(|c| c.amount).sum();
        fields.push(("Material Cost".to_string(), format_money(consumed, currency_symbol)));
    }
    fields
}
