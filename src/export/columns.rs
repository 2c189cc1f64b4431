use super::views::{LineView, TransactionRow};
use crate::report::{Alignment, CellValue, ColumnSetting, Dimension, FieldTable};

pub fn row_fields() -> FieldTable<TransactionRow> {
    FieldTable::<TransactionRow>::new()
        .field("number", |r| CellValue::text(r.number.as_str()))
        .field("date", |r| CellValue::DateTime(r.date))
        .field("company", |r| CellValue::text(r.company.as_str()))
        .field("party", |r| CellValue::opt_text(r.party.as_deref()))
        .field("location", |r| CellValue::text(r.location.as_str()))
        .field("kitchen", |r| CellValue::opt_text(r.kitchen.as_deref()))
        .field("items", |r| CellValue::Number(r.items))
        .field("quantity", |r| CellValue::Number(r.quantity))
        .field("sub_total", |r| CellValue::Number(r.sub_total))
        .field("discount", |r| CellValue::Number(r.discount))
        .field("tax", |r| CellValue::Number(r.tax))
        .field("grand_total", |r| CellValue::Number(r.grand_total))
        .field("created_by", |r| CellValue::text(r.created_by.as_str()))
        .field("created_at", |r| CellValue::DateTime(r.created_at))
        .field("updated_by", |r| CellValue::opt_text(r.updated_by.as_deref()))
        .field("updated_at", |r| CellValue::opt_datetime(r.updated_at))
        .field("remarks", |r| CellValue::opt_text(r.remarks.as_deref()))
}

pub fn line_fields() -> FieldTable<LineView> {
    FieldTable::<LineView>::new()
        .field("product", |l| CellValue::text(l.product.as_str()))
        .field("unit", |l| CellValue::text(l.unit.as_str()))
        .field("quantity", |l| CellValue::Number(l.quantity))
        .field("rate", |l| CellValue::Number(l.rate))
        .field("discount", |l| CellValue::Number(l.discount))
        .field("tax", |l| CellValue::Number(l.tax))
        .field("amount", |l| CellValue::Number(l.amount))
}

/// Which row field carries each pinnable dimension
pub const ROW_DIMENSIONS: [(Dimension, &str); 4] = [
    (Dimension::Company, "company"),
    (Dimension::Party, "party"),
    (Dimension::Location, "location"),
    (Dimension::Kitchen, "kitchen"),
];

pub fn number(display_name: &str) -> ColumnSetting {
    ColumnSetting::new("number", display_name).required()
}

pub fn date() -> ColumnSetting {
    ColumnSetting::new("date", "Date")
        .format("%d-%m-%Y")
        .align(Alignment::Center)
        .required()
}

pub fn text(field: &str, display_name: &str) -> ColumnSetting {
    ColumnSetting::new(field, display_name)
}

pub fn count(field: &str, display_name: &str) -> ColumnSetting {
    ColumnSetting::new(field, display_name)
        .format("#,##0")
        .align(Alignment::Right)
        .total()
}

pub fn quantity() -> ColumnSetting {
    ColumnSetting::new("quantity", "Quantity")
        .format("#,##0.000")
        .align(Alignment::Right)
        .total()
}

pub fn grand_total(display_name: &str) -> ColumnSetting {
    ColumnSetting::amount("grand_total", display_name)
        .highlight_negative()
        .grand_total()
}

pub fn timestamp(field: &str, display_name: &str) -> ColumnSetting {
    ColumnSetting::new(field, display_name)
        .format("%d-%m-%Y %H:%M")
        .align(Alignment::Center)
}

pub fn audit() -> [ColumnSetting; 4] {
    [
        text("created_by", "Created By"),
        timestamp("created_at", "Created At"),
        text("updated_by", "Updated By"),
        timestamp("updated_at", "Updated At"),
    ]
}

/// Line columns for invoice tables; `amount` is the line's net value
pub fn line_product() -> [ColumnSetting; 2] {
    [text("product", "Item"), text("unit", "Unit")]
}

pub fn line_quantity() -> ColumnSetting {
    ColumnSetting::new("quantity", "Qty")
        .format("#,##0.000")
        .align(Alignment::Right)
}

pub fn line_money(field: &str, display_name: &str) -> ColumnSetting {
    ColumnSetting::new(field, display_name)
        .format("#,##0.00")
        .align(Alignment::Right)
}
