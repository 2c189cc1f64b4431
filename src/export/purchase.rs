use super::columns::{self, ROW_DIMENSIONS};
use super::kind::TransactionKind;
use super::views::ResolvedInvoice;
use crate::report::format::format_money;
use crate::report::{ColumnLayout, ColumnSetting, ColumnSettings};

pub fn report_layout(kind: TransactionKind) -> ColumnLayout {
    let number_label = if kind.is_return() { "Return No" } else { "Bill No" };
    let mut settings = vec![
        columns::number(number_label),
        columns::date(),
        columns::text("company", "Company"),
        columns::text("party", "Supplier"),
        columns::text("location", "Location"),
        columns::count("items", "Items"),
        columns::quantity(),
        ColumnSetting::amount("sub_total", "Gross"),
        ColumnSetting::amount("discount", "Discount"),
        ColumnSetting::amount("tax", "Tax"),
        columns::grand_total("Net Amount"),
    ];
    settings.extend(columns::audit());
    settings.push(columns::text("remarks", "Remarks"));

    ColumnLayout {
        settings: ColumnSettings::new(settings),
        summary: vec![
            "number", "date", "company", "party", "location", "items", "quantity", "grand_total",
        ],
        all_columns: vec![
            "number", "date", "company", "party", "location", "items", "quantity", "sub_total",
            "discount", "tax", "grand_total", "created_by", "created_at", "updated_by",
            "updated_at", "remarks",
        ],
        compact: vec!["number", "date", "party", "grand_total"],
        dimensions: ROW_DIMENSIONS.to_vec(),
    }
}

pub fn line_settings() -> ColumnSettings {
    let mut settings: Vec<ColumnSetting> = columns::line_product().into();
    settings.extend([
        columns::line_quantity(),
        columns::line_money("rate", "Rate"),
        columns::line_money("discount", "Disc"),
        columns::line_money("tax", "Tax"),
        columns::line_money("amount", "Amount"),
    ]);
    ColumnSettings::new(settings)
}

pub fn summary_fields(invoice: &ResolvedInvoice, currency_symbol: &str) -> Vec<(String, String)> {
    let totals = &invoice.totals;
    vec![
        ("Gross".to_string(), format_money(totals.sub_total, currency_symbol)),
        ("Discount".to_string(), format_money(totals.discount, currency_symbol)),
        ("Tax".to_string(), format_money(totals.tax, currency_symbol)),
        ("Net Amount".to_string(), format_money(totals.grand_total, currency_symbol)),
    ]
}
