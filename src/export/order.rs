use super::columns::{self, ROW_DIMENSIONS};
use super::views::ResolvedInvoice;
use crate::report::format::format_money;
use crate::report::{ColumnLayout, ColumnSetting, ColumnSettings};

pub fn report_layout() -> ColumnLayout {
    let mut settings = vec![
        columns::number("Order No"),
        columns::date(),
        columns::text("company", "Company"),
        columns::text("party", "Customer"),
        columns::text("location", "Outlet"),
        columns::count("items", "Items"),
        columns::quantity(),
        ColumnSetting::amount("discount", "Discount"),
        columns::grand_total("Order Value"),
    ];
    settings.extend(columns::audit());
    settings.push(columns::text("remarks", "Instructions"));

    ColumnLayout {
        settings: ColumnSettings::new(settings),
        summary: vec![
            "number", "date", "company", "location", "party", "items", "quantity", "grand_total",
        ],
        all_columns: vec![
            "number", "date", "company", "location", "party", "items", "quantity", "discount",
            "grand_total", "created_by", "created_at", "updated_by", "updated_at", "remarks",
        ],
        compact: vec!["number", "party", "grand_total"],
        dimensions: ROW_DIMENSIONS.to_vec(),
    }
}

pub fn line_settings() -> ColumnSettings {
    let mut settings: Vec<ColumnSetting> = columns::line_product().into();
    settings.extend([
        columns::line_quantity(),
        columns::line_money("rate", "Rate"),
        columns::line_money("amount", "Amount"),
    ]);
    ColumnSettings::new(settings)
}

pub fn summary_fields(invoice: &ResolvedInvoice, currency_symbol: &str) -> Vec<(String, String)> {
    let totals = &invoice.totals;
    let advance: f64 = invoice.data.payment_lines().iter().map(|p| p.amount).sum();
    vec![
        ("Order Value".to_string(), format_money(totals.grand_total, currency_symbol)),
        ("Advance".to_string(), format_money(advance, currency_symbol)),
        (
            "Balance Due".to_string(),
            format_money(totals.grand_total - advance, currency_symbol),
        ),
    ]
}
