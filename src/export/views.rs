//! Flat view structs handed to the renderers. Plain data, no behavior.

use chrono::NaiveDateTime;

use super::kind::TransactionKind;
use crate::invoice::InvoiceData;

/// One transaction as a report row, with every lookup already resolved to a name
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub kind: TransactionKind,
    pub number: String,
    pub date: NaiveDateTime,
    pub company: String,
    pub party: Option<String>,
    pub location: String,
    pub kitchen: Option<String>,
    pub items: f64,
    pub quantity: f64,
    pub sub_total: f64,
    pub discount: f64,
    pub tax: f64,
    pub grand_total: f64,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_by: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
    pub remarks: Option<String>,
}

/// One detail line of a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub product: String,
    pub unit: String,
    pub quantity: f64,
    pub rate: f64,
    pub discount: f64,
    pub tax: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoneyTotals {
    pub quantity: f64,
    pub sub_total: f64,
    pub discount: f64,
    pub tax: f64,
    pub grand_total: f64,
}

/// Invoice inputs for one transaction
#[derive(Debug, Clone)]
pub struct ResolvedInvoice {
    pub kind: TransactionKind,
    pub data: InvoiceData,
    pub lines: Vec<LineView>,
    /// Raw materials used by a production
    pub consumptions: Vec<LineView>,
    pub totals: MoneyTotals,
}
