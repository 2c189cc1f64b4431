use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::format::format_number;

/// A party printed on an invoice: the seller company or the bill-to counterparty
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl Entity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            phone: None,
            tax_id: None,
        }
    }

    pub fn walk_in() -> Self {
        Self::named("Walk-in Customer")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Active,
    Cancelled,
    Deleted,
}

impl TransactionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TransactionStatus::Active)
    }

    /// Stamp text printed across inactive documents
    pub fn stamp(&self) -> Option<&'static str> {
        match self {
            TransactionStatus::Active => None,
            TransactionStatus::Cancelled => Some("CANCELLED"),
            TransactionStatus::Deleted => Some("DELETED"),
        }
    }
}

/// The transaction an invoice refers back to, e.g. the order a sale fulfilled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRef {
    pub number: String,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentLine {
    pub mode: String,
    pub amount: f64,
    pub label: String,
}

impl PaymentLine {
    pub fn new(mode: impl Into<String>, amount: f64) -> Self {
        let mode = mode.into();
        // at most two decimals, trailing zeros dropped
        let text = format_number(amount, "0.00");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        let label = format!("{mode}: {text}");
        Self {
            mode,
            amount,
            label,
        }
    }
}

impl fmt::Display for PaymentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Everything the invoice header and footer need for a single transaction
#[derive(Debug, Clone)]
pub struct InvoiceData {
    pub seller: Entity,
    pub bill_to: Option<Entity>,
    pub invoice_type: String,
    pub number: String,
    pub date: NaiveDateTime,
    pub reference: Option<TransactionRef>,
    pub total_amount: f64,
    pub remarks: Option<String>,
    pub status: TransactionStatus,
    /// Mode name → amount, in display order
    pub payment_modes: Vec<(String, f64)>,
}

impl InvoiceData {
    /// Payment modes that actually received money
    pub fn payment_lines(&self) -> Vec<PaymentLine> {
        self.payment_modes
            .iter()
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(mode, amount)| PaymentLine::new(mode.clone(), *amount))
            .collect()
    }
}
