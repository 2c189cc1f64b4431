mod directory;
mod model;
mod source;

pub use model::{
    Company, Kitchen, LineEntry, Location, Party, PaymentEntry, Product, Role, Transaction, User,
};
pub use source::DatasetSource;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ExportError, Result};
use crate::export::{LineView, MoneyTotals, ResolvedInvoice, TransactionKind, TransactionRow};
use crate::invoice::{Entity, InvoiceData};

/// In-memory back-office data loaded from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub kitchens: Vec<Kitchen>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Transaction filters; every set field must match
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub kind: Option<TransactionKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub company_id: Option<String>,
    pub party_id: Option<String>,
    pub location_id: Option<String>,
    pub kitchen_id: Option<String>,
    pub include_inactive: bool,
}

fn not_found(what: &str, id: &str) -> ExportError {
    ExportError::MissingData(format!("{what} '{id}' not found"))
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExportError::ConfigFileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ExportError::DataParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn company(&self, id: &str) -> Result<&Company> {
        self.companies
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Company", id))
    }

    pub fn party(&self, id: &str) -> Result<&Party> {
        self.parties
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Party", id))
    }

    pub fn location(&self, id: &str) -> Result<&Location> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| not_found("Location", id))
    }

    pub fn kitchen(&self, id: &str) -> Result<&Kitchen> {
        self.kitchens
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| not_found("Kitchen", id))
    }

    pub fn product(&self, id: &str) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Product", id))
    }

    /// User display name; unknown ids fall back to the raw id
    pub fn user_name(&self, id: &str) -> String {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map_or_else(|| id.to_string(), |u| u.name.clone())
    }

    pub fn transaction(&self, id: &str) -> Result<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Transaction", id))
    }

    pub fn transaction_by_number(&self, number: &str) -> Result<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.number == number)
            .ok_or_else(|| not_found("Transaction", number))
    }

    /// Matching transactions sorted by date, then number
    pub fn query(&self, query: &TransactionQuery) -> Vec<&Transaction> {
        let mut found: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| query.include_inactive || t.status.is_active())
            .filter(|t| query.kind.map_or(true, |k| t.kind == k))
            .filter(|t| query.from.map_or(true, |d| t.date.date() >= d))
            .filter(|t| query.to.map_or(true, |d| t.date.date() <= d))
            .filter(|t| matches_id(&query.company_id, Some(&t.company_id)))
            .filter(|t| matches_id(&query.party_id, t.party_id.as_ref()))
            .filter(|t| matches_id(&query.location_id, Some(&t.location_id)))
            .filter(|t| matches_id(&query.kitchen_id, t.kitchen_id.as_ref()))
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.number.cmp(&b.number)));
        found
    }

    /// Flatten a transaction into a report row, resolving every lookup
    pub fn resolve_row(&self, transaction: &Transaction) -> Result<TransactionRow> {
        let totals = self.totals(transaction);
        Ok(TransactionRow {
            id: transaction.id.clone(),
            kind: transaction.kind,
            number: transaction.number.clone(),
            date: transaction.date,
            company: self.company(&transaction.company_id)?.entity.name.clone(),
            party: match &transaction.party_id {
                Some(id) => Some(self.party(id)?.entity.name.clone()),
                None => None,
            },
            location: self.location(&transaction.location_id)?.name.clone(),
            kitchen: match &transaction.kitchen_id {
                Some(id) => Some(self.kitchen(id)?.name.clone()),
                None => None,
            },
            items: transaction.lines.len() as f64,
            quantity: totals.quantity,
            sub_total: totals.sub_total,
            discount: totals.discount,
            tax: totals.tax,
            grand_total: totals.grand_total,
            created_by: self.user_name(&transaction.created_by),
            created_at: transaction.created_at,
            updated_by: transaction.updated_by.as_deref().map(|id| self.user_name(id)),
            updated_at: transaction.updated_at,
            remarks: transaction.remarks.clone(),
        })
    }

    pub fn rows(&self, transactions: &[&Transaction]) -> Result<Vec<TransactionRow>> {
        transactions.iter().map(|t| self.resolve_row(t)).collect()
    }

    /// Gather everything an invoice needs. Fails before rendering if any
    /// referenced master row is missing.
    pub fn resolve_invoice(&self, transaction: &Transaction) -> Result<ResolvedInvoice> {
        let seller = self.company(&transaction.company_id)?.entity.clone();
        let bill_to = self.bill_to(transaction)?;
        let lines = self.line_views(&transaction.lines)?;
        let consumptions = self.line_views(&transaction.consumptions)?;
        let totals = self.totals(transaction);

        let data = InvoiceData {
            seller,
            bill_to,
            invoice_type: transaction.kind.invoice_type().to_string(),
            number: transaction.number.clone(),
            date: transaction.date,
            reference: transaction.reference.clone(),
            total_amount: totals.grand_total,
            remarks: transaction.remarks.clone(),
            status: transaction.status,
            payment_modes: transaction
                .payment_modes
                .iter()
                .map(|p| (p.mode.clone(), p.amount))
                .collect(),
        };

        Ok(ResolvedInvoice {
            kind: transaction.kind,
            data,
            lines,
            consumptions,
            totals,
        })
    }

    fn bill_to(&self, transaction: &Transaction) -> Result<Option<Entity>> {
        if transaction.kind.is_kitchen() {
            return match &transaction.kitchen_id {
                Some(id) => Ok(Some(Entity::named(self.kitchen(id)?.name.clone()))),
                None => Ok(None),
            };
        }
        match &transaction.party_id {
            Some(id) => Ok(Some(self.party(id)?.entity.clone())),
            None => Ok(None),
        }
    }

    fn line_views(&self, entries: &[LineEntry]) -> Result<Vec<LineView>> {
        entries
            .iter()
            .map(|entry| {
                let product = self.product(&entry.product_id)?;
                Ok(LineView {
                    product: product.name.clone(),
                    unit: product.unit.clone(),
                    quantity: entry.quantity,
                    rate: entry.rate,
                    discount: entry.discount,
                    tax: entry.tax,
                    amount: entry.amount(),
                })
            })
            .collect()
    }

    pub fn totals(&self, transaction: &Transaction) -> MoneyTotals {
        let quantity: f64 = transaction.lines.iter().map(|l| l.quantity).sum();
        let sub_total: f64 = transaction.lines.iter().map(LineEntry::gross).sum();
        let line_discount: f64 = transaction.lines.iter().map(|l| l.discount).sum();
        let tax: f64 = transaction.lines.iter().map(|l| l.tax).sum();
        let discount = line_discount + transaction.discount;
        MoneyTotals {
            quantity,
            sub_total,
            discount,
            tax,
            grand_total: sub_total - discount + tax,
        }
    }
}

fn matches_id(wanted: &Option<String>, actual: Option<&String>) -> bool {
    match wanted {
        Some(w) => actual.is_some_and(|a| a == w),
        None => true,
    }
}
