use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::export::TransactionKind;
use crate::invoice::{Entity, TransactionRef, TransactionStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    #[serde(flatten)]
    pub entity: Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    #[serde(flatten)]
    pub entity: Entity,
    /// Outlet or branch this party is served from, if any
    #[serde(default)]
    pub location_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kitchen {
    pub id: String,
    pub name: String,
    pub location_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Purchase,
    Sales,
    Kitchen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    pub location_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEntry {
    pub product_id: String,
    pub quantity: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub tax: f64,
}

impl LineEntry {
    pub fn gross(&self) -> f64 {
        self.quantity * self.rate
    }

    pub fn amount(&self) -> f64 {
        self.gross() - self.discount + self.tax
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub mode: String,
    pub amount: f64,
}

/// Transaction master row with its detail rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub number: String,
    pub date: NaiveDateTime,
    pub company_id: String,
    #[serde(default)]
    pub party_id: Option<String>,
    pub location_id: String,
    #[serde(default)]
    pub kitchen_id: Option<String>,
    #[serde(default)]
    pub reference: Option<TransactionRef>,
    #[serde(default)]
    pub lines: Vec<LineEntry>,
    #[serde(default)]
    pub consumptions: Vec<LineEntry>,
    /// Bill-level discount on top of line discounts
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub payment_modes: Vec<PaymentEntry>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub status: TransactionStatus,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}
