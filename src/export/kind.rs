use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::store::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Purchase,
    PurchaseReturn,
    Sale,
    SaleReturn,
    Order,
    KitchenIssue,
    KitchenIssueReturn,
    KitchenProduction,
}

/// Which user locations hear about a change to a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientScope {
    /// Only the configured administrative location
    AdminLocation,
    /// Counterparty's location, head office and the originating location
    CounterpartyChain,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 8] = [
        TransactionKind::Purchase,
        TransactionKind::PurchaseReturn,
        TransactionKind::Sale,
        TransactionKind::SaleReturn,
        TransactionKind::Order,
        TransactionKind::KitchenIssue,
        TransactionKind::KitchenIssueReturn,
        TransactionKind::KitchenProduction,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "Purchase",
            TransactionKind::PurchaseReturn => "Purchase Return",
            TransactionKind::Sale => "Sale",
            TransactionKind::SaleReturn => "Sale Return",
            TransactionKind::Order => "Order",
            TransactionKind::KitchenIssue => "Kitchen Issue",
            TransactionKind::KitchenIssueReturn => "Kitchen Issue Return",
            TransactionKind::KitchenProduction => "Kitchen Production",
        }
    }

    pub fn report_title(&self) -> String {
        format!("{} Report", self.label())
    }

    /// Heading printed on the single-transaction document
    pub fn invoice_type(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "PURCHASE INVOICE",
            TransactionKind::PurchaseReturn => "PURCHASE RETURN NOTE",
            TransactionKind::Sale => "SALE INVOICE",
            TransactionKind::SaleReturn => "SALE RETURN NOTE",
            TransactionKind::Order => "ORDER CONFIRMATION",
            TransactionKind::KitchenIssue => "KITCHEN ISSUE NOTE",
            TransactionKind::KitchenIssueReturn => "KITCHEN ISSUE RETURN NOTE",
            TransactionKind::KitchenProduction => "KITCHEN PRODUCTION NOTE",
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(
            self,
            TransactionKind::PurchaseReturn
                | TransactionKind::SaleReturn
                | TransactionKind::KitchenIssueReturn
        )
    }

    /// Kitchen transactions have a kitchen where the others have a party
    pub fn is_kitchen(&self) -> bool {
        matches!(
            self,
            TransactionKind::KitchenIssue
                | TransactionKind::KitchenIssueReturn
                | TransactionKind::KitchenProduction
        )
    }

    pub fn domain_role(&self) -> Role {
        match self {
            TransactionKind::Purchase | TransactionKind::PurchaseReturn => Role::Purchase,
            TransactionKind::Sale | TransactionKind::SaleReturn | TransactionKind::Order => {
                Role::Sales
            }
            TransactionKind::KitchenIssue
            | TransactionKind::KitchenIssueReturn
            | TransactionKind::KitchenProduction => Role::Kitchen,
        }
    }

    pub fn recipient_scope(&self) -> RecipientScope {
        match self {
            TransactionKind::Purchase | TransactionKind::PurchaseReturn => {
                RecipientScope::AdminLocation
            }
            _ => RecipientScope::CounterpartyChain,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "purchase" => Ok(TransactionKind::Purchase),
            "purchase_return" => Ok(TransactionKind::PurchaseReturn),
            "sale" => Ok(TransactionKind::Sale),
            "sale_return" => Ok(TransactionKind::SaleReturn),
            "order" => Ok(TransactionKind::Order),
            "kitchen_issue" => Ok(TransactionKind::KitchenIssue),
            "kitchen_issue_return" => Ok(TransactionKind::KitchenIssueReturn),
            "kitchen_production" => Ok(TransactionKind::KitchenProduction),
            _ => Err(ExportError::InvalidArgument(format!(
                "Invalid transaction kind '{s}'. Use one of: purchase, purchase-return, sale, \
                 sale-return, order, kitchen-issue, kitchen-issue-return, kitchen-production."
            ))),
        }
    }
}
