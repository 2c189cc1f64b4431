use chrono::NaiveDateTime;

use super::Dataset;
use crate::error::Result;
use crate::export::{ExportedFile, Exporter};
use crate::notify::{ChangeSubject, SubjectSource};
use crate::report::format::format_money;

/// Serves change facts and invoice snapshots straight from a dataset
pub struct DatasetSource<'a> {
    dataset: &'a Dataset,
    exporter: &'a Exporter,
    generated_at: NaiveDateTime,
}

impl<'a> DatasetSource<'a> {
    pub fn new(dataset: &'a Dataset, exporter: &'a Exporter, generated_at: NaiveDateTime) -> Self {
        Self {
            dataset,
            exporter,
            generated_at,
        }
    }
}

impl SubjectSource for DatasetSource<'_> {
    fn subject(&self, transaction_id: &str) -> Result<ChangeSubject> {
        let transaction = self.dataset.transaction(transaction_id)?;
        let location = self.dataset.location(&transaction.location_id)?;

        let (counterparty, counterparty_location) = if transaction.kind.is_kitchen() {
            match &transaction.kitchen_id {
                Some(id) => {
                    let kitchen = self.dataset.kitchen(id)?;
                    (
                        Some(("Kitchen".to_string(), kitchen.name.clone())),
                        Some(kitchen.location_id.clone()),
                    )
                }
                None => (None, None),
            }
        } else {
            match &transaction.party_id {
                Some(id) => {
                    let party = self.dataset.party(id)?;
                    (
                        Some(("Party".to_string(), party.entity.name.clone())),
                        party.location_id.clone(),
                    )
                }
                None => (None, None),
            }
        };

        let totals = self.dataset.totals(transaction);
        let lines = transaction.lines.len();
        let item_summary = format!(
            "{lines} item{} (qty {})",
            if lines == 1 { "" } else { "s" },
            totals.quantity
        );

        Ok(ChangeSubject {
            kind: transaction.kind,
            number: transaction.number.clone(),
            location_id: transaction.location_id.clone(),
            location_name: location.name.clone(),
            counterparty,
            counterparty_location,
            item_summary,
            total: format_money(totals.grand_total, self.exporter.currency_symbol()),
            remarks: transaction.remarks.clone(),
        })
    }

    fn snapshot(&self, transaction_id: &str) -> Result<ExportedFile> {
        let transaction = self.dataset.transaction(transaction_id)?;
        let invoice = self.dataset.resolve_invoice(transaction)?;
        self.exporter.export_invoice(&invoice, self.generated_at)
    }
}
