mod columns;
mod kind;
mod kitchen;
mod order;
mod purchase;
mod sale;
mod views;

pub use columns::{line_fields, row_fields};
pub use kind::{RecipientScope, TransactionKind};
pub use views::{LineView, MoneyTotals, ResolvedInvoice, TransactionRow};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::error::Result;
use crate::invoice::{render_invoice, TableSection};
use crate::render::DocumentRenderer;
use crate::report::{
    export_file_name, render_report, ColumnLayout, ColumnSettings, Orientation, PinnedDimensions,
    ReportMeta, ViewMode,
};

/// A rendered document and the name it should be saved or attached under
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// What a report export should contain
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub view: ViewMode,
    pub pinned: PinnedDimensions,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub orientation: Orientation,
    pub subtitle: Option<String>,
}

impl TransactionKind {
    pub fn report_layout(&self) -> ColumnLayout {
        match self {
            TransactionKind::Purchase | TransactionKind::PurchaseReturn => {
                purchase::report_layout(*self)
            }
            TransactionKind::Sale | TransactionKind::SaleReturn => sale::report_layout(*self),
            TransactionKind::Order => order::report_layout(),
            TransactionKind::KitchenIssue
            | TransactionKind::KitchenIssueReturn
            | TransactionKind::KitchenProduction => kitchen::report_layout(*self),
        }
    }

    pub fn line_settings(&self) -> ColumnSettings {
        match self {
            TransactionKind::Purchase | TransactionKind::PurchaseReturn => {
                purchase::line_settings()
            }
            TransactionKind::Sale | TransactionKind::SaleReturn => sale::line_settings(),
            TransactionKind::Order => order::line_settings(),
            _ => kitchen::line_settings(),
        }
    }

    fn summary_fields(
        &self,
        invoice: &ResolvedInvoice,
        currency_symbol: &str,
    ) -> Vec<(String, String)> {
        match self {
            TransactionKind::Purchase | TransactionKind::PurchaseReturn => {
                purchase::summary_fields(invoice, currency_symbol)
            }
            TransactionKind::Sale | TransactionKind::SaleReturn => {
                sale::summary_fields(invoice, currency_symbol)
            }
            TransactionKind::Order => order::summary_fields(invoice, currency_symbol),
            _ => kitchen::summary_fields(invoice, currency_symbol),
        }
    }

    fn secondary_table(&self, invoice: &ResolvedInvoice) -> Result<Option<TableSection>> {
        if self.is_kitchen() {
            kitchen::secondary(invoice)
        } else {
            Ok(None)
        }
    }
}

/// Format-agnostic export entry point; the renderer decides xlsx or pdf
pub struct Exporter {
    renderer: Box<dyn DocumentRenderer>,
    currency_symbol: String,
}

impl Exporter {
    pub fn new(renderer: Box<dyn DocumentRenderer>, currency_symbol: &str) -> Self {
        Self {
            renderer,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn export_report(
        &self,
        kind: TransactionKind,
        rows: &[TransactionRow],
        request: &ReportRequest,
        generated_at: NaiveDateTime,
    ) -> Result<ExportedFile> {
        let layout = kind.report_layout();
        let order = layout.resolve(request.view, &request.pinned);

        let meta = ReportMeta {
            title: kind.report_title(),
            subtitle: request.subtitle.clone(),
            date_from: request.date_from,
            date_to: request.date_to,
            filter_labels: request.pinned.filter_labels(),
            orientation: request.orientation,
        };

        let bytes = render_report(
            rows,
            &row_fields(),
            &layout.settings,
            &order,
            &meta,
            self.renderer.as_ref(),
        )?;

        let file_name = export_file_name(
            &format!("{}_REPORT", kind.label()),
            None,
            request.date_from,
            request.date_to,
            generated_at,
            self.renderer.extension(),
        );
        info!(%file_name, rows = rows.len(), "exported report");
        Ok(ExportedFile { bytes, file_name })
    }

    pub fn export_invoice(
        &self,
        invoice: &ResolvedInvoice,
        generated_at: NaiveDateTime,
    ) -> Result<ExportedFile> {
        let kind = invoice.kind;
        let summary = kind.summary_fields(invoice, &self.currency_symbol);
        let secondary = kind.secondary_table(invoice)?;

        let bytes = render_invoice(
            &invoice.data,
            &invoice.lines,
            &line_fields(),
            &kind.line_settings(),
            secondary,
            &summary,
            self.renderer.as_ref(),
        )?;

        let file_name = export_file_name(
            kind.invoice_type(),
            Some(&invoice.data.number),
            None,
            None,
            generated_at,
            self.renderer.extension(),
        );
        info!(%file_name, "exported invoice");
        Ok(ExportedFile { bytes, file_name })
    }
}
