#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};

use bakery_export::config::DATA_TEMPLATE;
use bakery_export::error::Result;
use bakery_export::invoice::InvoiceDocument;
use bakery_export::render::DocumentRenderer;
use bakery_export::report::TableDocument;
use bakery_export::store::Dataset;

/// Renderer that keeps every document it is handed
#[derive(Clone, Default)]
pub struct CaptureRenderer {
    pub tables: Rc<RefCell<Vec<TableDocument>>>,
    pub invoices: Rc<RefCell<Vec<InvoiceDocument>>>,
}

impl CaptureRenderer {
    pub fn last_table(&self) -> TableDocument {
        self.tables.borrow().last().cloned().expect("no table rendered")
    }

    pub fn last_invoice(&self) -> InvoiceDocument {
        self.invoices.borrow().last().cloned().expect("no invoice rendered")
    }

    pub fn render_count(&self) -> usize {
        self.tables.borrow().len() + self.invoices.borrow().len()
    }
}

impl DocumentRenderer for CaptureRenderer {
    fn render_table(&self, document: &TableDocument) -> Result<Vec<u8>> {
        self.tables.borrow_mut().push(document.clone());
        Ok(b"table".to_vec())
    }

    fn render_invoice(&self, document: &InvoiceDocument) -> Result<Vec<u8>> {
        self.invoices.borrow_mut().push(document.clone());
        Ok(b"invoice".to_vec())
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

pub fn sample_dataset() -> Dataset {
    serde_json::from_str(DATA_TEMPLATE).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn generated_at() -> NaiveDateTime {
    at(2024, 3, 9, 14, 5)
}
