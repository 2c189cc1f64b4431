mod common;

use bakery_export::error::ExportError;
use bakery_export::export::Exporter;
use bakery_export::invoice::{TransactionRef, TransactionStatus};
use bakery_export::store::PaymentEntry;
use bakery_export::xlsx::XlsxRenderer;

use common::{at, generated_at, sample_dataset, CaptureRenderer};

fn fact<'a>(facts: &'a [(String, String)], key: &str) -> Option<&'a str> {
    facts
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_sale_invoice_document() {
    let dataset = sample_dataset();
    let sale = dataset.transaction_by_number("SAL-0001").unwrap();
    let invoice = dataset.resolve_invoice(sale).unwrap();

    let renderer = CaptureRenderer::default();
    let file = Exporter::new(Box::new(renderer.clone()), "₹")
        .export_invoice(&invoice, generated_at())
        .unwrap();
    assert_eq!(file.file_name, "SALE_INVOICE_SAL-0001_20240309_140500.xlsx");

    let doc = renderer.last_invoice();
    assert_eq!(doc.title, "SALE INVOICE");
    assert_eq!(doc.seller.name, "Golden Crust Bakery");
    assert_eq!(doc.bill_to.name, "Cafe Aroma");
    assert_eq!(fact(&doc.facts, "Invoice No"), Some("SAL-0001"));
    assert_eq!(fact(&doc.facts, "Date"), Some("06-01-2024 16:00"));
    assert_eq!(fact(&doc.facts, "Reference No"), None);

    assert_eq!(doc.lines.rows.len(), 1);
    assert_eq!(doc.lines.rows[0][0].text, "Sandwich Bread");
    assert!(doc.secondary.is_none());
    assert!(doc.stamp.is_none());

    assert_eq!(fact(&doc.summary, "Sub Total"), Some("₹1,350.00"));
    assert_eq!(fact(&doc.summary, "Discount"), Some("₹17.50"));
    assert_eq!(fact(&doc.summary, "Grand Total"), Some("₹1,400.00"));
    assert_eq!(fact(&doc.summary, "Balance"), Some("₹0.00"));
}

#[test]
fn test_zero_payment_modes_are_dropped() {
    let dataset = sample_dataset();
    let sale = dataset.transaction_by_number("SAL-0001").unwrap();
    let invoice = dataset.resolve_invoice(sale).unwrap();

    let renderer = CaptureRenderer::default();
    Exporter::new(Box::new(renderer.clone()), "₹")
        .export_invoice(&invoice, generated_at())
        .unwrap();

    let modes: Vec<String> = renderer
        .last_invoice()
        .payments
        .iter()
        .map(|p| p.mode.clone())
        .collect();
    assert_eq!(modes, vec!["Cash", "Card"]);
}

#[test]
fn test_payment_block_rows() {
    let mut dataset = sample_dataset();
    let sale = dataset
        .transactions
        .iter_mut()
        .find(|t| t.number == "SAL-0001")
        .unwrap();
    sale.payment_modes = vec![PaymentEntry {
        mode: "Cash".to_string(),
        amount: 100.0,
    }];

    let renderer = CaptureRenderer::default();
    let exporter = Exporter::new(Box::new(renderer.clone()), "₹");
    let invoice = dataset
        .resolve_invoice(dataset.transaction_by_number("SAL-0001").unwrap())
        .unwrap();
    exporter.export_invoice(&invoice, generated_at()).unwrap();

    let labels: Vec<String> = renderer
        .last_invoice()
        .payments
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(labels, vec!["Cash: 100"]);

    dataset.transactions[1].payment_modes = vec![
        PaymentEntry {
            mode: "Card".to_string(),
            amount: 1234.5,
        },
        PaymentEntry {
            mode: "UPI".to_string(),
            amount: 0.1 + 0.2,
        },
    ];
    let invoice = dataset.resolve_invoice(&dataset.transactions[1]).unwrap();
    exporter.export_invoice(&invoice, generated_at()).unwrap();
    let labels: Vec<String> = renderer
        .last_invoice()
        .payments
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(labels, vec!["Card: 1234.5", "UPI: 0.3"]);

    dataset.transactions[1].payment_modes.clear();
    let invoice = dataset.resolve_invoice(&dataset.transactions[1]).unwrap();
    exporter.export_invoice(&invoice, generated_at()).unwrap();
    assert!(renderer.last_invoice().payments.is_empty());
}

#[test]
fn test_production_has_raw_material_section() {
    let dataset = sample_dataset();
    let production = dataset.transaction_by_number("KPR-0001").unwrap();
    let invoice = dataset.resolve_invoice(production).unwrap();

    let renderer = CaptureRenderer::default();
    Exporter::new(Box::new(renderer.clone()), "₹")
        .export_invoice(&invoice, generated_at())
        .unwrap();

    let doc = renderer.last_invoice();
    assert_eq!(doc.title, "KITCHEN PRODUCTION NOTE");
    assert_eq!(doc.bill_to.name, "Central Kitchen");
    assert_eq!(fact(&doc.facts, "Note No"), Some("KPR-0001"));

    let secondary = doc.secondary.expect("raw materials section");
    assert_eq!(secondary.title, "Raw Materials Consumed");
    assert_eq!(secondary.rows.len(), 2);
    assert_eq!(fact(&doc.summary, "Material Cost"), Some("₹937.00"));
    assert_eq!(fact(&doc.summary, "Total Quantity"), Some("40.000"));
}

#[test]
fn test_walk_in_customer_when_no_party() {
    let mut dataset = sample_dataset();
    let sale = dataset
        .transactions
        .iter_mut()
        .find(|t| t.number == "SAL-0001")
        .unwrap();
    sale.party_id = None;

    let invoice = dataset
        .resolve_invoice(dataset.transaction_by_number("SAL-0001").unwrap())
        .unwrap();
    let renderer = CaptureRenderer::default();
    Exporter::new(Box::new(renderer.clone()), "₹")
        .export_invoice(&invoice, generated_at())
        .unwrap();

    assert_eq!(renderer.last_invoice().bill_to.name, "Walk-in Customer");
}

#[test]
fn test_reference_and_stamp() {
    let mut dataset = sample_dataset();
    let sale = dataset
        .transactions
        .iter_mut()
        .find(|t| t.number == "SAL-0001")
        .unwrap();
    sale.status = TransactionStatus::Deleted;
    sale.reference = Some(TransactionRef {
        number: "ORD-0007".to_string(),
        date: at(2024, 1, 2, 9, 30),
    });

    let invoice = dataset
        .resolve_invoice(dataset.transaction_by_number("SAL-0001").unwrap())
        .unwrap();
    let renderer = CaptureRenderer::default();
    Exporter::new(Box::new(renderer.clone()), "₹")
        .export_invoice(&invoice, generated_at())
        .unwrap();

    let doc = renderer.last_invoice();
    assert_eq!(doc.stamp.as_deref(), Some("DELETED"));
    assert_eq!(fact(&doc.facts, "Reference No"), Some("ORD-0007"));
    assert_eq!(fact(&doc.facts, "Reference Date"), Some("02-01-2024 09:30"));
}

#[test]
fn test_empty_line_items_is_missing_data() {
    let mut dataset = sample_dataset();
    let sale = dataset
        .transactions
        .iter_mut()
        .find(|t| t.number == "SAL-0001")
        .unwrap();
    sale.lines.clear();

    let invoice = dataset
        .resolve_invoice(dataset.transaction_by_number("SAL-0001").unwrap())
        .unwrap();
    let renderer = CaptureRenderer::default();
    let result =
        Exporter::new(Box::new(renderer.clone()), "₹").export_invoice(&invoice, generated_at());

    match result {
        Err(ExportError::MissingData(msg)) => {
            assert_eq!(msg, "No transaction details found for 'SAL-0001'")
        }
        other => panic!("expected missing data, got {other:?}"),
    }
    assert_eq!(renderer.render_count(), 0);
}

#[test]
fn test_unknown_product_fails_before_rendering() {
    let mut dataset = sample_dataset();
    let sale = dataset
        .transactions
        .iter_mut()
        .find(|t| t.number == "SAL-0001")
        .unwrap();
    sale.lines[0].product_id = "PRD-GONE".to_string();

    let result = dataset.resolve_invoice(dataset.transaction_by_number("SAL-0001").unwrap());
    match result {
        Err(ExportError::MissingData(msg)) => assert_eq!(msg, "Product 'PRD-GONE' not found"),
        other => panic!("expected missing data, got {other:?}"),
    }
}

#[test]
fn test_xlsx_invoice_is_a_workbook() {
    let dataset = sample_dataset();
    let production = dataset.transaction_by_number("KPR-0001").unwrap();
    let invoice = dataset.resolve_invoice(production).unwrap();

    let file = Exporter::new(Box::new(XlsxRenderer), "₹")
        .export_invoice(&invoice, generated_at())
        .unwrap();

    assert!(file.bytes.starts_with(b"PK"));
    assert!(file.file_name.starts_with("KITCHEN_PRODUCTION_NOTE_KPR-0001_"));
}
