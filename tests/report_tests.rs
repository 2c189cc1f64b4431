mod common;

use bakery_export::error::ExportError;
use bakery_export::export::{Exporter, ReportRequest, TransactionKind};
use bakery_export::report::{
    render_report, Alignment, CellStyle, CellValue, ColumnSetting, ColumnSettings, Dimension,
    FieldTable, Orientation, PinnedDimensions, ReportMeta, ViewMode,
};
use bakery_export::store::TransactionQuery;
use bakery_export::xlsx::XlsxRenderer;
use chrono::NaiveDate;

use common::{generated_at, sample_dataset, CaptureRenderer};

struct Bill {
    number: &'static str,
    party: Option<&'static str>,
    qty: f64,
    amount: f64,
}

fn bills() -> Vec<Bill> {
    vec![
        Bill {
            number: "B-1",
            party: Some("Cafe Aroma"),
            qty: 2.0,
            amount: 100.0,
        },
        Bill {
            number: "B-2",
            party: None,
            qty: 1.5,
            amount: -20.5,
        },
        Bill {
            number: "B-3",
            party: Some("Hotel Sun"),
            qty: 4.0,
            amount: 1000.0,
        },
    ]
}

fn bill_fields() -> FieldTable<Bill> {
    FieldTable::<Bill>::new()
        .field("number", |b| CellValue::text(b.number))
        .field("party", |b| CellValue::opt_text(b.party))
        .field("qty", |b| CellValue::Number(b.qty))
        .field("amount", |b| CellValue::Number(b.amount))
}

fn bill_settings() -> ColumnSettings {
    ColumnSettings::new(vec![
        ColumnSetting::new("number", "Bill No"),
        ColumnSetting::new("party", "Customer"),
        ColumnSetting::new("qty", "Qty")
            .format("0.000")
            .align(Alignment::Right)
            .total(),
        ColumnSetting::amount("amount", "Amount")
            .highlight_negative()
            .grand_total(),
    ])
}

fn order(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

fn meta() -> ReportMeta {
    ReportMeta {
        title: "Sale Report".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_cells_follow_column_order_and_format() {
    let renderer = CaptureRenderer::default();
    render_report(
        &bills(),
        &bill_fields(),
        &bill_settings(),
        &order(&["amount", "number", "party"]),
        &meta(),
        &renderer,
    )
    .unwrap();

    let doc = renderer.last_table();
    let names: Vec<&str> = doc.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Amount", "Bill No", "Customer"]);
    assert_eq!(doc.columns[0].align, Alignment::Right);

    let first: Vec<&str> = doc.rows[0].iter().map(|c| c.text.as_str()).collect();
    assert_eq!(first, vec!["100.00", "B-1", "Cafe Aroma"]);
    assert_eq!(doc.rows[1][2].text, "");
}

#[test]
fn test_totals_row_sums_marked_columns() {
    let renderer = CaptureRenderer::default();
    render_report(
        &bills(),
        &bill_fields(),
        &bill_settings(),
        &order(&["number", "qty", "amount"]),
        &meta(),
        &renderer,
    )
    .unwrap();

    let doc = renderer.last_table();
    let totals = doc.totals.expect("totals row");
    assert_eq!(totals[0].text, "");
    assert_eq!(totals[0].style, CellStyle::Total);
    assert_eq!(totals[1].text, "7.500");
    assert_eq!(totals[1].style, CellStyle::Total);
    assert_eq!(totals[2].text, "1,079.50");
    assert_eq!(totals[2].style, CellStyle::GrandTotal);
}

#[test]
fn test_no_totals_row_without_totalled_columns() {
    let renderer = CaptureRenderer::default();
    render_report(
        &bills(),
        &bill_fields(),
        &bill_settings(),
        &order(&["number", "party"]),
        &meta(),
        &renderer,
    )
    .unwrap();

    assert!(renderer.last_table().totals.is_none());
}

#[test]
fn test_negative_values_are_flagged() {
    let renderer = CaptureRenderer::default();
    render_report(
        &bills(),
        &bill_fields(),
        &bill_settings(),
        &order(&["number", "qty", "amount"]),
        &meta(),
        &renderer,
    )
    .unwrap();

    let doc = renderer.last_table();
    assert_eq!(doc.rows[1][2].style, CellStyle::Negative);
    assert_eq!(doc.rows[1][2].text, "-20.50");
    assert_eq!(doc.rows[0][2].style, CellStyle::Default);
    // qty does not highlight negatives, and it is positive anyway
    assert_eq!(doc.rows[1][1].style, CellStyle::Default);
}

#[test]
fn test_empty_records_keep_headers_and_zero_totals() {
    let renderer = CaptureRenderer::default();
    render_report(
        &Vec::<Bill>::new(),
        &bill_fields(),
        &bill_settings(),
        &order(&["number", "amount"]),
        &meta(),
        &renderer,
    )
    .unwrap();

    let doc = renderer.last_table();
    assert_eq!(doc.columns.len(), 2);
    assert!(doc.rows.is_empty());
    assert_eq!(doc.totals.unwrap()[1].text, "0.00");
}

#[test]
fn test_duplicate_column_is_rejected_before_rendering() {
    let renderer = CaptureRenderer::default();
    let result = render_report(
        &bills(),
        &bill_fields(),
        &bill_settings(),
        &order(&["number", "amount", "number"]),
        &meta(),
        &renderer,
    );

    assert!(matches!(result, Err(ExportError::Configuration(_))));
    assert_eq!(renderer.render_count(), 0);
}

#[test]
fn test_column_without_setting_is_rejected() {
    let renderer = CaptureRenderer::default();
    let result = render_report(
        &bills(),
        &bill_fields(),
        &bill_settings(),
        &order(&["number", "discount"]),
        &meta(),
        &renderer,
    );

    match result {
        Err(ExportError::Configuration(msg)) => assert!(msg.contains("discount")),
        other => panic!("expected configuration error, got {other:?}"),
    }
    assert_eq!(renderer.render_count(), 0);
}

#[test]
fn test_column_without_accessor_is_rejected() {
    let renderer = CaptureRenderer::default();
    let settings = ColumnSettings::new(vec![
        ColumnSetting::new("number", "Bill No"),
        ColumnSetting::new("remarks", "Remarks"),
    ]);
    let result = render_report(
        &bills(),
        &bill_fields(),
        &settings,
        &order(&["number", "remarks"]),
        &meta(),
        &renderer,
    );

    assert!(matches!(result, Err(ExportError::Configuration(_))));
}

#[test]
fn test_non_numeric_total_column_is_rejected() {
    let renderer = CaptureRenderer::default();
    let settings = ColumnSettings::new(vec![
        ColumnSetting::new("number", "Bill No"),
        ColumnSetting::new("party", "Customer").total(),
    ]);
    let result = render_report(
        &bills(),
        &bill_fields(),
        &settings,
        &order(&["number", "party"]),
        &meta(),
        &renderer,
    );

    assert!(matches!(result, Err(ExportError::Configuration(_))));
    assert_eq!(renderer.render_count(), 0);
}

#[test]
fn test_second_grand_total_column_is_rejected() {
    let renderer = CaptureRenderer::default();
    let settings = ColumnSettings::new(vec![
        ColumnSetting::new("number", "Bill No"),
        ColumnSetting::amount("qty", "Qty").grand_total(),
        ColumnSetting::amount("amount", "Amount").grand_total(),
    ]);
    let result = render_report(
        &bills(),
        &bill_fields(),
        &settings,
        &order(&["number", "qty", "amount"]),
        &meta(),
        &renderer,
    );

    match result {
        Err(ExportError::Configuration(msg)) => {
            assert!(msg.contains("'qty'") && msg.contains("'amount'"))
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
    assert_eq!(renderer.render_count(), 0);
}

#[test]
fn test_grand_total_must_be_totalled() {
    let renderer = CaptureRenderer::default();
    let settings = ColumnSettings::new(vec![
        ColumnSetting::new("number", "Bill No"),
        ColumnSetting::new("amount", "Amount").grand_total(),
    ]);
    let result = render_report(
        &bills(),
        &bill_fields(),
        &settings,
        &order(&["number", "amount"]),
        &meta(),
        &renderer,
    );

    assert!(matches!(result, Err(ExportError::Configuration(_))));
    assert_eq!(renderer.render_count(), 0);
}

#[test]
fn test_header_lines_show_period_and_filters() {
    let renderer = CaptureRenderer::default();
    let meta = ReportMeta {
        title: "Sale Report".to_string(),
        date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        filter_labels: vec![("Location".to_string(), "Indiranagar Outlet".to_string())],
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    render_report(
        &bills(),
        &bill_fields(),
        &bill_settings(),
        &order(&["number"]),
        &meta,
        &renderer,
    )
    .unwrap();

    let doc = renderer.last_table();
    assert_eq!(
        doc.header_lines,
        vec!["Period: 01-01-2024 to END", "Location: Indiranagar Outlet"]
    );
    assert_eq!(doc.orientation, Orientation::Landscape);
}

#[test]
fn test_every_kind_and_view_resolves_to_valid_columns() {
    let dataset = sample_dataset();
    for kind in TransactionKind::ALL {
        let query = TransactionQuery {
            kind: Some(kind),
            ..Default::default()
        };
        let rows = dataset.rows(&dataset.query(&query)).unwrap();
        for view in [ViewMode::Summary, ViewMode::AllColumns, ViewMode::Compact] {
            let renderer = CaptureRenderer::default();
            let exporter = Exporter::new(Box::new(renderer.clone()), "₹");
            let request = ReportRequest {
                view,
                ..Default::default()
            };
            exporter
                .export_report(kind, &rows, &request, generated_at())
                .unwrap_or_else(|e| panic!("{kind} {view:?}: {e}"));
            assert_eq!(renderer.last_table().rows.len(), rows.len());
        }
    }
}

#[test]
fn test_pinning_removes_only_that_column() {
    let dataset = sample_dataset();
    for kind in TransactionKind::ALL {
        let query = TransactionQuery {
            kind: Some(kind),
            ..Default::default()
        };
        let rows = dataset.rows(&dataset.query(&query)).unwrap();

        let open = CaptureRenderer::default();
        Exporter::new(Box::new(open.clone()), "₹")
            .export_report(kind, &rows, &ReportRequest::default(), generated_at())
            .unwrap();

        let pinned = CaptureRenderer::default();
        let request = ReportRequest {
            pinned: PinnedDimensions::new().pin(Dimension::Company, "Golden Crust Bakery"),
            ..Default::default()
        };
        Exporter::new(Box::new(pinned.clone()), "₹")
            .export_report(kind, &rows, &request, generated_at())
            .unwrap();

        let open_fields: Vec<String> = open
            .last_table()
            .columns
            .into_iter()
            .map(|c| c.field)
            .collect();
        assert!(open_fields.contains(&"company".to_string()), "{kind}");

        let expected: Vec<String> = open_fields
            .into_iter()
            .filter(|f| f != "company")
            .collect();
        let pinned_doc = pinned.last_table();
        let pinned_fields: Vec<String> = pinned_doc
            .columns
            .iter()
            .map(|c| c.field.clone())
            .collect();
        assert_eq!(pinned_fields, expected, "{kind}");
        assert_eq!(pinned_doc.header_lines, vec!["Company: Golden Crust Bakery"]);
    }
}

#[test]
fn test_order_summary_shows_company_and_quantity() {
    let order = TransactionKind::Order
        .report_layout()
        .resolve(ViewMode::Summary, &PinnedDimensions::new());
    assert!(order.contains(&"company".to_string()));
    assert!(order.contains(&"quantity".to_string()));
}

#[test]
fn test_pinned_required_number_column_survives() {
    let layout = TransactionKind::Purchase.report_layout();
    let pinned = PinnedDimensions::new()
        .pin(Dimension::Party, "Fresh Flour Traders")
        .pin(Dimension::Location, "Head Office");
    let order = layout.resolve(ViewMode::Compact, &pinned);
    assert!(order.contains(&"number".to_string()));
    assert!(!order.contains(&"party".to_string()));
}

#[test]
fn test_report_file_name_uses_range() {
    let dataset = sample_dataset();
    let rows = dataset
        .rows(&dataset.query(&TransactionQuery {
            kind: Some(TransactionKind::Purchase),
            ..Default::default()
        }))
        .unwrap();
    let exporter = Exporter::new(Box::new(CaptureRenderer::default()), "₹");

    let request = ReportRequest {
        date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
        ..Default::default()
    };
    let file = exporter
        .export_report(TransactionKind::Purchase, &rows, &request, generated_at())
        .unwrap();
    assert_eq!(file.file_name, "PURCHASE_REPORT_START_to_20240131.xlsx");

    let file = exporter
        .export_report(
            TransactionKind::Purchase,
            &rows,
            &ReportRequest::default(),
            generated_at(),
        )
        .unwrap();
    assert_eq!(file.file_name, "PURCHASE_REPORT_20240309_140500.xlsx");
}

#[test]
fn test_xlsx_report_is_a_workbook() {
    let dataset = sample_dataset();
    let rows = dataset
        .rows(&dataset.query(&TransactionQuery::default()))
        .unwrap();
    let sales: Vec<_> = rows
        .into_iter()
        .filter(|r| r.kind == TransactionKind::Sale)
        .collect();

    let exporter = Exporter::new(Box::new(XlsxRenderer), "₹");
    let file = exporter
        .export_report(
            TransactionKind::Sale,
            &sales,
            &ReportRequest::default(),
            generated_at(),
        )
        .unwrap();

    assert!(file.bytes.starts_with(b"PK"));
    assert!(file.file_name.ends_with(".xlsx"));
}
