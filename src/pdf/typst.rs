use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::invoice::InvoiceDocument;
use crate::render::DocumentRenderer;
use crate::report::TableDocument;

/// Embedded Typst template for tabular reports.
/// Uses a placeholder that gets replaced with the actual JSON file path
const REPORT_TEMPLATE: &str = r##"// Tabular Report Template
// Data is loaded from JSON file

#let payload = json("DATA_JSON_PATH")
#let data = payload.document

#set page(
  paper: payload.paper,
  flipped: data.orientation == "landscape",
  margin: (top: 1.5cm, bottom: 1.5cm, left: 1.2cm, right: 1.2cm),
  footer: context align(right)[
    #text(size: 8pt, fill: gray)[Page #counter(page).display() of #counter(page).final().first()]
  ],
)

#set text(font: "Helvetica", size: 9pt)

#let to-align(a) = if a == "right" { right } else if a == "center" { center } else { left }

#let style-cell(cell) = {
  if cell.style == "negative" {
    text(fill: red)[#cell.text]
  } else if cell.style == "total" {
    text(weight: "bold")[#cell.text]
  } else if cell.style == "grand_total" {
    text(size: 10.5pt, weight: "bold")[#cell.text]
  } else {
    cell.text
  }
}

#align(center)[
  #text(size: 16pt, weight: "bold")[#data.title]
  #if data.subtitle != none [
    \ #text(size: 11pt)[#data.subtitle]
  ]
]

#for entry in data.header_lines [
  #entry \
]

#v(0.5em)

#table(
  columns: data.columns.len(),
  align: (x, y) => to-align(data.columns.at(x).align),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 5pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },

  // Header repeats on every page
  table.header(..data.columns.map(c => text(weight: "bold")[#c.name])),

  ..data.rows.flatten().map(style-cell),

  ..if data.totals != none { data.totals.map(style-cell) } else { () },
)
"##;

/// Embedded Typst template for single-transaction documents
const INVOICE_TEMPLATE: &str = r##"// Invoice Template
// Data is loaded from JSON file

#let payload = json("DATA_JSON_PATH")
#let data = payload.document

#set page(
  paper: payload.paper,
  margin: (top: 1.5cm, bottom: 1.5cm, left: 1.5cm, right: 1.5cm),
  background: if data.stamp != none {
    rotate(-30deg, text(size: 64pt, weight: "bold", fill: rgb(220, 0, 0, 60))[#data.stamp])
  },
)

#set text(font: "Helvetica", size: 10pt)

#let to-align(a) = if a == "right" { right } else if a == "center" { center } else { left }

#let style-cell(cell) = if cell.style == "negative" { text(fill: red)[#cell.text] } else { cell.text }

#let entity(e) = [
  #text(weight: "bold")[#e.name]
  #if e.address != none [
    \ #e.address
  ]
  #if e.phone != none [
    \ Phone: #e.phone
  ]
  #if e.tax_id != none [
    \ Tax ID: #e.tax_id
  ]
]

#let section(s) = [
  #if s.title != "" [
    #text(weight: "bold", size: 11pt)[#s.title]
    #v(0.3em)
  ]
  #table(
    columns: s.columns.len(),
    align: (x, y) => to-align(s.columns.at(x).align),
    stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
    inset: 6pt,
    fill: (x, y) => if y == 0 { luma(240) } else { none },
    table.header(..s.columns.map(c => text(weight: "bold")[#c.name])),
    ..s.rows.flatten().map(style-cell),
  )
]

// Header with seller and transaction identifiers
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #text(size: 14pt)[#entity(data.seller)]
  ],
  [
    #text(size: 20pt, weight: "bold")[#data.title]
    #v(0.5em)
    #table(
      columns: (auto, auto),
      stroke: none,
      align: (right, left),
      inset: 2pt,
      ..data.facts.map(((k, v)) => ([*#k:*], [#v])).flatten()
    )
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

#text(weight: "bold", size: 11pt)[Bill To:]
#v(0.3em)
#entity(data.bill_to)

#v(1.5em)

#section(data.lines)

#if data.secondary != none [
  #v(1em)
  #section(data.secondary)
]

#v(1em)

#align(right)[
  #table(
    columns: (auto, auto),
    stroke: none,
    align: (right, right),
    inset: 5pt,
    ..data.summary.map(((k, v)) => ([#k:], [#v])).flatten()
  )
]

#if data.payments.len() > 0 [
  #v(1em)
  #text(weight: "bold")[Payment Modes]
  #v(0.3em)
  #for p in data.payments [
    #p.label \
  ]
]

#if data.remarks != none [
  #v(1em)
  #text(weight: "bold")[Remarks:] #data.remarks
]
"##;

#[derive(Serialize)]
struct Payload<'a, T: Serialize> {
    paper: &'a str,
    document: &'a T,
}

/// Paginated backend: compiles an embedded template with the Typst CLI
pub struct TypstRenderer {
    binary: String,
    paper: String,
}

impl TypstRenderer {
    pub fn new(binary: &str, paper: &str) -> Self {
        Self {
            binary: binary.to_string(),
            paper: paper.to_string(),
        }
    }

    fn compile<T: Serialize>(&self, template: &str, document: &T) -> Result<Vec<u8>> {
        // Check if typst is available
        let typst_check = Command::new(&self.binary).arg("--version").output();

        if typst_check.is_err() {
            return Err(ExportError::TypstNotFound);
        }

        // Removed when dropped, including on early return
        let temp_dir = tempfile::Builder::new().prefix("bakery-export").tempdir()?;

        let payload = Payload {
            paper: &self.paper,
            document,
        };
        let json_data =
            serde_json::to_string(&payload).map_err(|e| ExportError::Render(e.to_string()))?;
        std::fs::write(temp_dir.path().join("data.json"), &json_data)?;

        let template_path = temp_dir.path().join("document.typ");
        std::fs::write(&template_path, template.replace("DATA_JSON_PATH", "data.json"))?;

        let output_path = temp_dir.path().join("document.pdf");
        self.run(temp_dir.path(), &template_path, &output_path)?;

        let bytes = std::fs::read(&output_path)?;
        debug!(bytes = bytes.len(), "typst compile finished");
        Ok(bytes)
    }

    fn run(&self, root: &Path, template_path: &Path, output_path: &Path) -> Result<()> {
        let output = Command::new(&self.binary)
            .arg("compile")
            .arg("--root")
            .arg(root)
            .arg(template_path)
            .arg(output_path)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::Render(stderr.to_string()));
        }
        Ok(())
    }
}

impl DocumentRenderer for TypstRenderer {
    fn render_table(&self, document: &TableDocument) -> Result<Vec<u8>> {
        self.compile(REPORT_TEMPLATE, document)
    }

    fn render_invoice(&self, document: &InvoiceDocument) -> Result<Vec<u8>> {
        self.compile(INVOICE_TEMPLATE, document)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{Entity, PaymentLine, TableSection};
    use crate::report::{
        CellValue, ColumnSetting, ColumnSettings, FieldTable, Orientation, ReportMeta,
    };
    use serde_json::{json, Value};

    fn table(landscape: bool) -> TableDocument {
        let records = vec![("B-1", 120.0), ("B-2", -20.0)];
        let fields = FieldTable::<(&'static str, f64)>::new()
            .field("number", |r| CellValue::text(r.0))
            .field("amount", |r| CellValue::Number(r.1));
        let settings = ColumnSettings::new(vec![
            ColumnSetting::new("number", "Bill No"),
            ColumnSetting::amount("amount", "Amount")
                .highlight_negative()
                .grand_total(),
        ]);
        let order = vec!["number".to_string(), "amount".to_string()];
        let meta = ReportMeta {
            title: "Sale Report".to_string(),
            orientation: if landscape {
                Orientation::Landscape
            } else {
                Orientation::Portrait
            },
            ..Default::default()
        };
        TableDocument::build(&records, &fields, &settings, &order, &meta).unwrap()
    }

    fn invoice() -> InvoiceDocument {
        let entity = |name: &str| Entity {
            name: name.to_string(),
            address: None,
            phone: None,
            tax_id: None,
        };
        InvoiceDocument {
            title: "SALE INVOICE".to_string(),
            seller: entity("Golden Crust Bakery"),
            bill_to: entity("Cafe Aroma"),
            facts: vec![("Invoice No".to_string(), "SAL-0001".to_string())],
            lines: TableSection {
                title: String::new(),
                columns: Vec::new(),
                rows: Vec::new(),
            },
            secondary: None,
            summary: vec![("Grand Total".to_string(), "₹1,400.00".to_string())],
            payments: vec![PaymentLine::new("Cash", 1000.0)],
            remarks: None,
            stamp: Some("DELETED".to_string()),
        }
    }

    fn payload<T: Serialize>(document: &T) -> Value {
        let payload = Payload {
            paper: "a4",
            document,
        };
        serde_json::to_value(&payload).unwrap()
    }

    #[test]
    fn test_missing_binary_is_typst_not_found() {
        let renderer = TypstRenderer::new("bakery-export-no-such-typst", "a4");

        assert!(matches!(
            renderer.render_table(&table(false)),
            Err(ExportError::TypstNotFound)
        ));
        assert!(matches!(
            renderer.render_invoice(&invoice()),
            Err(ExportError::TypstNotFound)
        ));
    }

    #[test]
    fn test_table_payload_fields() {
        let value = payload(&table(true));
        let document = &value["document"];

        assert_eq!(value["paper"], "a4");
        assert_eq!(document["orientation"], "landscape");
        assert_eq!(document["columns"][1]["align"], "right");
        assert_eq!(document["rows"][1][1]["style"], "negative");
        assert_eq!(document["rows"][1][1]["text"], "-20.00");
        assert_eq!(document["totals"][0]["style"], "total");
        assert_eq!(document["totals"][1]["style"], "grand_total");
        assert_eq!(document["totals"][1]["text"], "100.00");
        assert!(document["rows"][0][0].get("value").is_none());
    }

    #[test]
    fn test_totals_are_null_without_totalled_columns() {
        let records = vec![("B-1", 1.0)];
        let fields =
            FieldTable::<(&'static str, f64)>::new().field("number", |r| CellValue::text(r.0));
        let settings = ColumnSettings::new(vec![ColumnSetting::new("number", "Bill No")]);
        let document = TableDocument::build(
            &records,
            &fields,
            &settings,
            &["number".to_string()],
            &ReportMeta::default(),
        )
        .unwrap();

        let value = payload(&document);
        assert!(value["document"]["totals"].is_null());
        assert_eq!(value["document"]["orientation"], "portrait");
    }

    #[test]
    fn test_invoice_payload_fields() {
        let value = payload(&invoice());
        let document = &value["document"];

        assert_eq!(document["facts"], json!([["Invoice No", "SAL-0001"]]));
        assert_eq!(document["summary"], json!([["Grand Total", "₹1,400.00"]]));
        assert_eq!(document["payments"][0]["label"], "Cash: 1000");
        assert_eq!(document["stamp"], "DELETED");
        assert!(document["secondary"].is_null());
        assert!(document["remarks"].is_null());
    }
}
