use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::Result;
use crate::invoice::{Entity, InvoiceDocument, TableSection};
use crate::render::DocumentRenderer;
use crate::report::{Alignment, Cell, CellStyle, CellValue, ColumnHeader, TableDocument};

const MAX_COLUMN_WIDTH: usize = 50;

/// Spreadsheet backend. Writes a single sheet and never paginates.
pub struct XlsxRenderer;

impl DocumentRenderer for XlsxRenderer {
    fn render_table(&self, document: &TableDocument) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Report")?;

        let mut row: u32 = 0;
        sheet.write_string_with_format(row, 0, &document.title, &title_format(14))?;
        row += 1;
        if let Some(subtitle) = &document.subtitle {
            sheet.write_string_with_format(row, 0, subtitle, &Format::new().set_italic())?;
            row += 1;
        }
        for line in &document.header_lines {
            sheet.write_string(row, 0, line)?;
            row += 1;
        }
        row += 1;

        let header_row = row;
        write_header(sheet, row, &document.columns)?;
        row += 1;

        for cells in &document.rows {
            write_cells(sheet, row, &document.columns, cells)?;
            row += 1;
        }
        if let Some(totals) = &document.totals {
            write_cells(sheet, row, &document.columns, totals)?;
        }

        sheet.set_freeze_panes(header_row + 1, 0)?;
        autofit(sheet, &document.columns, document.rows.iter().chain(document.totals.iter()))?;

        Ok(workbook.save_to_buffer()?)
    }

    fn render_invoice(&self, document: &InvoiceDocument) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Invoice")?;

        let bold = Format::new().set_bold();
        let mut row: u32 = 0;

        sheet.write_string_with_format(row, 0, &document.title, &title_format(16))?;
        if let Some(stamp) = &document.stamp {
            let stamp_format = Format::new()
                .set_bold()
                .set_font_size(16)
                .set_font_color(Color::Red)
                .set_border(FormatBorder::Medium)
                .set_border_color(Color::Red);
            sheet.write_string_with_format(row, 3, stamp, &stamp_format)?;
        }
        row += 2;

        sheet.write_string_with_format(row, 0, "From:", &bold)?;
        sheet.write_string_with_format(row, 3, "Bill To:", &bold)?;
        row += 1;
        let seller = entity_lines(&document.seller);
        let bill_to = entity_lines(&document.bill_to);
        for idx in 0..seller.len().max(bill_to.len()) {
            if let Some(line) = seller.get(idx) {
                sheet.write_string(row, 0, line)?;
            }
            if let Some(line) = bill_to.get(idx) {
                sheet.write_string(row, 3, line)?;
            }
            row += 1;
        }
        row += 1;

        for (key, value) in &document.facts {
            sheet.write_string_with_format(row, 0, key, &bold)?;
            sheet.write_string(row, 1, value)?;
            row += 1;
        }
        row += 1;

        row = write_section(sheet, row, &document.lines)?;
        if let Some(secondary) = &document.secondary {
            row += 1;
            row = write_section(sheet, row, secondary)?;
        }
        row += 1;

        let value_col = document.lines.columns.len().max(2) as u16 - 1;
        let right = Format::new().set_align(FormatAlign::Right);
        for (key, value) in &document.summary {
            sheet.write_string_with_format(row, value_col - 1, key, &bold)?;
            sheet.write_string_with_format(row, value_col, value, &right)?;
            row += 1;
        }

        if !document.payments.is_empty() {
            row += 1;
            sheet.write_string_with_format(row, 0, "Payment Modes", &bold)?;
            row += 1;
            for payment in &document.payments {
                sheet.write_string(row, 0, &payment.mode)?;
                sheet.write_number_with_format(
                    row,
                    1,
                    payment.amount,
                    &Format::new().set_num_format("#,##0.00"),
                )?;
                row += 1;
            }
        }

        if let Some(remarks) = &document.remarks {
            row += 1;
            sheet.write_string_with_format(row, 0, "Remarks:", &bold)?;
            sheet.write_string(row, 1, remarks)?;
        }

        autofit(sheet, &document.lines.columns, document.lines.rows.iter())?;

        Ok(workbook.save_to_buffer()?)
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

fn title_format(size: u8) -> Format {
    Format::new().set_bold().set_font_size(size)
}

fn align(alignment: Alignment) -> FormatAlign {
    match alignment {
        Alignment::Left => FormatAlign::Left,
        Alignment::Center => FormatAlign::Center,
        Alignment::Right => FormatAlign::Right,
    }
}

fn write_header(sheet: &mut Worksheet, row: u32, columns: &[ColumnHeader]) -> Result<()> {
    for (col, column) in columns.iter().enumerate() {
        let format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(0xF0F0F0))
            .set_border_bottom(FormatBorder::Thin)
            .set_align(align(column.align));
        sheet.write_string_with_format(row, col as u16, &column.name, &format)?;
    }
    Ok(())
}

fn write_cells(
    sheet: &mut Worksheet,
    row: u32,
    columns: &[ColumnHeader],
    cells: &[Cell],
) -> Result<()> {
    for (col, (column, cell)) in columns.iter().zip(cells).enumerate() {
        let col = col as u16;
        let mut format = Format::new().set_align(align(column.align));
        format = match cell.style {
            CellStyle::Default => format,
            CellStyle::Negative => format.set_font_color(Color::Red),
            CellStyle::Total => format
                .set_bold()
                .set_border_top(FormatBorder::Thin)
                .set_border_bottom(FormatBorder::Double),
            CellStyle::GrandTotal => format
                .set_bold()
                .set_font_size(12)
                .set_background_color(Color::RGB(0xFFF2CC))
                .set_border_top(FormatBorder::Thin)
                .set_border_bottom(FormatBorder::Double),
        };

        match &cell.value {
            CellValue::Number(n) => {
                if let Some(pattern) = &column.format {
                    format = format.set_num_format(pattern);
                }
                sheet.write_number_with_format(row, col, *n, &format)?;
            }
            CellValue::Empty => {
                sheet.write_blank(row, col, &format)?;
            }
            _ => {
                sheet.write_string_with_format(row, col, &cell.text, &format)?;
            }
        }
    }
    Ok(())
}

fn write_section(sheet: &mut Worksheet, mut row: u32, section: &TableSection) -> Result<u32> {
    if !section.title.is_empty() {
        sheet.write_string_with_format(row, 0, &section.title, &Format::new().set_bold())?;
        row += 1;
    }
    write_header(sheet, row, &section.columns)?;
    row += 1;
    for cells in &section.rows {
        write_cells(sheet, row, &section.columns, cells)?;
        row += 1;
    }
    Ok(row)
}

fn autofit<'a>(
    sheet: &mut Worksheet,
    columns: &[ColumnHeader],
    rows: impl Iterator<Item = &'a Vec<Cell>>,
) -> Result<()> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.name.chars().count()).collect();
    for cells in rows {
        for (idx, cell) in cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.text.chars().count());
            }
        }
    }
    for (col, width) in widths.into_iter().enumerate() {
        sheet.set_column_width(col as u16, (width.min(MAX_COLUMN_WIDTH) + 2) as f64)?;
    }
    Ok(())
}

fn entity_lines(entity: &Entity) -> Vec<String> {
    let mut lines = vec![entity.name.clone()];
    lines.extend(entity.address.iter().cloned());
    lines.extend(entity.phone.iter().map(|p| format!("Phone: {p}")));
    lines.extend(entity.tax_id.iter().map(|t| format!("Tax ID: {t}")));
    lines
}
