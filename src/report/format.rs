use std::fmt::Write;

use super::value::CellValue;

pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";
pub const DEFAULT_DATETIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Render a cell value to display text using an optional column pattern
pub fn format_cell(value: &CellValue, pattern: Option<&str>) -> String {
    match value {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => match pattern {
            Some(p) => format_number(*n, p),
            None => n.to_string(),
        },
        CellValue::Date(d) => {
            render_display(d.format(pattern.unwrap_or(DEFAULT_DATE_FORMAT)))
                .unwrap_or_else(|| d.to_string())
        }
        CellValue::DateTime(dt) => {
            render_display(dt.format(pattern.unwrap_or(DEFAULT_DATETIME_FORMAT)))
                .unwrap_or_else(|| dt.to_string())
        }
        CellValue::Empty => String::new(),
    }
}

// chrono reports a bad pattern as a fmt::Error instead of panicking here
fn render_display(item: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", item).ok()?;
    Some(out)
}

/// Apply a spreadsheet-style numeric pattern such as `#,##0.00` or `0.000`.
///
/// Only grouping and the decimal count are honoured.
pub fn format_number(value: f64, pattern: &str) -> String {
    let grouping = pattern.contains(',');
    let decimals = pattern
        .split_once('.')
        .map(|(_, frac)| frac.chars().filter(|c| *c == '0' || *c == '#').count())
        .unwrap_or(0);

    let rounded = format!("{:.*}", decimals, value);
    let (whole, frac) = match rounded.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (rounded.as_str(), None),
    };

    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');
    let is_zero =
        digits.chars().all(|c| c == '0') && frac.map_or(true, |f| f.chars().all(|c| c == '0'));

    let mut out = String::new();
    if negative && !is_zero {
        out.push('-');
    }
    if grouping {
        out.push_str(&group_digits(digits));
    } else {
        out.push_str(digits);
    }
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

/// Format a money amount with the currency symbol, thousands separators and two decimals
pub fn format_money(value: f64, currency_symbol: &str) -> String {
    let formatted = format_number(value, "#,##0.00");
    match formatted.strip_prefix('-') {
        Some(abs) => format!("-{}{}", currency_symbol, abs),
        None => format!("{}{}", currency_symbol, formatted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_number_patterns() {
        assert_eq!(format_number(1234567.891, "#,##0.00"), "1,234,567.89");
        assert_eq!(format_number(12.5, "0.000"), "12.500");
        assert_eq!(format_number(999.6, "#,##0"), "1,000");
        assert_eq!(format_number(-1234.5, "#,##0.00"), "-1,234.50");
        assert_eq!(format_number(-0.001, "0.00"), "0.00");
    }

    #[test]
    fn test_money() {
        assert_eq!(format_money(1234.5, "₹"), "₹1,234.50");
        assert_eq!(format_money(-20.0, "$"), "-$20.00");
    }

    #[test]
    fn test_dates_and_raw_values() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_cell(&CellValue::Date(date), None), "05-01-2024");
        assert_eq!(format_cell(&CellValue::Date(date), Some("%Y/%m/%d")), "2024/01/05");
        assert_eq!(format_cell(&CellValue::Number(2.5), None), "2.5");
        assert_eq!(format_cell(&CellValue::Empty, Some("#,##0")), "");
    }
}
