use chrono::{NaiveDate, NaiveDateTime};

/// Build an export file name: `{TYPE}_{number}_{range or timestamp}.{ext}`.
///
/// The range segment is `YYYYMMDD_to_YYYYMMDD`, with `START`/`END` standing in
/// for a missing bound. When both bounds are missing the generation timestamp
/// is used instead.
pub fn export_file_name(
    doc_type: &str,
    number: Option<&str>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    generated_at: NaiveDateTime,
    extension: &str,
) -> String {
    let mut parts = vec![sanitize(doc_type)];

    if let Some(number) = number.filter(|n| !n.is_empty()) {
        parts.push(sanitize(number));
    }

    if date_from.is_some() || date_to.is_some() {
        let from = date_from.map_or_else(
            || "START".to_string(),
            |d| d.format("%Y%m%d").to_string(),
        );
        let to = date_to.map_or_else(|| "END".to_string(), |d| d.format("%Y%m%d").to_string());
        parts.push(format!("{from}_to_{to}"));
    } else {
        parts.push(generated_at.format("%Y%m%d_%H%M%S").to_string());
    }

    format!("{}.{}", parts.join("_"), extension)
}

fn sanitize(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c.to_ascii_uppercase() } else { '_' })
        .collect()
}
