use chrono::{NaiveDate, NaiveDateTime};

/// A single extracted field value, before formatting
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// `None` becomes an empty cell
    pub fn opt_text(value: Option<&str>) -> Self {
        value.map_or(CellValue::Empty, CellValue::text)
    }

    pub fn opt_datetime(value: Option<NaiveDateTime>) -> Self {
        value.map_or(CellValue::Empty, CellValue::DateTime)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, CellValue::Number(n) if *n < 0.0)
    }
}

pub type Accessor<R> = fn(&R) -> CellValue;

/// Explicit field-name → extractor table for one record type.
///
/// Built once per entity; renderers look fields up by the names used in
/// column settings and column orders.
pub struct FieldTable<R> {
    accessors: Vec<(&'static str, Accessor<R>)>,
}

impl<R> FieldTable<R> {
    pub fn new() -> Self {
        Self {
            accessors: Vec::new(),
        }
    }

    pub fn field(mut self, name: &'static str, accessor: Accessor<R>) -> Self {
        self.accessors.push((name, accessor));
        self
    }

    pub fn get(&self, name: &str) -> Option<Accessor<R>> {
        self.accessors
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, accessor)| *accessor)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accessors.iter().map(|(n, _)| *n)
    }
}

impl<R> Default for FieldTable<R> {
    fn default() -> Self {
        Self::new()
    }
}
