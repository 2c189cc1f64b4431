use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::column::ColumnSettings;
use crate::error::ExportError;

/// Column-set preset a report is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Summary,
    AllColumns,
    Compact,
}

impl FromStr for ViewMode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(ViewMode::Summary),
            "all" | "all-columns" => Ok(ViewMode::AllColumns),
            "compact" => Ok(ViewMode::Compact),
            other => Err(ExportError::InvalidArgument(format!(
                "Invalid view mode '{other}'. Use 'summary', 'all', or 'compact'."
            ))),
        }
    }
}

/// A grouping dimension that a report filter can pin to a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Company,
    Party,
    Location,
    Kitchen,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Company => "Company",
            Dimension::Party => "Party",
            Dimension::Location => "Location",
            Dimension::Kitchen => "Kitchen",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dimensions fixed by the caller's filters, in the order they were supplied.
///
/// Each entry carries the resolved display value, which ends up in the
/// report header as `label: value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinnedDimensions {
    entries: Vec<(Dimension, String)>,
}

impl PinnedDimensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a dimension. Pinning the same dimension twice keeps the latest value.
    pub fn pin(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(d, _)| *d == dimension) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((dimension, value)),
        }
        self
    }

    pub fn is_pinned(&self, dimension: Dimension) -> bool {
        self.entries.iter().any(|(d, _)| *d == dimension)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Dimension, String)> {
        self.entries.iter()
    }

    pub fn filter_labels(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(d, v)| (d.label().to_string(), v.clone()))
            .collect()
    }
}

/// Column presets for one record type
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub settings: ColumnSettings,
    pub summary: Vec<&'static str>,
    pub all_columns: Vec<&'static str>,
    pub compact: Vec<&'static str>,
    /// Which field holds each pinnable dimension
    pub dimensions: Vec<(Dimension, &'static str)>,
}

impl ColumnLayout {
    /// Produce the ordered, deduplicated field list for a view mode.
    ///
    /// Fields of pinned dimensions are removed unless their setting is
    /// marked required. The result never depends on record data.
    pub fn resolve(&self, mode: ViewMode, pinned: &PinnedDimensions) -> Vec<String> {
        let preset = match mode {
            ViewMode::Summary => &self.summary,
            ViewMode::AllColumns => &self.all_columns,
            ViewMode::Compact => &self.compact,
        };

        let mut order: Vec<String> = Vec::with_capacity(preset.len());
        for field in preset {
            if !order.iter().any(|f| f == field) {
                order.push(field.to_string());
            }
        }

        for (dimension, _) in pinned.iter() {
            let Some(field) = self.dimension_field(*dimension) else {
                continue;
            };
            let required = self.settings.get(field).is_some_and(|s| s.is_required);
            if !required {
                order.retain(|f| f != field);
            }
        }

        debug!(?mode, columns = ?order, "resolved column order");
        order
    }

    fn dimension_field(&self, dimension: Dimension) -> Option<&'static str> {
        self.dimensions
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, field)| *field)
    }
}
