use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Rendering rule for one field of a record type
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSetting {
    pub field: String,
    pub display_name: String,
    /// Numeric pattern (`#,##0.00`) or chrono date pattern (`%d-%m-%Y`).
    pub format: Option<String>,
    pub alignment: Alignment,
    pub include_in_total: bool,
    pub highlight_negative: bool,
    pub is_grand_total: bool,
    pub is_required: bool,
}

impl ColumnSetting {
    pub fn new(field: &str, display_name: &str) -> Self {
        Self {
            field: field.to_string(),
            display_name: display_name.to_string(),
            format: None,
            alignment: Alignment::Left,
            include_in_total: false,
            highlight_negative: false,
            is_grand_total: false,
            is_required: false,
        }
    }

    pub fn format(mut self, pattern: &str) -> Self {
        self.format = Some(pattern.to_string());
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Right-aligned amount column with two decimals that sums into the totals row
    pub fn amount(field: &str, display_name: &str) -> Self {
        Self::new(field, display_name)
            .format("#,##0.00")
            .align(Alignment::Right)
            .total()
    }

    pub fn total(mut self) -> Self {
        self.include_in_total = true;
        self
    }

    pub fn highlight_negative(mut self) -> Self {
        self.highlight_negative = true;
        self
    }

    pub fn grand_total(mut self) -> Self {
        self.is_grand_total = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// Field settings in declaration order. Invoices render in this order directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSettings {
    columns: Vec<ColumnSetting>,
}

impl ColumnSettings {
    pub fn new(columns: Vec<ColumnSetting>) -> Self {
        Self { columns }
    }

    pub fn get(&self, field: &str) -> Option<&ColumnSetting> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnSetting> {
        self.columns.iter()
    }

    pub fn fields(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.field.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnSetting> for ColumnSettings {
    fn from_iter<I: IntoIterator<Item = ColumnSetting>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
