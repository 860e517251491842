use core_db::{Row, Value};

/// One cell of a report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Plain text: emitted as-is in delimited output, escaped in HTML.
    Text(String),
    /// An allele symbol; HTML output renders embedded `<...>` spans as
    /// superscripts per the display convention.
    Symbol(String),
    /// A hyperlink; delimited output keeps the label only.
    Link { label: String, url: String },
}

impl Field {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn symbol(value: impl Into<String>) -> Self {
        Self::Symbol(value.into())
    }

    #[must_use]
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text(value) | Self::Symbol(value) | Self::Link { label: value, .. } => value,
        }
    }
}

impl From<&Value> for Field {
    fn from(value: &Value) -> Self {
        Self::Text(value.to_string())
    }
}

/// Ordered tuple of fields emitted for one output record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportLine {
    fields: Vec<Field>,
}

impl ReportLine {
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::label)
    }
}

/// One line per row, preserving result-set order. The projection's
/// first error aborts the report.
pub fn passthrough<E, F>(rows: &[Row], mut project: F) -> Result<Vec<ReportLine>, E>
where
    F: FnMut(&Row) -> Result<ReportLine, E>,
{
    rows.iter().map(&mut project).collect()
}
