use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Table,
}

impl Display for LineKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Table => f.write_str("table"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub header_values: Vec<String>,
    pub table_values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvLayout {
    pub header_rows: Vec<Vec<String>>,
    pub table_rows: Vec<Vec<String>>,
}

impl CsvLayout {
    #[must_use]
    pub fn data_row_count(&self) -> usize {
        self.header_rows.len() + self.table_rows.len()
    }
}
