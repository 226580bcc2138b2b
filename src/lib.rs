mod csv_out;
mod error;
mod fields;
mod layout;
mod model;
mod options;
mod pdf_reader;
mod warning;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::layout::layout_rows;

pub use csv_out::{write_csv, write_csv_to_string};
pub use error::ExtractError;
pub use fields::{HEADER_KEYWORDS, TABLE_KEYWORDS, classify_line, split_fields};
pub use model::{CsvLayout, ExtractedText, FieldSet, LineKind};
pub use options::{ExtractOptions, LineEnding, PageSelection, QualityMode};
pub use pdf_reader::{extract_text, extract_text_from_bytes};
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub page_count: usize,
    pub text_length: usize,
    pub header_value_count: usize,
    pub table_value_count: usize,
    pub header_row_count: usize,
    pub table_row_count: usize,
    pub warnings: Vec<ExtractWarning>,
}

impl ExtractionReport {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.header_row_count + self.table_row_count
    }
}

/// Splits already extracted text into fields and arranges them into CSV rows.
///
/// # Errors
///
/// Fails on keyword lines without a `:` separator, or on incomplete groups in
/// [`QualityMode::Strict`].
pub fn layout_text(
    extracted: &ExtractedText,
    options: &ExtractOptions,
) -> Result<(CsvLayout, ExtractionReport), ExtractError> {
    let text_length = extracted.text.chars().count();
    info!(
        length = text_length,
        pages = extracted.page_count,
        "extracted text"
    );
    debug!(text = %extracted.text, "extracted text content");

    let fields = split_fields(&extracted.text)?;
    debug!(header = ?fields.header_values, "header data");
    debug!(table = ?fields.table_values, "table data");

    let mut warnings = Vec::new();
    let layout = layout_rows(&fields, options.quality_mode, &mut warnings)?;

    let report = ExtractionReport {
        page_count: extracted.page_count,
        text_length,
        header_value_count: fields.header_values.len(),
        table_value_count: fields.table_values.len(),
        header_row_count: layout.header_rows.len(),
        table_row_count: layout.table_rows.len(),
        warnings,
    };
    Ok((layout, report))
}

/// Resolves `path` through the filesystem; a missing file is resolved via its parent.
fn resolve_path(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return Some(resolved);
    }
    let name = path.file_name()?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::canonicalize(parent).ok().map(|parent| parent.join(name))
}

fn validate_paths(input_pdf: &Path, output_csv: &Path) -> Result<(), ExtractError> {
    let same_file = input_pdf == output_csv
        || matches!(
            (resolve_path(input_pdf), resolve_path(output_csv)),
            (Some(input), Some(output)) if input == output
        );
    if same_file {
        return Err(ExtractError::InvalidOption(format!(
            "input and output must differ: '{}'",
            input_pdf.display()
        )));
    }
    if output_csv.is_dir() {
        return Err(ExtractError::InvalidOption(format!(
            "output '{}' is a directory",
            output_csv.display()
        )));
    }
    Ok(())
}

/// Runs the whole pipeline: PDF text, keyword fields, CSV file.
///
/// The output file is only opened once extraction and parsing have succeeded.
///
/// # Errors
///
/// Returns the first error raised by any stage.
pub fn extract_pdf_to_csv(
    input_pdf: &Path,
    output_csv: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    options.validate()?;
    validate_paths(input_pdf, output_csv)?;

    let extracted = extract_text(input_pdf, options.pages.as_ref())?;
    let (layout, report) = layout_text(&extracted, options)?;
    write_csv(output_csv, &layout, options)?;
    info!(
        path = %output_csv.display(),
        header_rows = report.header_row_count,
        table_rows = report.table_row_count,
        "CSV file saved"
    );

    Ok(report)
}

/// In-memory counterpart of [`extract_pdf_to_csv`].
///
/// # Errors
///
/// Returns the first error raised by any stage.
pub fn extract_pdf_bytes_to_csv_string(
    input_pdf: &[u8],
    options: &ExtractOptions,
) -> Result<(String, ExtractionReport), ExtractError> {
    options.validate()?;

    let extracted = extract_text_from_bytes(input_pdf, options.pages.as_ref())?;
    let (layout, report) = layout_text(&extracted, options)?;
    let csv = write_csv_to_string(&layout, options)?;

    Ok((csv, report))
}
