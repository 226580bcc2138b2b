use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;

use crate::error::ExtractError;
use crate::model::CsvLayout;
use crate::options::ExtractOptions;

pub(crate) const HEADER_TITLES: [&str; 2] = ["Header Key", "Header Value"];
pub(crate) const TABLE_TITLES: [&str; 4] = ["Column 1", "Column 2", "Column 3", "Column 4"];

fn write_section<W: Write>(
    out: W,
    titles: &[&str],
    rows: &[Vec<String>],
    options: &ExtractOptions,
) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(options.line_ending.terminator())
        .flexible(true)
        .from_writer(out);
    writer.write_record(titles)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_document<W: Write>(
    mut out: W,
    layout: &CsvLayout,
    options: &ExtractOptions,
) -> Result<(), ExtractError> {
    write_section(&mut out, &HEADER_TITLES, &layout.header_rows, options)?;
    // A zero-field record renders as `""` through csv, so the separator is written raw.
    out.write_all(options.line_ending.as_bytes())?;
    write_section(&mut out, &TABLE_TITLES, &layout.table_rows, options)?;
    out.flush()?;
    Ok(())
}

/// Writes the header section, a blank line, then the table section to `path`.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn write_csv(
    path: &Path,
    layout: &CsvLayout,
    options: &ExtractOptions,
) -> Result<(), ExtractError> {
    let file = File::create(path)?;
    write_document(BufWriter::new(file), layout, options)
}

/// Renders the same bytes [`write_csv`] would write.
///
/// # Errors
///
/// Fails when a record cannot be encoded.
pub fn write_csv_to_string(
    layout: &CsvLayout,
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    let mut bytes = Vec::new();
    write_document(&mut bytes, layout, options)?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}
