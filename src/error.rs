use std::io;

use thiserror::Error;

use crate::model::LineKind;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("failed to extract PDF text: {0}")]
    PdfExtract(String),

    #[error("PDF permissions do not allow text extraction")]
    NotExtractable,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no pages available after applying selection")]
    NoPagesSelected,

    #[error("{kind} line {line_number} has no ':' separator: {line:?}")]
    MissingSeparator {
        line_number: usize,
        kind: LineKind,
        line: String,
    },

    #[error("incomplete field data: {0}")]
    IncompleteData(String),
}
