use std::path::Path;

use lopdf::{Document, Object};
use tracing::debug;

use crate::error::ExtractError;
use crate::model::ExtractedText;
use crate::options::PageSelection;

/// Bit 5 of the standard security handler `/P` entry: copy or extract text.
const EXTRACT_PERMISSION_BIT: i64 = 1 << 4;

pub(crate) fn check_extractable(document: &Document) -> Result<(), ExtractError> {
    let Ok(encrypt) = document.trailer.get(b"Encrypt") else {
        return Ok(());
    };

    let security = match encrypt {
        Object::Reference(id) => document.get_object(*id)?.as_dict()?,
        other => other.as_dict()?,
    };
    let permissions = security.get(b"P")?.as_i64()?;
    if permissions & EXTRACT_PERMISSION_BIT == 0 {
        return Err(ExtractError::NotExtractable);
    }
    Ok(())
}

/// Joins page texts in order, starting each page on a fresh line.
fn join_pages<'a>(pages: impl IntoIterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for page in pages {
        if !joined.is_empty() && !joined.ends_with('\n') {
            joined.push('\n');
        }
        joined.push_str(page);
    }
    joined
}

fn select_pages(
    page_texts: &[String],
    selection: Option<&PageSelection>,
) -> Result<(String, usize), ExtractError> {
    let Some(selection) = selection else {
        return Ok((join_pages(page_texts.iter().map(String::as_str)), page_texts.len()));
    };

    let selected = (1_u32..)
        .zip(page_texts)
        .filter(|(page_no, _)| selection.contains(*page_no))
        .map(|(_, text)| text.as_str())
        .collect::<Vec<_>>();
    if selected.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }
    debug!(
        selected = selected.len(),
        total = page_texts.len(),
        "applied page selection"
    );

    let count = selected.len();
    Ok((join_pages(selected), count))
}

/// Decodes every page of the PDF at `input_pdf` into one string, in page order.
///
/// # Errors
///
/// Fails when the file cannot be read, is not a PDF, forbids text extraction,
/// or cannot be decoded.
pub fn extract_text(
    input_pdf: &Path,
    pages: Option<&PageSelection>,
) -> Result<ExtractedText, ExtractError> {
    let bytes = std::fs::read(input_pdf)?;
    extract_text_from_bytes(&bytes, pages)
}

/// Same as [`extract_text`] for a PDF already held in memory.
///
/// # Errors
///
/// See [`extract_text`].
pub fn extract_text_from_bytes(
    input_pdf: &[u8],
    pages: Option<&PageSelection>,
) -> Result<ExtractedText, ExtractError> {
    let document = Document::load_mem(input_pdf)?;
    check_extractable(&document)?;

    let page_texts = pdf_extract::extract_text_from_mem_by_pages(input_pdf)
        .map_err(|error| ExtractError::PdfExtract(error.to_string()))?;
    let (text, page_count) = select_pages(&page_texts, pages)?;

    Ok(ExtractedText { text, page_count })
}
