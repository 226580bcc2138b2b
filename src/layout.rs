use crate::error::ExtractError;
use crate::model::{CsvLayout, FieldSet};
use crate::options::QualityMode;
use crate::warning::{ExtractWarning, WarningCode};

pub(crate) const HEADER_PAIR_WIDTH: usize = 2;
pub(crate) const TABLE_ROW_WIDTH: usize = 4;

fn pair_header_values(
    values: &[String],
    quality_mode: QualityMode,
    warnings: &mut Vec<ExtractWarning>,
) -> Result<Vec<Vec<String>>, ExtractError> {
    let chunks = values.chunks_exact(HEADER_PAIR_WIDTH);
    if let [unpaired] = chunks.remainder() {
        if quality_mode == QualityMode::Strict {
            return Err(ExtractError::IncompleteData(format!(
                "header value {unpaired:?} has no partner"
            )));
        }
        warnings.push(
            ExtractWarning::new(
                WarningCode::UnpairedHeaderValue,
                "odd number of header values; the last one was not written",
            )
            .with_value(unpaired.as_str()),
        );
    }

    Ok(chunks.map(<[String]>::to_vec).collect())
}

fn group_table_values(
    values: &[String],
    quality_mode: QualityMode,
    warnings: &mut Vec<ExtractWarning>,
) -> Result<Vec<Vec<String>>, ExtractError> {
    let mut rows = values
        .chunks(TABLE_ROW_WIDTH)
        .map(<[String]>::to_vec)
        .collect::<Vec<_>>();

    let short_len = values.len() % TABLE_ROW_WIDTH;
    if short_len == 0 {
        return Ok(rows);
    }

    match quality_mode {
        QualityMode::BestEffort => {
            warnings.push(
                ExtractWarning::new(
                    WarningCode::ShortTableRow,
                    "table values do not fill the last row",
                )
                .with_row_len(short_len),
            );
        }
        QualityMode::Strict => {
            return Err(ExtractError::IncompleteData(format!(
                "last table row has {short_len} of {TABLE_ROW_WIDTH} values"
            )));
        }
        QualityMode::SkipPartial => {
            rows.pop();
            warnings.push(
                ExtractWarning::new(
                    WarningCode::SkippedPartialRow,
                    "skipping incomplete last table row",
                )
                .with_row_len(short_len),
            );
        }
    }

    Ok(rows)
}

pub(crate) fn layout_rows(
    fields: &FieldSet,
    quality_mode: QualityMode,
    warnings: &mut Vec<ExtractWarning>,
) -> Result<CsvLayout, ExtractError> {
    let header_rows = pair_header_values(&fields.header_values, quality_mode, warnings)?;
    let table_rows = group_table_values(&fields.table_values, quality_mode, warnings)?;

    if fields.header_values.is_empty() && fields.table_values.is_empty() {
        warnings.push(ExtractWarning::new(
            WarningCode::NoFieldsDetected,
            "no header or table lines were found in the extracted text",
        ));
    }

    Ok(CsvLayout {
        header_rows,
        table_rows,
    })
}
