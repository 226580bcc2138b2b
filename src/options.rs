use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ExtractError;

/// How unpaired header values and short final table rows are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QualityMode {
    /// Drop the unpaired header value, keep the short row, record warnings.
    #[default]
    BestEffort,
    /// Fail on any incomplete group.
    Strict,
    /// Like `BestEffort`, but the short final table row is dropped too.
    SkipPartial,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Crlf => b"\r\n",
            Self::Lf => b"\n",
        }
    }

    pub(crate) fn terminator(self) -> csv::Terminator {
        match self {
            Self::Crlf => csv::Terminator::CRLF,
            Self::Lf => csv::Terminator::Any(b'\n'),
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "crlf" | "windows" => Ok(Self::Crlf),
            "lf" | "unix" => Ok(Self::Lf),
            other => Err(format!("unknown line ending '{other}', expected crlf or lf")),
        }
    }
}

/// 1-based page ranges to keep from the extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    ranges: Vec<RangeInclusive<u32>>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(&page))
    }
}

fn parse_page_number(token: &str) -> Result<u32, String> {
    let page: u32 = token
        .trim()
        .parse()
        .map_err(|_| format!("invalid page number: '{}'", token.trim()))?;
    if page == 0 {
        return Err("pages are 1-based".to_string());
    }
    Ok(page)
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(selection: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for token in selection.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(start)?;
                    let end = parse_page_number(end)?;
                    if end < start {
                        return Err(format!(
                            "invalid range '{token}': end is smaller than start"
                        ));
                    }
                    ranges.push(start..=end);
                }
                None => {
                    let page = parse_page_number(token)?;
                    ranges.push(page..=page);
                }
            }
        }

        if ranges.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }

        Ok(Self { ranges })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    pub delimiter: u8,
    pub line_ending: LineEnding,
    pub quality_mode: QualityMode,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            delimiter: b',',
            line_ending: LineEnding::Crlf,
            quality_mode: QualityMode::BestEffort,
        }
    }
}

impl ExtractOptions {
    pub(crate) fn validate(&self) -> Result<(), ExtractError> {
        if !self.delimiter.is_ascii() {
            return Err(ExtractError::InvalidOption(format!(
                "delimiter byte 0x{:02X} is not ASCII",
                self.delimiter
            )));
        }
        if matches!(self.delimiter, b'"' | b'\r' | b'\n') {
            return Err(ExtractError::InvalidOption(format!(
                "delimiter {:?} collides with CSV quoting or line breaks",
                char::from(self.delimiter)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtractOptions, LineEnding, PageSelection};
    use std::str::FromStr;

    #[test]
    fn parse_page_selection_range_and_single() {
        let selection = PageSelection::from_str("1-3,5").expect("selection should parse");
        for page in [1, 2, 3, 5] {
            assert!(selection.contains(page), "page {page}");
        }
        assert!(!selection.contains(4));
        assert!(!selection.contains(6));
    }

    #[test]
    fn full_u32_range_parses_without_expanding() {
        let selection =
            PageSelection::from_str("1-4294967295").expect("selection should parse");
        assert!(selection.contains(1));
        assert!(selection.contains(u32::MAX));
    }

    #[test]
    fn reject_reversed_and_zero_pages() {
        let err = PageSelection::from_str("3-1").expect_err("invalid range should fail");
        assert!(err.contains("invalid range"));

        let err = PageSelection::from_str("0").expect_err("page zero should fail");
        assert!(err.contains("1-based"));
    }

    #[test]
    fn parse_line_ending_names() {
        assert_eq!(LineEnding::from_str("LF"), Ok(LineEnding::Lf));
        assert_eq!(LineEnding::from_str("crlf"), Ok(LineEnding::Crlf));
        assert!(LineEnding::from_str("cr").is_err());
    }

    #[test]
    fn rejects_quote_delimiter() {
        let options = ExtractOptions {
            delimiter: b'"',
            ..ExtractOptions::default()
        };
        assert!(options.validate().is_err());
        assert!(ExtractOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let options = ExtractOptions {
            delimiter: 0xE9,
            ..ExtractOptions::default()
        };
        let err = options.validate().expect_err("non-ASCII delimiter should fail");
        assert!(err.to_string().contains("not ASCII"), "error: {err}");
    }
}
