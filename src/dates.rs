//! Publish-date parsing for the `date` front matter key.
//!
//! Dates are matched against an ordered list of chrono format strings. The
//! first format that parses wins. Formats without a time component resolve to
//! midnight. Text no format accepts yields `None`: an unparseable date only
//! means the page has no publish date.

use chrono::{NaiveDate, NaiveDateTime};

/// Formats tried when the config does not override `date_formats`.
///
/// In order: `Sat Mar 03 10:15:00 UTC 2012`, `2012-03-03 10:15:00`,
/// `2012-03-03`, `03-03-2012`.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%a %b %d %H:%M:%S %Z %Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%d-%m-%Y",
];

#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect())
    }
}

impl DateParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Parse `text` with the first matching format.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.formats
            .iter()
            .find_map(|format| parse_with(text, format))
    }
}

fn parse_with(text: &str, format: &str) -> Option<NaiveDateTime> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
        return Some(datetime);
    }
    // Date-only formats fail NaiveDateTime parsing for lack of a time.
    NaiveDate::parse_from_str(text, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
