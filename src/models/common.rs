//! Common types shared across models.

use serde::{Deserialize, Serialize};

/// How much of a release date the catalog knows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    #[default]
    Year,
    Month,
    Day,
}

/// Release date as reported by the catalog.
///
/// The source string is kept verbatim for display; year, month and day are
/// parsed out of it when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseDate {
    /// Original string, e.g. "1997", "1997-05" or "1997-05-21".
    pub raw: String,

    /// Year of release, 0 when unknown.
    pub year: i32,

    /// Month of release (1-12), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    /// Day of release (1-31), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl ReleaseDate {
    /// Parse a date string in "YYYY", "YYYY-MM" or "YYYY-MM-DD" format.
    ///
    /// `raw` keeps the input exactly as given.
    pub fn parse(date_str: &str) -> Self {
        let trimmed = date_str.trim();
        if trimmed.is_empty() {
            return Self {
                raw: date_str.to_string(),
                ..Self::default()
            };
        }

        let parts: Vec<&str> = trimmed.split('-').collect();

        Self {
            raw: date_str.to_string(),
            year: parts.first().and_then(|s| s.parse().ok()).unwrap_or(0),
            month: parts
                .get(1)
                .and_then(|s| s.parse().ok())
                .filter(|m| (1..=12).contains(m)),
            day: parts
                .get(2)
                .and_then(|s| s.parse().ok())
                .filter(|d| (1..=31).contains(d)),
        }
    }

    pub fn precision(&self) -> DatePrecision {
        match (self.month, self.day) {
            (Some(_), Some(_)) => DatePrecision::Day,
            (Some(_), None) => DatePrecision::Month,
            _ => DatePrecision::Year,
        }
    }

    pub fn is_known(&self) -> bool {
        self.year > 0
    }
}

impl std::fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.raw.trim().is_empty() {
            write!(f, "unknown")
        } else {
            write!(f, "{}", self.raw)
        }
    }
}
