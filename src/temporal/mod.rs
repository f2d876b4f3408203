//! Best-effort datetime parsing
//!
//! Datetime-typed series coerce the right-hand side of every comparison
//! through a [`DateParser`]. The parser walks an ordered list of `strftime`
//! patterns and returns the first successful parse, so the order of the list
//! decides ambiguous inputs: `2019-01-02` is read as 2 January because
//! `%Y-%m-%d` is tried before `%Y-%d-%m`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// Patterns tried by the default parser, in priority order
pub const DEFAULT_PATTERNS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%d-%m",
    "%d-%m-%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y%m%dT%H%M%SZ",
];

lazy_static! {
    static ref DEFAULT_PARSER: DateParser = DateParser::default();
}

/// Input accepted by the parser: an already-native datetime or text to parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLike {
    Native(NaiveDateTime),
    Text(String),
}

impl From<NaiveDateTime> for DateLike {
    fn from(dt: NaiveDateTime) -> Self {
        DateLike::Native(dt)
    }
}

impl From<NaiveDate> for DateLike {
    fn from(d: NaiveDate) -> Self {
        DateLike::Native(d.and_time(NaiveTime::MIN))
    }
}

impl From<DateTime<Utc>> for DateLike {
    fn from(dt: DateTime<Utc>) -> Self {
        DateLike::Native(dt.naive_utc())
    }
}

impl From<&str> for DateLike {
    fn from(s: &str) -> Self {
        DateLike::Text(s.to_string())
    }
}

impl From<String> for DateLike {
    fn from(s: String) -> Self {
        DateLike::Text(s)
    }
}

impl TryFrom<&Value> for DateLike {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::DateTime(dt) => Ok(DateLike::Native(*dt)),
            Value::Str(s) => Ok(DateLike::Text(s.clone())),
            other => Err(Error::Format(other.repr())),
        }
    }
}

/// Ordered list of `strftime` patterns used to read datetimes from text.
///
/// The list is plain configuration and can be loaded from TOML:
///
/// ```
/// use mframe::temporal::DateParser;
///
/// let parser = DateParser::from_toml_str(r#"patterns = ["%d/%m/%Y"]"#).unwrap();
/// assert!(parser.parse("26/06/2019").is_ok());
/// assert!(parser.parse("2019-06-26").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParser {
    patterns: Vec<String>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::with_patterns(DEFAULT_PATTERNS.iter().copied())
    }
}

impl DateParser {
    /// Create a parser trying `patterns` in the given order
    pub fn with_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DateParser {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a parser from a TOML document with a `patterns` array
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let parser: DateParser = toml::from_str(source)?;
        if parser.patterns.is_empty() {
            return Err(Error::Config("at least one date pattern is required".to_string()));
        }
        Ok(parser)
    }

    /// Process-wide parser built from [`DEFAULT_PATTERNS`]
    pub fn global() -> &'static DateParser {
        &DEFAULT_PARSER
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Parse `value`, returning native datetimes unchanged
    pub fn parse(&self, value: impl Into<DateLike>) -> Result<NaiveDateTime> {
        match value.into() {
            DateLike::Native(dt) => Ok(dt),
            DateLike::Text(text) => self.parse_text(&text),
        }
    }

    /// Coerce a cell to a datetime cell
    pub fn parse_value(&self, value: &Value) -> Result<Value> {
        let date = DateLike::try_from(value)?;
        self.parse(date).map(Value::DateTime)
    }

    fn parse_text(&self, text: &str) -> Result<NaiveDateTime> {
        for pattern in &self.patterns {
            // date-only patterns carry no time fields
            let parsed = NaiveDateTime::parse_from_str(text, pattern).ok().or_else(|| {
                NaiveDate::parse_from_str(text, pattern)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            });
            match parsed {
                Some(dt) if has_full_year(text, pattern, &dt) => return Ok(dt),
                Some(dt) => log::trace!(
                    "'{}' matches date pattern '{}' only with a short year ({})",
                    text,
                    pattern,
                    dt.year()
                ),
                None => log::trace!("'{}' does not match date pattern '{}'", text, pattern),
            }
        }
        Err(Error::Format(text.to_string()))
    }
}

/// `%Y` must have been written with exactly four digits.
///
/// chrono accepts a year of any width, so `12-01-19` would otherwise read as
/// year 12 under `%Y-%m-%d`.
fn has_full_year(text: &str, pattern: &str, dt: &NaiveDateTime) -> bool {
    if !pattern.contains("%Y") {
        return true;
    }
    match dt.year() {
        1000..=9999 => true,
        year @ 0..=999 => text.contains(&format!("{:04}", year)),
        _ => false,
    }
}

/// Parse `value` with the default pattern list
pub fn parse_date(value: impl Into<DateLike>) -> Result<NaiveDateTime> {
    DateParser::global().parse(value)
}
