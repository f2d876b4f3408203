//! Common test fixtures
//!
//! Provides the ticker price and position tables shared by the integration
//! tests, plus small helpers for building values.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use mframe::{DataFrame, Value};

pub const TICKS: [&str; 3] = ["aapl", "goog", "msft"];

pub const DATES: [&str; 6] = [
    "2019-01-01",
    "2019-01-02",
    "2019-01-03",
    "2019-01-04",
    "2019-01-05",
    "2019-01-06",
];

/// Shorthand for a string cell
pub fn s(v: &str) -> Value {
    Value::from(v)
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// `%Y-%m-%d` text to a datetime cell
pub fn str_to_dt(value: &Value) -> Value {
    let text = value.as_str().unwrap();
    Value::from(NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap())
}

/// Numeric text or number to a float cell
pub fn to_float(value: &Value) -> Value {
    match value {
        Value::Str(text) => Value::Float(text.parse().unwrap()),
        other => Value::Float(other.as_f64().unwrap()),
    }
}

/// 3 ticks x 6 dates of prices, with prices stored as a mix of text and numbers
pub fn tickers() -> DataFrame {
    let tick: Vec<Value> = (0..18).map(|i| s(TICKS[i % 3])).collect();
    let date: Vec<Value> = (0..18).map(|i| s(DATES[i / 3])).collect();
    let price = vec![
        s("100"),
        Value::Int(123),
        Value::Float(45.67),
        Value::Float(100.10),
        Value::Int(125),
        Value::Int(45),
        s("100.35"),
        Value::Int(124),
        Value::Int(46),
        Value::Int(105),
        s("123"),
        s("47"),
        Value::Int(106),
        Value::Float(123.50),
        Value::Int(45),
        Value::Int(105),
        Value::Float(122.50),
        Value::Int(45),
    ];
    DataFrame::from_columns(vec![("tick", tick), ("date", date), ("price", price)]).unwrap()
}

/// Position changes per tick; the position labels carry stray padding
pub fn positions() -> DataFrame {
    let tick: Vec<Value> = (0..12).map(|i| s(TICKS[i % 3])).collect();
    let position: Vec<Value> = [
        "open   ",
        "close      ",
        "close   ",
        "close   ",
        "close      ",
        "open",
        "open   ",
        "close      ",
        "open",
        "close   ",
        "close      ",
        "open   ",
    ]
    .iter()
    .map(|p| s(p))
    .collect();
    let date: Vec<Value> = [
        "2019-01-01",
        "2019-01-01",
        "2019-01-01",
        "2019-01-03",
        "2019-01-02",
        "2019-01-02",
        "2019-01-04",
        "2019-01-03",
        "2019-01-04",
        "2019-01-06",
        "2019-01-05",
        "2019-01-06",
    ]
    .iter()
    .map(|d| s(d))
    .collect();
    DataFrame::from_columns(vec![("tick", tick), ("position", position), ("date", date)]).unwrap()
}

/// (tick, price, position) rows expected after merging `positions` into `tickers`
pub fn expected_result() -> Vec<(&'static str, f64, &'static str)> {
    vec![
        ("aapl", 100.0, "open"),
        ("goog", 123.0, "close"),
        ("msft", 45.67, "close"),
        ("aapl", 100.1, "open"),
        ("goog", 125.0, "close"),
        ("msft", 45.0, "open"),
        ("aapl", 100.35, "close"),
        ("goog", 124.0, "close"),
        ("msft", 46.0, "open"),
        ("aapl", 105.0, "open"),
        ("goog", 123.0, "close"),
        ("msft", 47.0, "open"),
        ("aapl", 106.0, "open"),
        ("goog", 123.5, "close"),
        ("msft", 45.0, "open"),
        ("aapl", 105.0, "close"),
        ("goog", 122.5, "close"),
        ("msft", 45.0, "open"),
    ]
}
