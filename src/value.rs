//! Dynamically typed cell values
//!
//! Every cell of a [`Series`](crate::Series) or [`DataFrame`](crate::DataFrame)
//! is a [`Value`]. The rules for equality, ordering, arithmetic and truthiness
//! follow the loosely typed model callers expect from a scripting dataframe:
//! - numbers of different kinds compare and combine by numeric value
//! - values of unrelated kinds are never equal, and ordering them is an error
//! - `Null`, `false`, zero and the empty string are falsy

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::{ArithOp, CompareOp};

/// A single cell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Missing value (`None`)
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(NaiveDateTime),
}

/// Numeric view used for mixed int/float arithmetic
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(v) => v as f64,
            Num::Float(v) => v,
        }
    }
}

impl Value {
    /// Name of the value's kind, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::DateTime(_) => "datetime",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness as used by row masks
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::DateTime(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Numeric value as `f64`, if the value is a bool, int or float
    pub fn as_f64(&self) -> Option<f64> {
        self.numeric().map(Num::as_f64)
    }

    fn numeric(&self) -> Option<Num> {
        match self {
            Value::Bool(b) => Some(Num::Int(i64::from(*b))),
            Value::Int(v) => Some(Num::Int(*v)),
            Value::Float(v) => Some(Num::Float(*v)),
            _ => None,
        }
    }

    /// Ordering between two values.
    ///
    /// `Ok(None)` means the values are ordered-comparable but unordered (NaN).
    /// Kinds without a common ordering produce an error.
    pub fn try_cmp(&self, other: &Value) -> Result<Option<Ordering>> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
            (Value::DateTime(a), Value::DateTime(b)) => Ok(Some(a.cmp(b))),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
                _ => Err(Error::InvalidOperation(format!(
                    "'<' not supported between instances of '{}' and '{}'",
                    self.type_name(),
                    other.type_name()
                ))),
            },
        }
    }

    /// Evaluate `self <op> other`
    pub fn compare(&self, other: &Value, op: CompareOp) -> Result<bool> {
        let ordering = match op {
            CompareOp::Eq => return Ok(self == other),
            CompareOp::Ne => return Ok(self != other),
            _ => self.try_cmp(other).map_err(|_| {
                Error::InvalidOperation(format!(
                    "'{}' not supported between instances of '{}' and '{}'",
                    op.symbol(),
                    self.type_name(),
                    other.type_name()
                ))
            })?,
        };
        Ok(match ordering {
            None => false,
            Some(ord) => match op {
                CompareOp::Lt => ord == Ordering::Less,
                CompareOp::LtEq => ord != Ordering::Greater,
                CompareOp::Gt => ord == Ordering::Greater,
                CompareOp::GtEq => ord != Ordering::Less,
                CompareOp::Eq => ord == Ordering::Equal,
                CompareOp::Ne => ord != Ordering::Equal,
            },
        })
    }

    /// Evaluate `self <op> other`
    pub fn arith(&self, other: &Value, op: ArithOp) -> Result<Value> {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => numeric_arith(a, b, op),
            _ => match (self, other, op) {
                (Value::Str(a), Value::Str(b), ArithOp::Add) => Ok(Value::Str(format!("{a}{b}"))),
                _ => Err(Error::InvalidOperation(format!(
                    "unsupported operand type(s) for {}: '{}' and '{}'",
                    op.symbol(),
                    self.type_name(),
                    other.type_name()
                ))),
            },
        }
    }

    /// Round to `ndigits` decimal places; negative `ndigits` round to tens,
    /// hundreds and so on.
    ///
    /// Ties round away from zero (`0.125` to two places is `0.13`). Floats
    /// that cannot be scaled without overflowing are returned unchanged.
    pub fn round(&self, ndigits: i32) -> Result<Value> {
        match self.numeric() {
            Some(Num::Int(v)) if ndigits >= 0 => Ok(Value::Int(v)),
            Some(Num::Int(v)) => round_int(v, ndigits.unsigned_abs()).map(Value::Int),
            Some(Num::Float(v)) => Ok(Value::Float(round_float(v, ndigits))),
            None => Err(Error::InvalidOperation(format!(
                "type {} doesn't define round",
                self.type_name()
            ))),
        }
    }

    pub fn abs(&self) -> Result<Value> {
        match self.numeric() {
            Some(Num::Int(v)) => v
                .checked_abs()
                .map(Value::Int)
                .ok_or_else(|| Error::InvalidOperation(format!("integer overflow in abs({v})"))),
            Some(Num::Float(v)) => Ok(Value::Float(v.abs())),
            None => Err(Error::InvalidOperation(format!(
                "bad operand type for abs(): '{}'",
                self.type_name()
            ))),
        }
    }

    /// Literal form used when rendering a sequence of values (strings are quoted)
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("'{s}'"),
            Value::DateTime(dt) => format!("datetime({})", dt.format("%Y-%m-%d %H:%M:%S")),
            other => other.to_string(),
        }
    }
}

fn numeric_arith(a: Num, b: Num, op: ArithOp) -> Result<Value> {
    if let (Num::Int(x), Num::Int(y)) = (a, b) {
        let checked = match op {
            ArithOp::Add => Some(x.checked_add(y)),
            ArithOp::Sub => Some(x.checked_sub(y)),
            ArithOp::Mul => Some(x.checked_mul(y)),
            ArithOp::Div => None,
        };
        if let Some(result) = checked {
            return result.map(Value::Int).ok_or_else(|| {
                Error::InvalidOperation(format!("integer overflow in {x} {} {y}", op.symbol()))
            });
        }
    }

    let (x, y) = (a.as_f64(), b.as_f64());
    match op {
        ArithOp::Add => Ok(Value::Float(x + y)),
        ArithOp::Sub => Ok(Value::Float(x - y)),
        ArithOp::Mul => Ok(Value::Float(x * y)),
        ArithOp::Div if y == 0.0 => Err(Error::InvalidOperation("division by zero".to_string())),
        ArithOp::Div => Ok(Value::Float(x / y)),
    }
}

/// Round `v` to a multiple of `10^digits`, in integer arithmetic
fn round_int(v: i64, digits: u32) -> Result<i64> {
    let Some(step) = 10i128.checked_pow(digits) else {
        return Ok(0);
    };
    let wide = i128::from(v);
    let rem = wide % step;
    let mut rounded = wide - rem;
    if rem.unsigned_abs() * 2 >= step.unsigned_abs() {
        rounded += step * wide.signum();
    }
    i64::try_from(rounded)
        .map_err(|_| Error::InvalidOperation(format!("integer overflow in round({v}, -{digits})")))
}

fn round_float(v: f64, ndigits: i32) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let factor = 10f64.powi(ndigits);
    if factor == 0.0 {
        return 0.0f64.copysign(v);
    }
    let scaled = v * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return v;
    }
    let rounded = scaled.round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        v
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::DateTime(v.and_time(NaiveTime::MIN))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v.naive_utc())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_numeric_equality() {
        assert_eq!(Value::Int(4), Value::Float(4.0));
        assert_eq!(Value::Bool(true), Value::Int(1));
        assert_ne!(Value::Str("4".into()), Value::Int(4));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn ordering_unrelated_kinds_is_an_error() {
        let err = Value::from("a").compare(&Value::Int(1), CompareOp::Lt);
        assert!(matches!(err, Err(Error::InvalidOperation(_))));
        // equality never fails
        assert!(!Value::from("a").compare(&Value::Int(1), CompareOp::Eq).unwrap());
    }

    #[test]
    fn int_arithmetic_stays_integral_except_division() {
        assert_eq!(Value::Int(7).arith(&Value::Int(2), ArithOp::Sub).unwrap(), Value::Int(5));
        assert!(matches!(
            Value::Int(7).arith(&Value::Int(2), ArithOp::Div).unwrap(),
            Value::Float(v) if v == 3.5
        ));
        assert!(Value::Int(1).arith(&Value::Int(0), ArithOp::Div).is_err());
        assert!(Value::Int(i64::MAX).arith(&Value::Int(1), ArithOp::Add).is_err());
    }

    #[test]
    fn string_concatenation() {
        let joined = Value::from("ab").arith(&Value::from("cd"), ArithOp::Add).unwrap();
        assert_eq!(joined, Value::from("abcd"));
        assert!(Value::from("ab").arith(&Value::from("cd"), ArithOp::Mul).is_err());
    }

    #[test]
    fn rounding() {
        assert_eq!(Value::Float(1.2345).round(2).unwrap(), Value::Float(1.23));
        assert_eq!(Value::Int(1234).round(-2).unwrap(), Value::Int(1200));
        assert_eq!(Value::Int(-1250).round(-2).unwrap(), Value::Int(-1300));
        assert_eq!(Value::Float(0.125).round(2).unwrap(), Value::Float(0.13));
        assert!(Value::Null.round(1).is_err());
    }

    #[test]
    fn rounding_extreme_precision_keeps_the_value() {
        assert_eq!(Value::Float(1e300).round(10).unwrap(), Value::Float(1e300));
        assert_eq!(Value::Float(1.5).round(400).unwrap(), Value::Float(1.5));
        assert_eq!(Value::Float(1.5).round(-400).unwrap(), Value::Float(0.0));
        assert!(matches!(Value::Float(f64::INFINITY).round(2).unwrap(), Value::Float(v) if v.is_infinite()));
    }

    #[test]
    fn rounding_large_ints_is_exact() {
        // 2^53 + 1 is not representable as f64
        let v = 9_007_199_254_740_993;
        assert_eq!(Value::Int(v).round(-1).unwrap(), Value::Int(9_007_199_254_740_990));
        assert_eq!(Value::Int(i64::MAX).round(-30).unwrap(), Value::Int(0));
        assert!(Value::Int(i64::MAX).round(-1).is_err());
    }

    #[test]
    fn display_matches_scripting_conventions() {
        assert_eq!(Value::Float(100.0).to_string(), "100.0");
        assert_eq!(Value::Float(45.67).to_string(), "45.67");
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::from("aapl").repr(), "'aapl'");
    }
}
