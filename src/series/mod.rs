mod ops;

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::temporal::DateParser;
use crate::value::Value;

pub use self::ops::{ArithOp, CompareOp, Operand};

/// Element kind of a Series, inferred from its first element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    Object,
    DateTime,
}

impl DType {
    fn infer(data: &[Value]) -> Self {
        match data.first() {
            Some(Value::DateTime(_)) => DType::DateTime,
            _ => DType::Object,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DType::Object => "object",
            DType::DateTime => "datetime",
        }
    }
}

/// Ordered sequence of values with an inferred element kind.
///
/// Comparisons and arithmetic return new series; `apply` and `round`
/// rewrite the receiver in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    data: Vec<Value>,
    dtype: DType,
}

impl Series {
    /// Wrap `data`; the dtype is fixed from the first element
    pub fn new(data: Vec<Value>) -> Self {
        let dtype = DType::infer(&data);
        Series { data, dtype }
    }

    /// `value` repeated `len` times
    pub fn repeat(value: Value, len: usize) -> Self {
        Series::new(vec![value; len])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn get(&self, pos: usize) -> Option<&Value> {
        self.data.get(pos)
    }

    pub fn values(&self) -> &[Value] {
        &self.data
    }

    pub fn into_values(self) -> Vec<Value> {
        self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.data.iter()
    }

    /// Truthiness of every element
    pub fn to_bools(&self) -> Vec<bool> {
        self.data.iter().map(Value::is_truthy).collect()
    }

    /// Elementwise comparison against a scalar (broadcast) or an equal-length sequence.
    ///
    /// On a datetime series the operand is first coerced with the default
    /// [`DateParser`], so `dates.gt_eq("2019-01-03")` compares datetimes.
    pub fn compare(&self, other: impl Into<Operand>, op: CompareOp) -> Result<Series> {
        self.compare_with(DateParser::global(), other, op)
    }

    /// [`compare`](Self::compare) with an explicit date parser
    pub fn compare_with(
        &self,
        parser: &DateParser,
        other: impl Into<Operand>,
        op: CompareOp,
    ) -> Result<Series> {
        let mut other = other.into();
        if self.dtype == DType::DateTime {
            other = other.try_map(|v| parser.parse_value(v))?;
        }

        let data = match &other {
            Operand::Scalar(rhs) => self
                .data
                .iter()
                .map(|lhs| lhs.compare(rhs, op).map(Value::Bool))
                .collect::<Result<Vec<_>>>()?,
            Operand::Sequence(rhs) => {
                if rhs.len() != self.len() {
                    return Err(Error::LengthMismatch {
                        expected: self.len(),
                        actual: rhs.len(),
                    });
                }
                self.data
                    .iter()
                    .zip(rhs)
                    .map(|(lhs, rhs)| lhs.compare(rhs, op).map(Value::Bool))
                    .collect::<Result<Vec<_>>>()?
            }
        };
        Ok(Series::new(data))
    }

    pub fn equal(&self, other: impl Into<Operand>) -> Result<Series> {
        self.compare(other, CompareOp::Eq)
    }

    pub fn not_equal(&self, other: impl Into<Operand>) -> Result<Series> {
        self.compare(other, CompareOp::Ne)
    }

    pub fn lt(&self, other: impl Into<Operand>) -> Result<Series> {
        self.compare(other, CompareOp::Lt)
    }

    pub fn lt_eq(&self, other: impl Into<Operand>) -> Result<Series> {
        self.compare(other, CompareOp::LtEq)
    }

    pub fn gt(&self, other: impl Into<Operand>) -> Result<Series> {
        self.compare(other, CompareOp::Gt)
    }

    pub fn gt_eq(&self, other: impl Into<Operand>) -> Result<Series> {
        self.compare(other, CompareOp::GtEq)
    }

    /// Elementwise logical AND; the result is as long as the shorter input
    pub fn and_(&self, other: &Series) -> Series {
        self.zip_truth(other, |a, b| a && b)
    }

    /// Elementwise logical OR; the result is as long as the shorter input
    pub fn or_(&self, other: &Series) -> Series {
        self.zip_truth(other, |a, b| a || b)
    }

    /// Elementwise logical NOT
    pub fn not_(&self) -> Series {
        self.data.iter().map(|v| !v.is_truthy()).collect()
    }

    fn zip_truth(&self, other: &Series, f: impl Fn(bool, bool) -> bool) -> Series {
        self.data
            .iter()
            .zip(other.iter())
            .map(|(a, b)| f(a.is_truthy(), b.is_truthy()))
            .collect()
    }

    /// Apply `op` against a scalar (broadcast) or a sequence (pairwise).
    ///
    /// Sequences are zipped, so the result is as long as the shorter side.
    /// With `reverse` the operand goes on the left: `scalar <op> element`.
    pub fn arithmetic(
        &self,
        other: impl Into<Operand>,
        op: ArithOp,
        reverse: bool,
    ) -> Result<Series> {
        let eval = |lhs: &Value, rhs: &Value| {
            if reverse {
                rhs.arith(lhs, op)
            } else {
                lhs.arith(rhs, op)
            }
        };

        let data = match other.into() {
            Operand::Scalar(rhs) => self
                .data
                .iter()
                .map(|lhs| eval(lhs, &rhs))
                .collect::<Result<Vec<_>>>()?,
            Operand::Sequence(rhs) => self
                .data
                .iter()
                .zip(&rhs)
                .map(|(lhs, rhs)| eval(lhs, rhs))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(Series::new(data))
    }

    /// Replace every element with `f(element)` and return a series of the new data.
    ///
    /// The receiver is rewritten in place but keeps the dtype it was created
    /// with; the returned series infers its dtype from the new data.
    pub fn apply<F>(&mut self, f: F) -> Series
    where
        F: FnMut(&Value) -> Value,
    {
        self.data = self.data.iter().map(f).collect();
        Series::new(self.data.clone())
    }

    /// Fallible [`apply`](Self::apply); the receiver is untouched if any call fails
    pub fn try_apply<F>(&mut self, f: F) -> Result<Series>
    where
        F: FnMut(&Value) -> Result<Value>,
    {
        self.data = self.data.iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Series::new(self.data.clone()))
    }

    /// Round every element in place; ties round away from zero
    pub fn round(&mut self, ndigits: i32) -> Result<&mut Self> {
        self.data = self
            .data
            .iter()
            .map(|v| v.round(ndigits))
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    pub fn abs(&self) -> Result<Series> {
        self.data
            .iter()
            .map(Value::abs)
            .collect::<Result<Vec<_>>>()
            .map(Series::new)
    }
}

impl Index<usize> for Series {
    type Output = Value;

    fn index(&self, pos: usize) -> &Value {
        &self.data[pos]
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl IntoIterator for Series {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<V: Into<Value>> FromIterator<V> for Series {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Series::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<Vec<V>> for Series {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> PartialEq<Vec<T>> for Series
where
    T: Clone + Into<Value>,
{
    fn eq(&self, other: &Vec<T>) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other)
                .all(|(a, b)| *a == Into::<Value>::into(b.clone()))
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.data.iter().map(Value::repr).collect();
        write!(f, "[{}]", items.join(", "))
    }
}
