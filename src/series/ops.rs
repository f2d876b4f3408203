//! Operand model and `std::ops` implementations for [`Series`]

use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};

use chrono::{NaiveDate, NaiveDateTime};

use super::Series;
use crate::error::Result;
use crate::value::Value;

/// Elementwise comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }
}

/// Elementwise arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Right-hand side of a series operation: broadcast scalar or positional sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(Value),
    Sequence(Vec<Value>),
}

impl Operand {
    /// Transform every value, stopping at the first failure
    pub fn try_map<F>(self, mut f: F) -> Result<Operand>
    where
        F: FnMut(&Value) -> Result<Value>,
    {
        match self {
            Operand::Scalar(v) => f(&v).map(Operand::Scalar),
            Operand::Sequence(values) => values
                .iter()
                .map(f)
                .collect::<Result<Vec<_>>>()
                .map(Operand::Sequence),
        }
    }
}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Scalar(Value::from(v))
                }
            }
        )*
    };
}

impl_scalar_operand!(Value, &Value, bool, i32, i64, f64, &str, String, NaiveDateTime, NaiveDate);

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl From<&[Value]> for Operand {
    fn from(values: &[Value]) -> Self {
        Operand::Sequence(values.to_vec())
    }
}

impl From<&Series> for Operand {
    fn from(series: &Series) -> Self {
        Operand::Sequence(series.values().to_vec())
    }
}

impl From<Series> for Operand {
    fn from(series: Series) -> Self {
        Operand::Sequence(series.into_values())
    }
}

macro_rules! impl_arith_op {
    (@reflected $trait:ident, $method:ident, $op:expr, $($scalar:ty),*) => {
        $(
            impl $trait<&Series> for $scalar {
                type Output = Result<Series>;

                fn $method(self, rhs: &Series) -> Self::Output {
                    rhs.arithmetic(self, $op, true)
                }
            }

            impl $trait<Series> for $scalar {
                type Output = Result<Series>;

                fn $method(self, rhs: Series) -> Self::Output {
                    rhs.arithmetic(self, $op, true)
                }
            }
        )*
    };
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Operand>> $trait<T> for &Series {
            type Output = Result<Series>;

            fn $method(self, rhs: T) -> Self::Output {
                self.arithmetic(rhs, $op, false)
            }
        }

        impl<T: Into<Operand>> $trait<T> for Series {
            type Output = Result<Series>;

            fn $method(self, rhs: T) -> Self::Output {
                self.arithmetic(rhs, $op, false)
            }
        }

        impl_arith_op!(@reflected $trait, $method, $op, i32, i64, f64, Value);
    };
}

impl_arith_op!(Add, add, ArithOp::Add);
impl_arith_op!(Sub, sub, ArithOp::Sub);
impl_arith_op!(Mul, mul, ArithOp::Mul);
impl_arith_op!(Div, div, ArithOp::Div);

impl BitAnd<&Series> for &Series {
    type Output = Series;

    fn bitand(self, rhs: &Series) -> Series {
        self.and_(rhs)
    }
}

impl BitAnd<Series> for Series {
    type Output = Series;

    fn bitand(self, rhs: Series) -> Series {
        self.and_(&rhs)
    }
}

impl BitOr<&Series> for &Series {
    type Output = Series;

    fn bitor(self, rhs: &Series) -> Series {
        self.or_(rhs)
    }
}

impl BitOr<Series> for Series {
    type Output = Series;

    fn bitor(self, rhs: Series) -> Series {
        self.or_(&rhs)
    }
}

impl Not for &Series {
    type Output = Series;

    fn not(self) -> Series {
        self.not_()
    }
}

impl Not for Series {
    type Output = Series;

    fn not(self) -> Series {
        self.not_()
    }
}
