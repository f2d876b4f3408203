//! mframe: a minimal in-memory columnar DataFrame/Series engine
//!
//! - [`Series`]: ordered values with broadcast comparison and arithmetic
//! - [`DataFrame`]: named columns with masking, mutation and row iteration
//! - [`DataFrame::pivot`] / [`DataFrame::pivot_table`]: reshape operations
//! - [`parse_date`]: best-effort datetime parsing used by datetime series

pub mod dataframe;
pub mod error;
pub mod pivot;
pub mod series;
pub mod temporal;
pub mod value;

// Re-export commonly used types
pub use dataframe::{ColumnSelector, DataFrame, Row, RowMask, Selection};
pub use error::{Error, MFrameError, Result};
pub use pivot::PivotTable;
pub use series::{ArithOp, CompareOp, DType, Operand, Series};
pub use temporal::{parse_date, DateLike, DateParser};
pub use value::Value;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
