// DataFrame implementation modules
pub mod base;
mod display;
pub mod indexing;
pub mod row;

// Re-exports for convenience
pub use base::DataFrame;
pub use indexing::{ColumnSelector, RowMask, Selection};
pub use row::{Row, Rows};
