use thiserror::Error;

/// Error type shared by every mframe operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Unknown column referenced through a strict accessor or a reshape argument
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A value could not be interpreted as a datetime by any configured pattern
    #[error("{0} is not a recognized datetime format")]
    Format(String),

    #[error("index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("inconsistent row count in column '{column}': expected {expected}, found {found}")]
    InconsistentRowCount {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Operator applied to values it is not defined for (e.g. `'a' - 1`)
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// `pivot` input is not a perfect (index, columns) grid
    #[error("pivot input is not rectangular: column '{column}' {reason}")]
    NonRectangularPivot { column: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Alias kept for callers used to the longer name
pub type MFrameError = Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
