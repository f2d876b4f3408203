//! Column selectors and row masks

use crate::dataframe::base::DataFrame;
use crate::error::{Error, Result};
use crate::series::Series;

/// What to pull out of a [`DataFrame`]: one column, several columns or a row filter
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSelector {
    /// A single column, returned as a [`Series`]
    Name(String),
    /// A projection, returned as a new [`DataFrame`]
    Names(Vec<String>),
    /// Rows to keep, returned as a new [`DataFrame`]
    Mask(Vec<bool>),
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::Name(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::Name(name)
    }
}

impl From<Vec<&str>> for ColumnSelector {
    fn from(names: Vec<&str>) -> Self {
        ColumnSelector::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ColumnSelector {
    fn from(names: &[&str]) -> Self {
        ColumnSelector::Names(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelector {
    fn from(names: [&str; N]) -> Self {
        ColumnSelector::Names(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for ColumnSelector {
    fn from(names: Vec<String>) -> Self {
        ColumnSelector::Names(names)
    }
}

impl From<Vec<bool>> for ColumnSelector {
    fn from(mask: Vec<bool>) -> Self {
        ColumnSelector::Mask(mask)
    }
}

impl From<&Series> for ColumnSelector {
    fn from(mask: &Series) -> Self {
        ColumnSelector::Mask(mask.to_bools())
    }
}

impl From<Series> for ColumnSelector {
    fn from(mask: Series) -> Self {
        ColumnSelector::Mask(mask.to_bools())
    }
}

/// Result of a column lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Column(Series),
    Frame(DataFrame),
}

impl Selection {
    pub fn into_series(self) -> Result<Series> {
        match self {
            Selection::Column(series) => Ok(series),
            Selection::Frame(_) => Err(Error::InvalidOperation(
                "selection is a frame, not a single column".to_string(),
            )),
        }
    }

    pub fn into_frame(self) -> Result<DataFrame> {
        match self {
            Selection::Frame(frame) => Ok(frame),
            Selection::Column(_) => Err(Error::InvalidOperation(
                "selection is a single column, not a frame".to_string(),
            )),
        }
    }
}

/// Rows targeted by [`DataFrame::set`] and [`DataFrame::drop`].
///
/// `Clauses` holds one boolean sequence per filter condition; a row is
/// selected only when every clause is true at its position.
#[derive(Debug, Clone, PartialEq)]
pub enum RowMask {
    All,
    Mask(Vec<bool>),
    Clauses(Vec<Vec<bool>>),
}

impl RowMask {
    /// Flatten into one flag per row of a frame with `len` rows.
    ///
    /// Clauses are combined position by position up to the shortest clause.
    pub fn normalize(&self, len: usize) -> Vec<bool> {
        match self {
            RowMask::All => vec![true; len],
            RowMask::Mask(mask) => mask.clone(),
            RowMask::Clauses(clauses) => {
                let width = clauses.iter().map(Vec::len).min().unwrap_or(0);
                (0..width)
                    .map(|row| clauses.iter().all(|clause| clause[row]))
                    .collect()
            }
        }
    }
}

impl From<Vec<bool>> for RowMask {
    fn from(mask: Vec<bool>) -> Self {
        RowMask::Mask(mask)
    }
}

impl From<&[bool]> for RowMask {
    fn from(mask: &[bool]) -> Self {
        RowMask::Mask(mask.to_vec())
    }
}

impl From<&Series> for RowMask {
    fn from(mask: &Series) -> Self {
        RowMask::Mask(mask.to_bools())
    }
}

impl From<Series> for RowMask {
    fn from(mask: Series) -> Self {
        RowMask::Mask(mask.to_bools())
    }
}

impl From<Vec<Vec<bool>>> for RowMask {
    fn from(clauses: Vec<Vec<bool>>) -> Self {
        RowMask::Clauses(clauses)
    }
}

impl From<Vec<Series>> for RowMask {
    fn from(clauses: Vec<Series>) -> Self {
        RowMask::Clauses(clauses.iter().map(Series::to_bools).collect())
    }
}
