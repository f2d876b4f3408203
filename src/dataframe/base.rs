use std::collections::HashMap;

use crate::dataframe::indexing::{ColumnSelector, RowMask, Selection};
use crate::dataframe::row::Rows;
use crate::error::{Error, Result};
use crate::series::{Operand, Series};
use crate::value::Value;

/// Columnar table: ordered unique column names, one value array per column.
///
/// Fields are private, so the only way to change a frame is through
/// [`set`](DataFrame::set), [`set_column`](DataFrame::set_column) and
/// [`drop`](DataFrame::drop). A mistyped field assignment does not compile:
///
/// ```compile_fail
/// let mut df = mframe::DataFrame::new();
/// df.unknown = 2;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<String>,
    values: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from `(name, values)` pairs, keeping the pair order.
    ///
    /// A repeated name keeps its first position and takes the last values.
    /// All columns must have the same length.
    pub fn from_columns<I, K, V>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Series>,
    {
        let mut df = DataFrame::new();
        for (name, values) in columns {
            df.put_column(name.into(), values.into().into_values());
        }

        if let Some(expected) = df.values.first().map(Vec::len) {
            for (name, column) in df.columns.iter().zip(&df.values) {
                if column.len() != expected {
                    return Err(Error::InconsistentRowCount {
                        column: name.clone(),
                        expected,
                        found: column.len(),
                    });
                }
            }
        }
        Ok(df)
    }

    /// Build a frame from row tuples and the names of their positions.
    ///
    /// Cells past the last name are ignored; a row shorter than `columns`
    /// is a [`Error::LengthMismatch`].
    pub fn from_rows<R, V, C, S>(rows: R, columns: C) -> Result<Self>
    where
        R: IntoIterator<Item = Vec<V>>,
        V: Into<Value>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut data: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

        for row in rows {
            let size = row.len();
            if size < names.len() {
                return Err(Error::LengthMismatch {
                    expected: names.len(),
                    actual: size,
                });
            }
            for (column, cell) in data.iter_mut().zip(row) {
                column.push(cell.into());
            }
        }

        Self::from_columns(names.into_iter().zip(data).map(|(n, v)| (n, Series::new(v))))
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub(crate) fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub(crate) fn column_values(&self, column: &str) -> Result<&[Value]> {
        self.column_index(column)
            .map(|idx| self.values[idx].as_slice())
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))
    }

    pub(crate) fn row_values(&self, row: usize) -> Vec<Value> {
        self.values
            .iter()
            .map(|column| column.get(row).cloned().unwrap_or(Value::Null))
            .collect()
    }

    fn put_column(&mut self, name: String, values: Vec<Value>) {
        match self.column_index(&name) {
            Some(idx) => self.values[idx] = values,
            None => {
                self.columns.push(name);
                self.values.push(values);
            }
        }
    }

    /// Lenient lookup.
    ///
    /// A missing single column yields `default` repeated for every row;
    /// a projection fills missing columns with `Null`.
    pub fn get(&self, selector: impl Into<ColumnSelector>, default: impl Into<Value>) -> Selection {
        match selector.into() {
            ColumnSelector::Name(name) => Selection::Column(self.get_or(&name, default)),
            ColumnSelector::Names(names) => Selection::Frame(self.project(&names)),
            ColumnSelector::Mask(mask) => Selection::Frame(self.filter(mask)),
        }
    }

    /// Strict lookup: an unknown single column is an error
    pub fn select(&self, selector: impl Into<ColumnSelector>) -> Result<Selection> {
        match selector.into() {
            ColumnSelector::Name(name) => self.column(&name).map(Selection::Column),
            ColumnSelector::Names(names) => Ok(Selection::Frame(self.project(&names))),
            ColumnSelector::Mask(mask) => Ok(Selection::Frame(self.filter(mask))),
        }
    }

    /// The column `name` as a Series
    pub fn column(&self, name: &str) -> Result<Series> {
        self.column_values(name).map(|values| Series::new(values.to_vec()))
    }

    /// The column `name`, or `default` repeated for every row
    pub fn get_or(&self, name: &str, default: impl Into<Value>) -> Series {
        match self.column_values(name) {
            Ok(values) => Series::new(values.to_vec()),
            Err(_) => Series::repeat(default.into(), self.len()),
        }
    }

    /// New frame with just `names`, in that order
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> DataFrame {
        let mut df = DataFrame::new();
        for name in names {
            let name = name.as_ref();
            df.put_column(name.to_string(), self.get_or(name, Value::Null).into_values());
        }
        df
    }

    /// New frame with the rows where `mask` is true
    pub fn filter(&self, mask: impl Into<RowMask>) -> DataFrame {
        let keep = mask.into().normalize(self.len());
        let values = self
            .values
            .iter()
            .map(|column| {
                column
                    .iter()
                    .zip(&keep)
                    .filter(|(_, keep)| **keep)
                    .map(|(value, _)| value.clone())
                    .collect()
            })
            .collect();
        DataFrame {
            columns: self.columns.clone(),
            values,
        }
    }

    /// Write `value` into `column` at every row selected by `mask`.
    ///
    /// A new column name is appended, filled with `Null` outside the mask.
    /// Sequence values are read positionally; a sequence too short for a
    /// selected row is an error and leaves the frame unchanged.
    pub fn set(
        &mut self,
        mask: impl Into<RowMask>,
        column: &str,
        value: impl Into<Operand>,
    ) -> Result<()> {
        let len = self.len();
        let selected = mask.into().normalize(len);
        let value = value.into();
        let existing = self.column_values(column).ok();

        let mut rewritten = Vec::with_capacity(len);
        for row in 0..len {
            let apply = selected.get(row).copied().unwrap_or(false);
            let cell = if apply {
                match &value {
                    Operand::Scalar(v) => v.clone(),
                    Operand::Sequence(seq) => {
                        seq.get(row).cloned().ok_or(Error::IndexOutOfBounds {
                            index: row,
                            size: seq.len(),
                        })?
                    }
                }
            } else {
                existing
                    .and_then(|values| values.get(row).cloned())
                    .unwrap_or(Value::Null)
            };
            rewritten.push(cell);
        }

        if existing.is_none() {
            log::debug!("adding column '{}' ({} rows)", column, len);
        }
        self.put_column(column.to_string(), rewritten);
        Ok(())
    }

    /// Replace or add a whole column (`set` over every row)
    pub fn set_column(&mut self, column: &str, value: impl Into<Operand>) -> Result<()> {
        self.set(RowMask::All, column, value)
    }

    /// Remove every row where `mask` is true.
    ///
    /// Note the polarity: here a true flag deletes the row, whereas
    /// [`filter`](Self::filter) and [`set`](Self::set) act on true rows.
    pub fn drop(&mut self, mask: impl Into<RowMask>) {
        let remove = mask.into().normalize(self.len());
        for column in &mut self.values {
            let mut row = 0;
            column.retain(|_| {
                let drop_row = remove.get(row).copied().unwrap_or(false);
                row += 1;
                !drop_row
            });
        }
    }

    /// Iterate over the rows; every call starts a fresh pass
    pub fn iterrows(&self) -> Rows<'_> {
        Rows::new(self)
    }

    /// Snapshot of every column
    pub fn to_dict(&self) -> HashMap<String, Vec<Value>> {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> DataFrame {
        self.slice_rows(0, n.min(self.len()))
    }

    /// Last `n` rows
    pub fn tail(&self, n: usize) -> DataFrame {
        let len = self.len();
        self.slice_rows(len.saturating_sub(n), len)
    }

    fn slice_rows(&self, start: usize, end: usize) -> DataFrame {
        DataFrame {
            columns: self.columns.clone(),
            values: self
                .values
                .iter()
                .map(|column| column[start.min(column.len())..end.min(column.len())].to_vec())
                .collect(),
        }
    }
}
