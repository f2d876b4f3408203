//! Reshape operations: `pivot` and `pivot_table`

use crate::dataframe::{DataFrame, RowMask};
use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::Value;

/// Distinct values in first-seen order
fn distinct(values: &[Value]) -> Vec<Value> {
    let mut seen: Vec<Value> = Vec::new();
    for value in values {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// One generated `{value}_{key}` output column of a pivot table
#[derive(Debug, Clone)]
struct PivotCell {
    /// Source column the cell value is read from
    value_column: String,
    /// "columns" column whose value selects the row
    level_column: String,
    /// Value of `level_column` this output column stands for
    key: Value,
}

/// Pivot table layout bound to a source frame
#[derive(Debug)]
pub struct PivotTable<'a> {
    /// Source frame
    df: &'a DataFrame,

    /// Columns whose value combinations become output rows
    index: Vec<String>,

    /// Columns whose values fill the output cells
    values: Vec<String>,

    /// Columns whose distinct values become output columns
    columns: Vec<String>,

    /// Value used for (index, columns) combinations absent from the source
    fill_value: Value,
}

impl<'a> PivotTable<'a> {
    /// Create a pivot table, checking that every referenced column exists
    pub fn new(
        df: &'a DataFrame,
        index: &[&str],
        values: &[&str],
        columns: &[&str],
        fill_value: Value,
    ) -> Result<Self> {
        for name in index.iter().chain(values).chain(columns) {
            if !df.contains(name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
        }

        Ok(PivotTable {
            df,
            index: owned(index),
            values: owned(values),
            columns: owned(columns),
            fill_value,
        })
    }

    /// Output columns after the index columns, in creation order.
    ///
    /// A generated name that already exists keeps its first definition.
    fn layout(&self) -> Result<(Vec<String>, Vec<PivotCell>)> {
        let mut levels = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            levels.push((column, distinct(self.df.column_values(column)?)));
        }

        let mut names = self.index.clone();
        let mut cells = Vec::new();
        for value_column in &self.values {
            for (level_column, keys) in &levels {
                for key in keys {
                    let name = format!("{}_{}", value_column, key);
                    if names.contains(&name) {
                        log::debug!("pivot_table: skipping duplicate output column '{}'", name);
                        continue;
                    }
                    names.push(name);
                    cells.push(PivotCell {
                        value_column: value_column.clone(),
                        level_column: level_column.to_string(),
                        key: key.clone(),
                    });
                }
            }
        }
        Ok((names, cells))
    }

    /// Distinct combinations of index values, in first-seen order
    fn index_combinations(&self) -> Result<Vec<Vec<Value>>> {
        let index_columns = self
            .index
            .iter()
            .map(|name| self.df.column_values(name))
            .collect::<Result<Vec<_>>>()?;

        let mut combos: Vec<Vec<Value>> = Vec::new();
        for row in 0..self.df.len() {
            let combo: Vec<Value> = index_columns.iter().map(|c| c[row].clone()).collect();
            if !combos.contains(&combo) {
                combos.push(combo);
            }
        }
        Ok(combos)
    }

    /// Build the pivoted frame: one row per index combination
    pub fn execute(&self) -> Result<DataFrame> {
        let (names, cells) = self.layout()?;
        let combos = self.index_combinations()?;
        let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(combos.len()); names.len()];

        for combo in &combos {
            let clauses = self
                .index
                .iter()
                .zip(combo)
                .map(|(name, value)| -> Result<Vec<bool>> {
                    Ok(self.df.column(name)?.equal(value)?.to_bools())
                })
                .collect::<Result<Vec<_>>>()?;
            let subset = self.df.filter(RowMask::Clauses(clauses));

            for (slot, value) in combo.iter().enumerate() {
                data[slot].push(value.clone());
            }

            for (offset, cell) in cells.iter().enumerate() {
                let matches = subset.column(&cell.level_column)?.equal(&cell.key)?;
                let found = subset
                    .filter(&matches)
                    .column_values(&cell.value_column)?
                    .first()
                    .cloned();
                data[self.index.len() + offset].push(found.unwrap_or_else(|| self.fill_value.clone()));
            }
        }

        log::debug!(
            "pivot_table: {} rows x {} columns from {} source rows",
            combos.len(),
            names.len(),
            self.df.len()
        );
        DataFrame::from_columns(names.into_iter().zip(data).map(|(n, v)| (n, Series::new(v))))
    }
}

/// Reshape extensions for DataFrame
impl DataFrame {
    /// Turn the distinct values of `columns` into new columns holding `values`.
    ///
    /// Rows are appended to each new column in encounter order and no
    /// aggregation happens, so the input must be a perfect grid: exactly one
    /// row per (index, columns) pair, in the same index order for every
    /// column value. Any other input is rejected with
    /// [`Error::NonRectangularPivot`].
    ///
    /// A key whose text equals an earlier output column name (the index
    /// column included) is skipped, as in [`pivot_table`](Self::pivot_table).
    pub fn pivot(&self, index: &str, columns: &str, values: &str) -> Result<DataFrame> {
        let index_col = self.column_values(index)?;
        let columns_col = self.column_values(columns)?;
        let values_col = self.column_values(values)?;

        let mut index_values: Vec<Value> = Vec::new();
        let mut buckets: Vec<(Value, Vec<(Value, Value)>)> = Vec::new();
        for ((idx, key), value) in index_col.iter().zip(columns_col).zip(values_col) {
            if !index_values.contains(idx) {
                index_values.push(idx.clone());
            }
            match buckets.iter_mut().find(|(k, _)| k == key) {
                Some((_, bucket)) => bucket.push((idx.clone(), value.clone())),
                None => buckets.push((key.clone(), vec![(idx.clone(), value.clone())])),
            }
        }

        for (key, bucket) in &buckets {
            if bucket.len() != index_values.len() {
                return Err(Error::NonRectangularPivot {
                    column: key.to_string(),
                    reason: format!(
                        "has {} values for {} index entries",
                        bucket.len(),
                        index_values.len()
                    ),
                });
            }
            let misplaced = bucket
                .iter()
                .zip(&index_values)
                .position(|((idx, _), expected)| idx != expected);
            if let Some(pos) = misplaced {
                return Err(Error::NonRectangularPivot {
                    column: key.to_string(),
                    reason: format!(
                        "value {} belongs to index {} instead of {}",
                        pos, bucket[pos].0, index_values[pos]
                    ),
                });
            }
        }

        log::debug!(
            "pivot: {} rows x {} value columns",
            index_values.len(),
            buckets.len()
        );

        let mut result = vec![(index.to_string(), index_values)];
        for (key, bucket) in buckets {
            let name = key.to_string();
            if result.iter().any(|(existing, _)| *existing == name) {
                log::debug!("pivot: skipping duplicate output column '{}'", name);
                continue;
            }
            result.push((name, bucket.into_iter().map(|(_, v)| v).collect()));
        }
        DataFrame::from_columns(result.into_iter().map(|(n, v)| (n, Series::new(v))))
    }

    /// Generalised pivot over several index, value and "columns" columns.
    ///
    /// Produces one row per distinct index combination (first-seen order).
    /// For every value column and every distinct value `key` of every
    /// "columns" column there is an output column `"{value}_{key}"` holding
    /// the first matching source value, or `fill_value` when none matches.
    pub fn pivot_table(
        &self,
        index: &[&str],
        values: &[&str],
        columns: &[&str],
        fill_value: impl Into<Value>,
    ) -> Result<DataFrame> {
        PivotTable::new(self, index, values, columns, fill_value.into())?.execute()
    }
}
