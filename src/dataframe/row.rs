//! Row-wise iteration

use std::collections::HashMap;
use std::ops::Index;

use crate::dataframe::base::DataFrame;
use crate::value::Value;

/// One row of a frame, keyed by column name in column order
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    columns: &'a [String],
    values: Vec<Value>,
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn to_map(&self) -> HashMap<String, Value> {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }
}

impl Index<&str> for Row<'_> {
    type Output = Value;

    /// Panics if the row has no such column
    fn index(&self, column: &str) -> &Value {
        match self.get(column) {
            Some(value) => value,
            None => panic!("row has no column '{column}'"),
        }
    }
}

/// Iterator returned by [`DataFrame::iterrows`]
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    frame: &'a DataFrame,
    pos: usize,
}

impl<'a> Rows<'a> {
    pub(crate) fn new(frame: &'a DataFrame) -> Self {
        Rows { frame, pos: 0 }
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Row<'a>> {
        if self.pos >= self.frame.len() {
            return None;
        }
        let values = self.frame.row_values(self.pos);
        self.pos += 1;
        Some(Row {
            columns: self.frame.columns(),
            values,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}
