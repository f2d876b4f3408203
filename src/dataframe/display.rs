//! Plain-text table rendering

use std::fmt;

use crate::dataframe::base::DataFrame;
use crate::value::Value;

fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::Int(_) | Value::Float(_))
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Value>> = self.iterrows().map(|row| row.values().to_vec()).collect();

        let widths: Vec<usize> = self
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                rows.iter()
                    .map(|row| row[idx].to_string().chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self
            .columns()
            .iter()
            .zip(&widths)
            .map(|(name, &width)| format!("{name:<width$}"))
            .collect();
        writeln!(f, "{}", header.join("  ").trim_end())?;

        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        write!(f, "{}", rule.join("  "))?;

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(value, &width)| {
                    if is_numeric(value) {
                        format!("{:>width$}", value.to_string())
                    } else {
                        format!("{:<width$}", value.to_string())
                    }
                })
                .collect();
            write!(f, "\n{}", cells.join("  ").trim_end())?;
        }
        Ok(())
    }
}
