//! Ticket Table Module
//! Immutable wrapper around the loaded DataFrame.

use polars::prelude::*;

/// Snapshot of the loaded ticket data.
///
/// Created once by the loader; every downstream computation reads the same
/// table. Nothing mutates it after load.
#[derive(Debug)]
pub struct TicketTable {
    df: DataFrame,
}

impl TicketTable {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Number of ticket rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Extract a column as strings, one per row. Nulls come through as
    /// empty strings.
    pub fn str_column(&self, name: &str) -> PolarsResult<Vec<String>> {
        let column = self.df.column(name)?;
        Ok((0..column.len())
            .map(|i| match column.get(i) {
                Ok(val) if !val.is_null() => val.to_string().trim_matches('"').to_string(),
                _ => String::new(),
            })
            .collect())
    }

    /// Extract a numeric column as nullable f64 values, one per row.
    pub fn f64_column(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let column = self.df.column(name)?;
        let casted = column.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        Ok(ca.into_iter().collect())
    }

    /// The underlying DataFrame, for the raw-data export.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }
}
