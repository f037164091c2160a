//! Ticket Data Loader Module
//! Handles CSV file loading and `Created_Date` coercion using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::TicketTable;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct TicketLoader;

impl TicketLoader {
    /// Load the ticket CSV and coerce `Created_Date` to a datetime column.
    ///
    /// The missing-file case is checked up front so the caller can report it
    /// specifically. An unparseable date propagates as a CSV error; values in
    /// the other columns pass through unchecked.
    pub fn load(path: &Path) -> Result<TicketTable, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::MissingInput(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .with_column(col("Created_Date").str().to_datetime(
                None,
                None,
                StrptimeOptions::default(),
                lit("raise"),
            ))
            .collect()?;

        Ok(TicketTable::new(df))
    }
}
