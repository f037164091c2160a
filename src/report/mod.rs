//! Report module - console and spreadsheet output

pub mod console;
pub mod spreadsheet;

pub use spreadsheet::ReportError;
