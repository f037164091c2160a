//! Charts module - dashboard rendering

pub mod dashboard;

pub use dashboard::ChartError;
