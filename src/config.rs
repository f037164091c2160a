//! Report Configuration Module
//! Input and output paths for one analysis run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_INPUT: &str = "servicenow_tickets.csv";
const DEFAULT_DASHBOARD: &str = "ticket_analysis_dashboard.png";
const DEFAULT_REPORT: &str = "ticket_analysis_report.xlsx";

/// Paths for the input CSV and the two generated report files. Passed into
/// each reporter explicitly so tests can point outputs at temporary paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input_csv: PathBuf,
    pub dashboard_png: PathBuf,
    pub report_xlsx: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from(DEFAULT_INPUT),
            dashboard_png: PathBuf::from(DEFAULT_DASHBOARD),
            report_xlsx: PathBuf::from(DEFAULT_REPORT),
        }
    }
}

impl ReportConfig {
    /// Read a JSON config file if one exists, otherwise use the defaults.
    /// A missing or malformed file falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}
