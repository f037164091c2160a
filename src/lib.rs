//! ServiceNow Ticket Analyzer
//!
//! Loads a ticket CSV, aggregates summary statistics, and emits a console
//! report, a four-panel dashboard PNG and a four-sheet Excel report.

pub mod charts;
pub mod config;
pub mod data;
pub mod report;
pub mod stats;

use std::path::Path;

use anyhow::Result;

use config::ReportConfig;
use data::TicketLoader;
use stats::TicketStats;

/// Run the full pipeline: load, aggregate, console summary, dashboard,
/// Excel report. All stages read the same loaded table; any failure stops
/// the run.
pub fn run(config: &ReportConfig) -> Result<()> {
    let table = TicketLoader::load(&config.input_csv)?;
    let stats = TicketStats::from_table(&table)?;

    report::console::print_summary(&stats);

    charts::dashboard::render(&stats, &config.dashboard_png)?;
    println!("\nDashboard saved as: {}", file_name(&config.dashboard_png));

    report::spreadsheet::write_report(&table, &stats, &config.report_xlsx)?;
    println!("Excel report saved as: {}", file_name(&config.report_xlsx));

    println!("\n=== ANALYSIS COMPLETE ===");
    println!("Files generated:");
    println!("- {}", file_name(&config.dashboard_png));
    println!("- {}", file_name(&config.report_xlsx));
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
