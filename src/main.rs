//! ServiceNow Ticket Analyzer - command-line entry point.

use std::path::Path;
use std::process::ExitCode;

use ticket_analyzer::config::ReportConfig;
use ticket_analyzer::data::LoaderError;

/// Optional path overrides, read from the working directory when present.
const CONFIG_FILE: &str = "ticket_analyzer.json";

fn main() -> ExitCode {
    let config = ReportConfig::load_or_default(Path::new(CONFIG_FILE));

    match ticket_analyzer::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(LoaderError::MissingInput(path)) = err.downcast_ref::<LoaderError>() {
                println!(
                    "Error: {} not found. Please ensure the file exists.",
                    path.display()
                );
            } else {
                println!("Error during analysis: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
