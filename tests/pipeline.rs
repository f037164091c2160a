//! End-to-end pipeline tests over a synthetic ticket CSV with known
//! distributions, so every printed value can be checked by hand.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use calamine::{open_workbook_auto, Reader};

use ticket_analyzer::config::ReportConfig;
use ticket_analyzer::data::{LoaderError, TicketLoader};
use ticket_analyzer::report::console::render_summary;
use ticket_analyzer::stats::TicketStats;

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("ticket-analyzer-{name}-{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// 100 rows with exact, hand-checkable distributions:
/// - Status: 50 Resolved + 20 Closed (70 resolved), 10 New + 15 In Progress
///   + 5 Escalated (30 backlog)
/// - Category: Network 40, Database 25, Application 20, Hardware 10,
///   Access 3, Email 2
/// - Severity: P1 10, P2 30, P3 40, P4 20
/// - Resolution hours on rows 0..70 only, cycling 1..=10, so every severity
///   group and the overall set have mean = median = 5.5
fn write_synthetic_csv(path: &Path) {
    let mut out = String::from("Created_Date,Status,Category,Severity,Resolution_Time_Hours\n");
    for i in 0..100usize {
        let status = match i {
            0..=49 => "Resolved",
            50..=69 => "Closed",
            70..=79 => "New",
            80..=94 => "In Progress",
            _ => "Escalated",
        };
        let category = match i {
            0..=39 => "Network",
            40..=64 => "Database",
            65..=84 => "Application",
            85..=94 => "Hardware",
            95..=97 => "Access",
            _ => "Email",
        };
        let severity = match i {
            0..=9 => "P1",
            10..=39 => "P2",
            40..=59 | 80..=99 => "P3",
            _ => "P4",
        };
        let hours = if i < 70 {
            format!("{}", (i % 10) + 1)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "2024-01-{:02} 08:30:00,{status},{category},{severity},{hours}\n",
            (i % 28) + 1
        ));
    }
    fs::write(path, out).unwrap();
}

fn config_in(dir: &Path) -> ReportConfig {
    ReportConfig {
        input_csv: dir.join("tickets.csv"),
        dashboard_png: dir.join("dashboard.png"),
        report_xlsx: dir.join("report.xlsx"),
    }
}

#[test]
fn console_summary_matches_hand_computed_values() {
    let dir = tmp_dir("console");
    let config = config_in(&dir);
    write_synthetic_csv(&config.input_csv);

    let table = TicketLoader::load(&config.input_csv).unwrap();
    let stats = TicketStats::from_table(&table).unwrap();
    let summary = render_summary(&stats);

    assert!(summary.contains("Total Tickets: 100"));
    assert!(summary.contains("Resolved Tickets: 70"));
    assert!(summary.contains("Resolution Rate: 70.0%"));
    assert!(summary.contains("Average Resolution Time: 5.50 hours"));
    assert!(summary.contains("Median Resolution Time: 5.50 hours"));
    assert!(summary.contains("Current Backlog: 30 tickets"));
    assert!(summary.contains("Backlog Percentage: 30.0%"));

    // top-5 categories in descending order; Email (rank 6) is cut
    let net = summary.find("Network: 40 tickets (40.0%)").unwrap();
    let db = summary.find("Database: 25 tickets (25.0%)").unwrap();
    let app = summary.find("Application: 20 tickets (20.0%)").unwrap();
    let hw = summary.find("Hardware: 10 tickets (10.0%)").unwrap();
    let acc = summary.find("Access: 3 tickets (3.0%)").unwrap();
    assert!(net < db && db < app && app < hw && hw < acc);
    assert!(!summary.contains("Email:"));

    assert!(summary.contains("P3: 40 tickets (40.0%)"));
    assert!(summary.contains("P1: 10 tickets (10.0%)"));

    // per-severity resolution stats in fixed P1..P4 order; counts are the
    // rows that actually carry a resolution time
    let p1 = summary.find("P1: 10 tickets, Avg: 5.50h, Median: 5.50h").unwrap();
    let p2 = summary.find("P2: 30 tickets, Avg: 5.50h, Median: 5.50h").unwrap();
    let p3 = summary.find("P3: 20 tickets, Avg: 5.50h, Median: 5.50h").unwrap();
    let p4 = summary.find("P4: 10 tickets, Avg: 5.50h, Median: 5.50h").unwrap();
    assert!(p1 < p2 && p2 < p3 && p3 < p4);
}

#[test]
fn full_run_produces_dashboard_and_report() {
    let dir = tmp_dir("full-run");
    let config = config_in(&dir);
    write_synthetic_csv(&config.input_csv);

    ticket_analyzer::run(&config).unwrap();

    let png = fs::metadata(&config.dashboard_png).unwrap();
    assert!(png.len() > 0, "dashboard PNG should not be empty");

    let workbook = open_workbook_auto(&config.report_xlsx).unwrap();
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec![
            "Summary".to_string(),
            "Category_Analysis".to_string(),
            "Severity_Analysis".to_string(),
            "Raw_Data".to_string(),
        ]
    );
}

#[test]
fn raw_data_round_trips_rows_and_columns() {
    let dir = tmp_dir("round-trip");
    let config = config_in(&dir);
    write_synthetic_csv(&config.input_csv);

    ticket_analyzer::run(&config).unwrap();

    let mut workbook = open_workbook_auto(&config.report_xlsx).unwrap();
    let range = workbook.worksheet_range("Raw_Data").unwrap();

    // header plus all 100 rows
    assert_eq!(range.height(), 101);
    let header: Vec<String> = range
        .rows()
        .next()
        .unwrap()
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    assert_eq!(
        header,
        vec![
            "Created_Date",
            "Status",
            "Category",
            "Severity",
            "Resolution_Time_Hours",
        ]
    );
}

#[test]
fn summary_sheet_carries_rounded_scalars() {
    let dir = tmp_dir("summary-sheet");
    let config = config_in(&dir);
    write_synthetic_csv(&config.input_csv);

    ticket_analyzer::run(&config).unwrap();

    let mut workbook = open_workbook_auto(&config.report_xlsx).unwrap();
    let range = workbook.worksheet_range("Summary").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(rows[0], vec!["Metric", "Value"]);
    assert_eq!(rows[1], vec!["Total Tickets", "100"]);
    assert_eq!(rows[2], vec!["Resolved Tickets", "70"]);
    assert_eq!(rows[3], vec!["Backlog Tickets", "30"]);
    assert_eq!(rows[4], vec!["Avg Resolution Time (hrs)", "5.5"]);
    assert_eq!(rows[5], vec!["Median Resolution Time (hrs)", "5.5"]);
}

#[test]
fn empty_table_fails_without_writing_outputs() {
    let dir = tmp_dir("empty");
    let config = config_in(&dir);
    fs::write(
        &config.input_csv,
        "Created_Date,Status,Category,Severity,Resolution_Time_Hours\n",
    )
    .unwrap();

    assert!(ticket_analyzer::run(&config).is_err());
    assert!(!config.dashboard_png.exists());
    assert!(!config.report_xlsx.exists());
}

#[test]
fn unwritable_dashboard_path_fails_the_run() {
    let dir = tmp_dir("bad-png-dir");
    let mut config = config_in(&dir);
    write_synthetic_csv(&config.input_csv);
    config.dashboard_png = dir.join("no-such-dir").join("dashboard.png");

    assert!(ticket_analyzer::run(&config).is_err());
    // the dashboard stage fails, so the report stage never runs
    assert!(!config.report_xlsx.exists());
}

#[test]
fn unwritable_report_path_fails_without_leaving_temp_files() {
    let dir = tmp_dir("bad-xlsx-dir");
    let mut config = config_in(&dir);
    write_synthetic_csv(&config.input_csv);
    config.report_xlsx = dir.join("no-such-dir").join("report.xlsx");

    assert!(ticket_analyzer::run(&config).is_err());
    assert!(!config.report_xlsx.exists());

    // no stray swap file either, in the working directory or elsewhere
    assert!(!dir.join("no-such-dir").exists());
    let leftovers = fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn missing_input_is_reported_specifically() {
    let dir = tmp_dir("missing");
    let err = TicketLoader::load(&dir.join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoaderError::MissingInput(_)));
}

#[test]
fn unparseable_date_is_a_load_error() {
    let dir = tmp_dir("bad-date");
    let csv = dir.join("tickets.csv");
    fs::write(
        &csv,
        "Created_Date,Status,Category,Severity,Resolution_Time_Hours\n\
         not-a-date,New,Network,P1,\n",
    )
    .unwrap();

    let err = TicketLoader::load(&csv).unwrap_err();
    assert!(matches!(err, LoaderError::Csv(_)));
}
