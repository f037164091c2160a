//! Spreadsheet Reporter Module
//! Writes the four-sheet Excel report with rust_xlsxwriter.

use polars::prelude::{DataType, PolarsError};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::data::TicketTable;
use crate::stats::{GroupAnalysis, LabelCount, TicketStats};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to build Excel report: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("Failed to write Excel report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read table: {0}")]
    Table(#[from] PolarsError),
}

/// Write the report workbook with sheets Summary, Category_Analysis,
/// Severity_Analysis and Raw_Data, in that order.
///
/// The workbook is built fully in memory and swapped into place with a
/// rename, so a failed run never leaves a truncated file at the target path.
pub fn write_report(
    table: &TicketTable,
    stats: &TicketStats,
    path: &Path,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();

    write_summary(workbook.add_worksheet(), stats)?;
    write_analysis(
        workbook.add_worksheet(),
        "Category_Analysis",
        "Category",
        "Severity Breakdown",
        &stats.category_analysis,
    )?;
    write_analysis(
        workbook.add_worksheet(),
        "Severity_Analysis",
        "Severity",
        "Status Breakdown",
        &stats.severity_analysis,
    )?;
    write_raw_data(workbook.add_worksheet(), table)?;

    let buffer = workbook.save_to_buffer()?;
    // unique temp name so concurrent runs targeting the same path never
    // clobber each other's swap file
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let tmp = path.with_extension(format!("xlsx.{nanos}.tmp"));
    fs::write(&tmp, &buffer)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new().set_bold()
}

fn write_summary(ws: &mut Worksheet, stats: &TicketStats) -> Result<(), XlsxError> {
    ws.set_name("Summary")?;
    let header = header_format();
    ws.write_string_with_format(0, 0, "Metric", &header)?;
    ws.write_string_with_format(0, 1, "Value", &header)?;

    ws.write_string(1, 0, "Total Tickets")?;
    ws.write_number(1, 1, stats.total as f64)?;
    ws.write_string(2, 0, "Resolved Tickets")?;
    ws.write_number(2, 1, stats.resolved as f64)?;
    ws.write_string(3, 0, "Backlog Tickets")?;
    ws.write_number(3, 1, stats.backlog as f64)?;
    ws.write_string(4, 0, "Avg Resolution Time (hrs)")?;
    write_rounded(ws, 4, 1, stats.avg_resolution)?;
    ws.write_string(5, 0, "Median Resolution Time (hrs)")?;
    write_rounded(ws, 5, 1, stats.median_resolution)?;
    Ok(())
}

fn write_analysis(
    ws: &mut Worksheet,
    sheet: &str,
    label_header: &str,
    breakdown_header: &str,
    groups: &[GroupAnalysis],
) -> Result<(), XlsxError> {
    ws.set_name(sheet)?;
    let header = header_format();
    ws.write_string_with_format(0, 0, label_header, &header)?;
    ws.write_string_with_format(0, 1, "Count", &header)?;
    ws.write_string_with_format(0, 2, "Mean Resolution (hrs)", &header)?;
    ws.write_string_with_format(0, 3, "Median Resolution (hrs)", &header)?;
    ws.write_string_with_format(0, 4, breakdown_header, &header)?;

    for (i, group) in groups.iter().enumerate() {
        let row = i as u32 + 1;
        ws.write_string(row, 0, &group.label)?;
        ws.write_number(row, 1, group.count as f64)?;
        write_rounded(ws, row, 2, group.mean)?;
        write_rounded(ws, row, 3, group.median)?;
        ws.write_string(row, 4, format_breakdown(&group.breakdown))?;
    }
    Ok(())
}

/// Full table dump: header row plus every row and column, no index column.
/// Numeric columns become numbers, everything else strings; nulls stay blank.
fn write_raw_data(ws: &mut Worksheet, table: &TicketTable) -> Result<(), ReportError> {
    ws.set_name("Raw_Data")?;
    let header = header_format();

    for (col_idx, column) in table.dataframe().get_columns().iter().enumerate() {
        let col = col_idx as u16;
        ws.write_string_with_format(0, col, column.name().as_str(), &header)?;

        let numeric = is_numeric(column.dtype());
        for row_idx in 0..column.len() {
            let row = row_idx as u32 + 1;
            let value = column.get(row_idx)?;
            if value.is_null() {
                continue;
            }
            if numeric {
                if let Ok(v) = value.try_extract::<f64>() {
                    ws.write_number(row, col, v)?;
                    continue;
                }
            }
            ws.write_string(row, col, value.to_string().trim_matches('"'))?;
        }
    }
    Ok(())
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Rounded to 2 decimals; NaN (a group with no resolved tickets) leaves the
/// cell blank.
fn write_rounded(ws: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<(), XlsxError> {
    if value.is_nan() {
        return Ok(());
    }
    ws.write_number(row, col, (value * 100.0).round() / 100.0)?;
    Ok(())
}

fn format_breakdown(counts: &[LabelCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{}: {}", c.label, c.count))
        .collect::<Vec<_>>()
        .join(", ")
}
