//! Console Reporter Module
//! Formats aggregated statistics as the fixed text summary.

use crate::stats::TicketStats;

/// Render the full console summary.
///
/// Percentages are formatted to 1 decimal place and hour values to 2; the
/// section layout is fixed. Kept separate from printing so tests can assert
/// on the exact output.
pub fn render_summary(stats: &TicketStats) -> String {
    let mut out = String::new();

    out.push_str("=== SERVICENOW TICKET ANALYSIS SUMMARY ===\n\n");
    out.push_str(&format!("Total Tickets: {}\n", stats.total));
    out.push_str(&format!("Resolved Tickets: {}\n", stats.resolved));
    out.push_str(&format!(
        "Resolution Rate: {:.1}%\n",
        stats.resolution_rate * 100.0
    ));
    out.push_str(&format!(
        "Average Resolution Time: {:.2} hours\n",
        stats.avg_resolution
    ));
    out.push_str(&format!(
        "Median Resolution Time: {:.2} hours\n\n",
        stats.median_resolution
    ));

    out.push_str(&format!("Current Backlog: {} tickets\n", stats.backlog));
    out.push_str(&format!(
        "Backlog Percentage: {:.1}%\n\n",
        stats.backlog_rate * 100.0
    ));

    out.push_str("=== TOP ERROR CATEGORIES ===\n");
    for cat in stats.category_counts.iter().take(5) {
        out.push_str(&format!(
            "{}: {} tickets ({:.1}%)\n",
            cat.label,
            cat.count,
            stats.percentage(cat.count)
        ));
    }

    out.push_str("\n=== SEVERITY DISTRIBUTION ===\n");
    for sev in &stats.severity_counts {
        out.push_str(&format!(
            "{}: {} tickets ({:.1}%)\n",
            sev.label,
            sev.count,
            stats.percentage(sev.count)
        ));
    }

    out.push_str("\n=== RESOLUTION TIME BY SEVERITY ===\n");
    for sr in &stats.severity_resolution {
        out.push_str(&format!(
            "{}: {} tickets, Avg: {:.2}h, Median: {:.2}h\n",
            sr.severity, sr.count, sr.mean, sr.median
        ));
    }

    out
}

/// Print the summary to stdout.
pub fn print_summary(stats: &TicketStats) {
    print!("{}", render_summary(stats));
}
