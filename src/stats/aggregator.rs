//! Ticket Aggregation Module
//! Computes scalar and grouped statistics over the loaded ticket table.

use polars::prelude::PolarsError;
use std::collections::HashMap;
use thiserror::Error;

use crate::data::TicketTable;

/// Statuses counted as resolved.
pub const RESOLVED_STATUSES: [&str; 2] = ["Resolved", "Closed"];
/// Statuses counted as open backlog.
pub const BACKLOG_STATUSES: [&str; 3] = ["New", "In Progress", "Escalated"];
/// Fixed ordering for per-severity resolution reporting.
pub const SEVERITY_ORDER: [&str; 4] = ["P1", "P2", "P3", "P4"];

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("no ticket rows in table; rates are undefined")]
    EmptyTable,
    #[error("missing or invalid column: {0}")]
    Column(#[from] PolarsError),
}

/// Number of rows sharing one label value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Resolution-time statistics for one severity.
#[derive(Debug, Clone)]
pub struct SeverityResolution {
    pub severity: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
}

/// Per-group resolution statistics plus a frequency breakdown of a second
/// label (severity per category, status per severity).
#[derive(Debug, Clone)]
pub struct GroupAnalysis {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub breakdown: Vec<LabelCount>,
}

/// Fixed-shape aggregation result consumed by all reporters.
///
/// Values are not rounded here; presentation layers round, so repeated
/// aggregation stays lossless.
#[derive(Debug)]
pub struct TicketStats {
    pub total: usize,
    pub resolved: usize,
    pub backlog: usize,
    /// `resolved / total`, as a fraction.
    pub resolution_rate: f64,
    /// `backlog / total`, as a fraction.
    pub backlog_rate: f64,
    /// Mean of all non-missing resolution hours; NaN when none exist.
    pub avg_resolution: f64,
    pub median_resolution: f64,
    /// Descending by count, ties by label.
    pub category_counts: Vec<LabelCount>,
    pub severity_counts: Vec<LabelCount>,
    pub status_counts: Vec<LabelCount>,
    /// Restricted to [P1, P2, P3, P4]; absent severities are skipped.
    /// `count` is the number of tickets with a resolution time, matching the
    /// grouped-count convention of the numeric library.
    pub severity_resolution: Vec<SeverityResolution>,
    /// Per-category resolution stats with a severity breakdown, in lexical
    /// category order.
    pub category_analysis: Vec<GroupAnalysis>,
    /// Per-severity resolution stats with a status breakdown.
    pub severity_analysis: Vec<GroupAnalysis>,
    /// All non-missing resolution hours, for the distribution histogram.
    pub resolution_values: Vec<f64>,
}

impl TicketStats {
    /// Aggregate the table. An empty table is a documented fatal condition:
    /// every rate would divide by zero, so it fails instead of emitting a
    /// misleading report.
    pub fn from_table(table: &TicketTable) -> Result<Self, StatsError> {
        let total = table.height();
        if total == 0 {
            return Err(StatsError::EmptyTable);
        }

        let statuses = table.str_column("Status")?;
        let categories = table.str_column("Category")?;
        let severities = table.str_column("Severity")?;
        let hours = table.f64_column("Resolution_Time_Hours")?;

        let resolved = statuses
            .iter()
            .filter(|s| RESOLVED_STATUSES.contains(&s.as_str()))
            .count();
        let backlog = statuses
            .iter()
            .filter(|s| BACKLOG_STATUSES.contains(&s.as_str()))
            .count();

        let resolution_values: Vec<f64> = hours.iter().flatten().copied().collect();

        let category_analysis = analyze_groups(&categories, &severities, &hours);
        let severity_analysis = analyze_groups(&severities, &statuses, &hours);

        let severity_resolution = SEVERITY_ORDER
            .iter()
            .filter_map(|&sev| {
                severity_analysis
                    .iter()
                    .find(|g| g.label == sev)
                    .map(|g| SeverityResolution {
                        severity: sev.to_string(),
                        count: g.count,
                        mean: g.mean,
                        median: g.median,
                    })
            })
            .collect();

        Ok(Self {
            total,
            resolved,
            backlog,
            resolution_rate: resolved as f64 / total as f64,
            backlog_rate: backlog as f64 / total as f64,
            avg_resolution: mean(&resolution_values),
            median_resolution: median(&resolution_values),
            category_counts: value_counts(&categories),
            severity_counts: value_counts(&severities),
            status_counts: value_counts(&statuses),
            severity_resolution,
            category_analysis,
            severity_analysis,
            resolution_values,
        })
    }

    /// Share of total as a percentage, for display.
    pub fn percentage(&self, count: usize) -> f64 {
        count as f64 / self.total as f64 * 100.0
    }
}

/// Count occurrences of each label, descending by count with ties broken by
/// label for deterministic output.
fn value_counts(labels: &[String]) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_default() += 1;
    }

    let mut out: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

/// Group rows by `keys`: resolution stats over the non-missing hours of each
/// group, plus a frequency breakdown of `other` within the group. Groups are
/// emitted in lexical order.
fn analyze_groups(
    keys: &[String],
    other: &[String],
    hours: &[Option<f64>],
) -> Vec<GroupAnalysis> {
    let mut by_key: HashMap<&str, (Vec<f64>, Vec<String>)> = HashMap::new();
    for ((key, label), value) in keys.iter().zip(other).zip(hours) {
        let entry = by_key.entry(key.as_str()).or_default();
        if let Some(v) = value {
            entry.0.push(*v);
        }
        entry.1.push(label.clone());
    }

    let mut out: Vec<GroupAnalysis> = by_key
        .into_iter()
        .map(|(label, (values, others))| GroupAnalysis {
            label: label.to_string(),
            count: values.len(),
            mean: mean(&values),
            median: median(&values),
            breakdown: value_counts(&others),
        })
        .collect();
    out.sort_by(|a, b| a.label.cmp(&b.label));
    out
}

/// Mean of a value set; NaN for an empty set, matching the numeric-library
/// convention for all-missing groups.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}
