//! Stats module - grouped aggregation over the ticket table

mod aggregator;

pub use aggregator::{
    GroupAnalysis, LabelCount, SeverityResolution, StatsError, TicketStats, BACKLOG_STATUSES,
    RESOLVED_STATUSES, SEVERITY_ORDER,
};
