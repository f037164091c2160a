//! Dashboard Renderer Module
//! Draws the four-panel analysis dashboard to a PNG with plotters.
//!
//! Layout, 2x2 under a fixed title:
//! 1. Pie of ticket counts by category (percentage labels)
//! 2. Bar chart of mean resolution time by severity
//! 3. Bar chart of ticket counts by status
//! 4. Histogram of resolution times (20 fixed-width bins)

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::Path;
use thiserror::Error;

use crate::stats::TicketStats;

const DASHBOARD_SIZE: (u32, u32) = (1500, 1200);
const HISTOGRAM_BINS: usize = 20;

/// Bar colors for the four severities, P1 first; cycles if more appear.
const SEVERITY_COLORS: [RGBColor; 4] = [
    RGBColor(231, 76, 60),  // red
    RGBColor(243, 156, 18), // orange
    RGBColor(241, 196, 15), // yellow
    RGBColor(46, 204, 113), // green
];

/// Slice colors for the category pie.
const PIE_PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(255, 87, 34),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];

const STATUS_BLUE: RGBColor = RGBColor(135, 206, 235);
const HIST_CORAL: RGBColor = RGBColor(240, 128, 128);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render dashboard: {0}")]
    Backend(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Backend(err.to_string())
    }
}

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Render the 2x2 dashboard PNG at `path`. A write failure (for example a
/// missing output directory) surfaces as `ChartError`.
pub fn render(stats: &TicketStats, path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, DASHBOARD_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let root = root.titled(
        "ServiceNow Ticket Analysis Dashboard",
        FontDesc::new(FontFamily::SansSerif, 36.0, FontStyle::Bold),
    )?;

    let panels = root.split_evenly((2, 2));
    draw_category_pie(&panels[0], stats)?;
    draw_severity_bars(&panels[1], stats)?;
    draw_status_bars(&panels[2], stats)?;
    draw_resolution_histogram(&panels[3], stats)?;

    root.present()?;
    Ok(())
}

fn draw_category_pie(area: &Panel<'_>, stats: &TicketStats) -> Result<(), ChartError> {
    let area = area.titled("Tickets by Category", ("sans-serif", 24).into_font())?;

    let sizes: Vec<f64> = stats
        .category_counts
        .iter()
        .map(|c| c.count as f64)
        .collect();
    let labels: Vec<String> = stats
        .category_counts
        .iter()
        .map(|c| c.label.clone())
        .collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| PIE_PALETTE[i % PIE_PALETTE.len()])
        .collect();

    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = (f64::from(w.min(h)) / 2.0 - 60.0).max(10.0);

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 16).into_font());
    pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
    area.draw(&pie)?;
    Ok(())
}

fn draw_severity_bars(area: &Panel<'_>, stats: &TicketStats) -> Result<(), ChartError> {
    let data = severity_bar_data(stats);

    let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();
    let n = data.len().max(1) as i32;
    let y_max = data
        .iter()
        .map(|&(_, mean)| mean)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Average Resolution Time by Severity", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| segment_label(seg, &labels))
        .y_desc("Hours")
        .draw()?;

    chart.draw_series(data.iter().enumerate().map(|(i, &(_, mean))| {
        let color = SEVERITY_COLORS[i % SEVERITY_COLORS.len()];
        Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), mean),
            ],
            color.filled(),
        )
    }))?;
    Ok(())
}

fn draw_status_bars(area: &Panel<'_>, stats: &TicketStats) -> Result<(), ChartError> {
    let labels: Vec<String> = stats
        .status_counts
        .iter()
        .map(|c| c.label.clone())
        .collect();
    let n = stats.status_counts.len().max(1) as i32;
    let y_max = stats
        .status_counts
        .iter()
        .map(|c| c.count)
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Tickets by Status", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| segment_label(seg, &labels))
        .y_desc("Count")
        .draw()?;

    chart.draw_series(stats.status_counts.iter().enumerate().map(|(i, c)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), c.count as f64),
            ],
            STATUS_BLUE.filled(),
        )
    }))?;
    Ok(())
}

fn draw_resolution_histogram(area: &Panel<'_>, stats: &TicketStats) -> Result<(), ChartError> {
    let bins = histogram_bins(&stats.resolution_values, HISTOGRAM_BINS);

    let x_min = bins.first().map(|b| b.lo).unwrap_or(0.0);
    let x_max = bins.last().map(|b| b.hi).unwrap_or(1.0);
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Resolution Time Distribution", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Hours")
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new(
            [(b.lo, 0.0), (b.hi, b.count as f64)],
            HIST_CORAL.mix(0.7).filled(),
        )
    }))?;
    Ok(())
}

/// One bar per severity present in the table, whatever its name. Severities
/// with no resolved tickets have no mean to plot and are skipped.
fn severity_bar_data(stats: &TicketStats) -> Vec<(String, f64)> {
    stats
        .severity_analysis
        .iter()
        .filter(|g| !g.mean.is_nan())
        .map(|g| (g.label.clone(), g.mean))
        .collect()
}

fn segment_label(seg: &SegmentValue<i32>, labels: &[String]) -> String {
    let idx = match seg {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
        SegmentValue::Last => return String::new(),
    };
    usize::try_from(idx)
        .ok()
        .and_then(|i| labels.get(i).cloned())
        .unwrap_or_default()
}

struct Bin {
    lo: f64,
    hi: f64,
    count: usize,
}

/// Fixed-width bins spanning the observed range. A single distinct value
/// still produces a unit-wide range so the chart renders.
fn histogram_bins(values: &[f64], bin_count: usize) -> Vec<Bin> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let width = span / bin_count as f64;

    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }
    bins
}
