//! Terminal rendering for the dashboard

use std::fmt::Write;

use crate::metrics::{AspectSummary, MetricsSummary};
use crate::reviews::ReviewRow;
use sentiq_common::{Aspect, Sentiment};

const BAR_WIDTH: usize = 30;
const CONTENT_WIDTH: usize = 50;

pub fn render_metrics(summary: &MetricsSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Platforms");
    for (platform, count) in &summary.platforms.counted {
        let _ = writeln!(out, "  {:<10} {:>8}", platform.title(), count);
    }
    let _ = writeln!(out, "  {:<10} {:>8}", "All", summary.platforms.total);

    let _ = writeln!(out);
    let _ = writeln!(out, "Overall sentiment ({} total)", summary.overall_total);
    for slice in &summary.overall {
        let _ = writeln!(
            out,
            "  {:<9} {:>8} {:>5}",
            slice.sentiment.label(),
            slice.count,
            slice.label
        );
    }

    let _ = writeln!(out);
    if summary.aspects.is_empty() {
        let _ = writeln!(out, "No aspect metrics for this range");
        return out;
    }
    let _ = writeln!(out, "Aspects (axis 0..{})", summary.axis_max);
    for aspect in &summary.aspects {
        out.push_str(&render_aspect(aspect, summary.axis_max));
    }
    out
}

fn render_aspect(aspect: &AspectSummary, axis_max: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {} ({} mentions)", aspect.title, aspect.mentions);
    for sentiment in Sentiment::ALL {
        let count = aspect.counts.get(sentiment);
        let _ = writeln!(
            out,
            "    {:<3} {:<width$} {}",
            sentiment.badge(),
            bar(count, axis_max),
            count,
            width = BAR_WIDTH
        );
    }
    out
}

/// Horizontal bar scaled against `axis_max`
fn bar(count: u64, axis_max: u64) -> String {
    if axis_max == 0 {
        return String::new();
    }
    let filled = ((count.min(axis_max) as f64 / axis_max as f64) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

pub fn render_reviews(rows: &[ReviewRow]) -> String {
    if rows.is_empty() {
        return "No reviews match these filters\n".to_string();
    }

    let mut out = String::new();
    let _ = write!(
        out,
        "{:<10} {:<9} {:<width$}",
        "Date",
        "Platform",
        "Review",
        width = CONTENT_WIDTH
    );
    for aspect in Aspect::KNOWN {
        let _ = write!(out, " {:<13}", aspect.title());
    }
    out.push('\n');

    for row in rows {
        let platform = row
            .platform
            .as_ref()
            .map(|p| p.title())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "{:<10} {:<9} {:<width$}",
            row.date,
            platform,
            truncate(&row.content, CONTENT_WIDTH),
            width = CONTENT_WIDTH
        );
        for badge in &row.badges {
            let _ = write!(out, " {:<13}", badge);
        }
        out.push('\n');
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
