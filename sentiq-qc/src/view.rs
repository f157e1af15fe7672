//! Terminal rendering for the QC review screen

use sentiq_common::api::{QcItem, SessionProgress};
use sentiq_common::Sentiment;
use std::fmt::Write;

use crate::audit::ModalState;

const REVIEW_WIDTH: usize = 48;
const BAR_WIDTH: usize = 10;

/// `Total 10 | Reviewed 3 | Remaining 7 (30%)`
pub fn render_stats(progress: &SessionProgress) -> String {
    format!(
        "Total {} | Reviewed {} | Remaining {} ({}%)",
        progress.total,
        progress.reviewed,
        progress.remaining,
        progress.percent_reviewed()
    )
}

/// One line per item: id, review, aspect, prediction, confidence, status
pub fn render_table(items: &[QcItem]) -> String {
    if items.is_empty() {
        return "No QC items in this session\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<width$} {:<14} {:<9} {:<22} {}",
        "ID",
        "Review",
        "Aspect",
        "AI Pred",
        "Confidence",
        "Status",
        width = REVIEW_WIDTH
    );
    for item in items {
        let _ = writeln!(
            out,
            "{:<6} {:<width$} {:<14} {:<9} {:<22} {}",
            format!("#{}", item.qc_item_id),
            truncate(&item.review_content, REVIEW_WIDTH),
            item.aspect.title(),
            item.predicted_sentiment.label(),
            render_confidence(item),
            item.status.label(),
            width = REVIEW_WIDTH
        );
    }
    out
}

/// `[######----]  55% low`
pub fn render_confidence(item: &QcItem) -> String {
    let percent = item.confidence_percent();
    format!(
        "{} {:>3}% {}",
        confidence_bar(percent),
        percent,
        item.confidence_tier().as_str()
    )
}

fn confidence_bar(percent: u8) -> String {
    let filled = (percent as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Audit panel for the open item, with the current selection marked
pub fn render_modal(item: &QcItem, state: ModalState) -> String {
    let selection = match state {
        ModalState::Open { selection, .. } => selection,
        ModalState::Closed => None,
    };

    let mut out = String::new();
    let _ = writeln!(out, "Audit QC item #{}", item.qc_item_id);
    let _ = writeln!(out, "  Review:     {}", item.review_content);
    let _ = writeln!(out, "  Aspect:     {}", item.aspect.title());
    let _ = writeln!(out, "  AI predict: {}", item.predicted_sentiment.label());
    let _ = writeln!(out, "  Confidence: {}", render_confidence(item));
    if let Some(correct) = item.correct_sentiment {
        let _ = writeln!(out, "  Recorded:   {}", correct.label());
    }
    let _ = writeln!(out, "  Human verdict:");
    for sentiment in Sentiment::ALL {
        let mark = if selection == Some(sentiment) { "x" } else { " " };
        let _ = writeln!(out, "    ({}) {}", mark, sentiment.label());
    }
    out
}

/// Cut to `width` characters, ending with an ellipsis when shortened
fn truncate(text: &str, width: usize) -> String {
    let single_line: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
