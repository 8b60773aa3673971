//! Plain-text export, handed to the clipboard as-is.

use super::model::{FeedbackReport, ReportModel};

const HEADER: &str = "FEEDBACK SUMMARY:";
const TURN_HEADER: &str = "Turn Assessment:";

/// Render a report as clipboard text.
pub fn to_plain_text(report: &ReportModel) -> String {
    match report {
        ReportModel::NoErrors { message } => message.clone(),
        ReportModel::Feedback(feedback) => feedback_text(feedback),
    }
}

fn feedback_text(report: &FeedbackReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{HEADER}\n\n"));

    for section in &report.categories {
        out.push_str(&format!("{}:\n", section.title));
        for finding in &section.criteria {
            let verdict = finding.assessment.label().unwrap_or("");
            out.push_str(&format!("- {}: {verdict}\n", finding.name));
            if let Some(notes) = &finding.notes {
                out.push_str(&format!("  {notes}\n"));
            }
        }
        out.push('\n');
    }

    if !report.turns.is_empty() {
        out.push_str(&format!("{TURN_HEADER}\n"));
        for turn in &report.turns {
            out.push_str(&format!("- Turn {}:\n", turn.turn));
            if let Some(notes) = &turn.notes {
                out.push_str(&format!("  Notes: {notes}\n"));
            }
            if let Some(tags) = &turn.applied_tags {
                out.push_str(&format!("  Applied Tags: {tags}\n"));
            }
        }
    }

    out
}
