use serde::{Deserialize, Serialize};

use super::tags::format_tags_for_summary;
use crate::review::{Assessment, ReviewState, TurnNumber};
use crate::rubric::{categories, Criterion, RubricCategory};

/// The whole report when the reviewer recorded nothing.
pub const NO_ERRORS_MESSAGE: &str =
    "Your task has been reviewed, and no errors were found. You have received a score of 100.";

// ── Report model ─────────────────────────────────────────────────────

/// Rendered report, ready for rich display or plain-text export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportModel {
    /// Nothing recorded: the report is the fixed sentence and nothing else.
    NoErrors { message: String },
    Feedback(FeedbackReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackReport {
    /// Rubric sections with at least one touched criterion, in rubric order.
    pub categories: Vec<CategorySection>,
    /// Annotated turns, ascending.
    pub turns: Vec<TurnFinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySection {
    pub category: RubricCategory,
    pub title: String,
    pub criteria: Vec<CriterionFinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionFinding {
    pub criterion: Criterion,
    pub name: String,
    pub assessment: Assessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFinding {
    pub turn: TurnNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// `None` when the turn has notes but no tags on either side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_tags: Option<String>,
}

/// Header counts for a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportStats {
    pub criteria_reported: usize,
    pub criteria_incorrect: usize,
    pub turns_reported: usize,
}

impl ReportModel {
    /// Whether this is the no-errors report.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::NoErrors { .. })
    }

    pub fn stats(&self) -> ReportStats {
        match self {
            Self::NoErrors { .. } => ReportStats::default(),
            Self::Feedback(report) => {
                let findings = report.categories.iter().flat_map(|c| c.criteria.iter());
                let (reported, incorrect) = findings.fold((0, 0), |(n, bad), f| {
                    (n + 1, bad + usize::from(f.assessment == Assessment::Incorrect))
                });
                ReportStats {
                    criteria_reported: reported,
                    criteria_incorrect: incorrect,
                    turns_reported: report.turns.len(),
                }
            }
        }
    }

    /// Plain-text export; see [`super::to_plain_text`].
    pub fn to_plain_text(&self) -> String {
        super::text::to_plain_text(self)
    }
}

// ── Rendering ────────────────────────────────────────────────────────

/// Build the report for a snapshot.
pub fn render(state: &ReviewState) -> ReportModel {
    if !state.has_any_data() {
        return ReportModel::NoErrors {
            message: NO_ERRORS_MESSAGE.to_string(),
        };
    }

    let sections = categories()
        .iter()
        .filter_map(|&category| render_category(state, category))
        .collect();

    let turns = state
        .annotated_turns()
        .map(|turn| {
            let applied = format_tags_for_summary(turn.agent_tags(), turn.qa_tags());
            TurnFinding {
                turn: turn.number(),
                notes: non_empty(turn.notes()),
                applied_tags: non_empty(&applied),
            }
        })
        .collect();

    ReportModel::Feedback(FeedbackReport {
        categories: sections,
        turns,
    })
}

fn render_category(state: &ReviewState, category: RubricCategory) -> Option<CategorySection> {
    let criteria: Vec<CriterionFinding> = category
        .criteria()
        .iter()
        .filter_map(|&criterion| {
            let score = state.score(criterion);
            score.has_data().then(|| CriterionFinding {
                criterion,
                name: criterion.display_name().to_string(),
                assessment: score.value,
                notes: non_empty(&score.notes),
            })
        })
        .collect();

    if criteria.is_empty() {
        return None;
    }

    Some(CategorySection {
        category,
        title: category.label().to_string(),
        criteria,
    })
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::TagSide;
    use crate::taxonomy::SafetyTag;

    fn turn(n: i64) -> TurnNumber {
        TurnNumber::new(n).unwrap()
    }

    #[test]
    fn empty_state_is_clean() {
        let report = render(&ReviewState::initial());
        assert!(report.is_clean());
        assert_eq!(report.stats(), ReportStats::default());
    }

    #[test]
    fn untouched_categories_are_omitted() {
        let state = ReviewState::initial()
            .with_criterion_value(Criterion::Classifier, true)
            .with_criterion_notes(Criterion::StrongestSetAsPrimary, "kept weaker reply");
        let ReportModel::Feedback(report) = render(&state) else {
            panic!("expected feedback report");
        };
        assert_eq!(report.categories.len(), 1);
        let section = &report.categories[0];
        assert_eq!(section.category, RubricCategory::MetadataOperating);
        assert_eq!(section.title, "Metadata & Operating Structure");
        assert_eq!(section.criteria.len(), 2);
        assert_eq!(section.criteria[0].criterion, Criterion::Classifier);
        assert_eq!(section.criteria[0].notes, None);
        assert_eq!(section.criteria[1].assessment, Assessment::Unset);
        assert_eq!(section.criteria[1].notes.as_deref(), Some("kept weaker reply"));
        assert!(report.turns.is_empty());
    }

    #[test]
    fn categories_keep_rubric_order() {
        let state = ReviewState::initial()
            .with_criterion_value(Criterion::StrongestSetAsPrimary, false)
            .with_criterion_value(Criterion::TotalBreakCount, true)
            .with_criterion_value(Criterion::TaskLevelBreak, true);
        let ReportModel::Feedback(report) = render(&state) else {
            panic!("expected feedback report");
        };
        let order: Vec<RubricCategory> = report.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![RubricCategory::BreakAssessment, RubricCategory::MetadataOperating]
        );
        let names: Vec<&str> = report.categories[0]
            .criteria
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Task Level Break", "Total Break Count"]);
    }

    #[test]
    fn turns_are_ascending_with_optional_parts() {
        let state = ReviewState::initial()
            .with_tag_toggled(turn(12), TagSide::Agent, SafetyTag::Sx4SpecificSexualContent)
            .with_turn_notes(turn(3), "over-refused");
        let ReportModel::Feedback(report) = render(&state) else {
            panic!("expected feedback report");
        };
        assert!(report.categories.is_empty());
        assert_eq!(
            report.turns,
            vec![
                TurnFinding {
                    turn: turn(3),
                    notes: Some("over-refused".into()),
                    applied_tags: None,
                },
                TurnFinding {
                    turn: turn(12),
                    notes: None,
                    applied_tags: Some("SX4 should be No Tag".into()),
                },
            ]
        );
    }

    #[test]
    fn ui_state_never_changes_report() {
        let base = ReviewState::initial().with_criterion_value(Criterion::ModelVersion, true);
        let fiddled = base
            .with_selected_turn(Some(turn(1)))
            .with_category_toggled(RubricCategory::BreakAssessment)
            .with_summary_visible(true);
        assert_eq!(render(&base), render(&fiddled));
    }

    #[test]
    fn stats_count_reported_items() {
        let state = ReviewState::initial()
            .with_criterion_value(Criterion::TaskLevelBreak, false)
            .with_criterion_value(Criterion::Classifier, true)
            .with_criterion_notes(Criterion::ModelVersion, "check")
            .with_turn_notes(turn(1), "a")
            .with_turn_notes(turn(2), "b");
        assert_eq!(
            render(&state).stats(),
            ReportStats {
                criteria_reported: 3,
                criteria_incorrect: 1,
                turns_reported: 2,
            }
        );
    }

    #[test]
    fn json_export_is_tagged() {
        let clean = serde_json::to_value(render(&ReviewState::initial())).unwrap();
        assert_eq!(clean["kind"], "no_errors");
        assert_eq!(clean["message"], NO_ERRORS_MESSAGE);

        let state = ReviewState::initial().with_criterion_value(Criterion::TofbNumber, false);
        let feedback = serde_json::to_value(render(&state)).unwrap();
        assert_eq!(feedback["kind"], "feedback");
        assert_eq!(feedback["categories"][0]["criteria"][0]["criterion"], "tofbNumber");
        assert_eq!(feedback["categories"][0]["criteria"][0]["assessment"], "incorrect");
        assert!(feedback["categories"][0]["criteria"][0].get("notes").is_none());
    }
}
