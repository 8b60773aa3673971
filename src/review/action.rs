//! Review actions and the pure transition function.
//!
//! Every change a presentation layer can make to a review is a
//! [`ReviewAction`]. [`transition`] applies one action to a snapshot and
//! returns the next snapshot; it has no side effects and cannot fail,
//! because action fields are already validated types. Validation of raw
//! ids happens when an action is built (see the `parse_*` constructors) or
//! deserialized.

use serde::{Deserialize, Serialize};

use super::state::{ReviewState, TagSide, TurnNumber};
use crate::error::ReviewError;
use crate::rubric::{Criterion, RubricCategory};
use crate::taxonomy::SafetyTag;

/// A single reviewer action, tagged by `action` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReviewAction {
    SetCriterionValue {
        criterion: Criterion,
        correct: bool,
    },
    SetCriterionNotes {
        criterion: Criterion,
        notes: String,
    },
    ToggleTurnTag {
        turn: TurnNumber,
        side: TagSide,
        tag: SafetyTag,
    },
    SetTurnNotes {
        turn: TurnNumber,
        notes: String,
    },
    /// Omitting `turn` clears the selection.
    SelectTurn {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        turn: Option<TurnNumber>,
    },
    ToggleCategoryExpanded {
        category: RubricCategory,
    },
    SetSummaryVisible {
        visible: bool,
    },
    /// Discard all review data and selection. The summary panel keeps its
    /// visibility. Callers confirm with the reviewer first.
    Reset,
}

impl ReviewAction {
    pub fn parse_criterion_value(key: &str, correct: bool) -> Result<Self, ReviewError> {
        Ok(Self::SetCriterionValue {
            criterion: Criterion::parse(key).map_err(rejected)?,
            correct,
        })
    }

    pub fn parse_criterion_notes(key: &str, notes: impl Into<String>) -> Result<Self, ReviewError> {
        Ok(Self::SetCriterionNotes {
            criterion: Criterion::parse(key).map_err(rejected)?,
            notes: notes.into(),
        })
    }

    pub fn parse_toggle_tag(turn: i64, side: TagSide, tag_id: &str) -> Result<Self, ReviewError> {
        Ok(Self::ToggleTurnTag {
            turn: TurnNumber::new(turn).map_err(rejected)?,
            side,
            tag: SafetyTag::parse(tag_id).map_err(rejected)?,
        })
    }

    pub fn parse_turn_notes(turn: i64, notes: impl Into<String>) -> Result<Self, ReviewError> {
        Ok(Self::SetTurnNotes {
            turn: TurnNumber::new(turn).map_err(rejected)?,
            notes: notes.into(),
        })
    }

    pub fn parse_select_turn(turn: Option<i64>) -> Result<Self, ReviewError> {
        Ok(Self::SelectTurn {
            turn: turn.map(TurnNumber::new).transpose().map_err(rejected)?,
        })
    }

    pub fn parse_toggle_category(category_id: &str) -> Result<Self, ReviewError> {
        Ok(Self::ToggleCategoryExpanded {
            category: RubricCategory::parse(category_id).map_err(rejected)?,
        })
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCriterionValue { .. } => "set_criterion_value",
            Self::SetCriterionNotes { .. } => "set_criterion_notes",
            Self::ToggleTurnTag { .. } => "toggle_turn_tag",
            Self::SetTurnNotes { .. } => "set_turn_notes",
            Self::SelectTurn { .. } => "select_turn",
            Self::ToggleCategoryExpanded { .. } => "toggle_category_expanded",
            Self::SetSummaryVisible { .. } => "set_summary_visible",
            Self::Reset => "reset",
        }
    }

    /// Whether this action can change report content.
    pub fn affects_report(&self) -> bool {
        !matches!(
            self,
            Self::SelectTurn { .. }
                | Self::ToggleCategoryExpanded { .. }
                | Self::SetSummaryVisible { .. }
        )
    }
}

fn rejected(err: ReviewError) -> ReviewError {
    tracing::warn!(error = %err, "Rejected review input");
    err
}

/// Apply one action to a snapshot, producing the next snapshot.
pub fn transition(state: &ReviewState, action: &ReviewAction) -> ReviewState {
    match action {
        ReviewAction::SetCriterionValue { criterion, correct } => {
            state.with_criterion_value(*criterion, *correct)
        }
        ReviewAction::SetCriterionNotes { criterion, notes } => {
            state.with_criterion_notes(*criterion, notes.clone())
        }
        ReviewAction::ToggleTurnTag { turn, side, tag } => {
            state.with_tag_toggled(*turn, *side, *tag)
        }
        ReviewAction::SetTurnNotes { turn, notes } => state.with_turn_notes(*turn, notes.clone()),
        ReviewAction::SelectTurn { turn } => state.with_selected_turn(*turn),
        ReviewAction::ToggleCategoryExpanded { category } => {
            state.with_category_toggled(*category)
        }
        ReviewAction::SetSummaryVisible { visible } => state.with_summary_visible(*visible),
        ReviewAction::Reset => {
            ReviewState::initial().with_summary_visible(state.ui().summary_visible)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::state::Assessment;

    #[test]
    fn parse_constructors_reject_unknown_ids() {
        assert_eq!(
            ReviewAction::parse_criterion_value("nope", true),
            Err(ReviewError::UnknownCriterion("nope".into()))
        );
        assert_eq!(
            ReviewAction::parse_toggle_tag(3, TagSide::Agent, "sx7:_missing"),
            Err(ReviewError::UnknownTag("sx7:_missing".into()))
        );
        assert_eq!(
            ReviewAction::parse_toggle_tag(0, TagSide::Agent, "hate_speech"),
            Err(ReviewError::TurnOutOfRange(0))
        );
        assert_eq!(
            ReviewAction::parse_turn_notes(99, "x"),
            Err(ReviewError::TurnOutOfRange(99))
        );
        assert_eq!(
            ReviewAction::parse_toggle_category("nope"),
            Err(ReviewError::UnknownCategory("nope".into()))
        );
        assert!(ReviewAction::parse_select_turn(None).is_ok());
        assert!(ReviewAction::parse_select_turn(Some(31)).is_err());
    }

    #[test]
    fn transition_dispatches_each_action() {
        let state = ReviewState::initial();
        let state = transition(
            &state,
            &ReviewAction::parse_criterion_value("strategyAlignment", false).unwrap(),
        );
        let state = transition(
            &state,
            &ReviewAction::parse_criterion_notes("strategyAlignment", "wrong strategy").unwrap(),
        );
        let state = transition(
            &state,
            &ReviewAction::parse_toggle_tag(2, TagSide::Qa, "sm1:_adult_sexual_activity").unwrap(),
        );
        let state = transition(&state, &ReviewAction::parse_turn_notes(2, "missed").unwrap());

        let score = state.score(Criterion::StrategyAlignment);
        assert_eq!(score.value, Assessment::Incorrect);
        assert_eq!(score.notes, "wrong strategy");

        let turn = state.turn(TurnNumber::new(2).unwrap());
        assert_eq!(turn.notes(), "missed");
        assert!(turn.qa_tags().contains(&SafetyTag::Sm1AdultSexualActivity));
    }

    #[test]
    fn reset_action_returns_initial_state() {
        let dirty = ReviewState::initial()
            .with_turn_notes(TurnNumber::new(9).unwrap(), "x")
            .with_selected_turn(TurnNumber::new(9).ok())
            .with_category_toggled(RubricCategory::BreakAssessment);
        let clean = transition(&dirty, &ReviewAction::Reset);
        assert_eq!(clean, ReviewState::initial());
    }

    #[test]
    fn reset_keeps_summary_panel_open() {
        let dirty = ReviewState::initial()
            .with_criterion_value(Criterion::Classifier, false)
            .with_selected_turn(TurnNumber::new(2).ok())
            .with_summary_visible(true);
        let clean = transition(&dirty, &ReviewAction::Reset);
        assert!(clean.ui().summary_visible);
        assert!(!clean.has_any_data());
        assert_eq!(clean.ui().selected_turn, None);
        assert_eq!(clean, ReviewState::initial().with_summary_visible(true));
    }

    #[test]
    fn ui_actions_do_not_affect_report() {
        assert!(!ReviewAction::SelectTurn { turn: None }.affects_report());
        assert!(!ReviewAction::SetSummaryVisible { visible: true }.affects_report());
        assert!(ReviewAction::Reset.affects_report());
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: ReviewAction = serde_json::from_str(
            r#"{"action":"toggle_turn_tag","turn":3,"side":"agent","tag":"sx4:_specific_sexual_content"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            ReviewAction::ToggleTurnTag {
                turn: TurnNumber::new(3).unwrap(),
                side: TagSide::Agent,
                tag: SafetyTag::Sx4SpecificSexualContent,
            }
        );

        let clear: ReviewAction = serde_json::from_str(r#"{"action":"select_turn"}"#).unwrap();
        assert_eq!(clear, ReviewAction::SelectTurn { turn: None });

        let reset: ReviewAction = serde_json::from_str(r#"{"action":"reset"}"#).unwrap();
        assert_eq!(reset, ReviewAction::Reset);
    }

    #[test]
    fn unknown_ids_fail_deserialization() {
        let err = serde_json::from_str::<ReviewAction>(
            r#"{"action":"set_criterion_value","criterion":"bogus","correct":true}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown criterion key 'bogus'"));

        assert!(serde_json::from_str::<ReviewAction>(
            r#"{"action":"set_turn_notes","turn":0,"notes":"x"}"#
        )
        .is_err());
    }
}
