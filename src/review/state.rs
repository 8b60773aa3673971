//! Immutable review-state snapshot.
//!
//! A [`ReviewState`] always holds exactly [`CRITERION_COUNT`] criterion
//! scores and [`TURN_COUNT`] turn annotations. Sub-records sit behind `Arc`,
//! so every `with_*` transition clones the (cheap) outer shell and swaps in
//! one freshly built record, leaving the previous snapshot untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::ReviewError;
use crate::rubric::{Criterion, RubricCategory, CRITERION_COUNT};
use crate::taxonomy::SafetyTag;

/// Number of turns in a reviewed conversation.
pub const TURN_COUNT: u8 = 30;

// ── Turn numbers ────────────────────────────────────────────────────

/// A turn number in `1..=TURN_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct TurnNumber(u8);

impl TurnNumber {
    pub fn new(number: i64) -> Result<Self, ReviewError> {
        match u8::try_from(number) {
            Ok(n) if (1..=TURN_COUNT).contains(&n) => Ok(Self(n)),
            _ => Err(ReviewError::TurnOutOfRange(number)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every turn number in ascending order.
    pub fn all() -> impl Iterator<Item = TurnNumber> {
        (1..=TURN_COUNT).map(TurnNumber)
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl std::fmt::Display for TurnNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for TurnNumber {
    type Error = ReviewError;

    fn try_from(number: i64) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<TurnNumber> for u8 {
    fn from(turn: TurnNumber) -> Self {
        turn.0
    }
}

// ── Criterion scores ────────────────────────────────────────────────

/// Tri-state judgment on a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    #[default]
    Unset,
    Correct,
    Incorrect,
}

impl Assessment {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Report token; `None` while unset.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Correct => Some("Correct"),
            Self::Incorrect => Some("Incorrect"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CriterionScore {
    pub value: Assessment,
    pub notes: String,
}

impl CriterionScore {
    /// Whether the reviewer has touched this criterion.
    pub fn has_data(&self) -> bool {
        self.value.is_set() || !self.notes.is_empty()
    }
}

// ── Turn annotations ────────────────────────────────────────────────

/// Which of a turn's two tag sets an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSide {
    /// Tags the system under review applied.
    Agent,
    /// Tags the reviewer says should have been applied.
    Qa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAnnotation {
    number: TurnNumber,
    notes: String,
    agent_tags: BTreeSet<SafetyTag>,
    qa_tags: BTreeSet<SafetyTag>,
}

impl TurnAnnotation {
    fn blank(number: TurnNumber) -> Self {
        Self {
            number,
            notes: String::new(),
            agent_tags: BTreeSet::new(),
            qa_tags: BTreeSet::new(),
        }
    }

    pub fn number(&self) -> TurnNumber {
        self.number
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn agent_tags(&self) -> &BTreeSet<SafetyTag> {
        &self.agent_tags
    }

    pub fn qa_tags(&self) -> &BTreeSet<SafetyTag> {
        &self.qa_tags
    }

    /// Notes or at least one tag on either side.
    pub fn is_annotated(&self) -> bool {
        !self.notes.is_empty() || !self.agent_tags.is_empty() || !self.qa_tags.is_empty()
    }
}

// ── Transient UI state ──────────────────────────────────────────────

/// Presentation-only flags. Never read by the report formatter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiState {
    pub expanded: BTreeSet<RubricCategory>,
    pub selected_turn: Option<TurnNumber>,
    pub summary_visible: bool,
}

// ── Review state ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewState {
    scores: Vec<Arc<CriterionScore>>,
    turns: Vec<Arc<TurnAnnotation>>,
    ui: UiState,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::initial()
    }
}

impl ReviewState {
    /// Fresh state: every criterion unset, every turn blank, nothing selected.
    pub fn initial() -> Self {
        Self {
            scores: (0..CRITERION_COUNT)
                .map(|_| Arc::new(CriterionScore::default()))
                .collect(),
            turns: TurnNumber::all()
                .map(|n| Arc::new(TurnAnnotation::blank(n)))
                .collect(),
            ui: UiState::default(),
        }
    }

    pub fn score(&self, criterion: Criterion) -> &CriterionScore {
        &self.scores[criterion.index()]
    }

    /// Scores in report order.
    pub fn scores(&self) -> impl Iterator<Item = (Criterion, &CriterionScore)> + '_ {
        Criterion::ALL
            .into_iter()
            .zip(self.scores.iter().map(|score| &**score))
    }

    pub fn turn(&self, number: TurnNumber) -> &TurnAnnotation {
        &self.turns[number.index()]
    }

    /// All turns in ascending order.
    pub fn turns(&self) -> impl Iterator<Item = &TurnAnnotation> + '_ {
        self.turns.iter().map(|turn| &**turn)
    }

    /// Turns carrying notes or tags, ascending.
    pub fn annotated_turns(&self) -> impl Iterator<Item = &TurnAnnotation> + '_ {
        self.turns().filter(|turn| turn.is_annotated())
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Whether anything would appear in a report.
    pub fn has_any_data(&self) -> bool {
        self.scores.iter().any(|score| score.has_data())
            || self.turns.iter().any(|turn| turn.is_annotated())
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Set a verdict. Re-setting the current verdict is a no-op, not a toggle.
    pub fn with_criterion_value(&self, criterion: Criterion, correct: bool) -> Self {
        let current = self.score(criterion);
        self.with_score(
            criterion,
            CriterionScore {
                value: Assessment::from_correct(correct),
                notes: current.notes.clone(),
            },
        )
    }

    pub fn with_criterion_notes(&self, criterion: Criterion, notes: impl Into<String>) -> Self {
        let current = self.score(criterion);
        self.with_score(
            criterion,
            CriterionScore {
                value: current.value,
                notes: notes.into(),
            },
        )
    }

    /// Flip membership of `tag` in one of the turn's tag sets.
    pub fn with_tag_toggled(&self, turn: TurnNumber, side: TagSide, tag: SafetyTag) -> Self {
        let mut annotation = self.turn(turn).clone();
        let set = match side {
            TagSide::Agent => &mut annotation.agent_tags,
            TagSide::Qa => &mut annotation.qa_tags,
        };
        if !set.remove(&tag) {
            set.insert(tag);
        }
        self.with_turn(annotation)
    }

    pub fn with_turn_notes(&self, turn: TurnNumber, notes: impl Into<String>) -> Self {
        let mut annotation = self.turn(turn).clone();
        annotation.notes = notes.into();
        self.with_turn(annotation)
    }

    /// Select a turn; selecting the already-selected turn clears selection.
    pub fn with_selected_turn(&self, turn: Option<TurnNumber>) -> Self {
        let selected = match turn {
            Some(t) if self.ui.selected_turn == Some(t) => None,
            other => other,
        };
        self.with_ui(UiState {
            selected_turn: selected,
            ..self.ui.clone()
        })
    }

    pub fn with_category_toggled(&self, category: RubricCategory) -> Self {
        let mut expanded = self.ui.expanded.clone();
        if !expanded.remove(&category) {
            expanded.insert(category);
        }
        self.with_ui(UiState {
            expanded,
            ..self.ui.clone()
        })
    }

    pub fn with_summary_visible(&self, visible: bool) -> Self {
        self.with_ui(UiState {
            summary_visible: visible,
            ..self.ui.clone()
        })
    }

    fn with_score(&self, criterion: Criterion, score: CriterionScore) -> Self {
        let mut next = self.clone();
        next.scores[criterion.index()] = Arc::new(score);
        next
    }

    fn with_turn(&self, annotation: TurnAnnotation) -> Self {
        let mut next = self.clone();
        let index = annotation.number.index();
        next.turns[index] = Arc::new(annotation);
        next
    }

    fn with_ui(&self, ui: UiState) -> Self {
        Self {
            scores: self.scores.clone(),
            turns: self.turns.clone(),
            ui,
        }
    }
}
