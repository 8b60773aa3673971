use parking_lot::RwLock;
use std::sync::Arc;

use super::action::{transition, ReviewAction};
use super::state::ReviewState;
use crate::summary::{render, ReportModel};

/// Fresh review state with every UI flag cleared.
///
/// Unconditional: confirming with the reviewer is the caller's job.
pub fn reset() -> ReviewState {
    ReviewState::initial()
}

/// Holder of the current review snapshot.
///
/// Writers compute the next snapshot from the current one and swap the
/// pointer under the write lock; readers clone the `Arc` and keep a stable
/// view for as long as they hold it.
pub struct ReviewSession {
    current: RwLock<Arc<ReviewState>>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(ReviewState::initial())),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<ReviewState> {
        Arc::clone(&self.current.read())
    }

    /// Apply one action and return the resulting snapshot.
    pub fn apply(&self, action: &ReviewAction) -> Arc<ReviewState> {
        let mut current = self.current.write();
        let next = Arc::new(transition(&current, action));
        *current = Arc::clone(&next);
        tracing::debug!(
            action = action.name(),
            has_data = next.has_any_data(),
            "Applied review action"
        );
        next
    }

    /// Apply actions in order; returns the final snapshot.
    pub fn apply_all<'a>(
        &self,
        actions: impl IntoIterator<Item = &'a ReviewAction>,
    ) -> Arc<ReviewState> {
        let mut applied = 0usize;
        for action in actions {
            self.apply(action);
            applied += 1;
        }
        tracing::debug!(applied, "Applied action batch");
        self.snapshot()
    }

    /// Replace the review with a fresh one; see [`ReviewAction::Reset`].
    pub fn reset(&self) -> Arc<ReviewState> {
        let mut current = self.current.write();
        let fresh = Arc::new(transition(&current, &ReviewAction::Reset));
        *current = Arc::clone(&fresh);
        tracing::info!("Review state reset");
        fresh
    }

    /// Render the current snapshot.
    pub fn report(&self) -> ReportModel {
        render(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::state::{TagSide, TurnNumber};
    use crate::rubric::Criterion;
    use crate::summary::NO_ERRORS_MESSAGE;
    use crate::taxonomy::SafetyTag;

    #[test]
    fn snapshots_are_stable_across_writes() {
        let session = ReviewSession::new();
        let before = session.snapshot();
        session.apply(&ReviewAction::SetCriterionValue {
            criterion: Criterion::Classifier,
            correct: true,
        });
        let after = session.snapshot();
        assert!(!before.has_any_data());
        assert!(after.has_any_data());
    }

    #[test]
    fn apply_returns_current_snapshot() {
        let session = ReviewSession::new();
        let returned = session.apply(&ReviewAction::SetTurnNotes {
            turn: TurnNumber::new(1).unwrap(),
            notes: "n".into(),
        });
        assert!(Arc::ptr_eq(&returned, &session.snapshot()));
    }

    #[test]
    fn reset_discards_everything() {
        let session = ReviewSession::new();
        session.apply_all(&[
            ReviewAction::ToggleTurnTag {
                turn: TurnNumber::new(30).unwrap(),
                side: TagSide::Agent,
                tag: SafetyTag::ViolenceOther,
            },
            ReviewAction::SelectTurn {
                turn: Some(TurnNumber::new(30).unwrap()),
            },
        ]);
        assert!(session.snapshot().has_any_data());

        let fresh = session.reset();
        assert_eq!(*fresh, ReviewState::initial());
        assert_eq!(session.report().to_plain_text(), NO_ERRORS_MESSAGE);
    }

    #[test]
    fn session_reset_keeps_summary_visibility() {
        let session = ReviewSession::new();
        session.apply_all(&[
            ReviewAction::SetSummaryVisible { visible: true },
            ReviewAction::SetTurnNotes {
                turn: TurnNumber::new(4).unwrap(),
                notes: "n".into(),
            },
        ]);
        let fresh = session.reset();
        assert!(fresh.ui().summary_visible);
        assert_eq!(session.report().to_plain_text(), NO_ERRORS_MESSAGE);
    }

    #[test]
    fn lifecycle_reset_is_initial_state() {
        assert_eq!(reset(), ReviewState::initial());
        assert!(!reset().has_any_data());
    }

    #[test]
    fn session_is_shareable_across_threads() {
        let session = Arc::new(ReviewSession::new());
        let writer = {
            let session = Arc::clone(&session);
            std::thread::spawn(move || {
                for n in 1..=30 {
                    session.apply(&ReviewAction::SetTurnNotes {
                        turn: TurnNumber::new(n).unwrap(),
                        notes: format!("turn {n}"),
                    });
                }
            })
        };
        writer.join().unwrap();
        assert_eq!(session.snapshot().annotated_turns().count(), 30);
    }
}
