//! Action scripts: recorded reviewer actions a host replays onto a fresh
//! review.
//!
//! TOML:
//!
//! ```toml
//! [[actions]]
//! action = "set_criterion_value"
//! criterion = "taskLevelBreak"
//! correct = false
//!
//! [[actions]]
//! action = "toggle_turn_tag"
//! turn = 3
//! side = "qa"
//! tag = "sm1:_adult_sexual_activity"
//! ```
//!
//! JSON uses the same shape: `{"actions": [{"action": "reset"}, ...]}`.
//! A script is input only; nothing is ever saved back to it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::review::{transition, ReviewAction, ReviewSession, ReviewState};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionScript {
    #[serde(default)]
    pub actions: Vec<ReviewAction>,
}

impl ActionScript {
    pub fn new(actions: Vec<ReviewAction>) -> Self {
        Self { actions }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load a script; `.json` files are JSON, everything else is TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read action script: {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        };
        let script = parsed
            .with_context(|| format!("Failed to parse action script: {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            actions = script.actions.len(),
            "Loaded action script"
        );
        Ok(script)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Replay onto a fresh state.
    pub fn replay(&self) -> ReviewState {
        self.actions
            .iter()
            .fold(ReviewState::initial(), |state, action| {
                transition(&state, action)
            })
    }

    /// Replay onto whatever `session` currently holds.
    pub fn replay_into(&self, session: &ReviewSession) -> Arc<ReviewState> {
        session.apply_all(&self.actions)
    }
}
