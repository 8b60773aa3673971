use thiserror::Error;

use crate::review::TURN_COUNT;

/// Errors raised when a caller hands the core a key outside the closed sets.
///
/// Every variant is a boundary rejection: the taxonomy, rubric and turn range
/// are fixed at compile time, so these only surface when ids arrive as
/// strings (presentation layer, action scripts, CLI arguments). A rejected
/// call never changes review state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("unknown criterion key '{0}'")]
    UnknownCriterion(String),

    #[error("unknown tag id '{0}'")]
    UnknownTag(String),

    #[error("turn {0} is out of range (expected 1..={max})", max = TURN_COUNT)]
    TurnOutOfRange(i64),

    #[error("unknown rubric category '{0}'")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_rejected_input() {
        assert_eq!(
            ReviewError::UnknownCriterion("nope".into()).to_string(),
            "unknown criterion key 'nope'"
        );
        assert_eq!(
            ReviewError::UnknownTag("sx9".into()).to_string(),
            "unknown tag id 'sx9'"
        );
        assert_eq!(
            ReviewError::TurnOutOfRange(31).to_string(),
            "turn 31 is out of range (expected 1..=30)"
        );
    }
}
