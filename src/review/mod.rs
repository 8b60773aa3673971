//! Review state, its transitions, and the session that owns it.
//!
//! ## Flow
//!
//! ```text
//! presentation ─▸ ReviewAction ─▸ transition(state, action) ─▸ ReviewState'
//!                                                               │
//!                      ReviewSession swaps the Arc snapshot ◂───┘
//!                                                               │
//!                      summary::render(&snapshot) ◂─────────────┘
//! ```
//!
//! State is never edited in place. Each action yields a new snapshot that
//! shares every untouched criterion and turn record with its predecessor.

pub mod action;
pub mod session;
pub mod state;

pub use action::{transition, ReviewAction};
pub use session::{reset, ReviewSession};
pub use state::{
    Assessment, CriterionScore, ReviewState, TagSide, TurnAnnotation, TurnNumber, UiState,
    TURN_COUNT,
};
