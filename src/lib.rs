//! Structured QC review of multi-turn conversations.
//!
//! A reviewer scores a fixed rubric, tags individual turns with safety
//! classifications, and exports a feedback report. This crate holds the
//! review-state model and the report engine; presentation is left to the
//! host.
//!
//! ```
//! use qc_review::review::{ReviewAction, ReviewSession};
//!
//! let session = ReviewSession::new();
//! session.apply(&ReviewAction::parse_criterion_value("taskLevelBreak", false).unwrap());
//! session.apply(&ReviewAction::parse_criterion_notes("taskLevelBreak", "missed break").unwrap());
//!
//! let text = session.report().to_plain_text();
//! assert!(text.contains("- Task Level Break: Incorrect\n  missed break\n"));
//! ```

pub mod config;
pub mod error;
pub mod review;
pub mod rubric;
pub mod script;
pub mod summary;
pub mod taxonomy;

pub use config::{Config, OutputFormat};
pub use error::ReviewError;
pub use review::{transition, ReviewAction, ReviewSession, ReviewState};
pub use script::ActionScript;
pub use summary::{render, to_plain_text, ReportModel, NO_ERRORS_MESSAGE};
