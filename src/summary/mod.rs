//! Report generation.
//!
//! [`render`] turns a [`ReviewState`](crate::review::ReviewState) snapshot
//! into a [`ReportModel`]; [`to_plain_text`] turns that model into the
//! clipboard text. Both are pure. Transient UI flags never reach either.
//!
//! A snapshot with nothing recorded renders as [`NO_ERRORS_MESSAGE`] alone.

pub mod model;
pub mod tags;
pub mod text;

pub use model::{
    render, CategorySection, CriterionFinding, FeedbackReport, ReportModel, ReportStats,
    TurnFinding, NO_ERRORS_MESSAGE,
};
pub use tags::{format_tag_list, format_tags_for_summary, sort_short_forms};
pub use text::to_plain_text;
