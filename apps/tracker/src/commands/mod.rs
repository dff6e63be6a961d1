//! Operations exposed to the UI layer.
//!
//! Each command locks the shared tracker, runs one operation to completion
//! and returns owned, serializable results.

pub mod cycle;
pub mod reviews;
pub mod stats;
pub mod subjects;

pub use cycle::{
    clear_history, complete_block, create_block, get_current_block, get_cycle_overview,
    get_study_data, get_upcoming_blocks, replace_blocks, set_weekly_goal_hours, skip_block,
    update_block_content,
};
pub use reviews::{get_pending_review_count, get_pending_reviews, get_review_settings, update_review_interval};
pub use stats::{get_extra_hours, get_history_stats, get_remaining_hours, get_weekly_progress, plan_study_day};
pub use subjects::{
    add_subject, clear_subjects, edit_subject, get_priority_band, get_subject_stats, get_subjects,
    remove_subject,
};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<crate::error::TrackerError> for CommandError {
    fn from(e: crate::error::TrackerError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<study_core::CycleError> for CommandError {
    fn from(e: study_core::CycleError) -> Self {
        Self { message: e.to_string() }
    }
}
