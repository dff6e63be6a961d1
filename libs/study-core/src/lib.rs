//! Core study-cycle library used by the tracker application.
//!
//! Provides:
//! - The study-cycle state machine (block rotation, cycles, streaks)
//! - Spaced review scheduling over the study history
//! - Weekly goal distribution and summaries
//! - Subject priority scoring
//! - History statistics
//! - Shared types (StudyData, StudyBlock, HistoryEntry, Subject, etc.)

pub mod cycle;
pub mod error;
pub mod priority;
pub mod review;
pub mod stats;
pub mod types;
pub mod weekly;

pub use cycle::{next_block_id, CycleProgress, DailyGoalProgress, StudyEvent};
pub use error::{CycleError, Result};
pub use priority::{calculate_priority, classify_priority, PriorityBand, PriorityStats};
pub use review::{get_pending_reviews, group_reviews_by_subject, PendingReview};
pub use stats::{history_stats, weekly_progress, HistoryStats, WeeklyProgress};
pub use types::{
    HistoryEntry, ReviewInterval, ReviewSettings, StudyBlock, StudyData, Subject, SubjectInput,
    SubjectType, SubjectUpdate,
};
pub use weekly::{DailyDistribution, WeeklyAccumulated, WeeklyGoals, WeeklySummary};

/// Round to two decimal places, halves away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
