//! Statistics and weekly goal commands.

use crate::state::AppState;
use chrono::Local;
use std::collections::BTreeMap;
use study_core::stats::{HistoryStats, WeeklyProgress};
use study_core::weekly::{self, ExtraHours, StudyDayOutcome, WeeklyAccumulated, WeeklyGoals};

use super::CommandError;

#[derive(Debug, serde::Deserialize)]
pub struct StudyDayRequest {
    pub goals: WeeklyGoals,
    #[serde(default)]
    pub accumulated: WeeklyAccumulated,
    pub daily_hours: f64,
}

/// Get per-subject and per-weekday counts over the history.
pub fn get_history_stats(state: &AppState) -> Result<HistoryStats, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker.history_stats_at(&Local::now()))
}

/// Get this week's progress against the weekly goal.
pub fn get_weekly_progress(state: &AppState) -> Result<WeeklyProgress, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker.weekly_progress_at(&Local::now()))
}

/// Distribute a day's hours over the weekly goals and summarize the week.
pub fn plan_study_day(request: StudyDayRequest) -> StudyDayOutcome {
    weekly::process_study_day(&request.goals, &request.accumulated, request.daily_hours)
}

pub fn get_remaining_hours(goals: WeeklyGoals, accumulated: WeeklyAccumulated) -> BTreeMap<String, f64> {
    weekly::remaining_hours(&goals, &accumulated)
}

pub fn get_extra_hours(goals: WeeklyGoals, accumulated: WeeklyAccumulated) -> ExtraHours {
    weekly::extra_hours(&goals, &accumulated)
}
