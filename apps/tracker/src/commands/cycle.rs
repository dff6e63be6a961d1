//! Study cycle commands.

use crate::state::AppState;
use chrono::Local;
use study_core::{next_block_id, CycleProgress, DailyGoalProgress, StudyBlock, StudyData, SubjectType};

use super::CommandError;

/// Blocks shown after the current one when no count is given.
const DEFAULT_UPCOMING: usize = 4;

#[derive(Debug, serde::Deserialize)]
pub struct ReplaceBlocksRequest {
    pub blocks: Vec<StudyBlock>,
    pub daily_goal: u32,
}

#[derive(Debug, serde::Deserialize)]
pub struct NewBlockRequest {
    pub subject: String,
    pub subject_type: SubjectType,
    pub duration_minutes: u32,
}

#[derive(Debug, serde::Serialize)]
pub struct CycleOverview {
    pub current_block: Option<StudyBlock>,
    pub progress: CycleProgress,
    pub daily_goal: DailyGoalProgress,
    pub completed_cycles: u32,
    pub total_minutes_studied: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Get the whole study aggregate.
pub fn get_study_data(state: &AppState) -> Result<StudyData, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker.data().clone())
}

pub fn get_current_block(state: &AppState) -> Result<Option<StudyBlock>, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker.current_block().cloned())
}

/// Get the blocks coming after the current one.
pub fn get_upcoming_blocks(count: Option<usize>, state: &AppState) -> Result<Vec<StudyBlock>, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker
        .data()
        .upcoming_blocks(count.unwrap_or(DEFAULT_UPCOMING))
        .into_iter()
        .cloned()
        .collect())
}

/// Get the header figures: position, daily goal and streaks.
pub fn get_cycle_overview(state: &AppState) -> Result<CycleOverview, CommandError> {
    let tracker = state.lock()?;
    let data = tracker.data();
    Ok(CycleOverview {
        current_block: data.current_block().cloned(),
        progress: data.cycle_progress(),
        daily_goal: data.daily_goal_progress(&Local::now()),
        completed_cycles: data.completed_cycles,
        total_minutes_studied: data.total_minutes_studied,
        current_streak: data.current_streak,
        longest_streak: data.longest_streak,
    })
}

/// Complete the current block and advance the cycle.
pub fn complete_block(content: String, state: &AppState) -> Result<StudyData, CommandError> {
    let mut tracker = state.lock()?;
    let data = tracker.complete_block(content)?;
    Ok(data.clone())
}

/// Skip the current block and advance the cycle.
pub fn skip_block(state: &AppState) -> Result<StudyData, CommandError> {
    let mut tracker = state.lock()?;
    let data = tracker.skip_block()?;
    Ok(data.clone())
}

pub fn update_block_content(block_id: i64, content: String, state: &AppState) -> Result<StudyData, CommandError> {
    let mut tracker = state.lock()?;
    let data = tracker.update_block_content(block_id, content)?;
    Ok(data.clone())
}

/// Swap in an edited block sequence.
pub fn replace_blocks(request: ReplaceBlocksRequest, state: &AppState) -> Result<StudyData, CommandError> {
    let mut tracker = state.lock()?;
    let data = tracker.replace_blocks(request.blocks, request.daily_goal)?;
    Ok(data.clone())
}

/// Build a block with a fresh id for the cycle editor. Nothing is saved.
pub fn create_block(request: NewBlockRequest, state: &AppState) -> Result<StudyBlock, CommandError> {
    let tracker = state.lock()?;
    let id = next_block_id(&tracker.data().blocks, &Local::now());
    Ok(StudyBlock::new(
        id,
        request.subject,
        request.subject_type,
        request.duration_minutes,
    ))
}

pub fn clear_history(state: &AppState) -> Result<StudyData, CommandError> {
    let mut tracker = state.lock()?;
    let data = tracker.clear_history()?;
    Ok(data.clone())
}

pub fn set_weekly_goal_hours(hours: f64, state: &AppState) -> Result<StudyData, CommandError> {
    let mut tracker = state.lock()?;
    let data = tracker.set_weekly_goal_hours(hours)?;
    Ok(data.clone())
}
