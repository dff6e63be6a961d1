//! Study-cycle state machine.
//!
//! `StudyData` is advanced only through [`StudyData::apply`], which takes the
//! current state and an event and produces the next state. The input state is
//! never mutated, so callers can persist the result before committing it.
//!
//! Calendar-day logic (streaks) uses the timezone of the `now` argument.

use crate::error::{CycleError, Result};
use crate::types::{HistoryEntry, StudyBlock, StudyData};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Content recorded when a block is completed without any notes.
pub const DEFAULT_STUDY_CONTENT: &str = "Estudo realizado";

/// Content recorded for skipped blocks.
pub const SKIPPED_CONTENT: &str = "Bloco pulado";

/// Transitions accepted by the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StudyEvent {
    CompleteBlock { content: String },
    SkipBlock,
    UpdateBlockContent { block_id: i64, content: String },
    ReplaceBlocks { blocks: Vec<StudyBlock>, daily_goal: u32 },
    ClearHistory,
    SetWeeklyGoalHours { hours: f64 },
}

/// Position within the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleProgress {
    /// 1-based position of the current block.
    pub position: usize,
    pub total: usize,
    /// Share of the cycle already done, 0-100.
    pub percentage: f64,
}

/// Blocks completed today against the daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoalProgress {
    pub completed: u32,
    pub goal: u32,
    pub reached: bool,
}

impl StudyData {
    /// Apply `event` at instant `now`, returning the next state.
    pub fn apply<Tz: TimeZone>(&self, event: StudyEvent, now: &DateTime<Tz>) -> Result<StudyData> {
        self.check_invariants()?;

        let mut next = self.clone();
        match event {
            StudyEvent::CompleteBlock { content } => next.complete_block(content, now),
            StudyEvent::SkipBlock => next.skip_block(now),
            StudyEvent::UpdateBlockContent { block_id, content } => {
                next.update_block_content(block_id, content)
            }
            StudyEvent::ReplaceBlocks { blocks, daily_goal } => next.replace_blocks(blocks, daily_goal)?,
            StudyEvent::ClearHistory => next.history.clear(),
            StudyEvent::SetWeeklyGoalHours { hours } => {
                next.weekly_goal_hours = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
            }
        }
        Ok(next)
    }

    /// Fix up state loaded from storage.
    ///
    /// An out-of-range index is reset to the first block. An empty block
    /// sequence cannot be repaired.
    pub fn repair(mut self) -> Result<StudyData> {
        if self.blocks.is_empty() {
            return Err(CycleError::EmptyCycle);
        }
        if self.current_block_index >= self.blocks.len() {
            self.current_block_index = 0;
        }
        Ok(self)
    }

    fn check_invariants(&self) -> Result<()> {
        if self.blocks.is_empty() {
            return Err(CycleError::EmptyCycle);
        }
        if self.current_block_index >= self.blocks.len() {
            return Err(CycleError::IndexOutOfRange {
                index: self.current_block_index,
                len: self.blocks.len(),
            });
        }
        Ok(())
    }

    /// The block the user should study next.
    pub fn current_block(&self) -> Option<&StudyBlock> {
        self.blocks.get(self.current_block_index)
    }

    /// Up to `count` blocks following the current one, wrapping around the cycle.
    pub fn upcoming_blocks(&self, count: usize) -> Vec<&StudyBlock> {
        let len = self.blocks.len();
        if len == 0 {
            return Vec::new();
        }
        (1..=count.min(len - 1))
            .map(|offset| &self.blocks[(self.current_block_index + offset) % len])
            .collect()
    }

    pub fn cycle_progress(&self) -> CycleProgress {
        let total = self.blocks.len();
        let percentage = if total == 0 {
            0.0
        } else {
            self.current_block_index as f64 / total as f64 * 100.0
        };
        CycleProgress {
            position: self.current_block_index + 1,
            total,
            percentage,
        }
    }

    /// Today's completed blocks against the goal. Counts from a previous day read as zero.
    pub fn daily_goal_progress<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DailyGoalProgress {
        let studied_today = self
            .last_study_date
            .map(|last| last.with_timezone(&now.timezone()).date_naive() == now.date_naive())
            .unwrap_or(false);
        let completed = if studied_today { self.today_blocks } else { 0 };
        DailyGoalProgress {
            completed,
            goal: self.daily_goal,
            reached: completed >= self.daily_goal,
        }
    }

    fn complete_block<Tz: TimeZone>(&mut self, content: String, now: &DateTime<Tz>) {
        let index = self.current_block_index;
        let block = &self.blocks[index];

        let content = if !content.is_empty() {
            content
        } else if !block.content.is_empty() {
            block.content.clone()
        } else {
            DEFAULT_STUDY_CONTENT.to_string()
        };

        let entry = HistoryEntry::record(block, content, now.with_timezone(&Utc), false);
        self.total_minutes_studied += u64::from(block.duration_minutes);
        self.history.insert(0, entry);
        self.blocks[index].content.clear();

        self.advance();
        self.record_study_day(now);
    }

    fn skip_block<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        let index = self.current_block_index;
        let entry = HistoryEntry::record(
            &self.blocks[index],
            SKIPPED_CONTENT.to_string(),
            now.with_timezone(&Utc),
            true,
        );
        self.history.insert(0, entry);
        self.skipped_blocks += 1;
        self.blocks[index].content.clear();

        self.advance();
    }

    fn update_block_content(&mut self, block_id: i64, content: String) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id == block_id) {
            block.content = content;
        }
    }

    fn replace_blocks(&mut self, blocks: Vec<StudyBlock>, daily_goal: u32) -> Result<()> {
        if blocks.is_empty() {
            return Err(CycleError::EmptyCycle);
        }
        if self.current_block_index >= blocks.len() {
            self.current_block_index = 0;
        }
        self.blocks = blocks;
        self.daily_goal = daily_goal;
        Ok(())
    }

    /// Move to the next block. Wrapping to the first block closes a cycle.
    fn advance(&mut self) {
        let next = (self.current_block_index + 1) % self.blocks.len();
        if next == 0 {
            self.completed_cycles += 1;
        }
        self.current_block_index = next;
    }

    fn record_study_day<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        let today = now.date_naive();
        let last_day = self
            .last_study_date
            .map(|last| last.with_timezone(&now.timezone()).date_naive());

        match last_day {
            Some(day) if day == today => self.today_blocks += 1,
            Some(day) if Some(day) == today.pred_opt() => {
                self.current_streak += 1;
                self.today_blocks = 1;
            }
            _ => {
                self.current_streak = 1;
                self.today_blocks = 1;
            }
        }

        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_study_date = Some(now.with_timezone(&Utc));
    }
}

/// Id for a new block: the current epoch millisecond, bumped past any existing id.
pub fn next_block_id<Tz: TimeZone>(blocks: &[StudyBlock], now: &DateTime<Tz>) -> i64 {
    let now_ms = now.timestamp_millis();
    let max_existing = blocks.iter().map(|b| b.id).max().unwrap_or(0);
    match max_existing.checked_add(1) {
        Some(next) => now_ms.max(next),
        // Nothing fits above the maximum: take the first free id from now.
        None => (now_ms..)
            .find(|id| blocks.iter().all(|b| b.id != *id))
            .unwrap_or(now_ms),
    }
}
