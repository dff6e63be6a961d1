//! Statistics derived from the study history.

use crate::types::{HistoryEntry, SubjectType};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-subject and per-weekday counts over the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub completed_blocks: u32,
    pub skipped_blocks: u32,
    pub blocks_per_subject_type: BTreeMap<SubjectType, u32>,
    /// Sunday first.
    pub blocks_per_weekday: [u32; 7],
    pub active_days: usize,
    /// One decimal.
    pub average_blocks_per_day: f64,
}

/// This week's study time against the weekly goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub blocks_this_week: u32,
    pub minutes_studied: u64,
    /// One decimal.
    pub hours_studied: f64,
    /// Capped at 100.
    pub percentage: f64,
    pub extra_minutes: f64,
    pub remaining_minutes: f64,
    pub is_completed: bool,
    pub is_exceeded: bool,
}

/// Counts over non-skipped entries, days taken in the timezone of `now`.
pub fn history_stats<Tz: TimeZone>(history: &[HistoryEntry], now: &DateTime<Tz>) -> HistoryStats {
    let tz = now.timezone();
    let mut blocks_per_subject_type: BTreeMap<SubjectType, u32> =
        SubjectType::ALL.iter().map(|t| (*t, 0)).collect();
    let mut blocks_per_weekday = [0u32; 7];
    let mut days = BTreeSet::new();
    let mut completed_blocks = 0;
    let mut skipped_blocks = 0;

    for entry in history {
        if entry.skipped {
            skipped_blocks += 1;
            continue;
        }
        completed_blocks += 1;
        *blocks_per_subject_type.entry(entry.subject_type).or_insert(0) += 1;

        let local = entry.timestamp.with_timezone(&tz);
        blocks_per_weekday[local.weekday().num_days_from_sunday() as usize] += 1;
        days.insert(local.date_naive());
    }

    let active_days = days.len();
    let average_blocks_per_day = if active_days > 0 {
        (completed_blocks as f64 / active_days as f64 * 10.0).round() / 10.0
    } else {
        0.0
    };

    HistoryStats {
        completed_blocks,
        skipped_blocks,
        blocks_per_subject_type,
        blocks_per_weekday,
        active_days,
        average_blocks_per_day,
    }
}

/// Start of the current week: Sunday 00:00 in the timezone of `now`.
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let today = now.date_naive();
    let sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    sunday
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// Time studied since the start of the week, assuming `block_minutes` per completed block.
pub fn weekly_progress<Tz: TimeZone>(
    history: &[HistoryEntry],
    weekly_goal_hours: f64,
    block_minutes: u32,
    now: &DateTime<Tz>,
) -> WeeklyProgress {
    let week_start = start_of_week(now);
    let blocks_this_week = history
        .iter()
        .filter(|entry| !entry.skipped && entry.timestamp >= week_start)
        .count() as u32;

    let minutes_studied = u64::from(blocks_this_week) * u64::from(block_minutes);
    let studied = minutes_studied as f64;
    let goal_minutes = weekly_goal_hours.max(0.0) * 60.0;
    let percentage = if goal_minutes > 0.0 {
        (studied / goal_minutes * 100.0).min(100.0)
    } else {
        0.0
    };

    WeeklyProgress {
        blocks_this_week,
        minutes_studied,
        hours_studied: (studied / 60.0 * 10.0).round() / 10.0,
        percentage,
        extra_minutes: (studied - goal_minutes).max(0.0),
        remaining_minutes: (goal_minutes - studied).max(0.0),
        is_completed: studied >= goal_minutes,
        is_exceeded: studied > goal_minutes,
    }
}
