//! Core types for the study-cycle tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject area a block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    Math,
    Nature,
    Portuguese,
    Human,
}

impl SubjectType {
    /// All subject types in display order.
    pub const ALL: [Self; 4] = [Self::Math, Self::Nature, Self::Portuguese, Self::Human];
}

/// One scheduled study session within the cyclic sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyBlock {
    pub id: i64,
    pub subject: String,
    pub subject_type: SubjectType,
    #[serde(default)]
    pub content: String,
    #[serde(alias = "duration")]
    pub duration_minutes: u32,
}

impl StudyBlock {
    pub fn new(id: i64, subject: impl Into<String>, subject_type: SubjectType, duration_minutes: u32) -> Self {
        Self {
            id,
            subject: subject.into(),
            subject_type,
            content: String::new(),
            duration_minutes,
        }
    }
}

/// Immutable record of a completed or skipped block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
    pub subject: String,
    pub subject_type: SubjectType,
    pub content: String,
    pub block_id: i64,
    #[serde(default)]
    pub skipped: bool,
}

impl HistoryEntry {
    /// Record `block` at `timestamp` with a fresh unique id.
    pub fn record(block: &StudyBlock, content: String, timestamp: DateTime<Utc>, skipped: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            subject: block.subject.clone(),
            subject_type: block.subject_type,
            content,
            block_id: block.id,
            skipped,
        }
    }
}

/// The study-cycle aggregate: block sequence, position, counters and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudyData {
    pub current_block_index: usize,
    pub completed_cycles: u32,
    pub total_minutes_studied: u64,
    pub skipped_blocks: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: Option<DateTime<Utc>>,
    pub daily_goal: u32,
    pub weekly_goal_hours: f64,
    pub today_blocks: u32,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
    pub blocks: Vec<StudyBlock>,
}

impl Default for StudyData {
    fn default() -> Self {
        Self {
            current_block_index: 0,
            completed_cycles: 0,
            total_minutes_studied: 0,
            skipped_blocks: 0,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            daily_goal: 3,
            weekly_goal_hours: 10.0,
            today_blocks: 0,
            history: Vec::new(),
            blocks: default_blocks(),
        }
    }
}

/// The sequence a fresh tracker starts with.
pub fn default_blocks() -> Vec<StudyBlock> {
    vec![
        StudyBlock::new(1, "Matemática", SubjectType::Math, 30),
        StudyBlock::new(2, "Matemática", SubjectType::Math, 30),
        StudyBlock::new(3, "Ciências da Natureza", SubjectType::Nature, 30),
        StudyBlock::new(4, "Português", SubjectType::Portuguese, 30),
        StudyBlock::new(5, "Ciências Humanas", SubjectType::Human, 30),
    ]
}

/// A user-defined subject ranked by priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub difficulty: f64,
    pub content_amount: f64,
    pub priority: f64,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInput {
    pub name: String,
    pub weight: f64,
    pub difficulty: f64,
    pub content_amount: f64,
}

/// Partial update for an existing subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubjectUpdate {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub difficulty: Option<f64>,
    pub content_amount: Option<f64>,
}

/// Supported spaced review intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ReviewInterval {
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
    OneMonth,
}

impl Default for ReviewInterval {
    fn default() -> Self {
        Self::OneWeek
    }
}

impl ReviewInterval {
    /// Interval length in days.
    pub fn days(self) -> u32 {
        match self {
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
            Self::ThreeWeeks => 21,
            Self::OneMonth => 30,
        }
    }

    /// Create from a day count, if it is one of the supported intervals.
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(Self::OneWeek),
            14 => Some(Self::TwoWeeks),
            21 => Some(Self::ThreeWeeks),
            30 => Some(Self::OneMonth),
            _ => None,
        }
    }
}

impl TryFrom<u32> for ReviewInterval {
    type Error = String;

    fn try_from(days: u32) -> std::result::Result<Self, Self::Error> {
        Self::from_days(days).ok_or_else(|| format!("unsupported review interval: {} days", days))
    }
}

impl From<ReviewInterval> for u32 {
    fn from(interval: ReviewInterval) -> Self {
        interval.days()
    }
}

/// Review reminder configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSettings {
    pub interval_days: ReviewInterval,
}
