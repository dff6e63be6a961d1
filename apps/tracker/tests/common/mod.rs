//! Shared fixtures for tracker integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use study_cycle_tracker::db::SqliteRepository;
use study_cycle_tracker::StudyTracker;
use study_core::{StudyBlock, SubjectInput, SubjectType};

/// Fresh tracker over an in-memory database.
pub fn tracker() -> StudyTracker<SqliteRepository> {
    StudyTracker::load(SqliteRepository::open_in_memory().expect("in-memory database"))
}

/// Noon UTC on the given day of March 2024.
pub fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

pub fn subject_input(name: &str, weight: f64, difficulty: f64, content_amount: f64) -> SubjectInput {
    SubjectInput {
        name: name.to_string(),
        weight,
        difficulty,
        content_amount,
    }
}

pub fn two_block_cycle() -> Vec<StudyBlock> {
    vec![
        StudyBlock::new(100, "Redação", SubjectType::Portuguese, 60),
        StudyBlock::new(101, "Geometria", SubjectType::Math, 45),
    ]
}
