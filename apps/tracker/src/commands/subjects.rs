//! Subject priority commands.

use crate::state::AppState;
use study_core::priority::{self, PriorityBand, PriorityStats};
use study_core::{Subject, SubjectInput, SubjectUpdate};

use super::CommandError;

#[derive(Debug, serde::Serialize)]
pub struct PriorityBandInfo {
    pub band: PriorityBand,
    pub label: String,
}

/// Get all subjects, highest priority first.
pub fn get_subjects(state: &AppState) -> Result<Vec<Subject>, CommandError> {
    let tracker = state.lock()?;
    Ok(tracker.subjects().to_vec())
}

pub fn add_subject(input: SubjectInput, state: &AppState) -> Result<Vec<Subject>, CommandError> {
    let mut tracker = state.lock()?;
    let subjects = tracker.add_subject(&input)?;
    Ok(subjects.to_vec())
}

pub fn edit_subject(id: String, updates: SubjectUpdate, state: &AppState) -> Result<Vec<Subject>, CommandError> {
    let mut tracker = state.lock()?;
    let subjects = tracker.edit_subject(&id, &updates)?;
    Ok(subjects.to_vec())
}

pub fn remove_subject(id: String, state: &AppState) -> Result<Vec<Subject>, CommandError> {
    let mut tracker = state.lock()?;
    let subjects = tracker.remove_subject(&id)?;
    Ok(subjects.to_vec())
}

pub fn clear_subjects(state: &AppState) -> Result<Vec<Subject>, CommandError> {
    let mut tracker = state.lock()?;
    let subjects = tracker.clear_subjects()?;
    Ok(subjects.to_vec())
}

pub fn get_subject_stats(state: &AppState) -> Result<PriorityStats, CommandError> {
    let tracker = state.lock()?;
    Ok(priority::priority_stats(tracker.subjects()))
}

/// Classify a priority score for display.
pub fn get_priority_band(priority: f64) -> PriorityBandInfo {
    let band = priority::classify_priority(priority);
    PriorityBandInfo {
        band,
        label: band.label().to_string(),
    }
}
