//! The controller owning the study aggregate and its storage.

use crate::db::{
    load_record, save_record, KeyValueRepository, REVIEW_SETTINGS_KEY, STUDY_DATA_KEY, SUBJECTS_KEY,
};
use crate::error::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use study_core::priority::{self, sort_by_priority};
use study_core::review::{self, PendingReview};
use study_core::stats::{self, HistoryStats, WeeklyProgress};
use study_core::{
    ReviewInterval, ReviewSettings, StudyBlock, StudyData, StudyEvent, Subject, SubjectInput,
    SubjectUpdate,
};

/// Single writer for the study records.
///
/// Every mutation computes the next value, writes it to the repository and
/// only then replaces the in-memory copy. A failed write leaves the tracker
/// exactly as it was.
pub struct StudyTracker<R: KeyValueRepository> {
    repository: R,
    data: StudyData,
    subjects: Vec<Subject>,
    review_settings: ReviewSettings,
}

impl<R: KeyValueRepository> StudyTracker<R> {
    /// Load all records, falling back to defaults for anything missing or malformed.
    pub fn load(repository: R) -> Self {
        let data = load_record::<_, StudyData>(&repository, STUDY_DATA_KEY)
            .and_then(|data| match data.repair() {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(error = %e, "stored study data is unusable, using defaults");
                    None
                }
            })
            .unwrap_or_default();

        let mut subjects: Vec<Subject> = load_record(&repository, SUBJECTS_KEY).unwrap_or_default();
        sort_by_priority(&mut subjects);

        let review_settings: ReviewSettings =
            load_record(&repository, REVIEW_SETTINGS_KEY).unwrap_or_default();

        tracing::info!(
            blocks = data.blocks.len(),
            history = data.history.len(),
            subjects = subjects.len(),
            "study tracker loaded"
        );

        Self {
            repository,
            data,
            subjects,
            review_settings,
        }
    }

    pub fn data(&self) -> &StudyData {
        &self.data
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn review_settings(&self) -> ReviewSettings {
        self.review_settings
    }

    pub fn current_block(&self) -> Option<&StudyBlock> {
        self.data.current_block()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Apply a transition using the local wall clock.
    pub fn dispatch(&mut self, event: StudyEvent) -> Result<&StudyData> {
        self.dispatch_at(event, &Local::now())
    }

    /// Apply a transition at `now` and persist the result.
    pub fn dispatch_at<Tz: TimeZone>(&mut self, event: StudyEvent, now: &DateTime<Tz>) -> Result<&StudyData> {
        let name = event_name(&event);
        let next = self.data.apply(event, now)?;
        if let Err(e) = save_record(&self.repository, STUDY_DATA_KEY, &next) {
            tracing::error!(event = name, error = %e, "failed to save study data");
            return Err(e.into());
        }

        tracing::debug!(
            event = name,
            index = next.current_block_index,
            cycles = next.completed_cycles,
            streak = next.current_streak,
            "study data updated"
        );
        self.data = next;
        Ok(&self.data)
    }

    pub fn complete_block(&mut self, content: impl Into<String>) -> Result<&StudyData> {
        self.dispatch(StudyEvent::CompleteBlock { content: content.into() })
    }

    pub fn skip_block(&mut self) -> Result<&StudyData> {
        self.dispatch(StudyEvent::SkipBlock)
    }

    pub fn update_block_content(&mut self, block_id: i64, content: impl Into<String>) -> Result<&StudyData> {
        self.dispatch(StudyEvent::UpdateBlockContent {
            block_id,
            content: content.into(),
        })
    }

    pub fn replace_blocks(&mut self, blocks: Vec<StudyBlock>, daily_goal: u32) -> Result<&StudyData> {
        self.dispatch(StudyEvent::ReplaceBlocks { blocks, daily_goal })
    }

    pub fn clear_history(&mut self) -> Result<&StudyData> {
        self.dispatch(StudyEvent::ClearHistory)
    }

    pub fn set_weekly_goal_hours(&mut self, hours: f64) -> Result<&StudyData> {
        self.dispatch(StudyEvent::SetWeeklyGoalHours { hours })
    }

    pub fn add_subject(&mut self, input: &SubjectInput) -> Result<&[Subject]> {
        self.add_subject_at(input, Utc::now())
    }

    pub fn add_subject_at(&mut self, input: &SubjectInput, now: DateTime<Utc>) -> Result<&[Subject]> {
        let next = priority::add_subject(&self.subjects, input, now);
        self.commit_subjects(next)
    }

    pub fn edit_subject(&mut self, id: &str, updates: &SubjectUpdate) -> Result<&[Subject]> {
        let next = priority::edit_subject(&self.subjects, id, updates);
        self.commit_subjects(next)
    }

    pub fn remove_subject(&mut self, id: &str) -> Result<&[Subject]> {
        let next = priority::remove_subject(&self.subjects, id);
        self.commit_subjects(next)
    }

    /// Remove every subject by deleting the stored record.
    pub fn clear_subjects(&mut self) -> Result<&[Subject]> {
        if let Err(e) = self.repository.delete_value(SUBJECTS_KEY) {
            tracing::error!(error = %e, "failed to delete subjects");
            return Err(e.into());
        }
        tracing::debug!("subjects cleared");
        self.subjects.clear();
        Ok(&self.subjects)
    }

    fn commit_subjects(&mut self, next: Vec<Subject>) -> Result<&[Subject]> {
        if let Err(e) = save_record(&self.repository, SUBJECTS_KEY, &next) {
            tracing::error!(error = %e, "failed to save subjects");
            return Err(e.into());
        }
        tracing::debug!(subjects = next.len(), "subjects updated");
        self.subjects = next;
        Ok(&self.subjects)
    }

    /// Change the review interval. Unsupported day counts are ignored.
    pub fn update_review_interval(&mut self, days: u32) -> Result<ReviewSettings> {
        let Some(interval_days) = ReviewInterval::from_days(days) else {
            tracing::warn!(days, "ignoring unsupported review interval");
            return Ok(self.review_settings);
        };

        let next = ReviewSettings { interval_days };
        if let Err(e) = save_record(&self.repository, REVIEW_SETTINGS_KEY, &next) {
            tracing::error!(error = %e, "failed to save review settings");
            return Err(e.into());
        }
        self.review_settings = next;
        Ok(next)
    }

    pub fn pending_reviews(&self) -> Vec<PendingReview> {
        self.pending_reviews_at(&Local::now())
    }

    pub fn pending_reviews_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<PendingReview> {
        review::get_pending_reviews(&self.data.history, self.review_settings.interval_days, now)
    }

    pub fn pending_review_count(&self) -> usize {
        review::count_pending_reviews(&self.data.history, self.review_settings.interval_days, &Local::now())
    }

    pub fn history_stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> HistoryStats {
        stats::history_stats(&self.data.history, now)
    }

    /// Weekly progress, valuing each completed block at the current block's duration.
    pub fn weekly_progress_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WeeklyProgress {
        let block_minutes = self.current_block().map(|b| b.duration_minutes).unwrap_or(0);
        stats::weekly_progress(&self.data.history, self.data.weekly_goal_hours, block_minutes, now)
    }
}

fn event_name(event: &StudyEvent) -> &'static str {
    match event {
        StudyEvent::CompleteBlock { .. } => "complete_block",
        StudyEvent::SkipBlock => "skip_block",
        StudyEvent::UpdateBlockContent { .. } => "update_block_content",
        StudyEvent::ReplaceBlocks { .. } => "replace_blocks",
        StudyEvent::ClearHistory => "clear_history",
        StudyEvent::SetWeeklyGoalHours { .. } => "set_weekly_goal_hours",
    }
}
