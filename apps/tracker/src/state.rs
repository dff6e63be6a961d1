//! Application state.

use crate::commands::CommandError;
use crate::db::SqliteRepository;
use crate::tracker::StudyTracker;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the single tracker instance.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<StudyTracker<SqliteRepository>>>,
}

impl AppState {
    pub fn new(repository: SqliteRepository) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(StudyTracker::load(repository))),
        }
    }

    /// Lock the tracker for one operation.
    pub fn lock(&self) -> Result<MutexGuard<'_, StudyTracker<SqliteRepository>>, CommandError> {
        self.tracker
            .lock()
            .map_err(|_| CommandError::new("tracker lock poisoned"))
    }
}
