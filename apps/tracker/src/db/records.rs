//! Typed JSON records on top of the key-value repository.

use crate::db::error::DbError;
use crate::db::repository::KeyValueRepository;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const STUDY_DATA_KEY: &str = "studyData";
pub const SUBJECTS_KEY: &str = "subjects";
pub const REVIEW_SETTINGS_KEY: &str = "reviewSettings";

/// Read and decode a record.
///
/// Returns `None` when the record is absent, unreadable or malformed; the
/// latter two are logged and never surfaced to the caller.
pub fn load_record<R, T>(repo: &R, key: &str) -> Option<T>
where
    R: KeyValueRepository + ?Sized,
    T: DeserializeOwned,
{
    let raw = match repo.get_value(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no stored record, using defaults");
            return None;
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read record, using defaults");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed record, using defaults");
            None
        }
    }
}

/// Encode and write a whole record.
pub fn save_record<R, T>(repo: &R, key: &str, value: &T) -> Result<(), DbError>
where
    R: KeyValueRepository + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| DbError::Encode {
        key: key.to_string(),
        source,
    })?;
    repo.set_value(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteRepository;
    use pretty_assertions::assert_eq;
    use study_core::{ReviewInterval, ReviewSettings, StudyData};

    #[test]
    fn absent_record_loads_as_none() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert_eq!(load_record::<_, StudyData>(&repo, STUDY_DATA_KEY), None);
    }

    #[test]
    fn malformed_record_loads_as_none() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.set_value(STUDY_DATA_KEY, "{not json").unwrap();
        assert_eq!(load_record::<_, StudyData>(&repo, STUDY_DATA_KEY), None);

        repo.set_value(REVIEW_SETTINGS_KEY, r#"{"intervalDays":3}"#).unwrap();
        assert_eq!(load_record::<_, ReviewSettings>(&repo, REVIEW_SETTINGS_KEY), None);
    }

    #[test]
    fn saved_record_round_trips() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let settings = ReviewSettings {
            interval_days: ReviewInterval::OneMonth,
        };
        save_record(&repo, REVIEW_SETTINGS_KEY, &settings).unwrap();
        assert_eq!(
            repo.get_value(REVIEW_SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"intervalDays":30}"#)
        );
        assert_eq!(load_record(&repo, REVIEW_SETTINGS_KEY), Some(settings));
    }
}
