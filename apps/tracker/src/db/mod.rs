//! Local SQLite persistence.

pub mod error;
pub mod records;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use records::{load_record, save_record, REVIEW_SETTINGS_KEY, STUDY_DATA_KEY, SUBJECTS_KEY};
pub use repository::{KeyValueRepository, SqliteRepository};
