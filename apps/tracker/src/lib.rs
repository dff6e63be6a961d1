pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use state::AppState;
pub use tracker::StudyTracker;

use db::SqliteRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_logging(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Read configuration, open the database and load the tracker.
pub fn bootstrap() -> anyhow::Result<AppState> {
    let config = TrackerConfig::from_env();
    init_logging(&config.log_filter);
    open_state(&config)
}

/// Open the database described by `config` and load the tracker from it.
pub fn open_state(config: &TrackerConfig) -> anyhow::Result<AppState> {
    std::fs::create_dir_all(&config.data_dir)?;

    let db_path = config.database_path();
    tracing::info!(path = %db_path.display(), "opening database");
    let repository = SqliteRepository::open(&db_path)?;
    let schema = repository.schema_version()?;
    let last_saved = repository.updated_at(db::STUDY_DATA_KEY)?;
    tracing::info!(
        schema,
        last_saved = last_saved.as_deref().unwrap_or("never"),
        "database ready"
    );

    Ok(AppState::new(repository))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_can_be_initialised_twice() {
        init_logging("debug");
        init_logging("info");
        tracing::debug!("still logging");
    }
}
