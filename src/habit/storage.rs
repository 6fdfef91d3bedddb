use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use super::{entity::HabitEntity, error::HabitError, store::HabitStore};

pub const HABITS_FILE: &str = "habits.json";

/// Seam between the store and the disk. Every mutation runs
/// load -> transition -> save, and the save completes before the next
/// command is accepted, so there is no partially-applied state in between.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitStorage {
    /// A missing file is an empty store, not an error. Malformed content is
    /// a [HabitError::Persistence]; the caller keeps an empty store rather
    /// than a partially-parsed one.
    async fn load(&self) -> Result<HabitStore, HabitError>;

    /// Writes the full ordered list. On failure the in-memory store is
    /// untouched and the user can retry.
    async fn save(&self, store: &HabitStore) -> Result<(), HabitError>;
}

/// File-backed implementation over a pretty-printed JSON array, the format
/// the original desktop version of this tool wrote.
pub struct JsonHabitStorage {
    path: PathBuf,
}

impl JsonHabitStorage {
    pub fn new(application_dir: &Path) -> Self {
        Self {
            path: application_dir.join(HABITS_FILE),
        }
    }
}

#[async_trait]
impl HabitStorage for JsonHabitStorage {
    async fn load(&self) -> Result<HabitStore, HabitError> {
        debug!("Loading habits from {:?}", self.path);
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No habits file yet, starting empty");
                return Ok(HabitStore::new());
            }
            Err(e) => {
                return Err(HabitError::Persistence(format!(
                    "can't read {:?}: {e}",
                    self.path
                )))
            }
        };

        let entities: Vec<HabitEntity> = serde_json::from_str(&contents).map_err(|e| {
            warn!("Habits file {:?} is malformed: {e}", self.path);
            HabitError::Persistence(format!("malformed habits file {:?}: {e}", self.path))
        })?;
        Ok(HabitStore::from_entities(entities))
    }

    async fn save(&self, store: &HabitStore) -> Result<(), HabitError> {
        let contents = serde_json::to_string_pretty(store.entities())
            .map_err(|e| HabitError::Persistence(format!("can't serialize habits: {e}")))?;
        fs::write(&self.path, contents).await.map_err(|e| {
            HabitError::Persistence(format!("can't write {:?}: {e}", self.path))
        })?;
        debug!("Saved {} habits to {:?}", store.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::habit::entity::{Frequency, HabitStatus};

    use super::*;

    #[tokio::test]
    async fn load_on_missing_file_yields_an_empty_store() {
        let dir = tempdir().unwrap();
        let storage = JsonHabitStorage::new(dir.path());

        let store = storage.load().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let storage = JsonHabitStorage::new(dir.path());

        let mut store = HabitStore::new();
        let id = store.add("Read", Frequency::Daily, 10).unwrap();
        store.increment_progress(id).unwrap();
        store.add("Run", Frequency::Weekly, 4).unwrap();
        storage.save(&store).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, store);
    }

    #[tokio::test]
    async fn saved_file_uses_the_original_field_names() {
        let dir = tempdir().unwrap();
        let storage = JsonHabitStorage::new(dir.path());

        let mut store = HabitStore::new();
        store.add("Read", Frequency::Daily, 10).unwrap();
        storage.save(&store).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join(HABITS_FILE)).unwrap();
        for field in [
            "\"name\"",
            "\"frequency\"",
            "\"target_days\"",
            "\"created_at\"",
            "\"completed_days\"",
            "\"status\"",
        ] {
            assert!(raw.contains(field), "missing {field} in {raw}");
        }
        assert!(raw.contains("\"Not Started\""));
    }

    #[tokio::test]
    async fn load_on_malformed_file_fails_with_persistence_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(HABITS_FILE), "{ not json").unwrap();
        let storage = JsonHabitStorage::new(dir.path());

        let err = storage.load().await.unwrap_err();
        assert!(matches!(err, HabitError::Persistence(_)));
    }

    #[tokio::test]
    async fn load_accepts_files_written_by_the_original_application() {
        let dir = tempdir().unwrap();
        // No ids, and a record with fields missing.
        std::fs::write(
            dir.path().join(HABITS_FILE),
            r#"[
                {
                    "name": "Read",
                    "frequency": "Daily",
                    "target_days": 10,
                    "created_at": "01-02-2025 10:30",
                    "completed_days": 5,
                    "status": "In Progress"
                },
                {
                    "name": "Run"
                }
            ]"#,
        )
        .unwrap();
        let storage = JsonHabitStorage::new(dir.path());

        let store = storage.load().await.unwrap();
        assert_eq!(store.len(), 2);

        let first = &store.entities()[0];
        assert_eq!(first.name, "Read");
        assert_eq!(first.completed_days, 5);
        assert_eq!(first.status, HabitStatus::InProgress);
        assert_eq!(first.created_at, "01-02-2025 10:30");

        let second = &store.entities()[1];
        assert_eq!(second.target_days, 1);
        assert_eq!(second.status, HabitStatus::NotStarted);
        assert_ne!(first.id, second.id);
    }
}
