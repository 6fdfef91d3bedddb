use std::{fmt::Display, path::Path};

use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use tracing::debug;

use crate::habit::{
    entity::{Frequency, HabitId, HabitStatus},
    error::HabitError,
    storage::HabitStorage,
};

use super::{
    export::render_export,
    output::{print_store, render_habit_line},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<FrequencyArg> for Frequency {
    fn from(value: FrequencyArg) -> Self {
        match value {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
        }
    }
}

impl Display for FrequencyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyArg::Daily => write!(f, "daily"),
            FrequencyArg::Weekly => write!(f, "weekly"),
            FrequencyArg::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    NotStarted,
    InProgress,
    Completed,
}

impl From<StatusArg> for HabitStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::NotStarted => HabitStatus::NotStarted,
            StatusArg::InProgress => HabitStatus::InProgress,
            StatusArg::Completed => HabitStatus::Completed,
        }
    }
}

pub async fn process_add_command(
    storage: &impl HabitStorage,
    name: &str,
    frequency: FrequencyArg,
    target_days: u32,
) -> Result<()> {
    let mut store = storage.load().await?;
    let id = store.add(name, frequency.into(), target_days)?;
    storage.save(&store).await?;
    debug!("Added habit {id}");
    println!("Added habit {id}.");
    print_store(&store, None);
    Ok(())
}

pub async fn process_list_command(
    storage: &impl HabitStorage,
    status: Option<StatusArg>,
) -> Result<()> {
    let store = storage.load().await?;
    print_store(&store, status.map(Into::into));
    Ok(())
}

pub async fn process_done_command(storage: &impl HabitStorage, id: HabitId) -> Result<()> {
    process_progress_command(storage, id, true).await
}

pub async fn process_undo_command(storage: &impl HabitStorage, id: HabitId) -> Result<()> {
    process_progress_command(storage, id, false).await
}

async fn process_progress_command(
    storage: &impl HabitStorage,
    id: HabitId,
    forward: bool,
) -> Result<()> {
    let mut store = storage.load().await?;
    if forward {
        store.increment_progress(id)?;
    } else {
        store.decrement_progress(id)?;
    }
    storage.save(&store).await?;
    let habit = store
        .get(id)
        .ok_or(HabitError::UnknownHabit(id))?;
    println!("{}", render_habit_line(habit));
    println!("{}", store.aggregate_counts());
    Ok(())
}

pub async fn process_rename_command(
    storage: &impl HabitStorage,
    id: HabitId,
    new_name: &str,
) -> Result<()> {
    let mut store = storage.load().await?;
    store.rename(id, new_name)?;
    storage.save(&store).await?;
    print_store(&store, None);
    Ok(())
}

pub async fn process_status_command(
    storage: &impl HabitStorage,
    id: HabitId,
    status: StatusArg,
) -> Result<()> {
    let mut store = storage.load().await?;
    store.set_status(id, status.into())?;
    storage.save(&store).await?;
    print_store(&store, None);
    Ok(())
}

pub async fn process_remove_command(storage: &impl HabitStorage, id: HabitId) -> Result<()> {
    let mut store = storage.load().await?;
    let removed = store.remove(id)?;
    storage.save(&store).await?;
    println!("Removed habit '{}'.", removed.name);
    print_store(&store, None);
    Ok(())
}

pub async fn process_reset_command(storage: &impl HabitStorage) -> Result<()> {
    let mut store = storage.load().await?;
    if store.is_empty() {
        println!("There are no habits to reset.");
        return Ok(());
    }
    store.reset();
    storage.save(&store).await?;
    println!("All habits have been deleted.");
    Ok(())
}

pub async fn process_stats_command(storage: &impl HabitStorage) -> Result<()> {
    let store = storage.load().await?;
    println!("{}", store.aggregate_counts());
    Ok(())
}

pub async fn process_export_command(
    storage: &impl HabitStorage,
    output: Option<&Path>,
) -> Result<()> {
    let store = storage.load().await?;
    let Some(report) = render_export(&store, Local::now()) else {
        println!("There are no habits to export.");
        return Ok(());
    };
    match output {
        Some(path) => {
            tokio::fs::write(path, &report).await.map_err(|e| {
                HabitError::Persistence(format!("can't write export to {path:?}: {e}"))
            })?;
            println!("Habits exported to {}", path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::habit::store::HabitStore;
    use crate::habit::storage::MockHabitStorage;

    use super::*;

    fn loaded_store() -> HabitStore {
        let mut store = HabitStore::new();
        store.add("Read", Frequency::Daily, 10).unwrap();
        store
    }

    #[tokio::test]
    async fn add_saves_the_grown_store() {
        let mut storage = MockHabitStorage::new();
        storage
            .expect_load()
            .once()
            .returning(|| Ok(HabitStore::new()));
        storage
            .expect_save()
            .once()
            .withf(|store| store.len() == 1 && store.entities()[0].name == "Read")
            .returning(|_| Ok(()));

        process_add_command(&storage, "Read", FrequencyArg::Daily, 10)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn validation_failures_skip_the_save() {
        let mut storage = MockHabitStorage::new();
        storage
            .expect_load()
            .once()
            .returning(|| Ok(HabitStore::new()));
        storage.expect_save().never();

        let err = process_add_command(&storage, "  ", FrequencyArg::Daily, 10)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<HabitError>().is_some());
    }

    #[tokio::test]
    async fn done_persists_the_incremented_habit() {
        let mut storage = MockHabitStorage::new();
        storage.expect_load().once().returning(|| Ok(loaded_store()));
        storage
            .expect_save()
            .once()
            .withf(|store| store.entities()[0].completed_days == 1)
            .returning(|_| Ok(()));

        process_done_command(&storage, 1).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_ids_surface_without_saving() {
        let mut storage = MockHabitStorage::new();
        storage.expect_load().once().returning(|| Ok(loaded_store()));
        storage.expect_save().never();

        let err = process_remove_command(&storage, 99).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<HabitError>(),
            Some(&HabitError::UnknownHabit(99))
        );
    }

    #[tokio::test]
    async fn save_failures_propagate() {
        let mut storage = MockHabitStorage::new();
        storage.expect_load().once().returning(|| Ok(loaded_store()));
        storage
            .expect_save()
            .once()
            .returning(|_| Err(HabitError::Persistence("disk full".into())));

        let err = process_done_command(&storage, 1).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HabitError>(),
            Some(HabitError::Persistence(_))
        ));
    }

    #[tokio::test]
    async fn reset_on_an_empty_store_does_not_save() {
        let mut storage = MockHabitStorage::new();
        storage
            .expect_load()
            .once()
            .returning(|| Ok(HabitStore::new()));
        storage.expect_save().never();

        process_reset_command(&storage).await.unwrap();
    }
}
