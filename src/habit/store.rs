use std::{collections::HashSet, fmt::Display};

use super::{
    entity::{Frequency, HabitEntity, HabitId, HabitStatus, UNASSIGNED_ID},
    error::HabitError,
};

/// Ordered collection of habits, insertion order = display order. All
/// operations are pure state transitions; persisting the result is the
/// caller's step, so transitions stay testable without touching the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStore {
    habits: Vec<HabitEntity>,
    next_id: HabitId,
}

impl Default for HabitStore {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            next_id: 1,
        }
    }
}

/// Counts shown in the stats header. The not-started count is the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitTotals {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
}

impl Display for HabitTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total Habits: {} | Completed: {} | In Progress: {}",
            self.total, self.completed, self.in_progress
        )
    }
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from loaded entities. Entities without an id (files
    /// written before ids existed) and duplicated ids get fresh ones, so an
    /// id is unique for the lifetime of the store once this returns.
    pub fn from_entities(mut entities: Vec<HabitEntity>) -> Self {
        let mut next_id = entities
            .iter()
            .map(|habit| habit.id)
            .max()
            .unwrap_or(UNASSIGNED_ID)
            + 1;
        let mut seen = HashSet::new();
        for habit in &mut entities {
            if habit.id == UNASSIGNED_ID || !seen.insert(habit.id) {
                habit.id = next_id;
                seen.insert(next_id);
                next_id += 1;
            }
        }
        Self {
            habits: entities,
            next_id,
        }
    }

    pub fn entities(&self) -> &[HabitEntity] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, id: HabitId) -> Option<&HabitEntity> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    fn get_mut(&mut self, id: HabitId) -> Result<&mut HabitEntity, HabitError> {
        self.habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or(HabitError::UnknownHabit(id))
    }

    /// Appends a new habit and returns its id.
    pub fn add(
        &mut self,
        name: &str,
        frequency: Frequency,
        target_days: u32,
    ) -> Result<HabitId, HabitError> {
        let mut habit = HabitEntity::new(name, frequency, target_days)?;
        habit.id = self.next_id;
        self.next_id += 1;
        let id = habit.id;
        self.habits.push(habit);
        Ok(id)
    }

    pub fn remove(&mut self, id: HabitId) -> Result<HabitEntity, HabitError> {
        let position = self
            .habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or(HabitError::UnknownHabit(id))?;
        Ok(self.habits.remove(position))
    }

    pub fn increment_progress(&mut self, id: HabitId) -> Result<(), HabitError> {
        self.get_mut(id)?.increment();
        Ok(())
    }

    pub fn decrement_progress(&mut self, id: HabitId) -> Result<(), HabitError> {
        self.get_mut(id)?.decrement();
        Ok(())
    }

    pub fn rename(&mut self, id: HabitId, new_name: &str) -> Result<(), HabitError> {
        self.get_mut(id)?.rename(new_name)
    }

    /// Unconditional override, no consistency check against the counts. The
    /// status stays as set until the next count-changing operation on the
    /// same habit recomputes it.
    pub fn set_status(&mut self, id: HabitId, status: HabitStatus) -> Result<(), HabitError> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.habits.clear();
    }

    pub fn aggregate_counts(&self) -> HabitTotals {
        let completed = self
            .habits
            .iter()
            .filter(|habit| habit.status == HabitStatus::Completed)
            .count();
        let in_progress = self
            .habits
            .iter()
            .filter(|habit| habit.status == HabitStatus::InProgress)
            .count();
        HabitTotals {
            total: self.habits.len(),
            completed,
            in_progress,
        }
    }
}
