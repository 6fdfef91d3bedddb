use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::utils::time::now_stamp;

use super::error::HabitError;

pub type HabitId = u64;

/// Sentinel for entities that haven't been inserted into a store yet. Also
/// what old files written before ids existed deserialize into, so the store
/// reassigns it on load.
pub const UNASSIGNED_ID: HabitId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "Daily"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Completion state of a habit. Derived from the counts by default, but a
/// manual override path exists ([crate::habit::store::HabitStore::set_status]),
/// so it is stored rather than computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HabitStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl HabitStatus {
    /// Pure status-from-counts rule. Count-changing operations call this,
    /// nothing else does.
    pub fn from_progress(completed_days: u32, target_days: u32) -> Self {
        let percentage = progress_percentage(completed_days, target_days);
        if percentage >= 100 {
            HabitStatus::Completed
        } else if percentage > 0 {
            HabitStatus::InProgress
        } else {
            HabitStatus::NotStarted
        }
    }
}

impl Display for HabitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitStatus::NotStarted => write!(f, "Not Started"),
            HabitStatus::InProgress => write!(f, "In Progress"),
            HabitStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Integer percentage, floored. Can exceed 100 when the completed count has
/// drifted above the target. A zero target yields 0 instead of dividing.
pub fn progress_percentage(completed_days: u32, target_days: u32) -> u32 {
    if target_days == 0 {
        return 0;
    }
    (completed_days as u64 * 100 / target_days as u64) as u32
}

/// The struct saved on disk, one per habit. Deserialization is permissive:
/// every field has a default so files written by older versions (including
/// ones without ids) still load instead of being treated as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitEntity {
    #[serde(default)]
    pub id: HabitId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_target_days")]
    pub target_days: u32,
    #[serde(default = "now_stamp")]
    pub created_at: String,
    #[serde(default)]
    pub completed_days: u32,
    #[serde(default)]
    pub status: HabitStatus,
}

fn default_name() -> String {
    "Unknown".into()
}

fn default_target_days() -> u32 {
    1
}

impl HabitEntity {
    pub fn new(name: &str, frequency: Frequency, target_days: u32) -> Result<Self, HabitError> {
        let name = validated_name(name)?;
        if target_days < 1 {
            return Err(HabitError::Validation(format!(
                "target days must be at least 1, got {target_days}"
            )));
        }
        Ok(Self {
            id: UNASSIGNED_ID,
            name,
            frequency,
            target_days,
            created_at: now_stamp(),
            completed_days: 0,
            status: HabitStatus::NotStarted,
        })
    }

    pub fn progress_percentage(&self) -> u32 {
        progress_percentage(self.completed_days, self.target_days)
    }

    /// Recomputes `status` from the counts. Idempotent.
    pub fn refresh_status(&mut self) {
        self.status = HabitStatus::from_progress(self.completed_days, self.target_days);
    }

    /// Adds a day, clamped at the target. A call at the clamp bound is a
    /// no-op that still refreshes the status.
    pub fn increment(&mut self) {
        if self.completed_days < self.target_days {
            self.completed_days += 1;
        }
        self.refresh_status();
    }

    /// Removes a day, clamped at zero.
    pub fn decrement(&mut self) {
        self.completed_days = self.completed_days.saturating_sub(1);
        self.refresh_status();
    }

    pub fn rename(&mut self, new_name: &str) -> Result<(), HabitError> {
        self.name = validated_name(new_name)?;
        Ok(())
    }
}

fn validated_name(name: &str) -> Result<String, HabitError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HabitError::Validation("habit name cannot be empty".into()));
    }
    Ok(name.to_string())
}
