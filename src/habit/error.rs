use std::fmt::Display;

use super::entity::HabitId;

/// Errors produced by store operations. All of these are recoverable at the
/// presentation boundary and are rendered as plain messages there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitError {
    /// Rejected user input. The mutation was not applied.
    Validation(String),
    /// An operation referenced an id that is not in the store.
    UnknownHabit(HabitId),
    /// Reading or writing the habits file failed. On save the in-memory
    /// store stays intact, on load the store stays empty.
    Persistence(String),
}

impl Display for HabitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "Invalid input: {message}"),
            Self::UnknownHabit(id) => write!(f, "No habit with id {id}"),
            Self::Persistence(message) => write!(f, "Storage failure: {message}"),
        }
    }
}

impl std::error::Error for HabitError {}
