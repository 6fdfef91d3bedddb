use ansi_term::Colour;

use crate::habit::{
    entity::{HabitEntity, HabitStatus},
    store::HabitStore,
};

/// Prints the stats header and one line per habit, optionally filtered by
/// status. Mirrors what the original list view showed: position, name,
/// status, progress fraction with percentage, frequency.
pub fn print_store(store: &HabitStore, filter: Option<HabitStatus>) {
    println!("{}", store.aggregate_counts());
    for habit in store.entities() {
        if filter.is_some_and(|wanted| habit.status != wanted) {
            continue;
        }
        println!("{}", status_colour(habit.status).paint(render_habit_line(habit)));
    }
}

pub fn render_habit_line(habit: &HabitEntity) -> String {
    format!(
        "[{}] {} | Status: {} | Progress: {}/{} days ({}%) | Frequency: {}",
        habit.id,
        habit.name,
        habit.status,
        habit.completed_days,
        habit.target_days,
        habit.progress_percentage(),
        habit.frequency,
    )
}

// Same palette idea as the original row backgrounds: green when done, amber
// while underway, red when untouched.
fn status_colour(status: HabitStatus) -> Colour {
    match status {
        HabitStatus::Completed => Colour::Green,
        HabitStatus::InProgress => Colour::Yellow,
        HabitStatus::NotStarted => Colour::Red,
    }
}
