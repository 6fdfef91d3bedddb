use chrono::{DateTime, Local};

use crate::{habit::store::HabitStore, utils::time::format_stamp};

/// Builds the plain-text report: title, export timestamp, then one block per
/// habit in store order. Returns [None] for an empty store so the caller can
/// report that there is nothing to export instead of writing a bare header.
pub fn render_export(store: &HabitStore, exported_at: DateTime<Local>) -> Option<String> {
    if store.is_empty() {
        return None;
    }

    let mut report = String::from("HABITUAL - EXPORTED HABITS\n");
    report.push_str(&format!("Export Date: {}\n\n", format_stamp(exported_at)));

    for (position, habit) in store.entities().iter().enumerate() {
        report.push_str(&format!("{}. {}\n", position + 1, habit.name));
        report.push_str(&format!("   Status: {}\n", habit.status));
        report.push_str(&format!(
            "   Progress: {}/{} days ({}%)\n",
            habit.completed_days,
            habit.target_days,
            habit.progress_percentage(),
        ));
        report.push_str(&format!("   Frequency: {}\n", habit.frequency));
        report.push_str(&format!("   Created: {}\n\n", habit.created_at));
    }

    Some(report)
}
