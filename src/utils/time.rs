use chrono::{DateTime, Local};

/// Format the original application used for `created_at`, kept so old and
/// new files stay interchangeable.
pub const STAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

pub fn format_stamp(time: DateTime<Local>) -> String {
    time.format(STAMP_FORMAT).to_string()
}

pub fn now_stamp() -> String {
    format_stamp(Local::now())
}
