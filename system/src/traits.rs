use chrono::Local;

/// `3:45 pm`
pub const TIMESTAMP_FORMAT: &str = "%-I:%M %P";

/// Source of the human readable time attached to chat and presence messages.
pub trait Clock {
    fn timestamp(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}
