use chrono::NaiveDateTime;
use serde::Serialize;

/// An IN/OUT pair reconstructed from punches. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkSession {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WorkSession {
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn hours(&self) -> f64 {
        self.duration_seconds() as f64 / 3600.0
    }
}
