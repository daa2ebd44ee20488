use super::punch_kind::PunchKind;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A single check-in event as stored in the `punches` table.
#[derive(Debug, Clone, Serialize)]
pub struct Punch {
    pub id: i64,
    pub employee: String,        // ⇔ punches.employee
    pub timestamp: NaiveDateTime, // ⇔ punches.time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub kind: PunchKind,         // ⇔ punches.kind ('IN' | 'OUT')
    pub device_id: Option<String>,
    pub source: String,     // 'cli' | 'device'
    pub created_at: String, // ISO8601
}

impl Punch {
    /// Build a punch entered from the CLI (`source = "cli"`, `created_at = now`).
    pub fn new(employee: &str, timestamp: NaiveDateTime, kind: PunchKind) -> Self {
        Self {
            id: 0,
            employee: employee.to_string(),
            timestamp,
            kind,
            device_id: None,
            source: "cli".to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn to_db_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
