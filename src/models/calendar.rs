use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Maximum number of time ranges a calendar day can carry.
pub const MAX_RANGES: usize = 6;

/// One (start, end) teaching range. A bound that is missing or could not be
/// parsed is `None`, and the range then counts as zero hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Duration in seconds when both bounds exist and end > start.
    pub fn valid_seconds(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(s), Some(e)) if e > s => Some((e - s).num_seconds()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarSlot {
    pub course: String,
    pub date: NaiveDate,
    pub is_teaching_day: bool,
    pub ranges: Vec<TimeRange>,
}
