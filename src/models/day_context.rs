use super::attendance::AttendanceRecord;
use super::punch::Punch;
use chrono::NaiveDate;

/// Everything the anomaly detector needs to know about one employee-day.
/// Lookups that could not be resolved are represented as "nothing known".
#[derive(Debug, Clone)]
pub struct DayInput {
    pub date: NaiveDate,
    pub punches: Vec<Punch>,
    pub is_holiday: bool,
    pub leave_type: Option<String>,
    pub attendance: Option<AttendanceRecord>,
}

impl DayInput {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            punches: Vec::new(),
            is_holiday: false,
            leave_type: None,
            attendance: None,
        }
    }
}
