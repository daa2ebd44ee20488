use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// HR-corrected attendance of one employee-day, keyed by `<employee>-<date>`.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedAttendance {
    pub name: String,
    pub employee: String,
    pub date: NaiveDate,
    pub total_hours: f64,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub rest_time: Option<String>,
    pub owner: String,
    pub modified: String,
}

pub fn verified_key(employee: &str, date: &NaiveDate) -> String {
    format!("{}-{}", employee.trim(), date.format("%Y-%m-%d"))
}
