use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    WorkFromHome,
    OnLeave,
}

impl AttendanceStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::HalfDay => "Half Day",
            AttendanceStatus::WorkFromHome => "Work From Home",
            AttendanceStatus::OnLeave => "On Leave",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Present" => Some(AttendanceStatus::Present),
            "Absent" => Some(AttendanceStatus::Absent),
            "Half Day" => Some(AttendanceStatus::HalfDay),
            "Work From Home" => Some(AttendanceStatus::WorkFromHome),
            "On Leave" => Some(AttendanceStatus::OnLeave),
            _ => None,
        }
    }

    /// CLI input: "present", "absent", "half-day", "wfh", "on-leave" (case-insensitive).
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "half-day" => Some(AttendanceStatus::HalfDay),
            "wfh" | "work-from-home" => Some(AttendanceStatus::WorkFromHome),
            "on-leave" => Some(AttendanceStatus::OnLeave),
            _ => None,
        }
    }
}

/// Processed attendance of one employee-day (late/early flags come from here).
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub late_entry: bool,
    pub early_exit: bool,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub working_hours: Option<f64>,
}
