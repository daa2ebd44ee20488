use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaveStatus {
    Open,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveStatus::Open => "Open",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
            LeaveStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Open" => Some(LeaveStatus::Open),
            "Approved" => Some(LeaveStatus::Approved),
            "Rejected" => Some(LeaveStatus::Rejected),
            "Cancelled" => Some(LeaveStatus::Cancelled),
            _ => None,
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(LeaveStatus::Open),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            "cancelled" => Some(LeaveStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveApplication {
    pub id: i64,
    pub employee: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub leave_type: String,
    pub status: LeaveStatus,
    pub half_day: bool,
    pub half_day_date: Option<NaiveDate>,
}

impl LeaveApplication {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }

    /// Half-day applies to `date` when no specific half-day date was given.
    pub fn is_half_day_on(&self, date: NaiveDate) -> bool {
        self.half_day && self.half_day_date.is_none_or(|d| d == date)
    }
}
