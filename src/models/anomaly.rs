use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AnomalyKind {
    MissingPunch,
    WorkOnHoliday,
    WorkOnLeave,
    ExcessiveContinuousWork,
    NoBreak,
    LateEntry,
    EarlyExit,
    Absent,
    GhostEmployee,
}

impl AnomalyKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyKind::MissingPunch => "Missing Punch",
            AnomalyKind::WorkOnHoliday => "Work on Holiday",
            AnomalyKind::WorkOnLeave => "Work on Leave",
            AnomalyKind::ExcessiveContinuousWork => "Excessive Continuous Work",
            AnomalyKind::NoBreak => "No Break",
            AnomalyKind::LateEntry => "Late Entry",
            AnomalyKind::EarlyExit => "Early Exit",
            AnomalyKind::Absent => "Absent",
            AnomalyKind::GhostEmployee => "Ghost Employee",
        }
    }

    /// Every kind has a fixed severity.
    pub fn severity(&self) -> Severity {
        match self {
            AnomalyKind::LateEntry | AnomalyKind::EarlyExit => Severity::Low,
            AnomalyKind::WorkOnHoliday | AnomalyKind::WorkOnLeave | AnomalyKind::NoBreak => {
                Severity::Medium
            }
            AnomalyKind::MissingPunch
            | AnomalyKind::ExcessiveContinuousWork
            | AnomalyKind::Absent => Severity::High,
            AnomalyKind::GhostEmployee => Severity::Critical,
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(s)
    }
}

/// A detected attendance exception. Computed per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub employee: String,
    pub employee_name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub description: String,
    pub severity: Severity,
}

impl Anomaly {
    pub fn new(
        employee: &str,
        employee_name: &str,
        date: NaiveDate,
        kind: AnomalyKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            employee: employee.to_string(),
            employee_name: employee_name.to_string(),
            date,
            kind,
            description: description.into(),
            severity: kind.severity(),
        }
    }
}
