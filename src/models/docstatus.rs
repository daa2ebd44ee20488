use serde::Serialize;

/// Document lifecycle of realized records (0 = draft, 1 = submitted, 2 = cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocStatus {
    Draft,
    Submitted,
    Cancelled,
}

impl DocStatus {
    pub fn to_db(&self) -> i32 {
        match self {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }

    pub fn from_db(v: i32) -> Option<Self> {
        match v {
            0 => Some(DocStatus::Draft),
            1 => Some(DocStatus::Submitted),
            2 => Some(DocStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DocStatus::Cancelled)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocStatus::Draft => "Draft",
            DocStatus::Submitted => "Submitted",
            DocStatus::Cancelled => "Cancelled",
        }
    }
}
