use serde::{Deserialize, Serialize};

/// Direction of a punch recorded by a time clock or by hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchKind {
    In,
    Out,
}

impl PunchKind {
    /// Parse user input ("in", "IN", "out", ...).
    pub fn pk_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::In => "IN",
            PunchKind::Out => "OUT",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "IN" => Some(PunchKind::In),
            "OUT" => Some(PunchKind::Out),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, PunchKind::In)
    }

    pub fn is_out(&self) -> bool {
        matches!(self, PunchKind::Out)
    }
}
