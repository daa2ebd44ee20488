use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Left,
}

impl EmployeeStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
            EmployeeStatus::Left => "Left",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(EmployeeStatus::Active),
            "Inactive" => Some(EmployeeStatus::Inactive),
            "Left" => Some(EmployeeStatus::Left),
            _ => None,
        }
    }

    /// CLI input, case-insensitive.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(EmployeeStatus::Active),
            "inactive" => Some(EmployeeStatus::Inactive),
            "left" => Some(EmployeeStatus::Left),
            _ => None,
        }
    }
}

/// Status of the job offer an employee was hired through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

impl OfferStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "Pending",
            OfferStatus::Accepted => "Accepted",
            OfferStatus::Rejected => "Rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(OfferStatus::Pending),
            "Accepted" => Some(OfferStatus::Accepted),
            "Rejected" => Some(OfferStatus::Rejected),
            _ => None,
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OfferStatus::Pending),
            "accepted" => Some(OfferStatus::Accepted),
            "rejected" => Some(OfferStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub status: EmployeeStatus,
    pub company: Option<String>,
    pub department: Option<String>,
    pub holiday_list: Option<String>,
    pub user_id: Option<String>,
    pub offer_status: Option<OfferStatus>,
    pub date_of_joining: Option<NaiveDate>,
}

impl Employee {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: EmployeeStatus::Active,
            company: None,
            department: None,
            holiday_list: None,
            user_id: None,
            offer_status: None,
            date_of_joining: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    pub fn has_accepted_offer(&self) -> bool {
        self.offer_status == Some(OfferStatus::Accepted)
    }
}
