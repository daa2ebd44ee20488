use rust_decimal::Decimal;
use serde::Serialize;

/// Where the hourly rate of an assignment comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceType {
    JobOffer,
    HrModification,
}

impl SourceType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SourceType::JobOffer => "Job Offer",
            SourceType::HrModification => "HR Modification",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Job Offer" => Some(SourceType::JobOffer),
            "HR Modification" => Some(SourceType::HrModification),
            _ => None,
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "offer" | "job-offer" => Some(SourceType::JobOffer),
            "modification" | "hr-modification" => Some(SourceType::HrModification),
            _ => None,
        }
    }
}

/// A teacher contracted on a course at an hourly rate.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub id: i64,
    pub employee: String,
    pub course: String,
    pub hourly_rate: Decimal,
    pub source_type: SourceType,
    pub source_doc: String,
}
