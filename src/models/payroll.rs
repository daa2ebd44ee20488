use super::docstatus::DocStatus;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Business state of a realized payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayrollState {
    Settled,
    SentToAdvisor,
    Paid,
}

impl PayrollState {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PayrollState::Settled => "Settled",
            PayrollState::SentToAdvisor => "Sent to Advisor",
            PayrollState::Paid => "Paid",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Settled" => Some(PayrollState::Settled),
            "Sent to Advisor" => Some(PayrollState::SentToAdvisor),
            "Paid" => Some(PayrollState::Paid),
            _ => None,
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "settled" => Some(PayrollState::Settled),
            "sent" | "sent-to-advisor" => Some(PayrollState::SentToAdvisor),
            "paid" => Some(PayrollState::Paid),
            _ => None,
        }
    }
}

/// A finalized payroll line (liquidación), one per (employee, course, month, year).
#[derive(Debug, Clone, Serialize)]
pub struct PayrollRecord {
    pub id: i64,
    pub record_key: String,
    pub employee: String,
    pub employee_name: String,
    pub company: Option<String>,
    pub course: String,
    pub source_type: String,
    pub source_doc: String,
    pub month: u32,
    pub year: i32,
    pub hours: Decimal,
    pub extra_hours: Decimal,
    pub days_worked: i64,
    pub hourly_rate: Decimal,
    pub extra_rate: Decimal,
    pub gross: Decimal,
    pub vacation_accrual: Decimal,
    pub net_of_vacation: Decimal,
    pub social_security: Decimal,
    pub total: Decimal,
    pub state: PayrollState,
    pub docstatus: DocStatus,
    pub settled_on: NaiveDate,
    pub sent_on: Option<NaiveDate>,
    pub paid_on: Option<NaiveDate>,
    pub last_month: bool,
}
