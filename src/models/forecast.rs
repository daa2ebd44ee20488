use rust_decimal::Decimal;
use serde::Serialize;

/// Money chain derived from a gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayrollAmounts {
    pub gross: Decimal,
    pub vacation_accrual: Decimal,
    pub net_of_vacation: Decimal,
    pub social_security: Decimal,
    pub total: Decimal,
}

/// Hours of one course in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthHours {
    pub seconds: i64,
    pub hours: Decimal,
    pub days_worked: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastLine {
    pub employee: String,
    pub employee_name: String,
    pub company: Option<String>,
    pub course: String,
    pub source_type: String,
    pub source_doc: String,
    pub month: u32,
    pub year: i32,
    pub hours: Decimal,
    pub days_worked: usize,
    pub hourly_rate: Decimal,
    pub extra_rate: Decimal,
    pub gross: Decimal,
    pub vacation_accrual: Decimal,
    pub net_of_vacation: Decimal,
    pub social_security: Decimal,
    pub total: Decimal,
}

impl ForecastLine {
    /// Display reference shared with realized payroll records.
    pub fn key(&self) -> String {
        payroll_key(&self.employee, &self.course, self.month, self.year)
    }
}

/// Display reference of a record. Not unique on its own: uniqueness is
/// enforced on (employee, course, year, month).
pub fn payroll_key(employee: &str, course: &str, month: u32, year: i32) -> String {
    format!("{}-{}-{}-{:02}", employee.trim(), course.trim(), year, month)
}

/// Totals over a set of lines (forecast or realized).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollSummary {
    pub total_employees: usize,
    pub total_lines: usize,
    pub total_hours: Decimal,
    pub total_gross: Decimal,
    pub total_social_security: Decimal,
    pub total_payable: Decimal,
}
