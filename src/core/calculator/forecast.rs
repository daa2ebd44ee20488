//! Teaching-hour forecast from a course calendar, and the payroll money chain.

use crate::models::assignment::Assignment;
use crate::models::calendar::CalendarSlot;
use crate::models::employee::Employee;
use crate::models::forecast::{ForecastLine, MonthHours, PayrollAmounts};
use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::BTreeSet;

/// Vacation accrual over gross (8.33%).
pub const VACATION_RATE: Decimal = dec!(0.0833);
/// Employer social security over gross minus vacation (32.07%).
pub const SOCIAL_SECURITY_RATE: Decimal = dec!(0.3207);
/// Default overtime rate factor over the hourly rate.
pub const EXTRA_RATE_FACTOR: Decimal = dec!(1.2);

const SECONDS_PER_HOUR: Decimal = dec!(3600);

/// Round money to cents, half away from zero.
pub fn round_money(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum the valid ranges of the teaching days of `month`/`year`.
///
/// Ranges with a missing or unparseable bound, or with end <= start, count as
/// zero. A date counts as worked when it has at least one valid range. The
/// hour total is not rounded.
pub fn month_hours(slots: &[CalendarSlot], month: u32, year: i32) -> MonthHours {
    let mut seconds: i64 = 0;
    let mut dates = BTreeSet::new();

    for slot in slots {
        if slot.date.month() != month || slot.date.year() != year || !slot.is_teaching_day {
            continue;
        }

        for range in &slot.ranges {
            if let Some(secs) = range.valid_seconds() {
                seconds += secs;
                dates.insert(slot.date);
            }
        }
    }

    MonthHours {
        seconds,
        hours: Decimal::from(seconds) / SECONDS_PER_HOUR,
        days_worked: dates.len(),
    }
}

/// Apply the fixed deductions to a gross amount, in order:
/// vacation = round(gross × 8.33%), net = gross − vacation,
/// social security = round(net × 32.07%), total = net + social security.
pub fn derive_amounts(gross: Decimal) -> PayrollAmounts {
    let vacation_accrual = round_money(gross * VACATION_RATE);
    let net_of_vacation = gross - vacation_accrual;
    let social_security = round_money(net_of_vacation * SOCIAL_SECURITY_RATE);
    let total = net_of_vacation + social_security;

    PayrollAmounts {
        gross,
        vacation_accrual,
        net_of_vacation,
        social_security,
        total,
    }
}

/// Gross pay for ordinary plus extra hours, in cents.
pub fn gross_of(hours: Decimal, rate: Decimal, extra_hours: Decimal, extra_rate: Decimal) -> Decimal {
    round_money(hours * rate + extra_hours * extra_rate)
}

/// Forecast line for one assignment. `None` when the month has no hours.
pub fn forecast_line(
    assignment: &Assignment,
    employee: &Employee,
    slots: &[CalendarSlot],
    month: u32,
    year: i32,
) -> Option<ForecastLine> {
    let mh = month_hours(slots, month, year);
    if mh.seconds == 0 {
        return None;
    }

    let rate = assignment.hourly_rate;
    let amounts = derive_amounts(gross_of(mh.hours, rate, Decimal::ZERO, Decimal::ZERO));

    Some(ForecastLine {
        employee: employee.id.clone(),
        employee_name: employee.name.clone(),
        company: employee.company.clone(),
        course: assignment.course.clone(),
        source_type: assignment.source_type.to_db_str().to_string(),
        source_doc: assignment.source_doc.clone(),
        month,
        year,
        hours: mh.hours,
        days_worked: mh.days_worked,
        hourly_rate: rate,
        extra_rate: round_money(rate * EXTRA_RATE_FACTOR),
        gross: amounts.gross,
        vacation_accrual: amounts.vacation_accrual,
        net_of_vacation: amounts.net_of_vacation,
        social_security: amounts.social_security,
        total: amounts.total,
    })
}
