//! Monthly payroll forecast and the lifecycle of realized payroll records.

use crate::core::access::{self, Caller};
use crate::core::calculator::forecast::{self, derive_amounts, gross_of};
use crate::db::ledger::{self, PayrollFilter};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::calendar::CalendarSlot;
use crate::models::docstatus::DocStatus;
use crate::models::forecast::{ForecastLine, PayrollSummary};
use crate::models::payroll::{PayrollRecord, PayrollState};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Counts returned by the batch operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub updated: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeOutcome {
    pub created: usize,
    pub updated: usize,
    /// Existing records already sent or paid, left untouched.
    pub locked: usize,
}

pub struct PayrollLogic;

impl PayrollLogic {
    /// Forecast lines of a month, without the ones already finalized.
    pub fn forecast(
        pool: &mut DbPool,
        caller: &Caller,
        month: u32,
        year: i32,
        employee: Option<&str>,
        course: Option<&str>,
    ) -> AppResult<(Vec<ForecastLine>, PayrollSummary)> {
        access::require_hr(caller, "forecast")?;
        check_period(month, year)?;

        let conn = &pool.conn;
        let finalized = ledger::live_keys(conn, month, year)?;

        let lines: Vec<ForecastLine> = raw_forecast(conn, month, year, employee, course)?
            .into_iter()
            .filter(|l| !finalized.contains(&(l.employee.clone(), l.course.clone())))
            .collect();

        let summary = summarize(
            lines
                .iter()
                .map(|l| (l.employee.as_str(), l.hours, l.gross, l.social_security, l.total)),
        );

        Ok((lines, summary))
    }

    /// Turn the forecast of a month into realized records, one per
    /// (employee, course, month, year).
    /// Existing live records are recomputed in place; their extra hours stay.
    #[allow(clippy::too_many_arguments)]
    pub fn finalize(
        pool: &mut DbPool,
        caller: &Caller,
        month: u32,
        year: i32,
        employee: Option<&str>,
        course: Option<&str>,
        draft: bool,
        last_month: bool,
        today: NaiveDate,
    ) -> AppResult<FinalizeOutcome> {
        access::require_hr(caller, "payroll finalize")?;
        check_period(month, year)?;

        let tx = pool.conn.transaction()?;
        let lines = raw_forecast(&tx, month, year, employee, course)?;
        let mut outcome = FinalizeOutcome::default();

        for line in &lines {
            let mut rec = record_from_line(line, today, draft, last_month);

            // insert first; the partial unique index decides whether a live
            // record already holds the period
            match ledger::insert_payroll(&tx, &rec) {
                Ok(id) => {
                    outcome.created += 1;
                    ttlog_soft(
                        &tx,
                        "add",
                        &rec.record_key,
                        &format!("Payroll record #{} created ({} h, total {})", id, rec.hours, rec.total),
                    );
                }
                Err(AppError::DuplicateKey(key)) => {
                    let existing =
                        ledger::load_live_payroll(&tx, &rec.employee, &rec.course, rec.month, rec.year)?;
                    let Some(existing) = existing else {
                        return Err(AppError::Payroll(format!(
                            "key {} reported as duplicate but no live record found",
                            key
                        )));
                    };

                    if existing.state != PayrollState::Settled {
                        outcome.locked += 1;
                        continue;
                    }

                    rec.id = existing.id;
                    rec.extra_hours = existing.extra_hours;
                    rec.extra_rate = existing.extra_rate;
                    apply_amounts(&mut rec);

                    ledger::update_payroll_amounts(&tx, &rec)?;
                    outcome.updated += 1;
                    ttlog_soft(
                        &tx,
                        "edit",
                        &rec.record_key,
                        &format!("Payroll record #{} recomputed ({} h, total {})", rec.id, rec.hours, rec.total),
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tx.commit()?;
        Ok(outcome)
    }

    pub fn list(
        pool: &mut DbPool,
        caller: &Caller,
        filter: &PayrollFilter,
    ) -> AppResult<(Vec<PayrollRecord>, PayrollSummary)> {
        access::require_hr(caller, "payroll list")?;

        let records = ledger::list_payroll(&pool.conn, filter)?;
        let summary = summarize(records.iter().filter(|r| !r.docstatus.is_cancelled()).map(|r| {
            (
                r.employee.as_str(),
                r.hours + r.extra_hours,
                r.gross,
                r.social_security,
                r.total,
            )
        }));

        Ok((records, summary))
    }

    /// Overtime on a draft record. The gross includes ordinary and extra hours.
    pub fn set_extra_hours(
        pool: &mut DbPool,
        caller: &Caller,
        id: i64,
        extra_hours: Decimal,
        extra_rate: Option<Decimal>,
    ) -> AppResult<PayrollRecord> {
        access::require_hr(caller, "payroll extra")?;

        if extra_hours < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!("extra hours {}", extra_hours)));
        }
        if let Some(r) = extra_rate
            && r <= Decimal::ZERO
        {
            return Err(AppError::InvalidAmount(format!("extra rate {}", r)));
        }

        let conn = &pool.conn;
        let mut rec = load_existing(conn, id)?;

        if rec.docstatus != DocStatus::Draft {
            return Err(AppError::Payroll(format!(
                "record #{} is {}: extra hours can only change on drafts",
                id,
                rec.docstatus.label()
            )));
        }

        rec.extra_hours = extra_hours;
        if let Some(r) = extra_rate {
            rec.extra_rate = r;
        }
        apply_amounts(&mut rec);

        ledger::update_payroll_amounts(conn, &rec)?;
        ttlog_soft(
            conn,
            "edit",
            &rec.record_key,
            &format!(
                "Extra hours set to {} at {} (total {})",
                rec.extra_hours, rec.extra_rate, rec.total
            ),
        );

        Ok(rec)
    }

    pub fn submit(pool: &mut DbPool, caller: &Caller, ids: &[i64]) -> AppResult<BatchOutcome> {
        access::require_hr(caller, "payroll submit")?;
        Self::each(pool, ids, |conn, rec| {
            if rec.docstatus != DocStatus::Draft {
                return Ok(false);
            }
            ledger::set_docstatus(conn, rec.id, DocStatus::Submitted)?;
            ttlog_soft(conn, "edit", &rec.record_key, "Payroll record submitted");
            Ok(true)
        })
    }

    pub fn mark_sent(
        pool: &mut DbPool,
        caller: &Caller,
        ids: &[i64],
        on: NaiveDate,
    ) -> AppResult<BatchOutcome> {
        access::require_hr(caller, "payroll sent")?;
        Self::each(pool, ids, |conn, rec| {
            if rec.docstatus != DocStatus::Submitted {
                return Ok(false);
            }
            ledger::set_state(conn, rec.id, PayrollState::SentToAdvisor, Some(on))?;
            ttlog_soft(
                conn,
                "edit",
                &rec.record_key,
                &format!("Payroll record sent to advisor on {}", on),
            );
            Ok(true)
        })
    }

    pub fn mark_paid(
        pool: &mut DbPool,
        caller: &Caller,
        ids: &[i64],
        on: NaiveDate,
    ) -> AppResult<BatchOutcome> {
        access::require_hr(caller, "payroll paid")?;
        Self::each(pool, ids, |conn, rec| {
            if rec.docstatus != DocStatus::Submitted {
                return Ok(false);
            }
            ledger::set_state(conn, rec.id, PayrollState::Paid, Some(on))?;
            ttlog_soft(
                conn,
                "edit",
                &rec.record_key,
                &format!("Payroll record paid on {}", on),
            );
            Ok(true)
        })
    }

    /// Cancel records. A cancelled record no longer holds its key.
    pub fn cancel(pool: &mut DbPool, caller: &Caller, ids: &[i64]) -> AppResult<BatchOutcome> {
        access::require_hr(caller, "payroll cancel")?;
        Self::each(pool, ids, |conn, rec| {
            if rec.docstatus.is_cancelled() {
                return Ok(false);
            }
            ledger::set_docstatus(conn, rec.id, DocStatus::Cancelled)?;
            ttlog_soft(conn, "del", &rec.record_key, "Payroll record cancelled");
            Ok(true)
        })
    }

    /// Apply `op` to every id; `op` returns false when the record is skipped.
    fn each<F>(pool: &mut DbPool, ids: &[i64], mut op: F) -> AppResult<BatchOutcome>
    where
        F: FnMut(&Connection, &PayrollRecord) -> AppResult<bool>,
    {
        let tx = pool.conn.transaction()?;
        let mut outcome = BatchOutcome::default();

        for id in ids {
            let applied = match ledger::load_payroll(&tx, *id)? {
                Some(rec) => op(&*tx, &rec)?,
                None => false,
            };
            if applied {
                outcome.updated += 1;
            } else {
                outcome.skipped += 1;
            }
        }

        tx.commit()?;
        Ok(outcome)
    }
}

fn check_period(month: u32, year: i32) -> AppResult<()> {
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidMonth(month.to_string()));
    }
    if !(1900..=9999).contains(&year) {
        return Err(AppError::InvalidValue(format!("year {}", year)));
    }
    Ok(())
}

fn load_existing(conn: &Connection, id: i64) -> AppResult<PayrollRecord> {
    ledger::load_payroll(conn, id)?
        .ok_or_else(|| AppError::Payroll(format!("payroll record #{} not found", id)))
}

/// Forecast lines of active employees, no idempotence filtering.
fn raw_forecast(
    conn: &Connection,
    month: u32,
    year: i32,
    employee: Option<&str>,
    course: Option<&str>,
) -> AppResult<Vec<ForecastLine>> {
    let assignments = queries::load_assignments(conn, employee)?;

    let employees: HashMap<String, _> = queries::load_employees(conn, true)?
        .into_iter()
        .map(|e| (e.id.clone(), e))
        .collect();

    let mut calendars: HashMap<String, Vec<CalendarSlot>> = HashMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut lines = Vec::new();

    for a in &assignments {
        if let Some(c) = course
            && a.course != c
        {
            continue;
        }

        let Some(emp) = employees.get(&a.employee) else {
            continue;
        };

        if !calendars.contains_key(&a.course) {
            calendars.insert(a.course.clone(), queries::load_calendar(conn, &a.course)?);
        }
        let slots = calendars.get(&a.course).map(Vec::as_slice).unwrap_or(&[]);

        if let Some(line) = forecast::forecast_line(a, emp, slots, month, year) {
            // one line per employee and course even if assigned twice
            if seen.insert((line.employee.clone(), line.course.clone())) {
                lines.push(line);
            }
        }
    }

    Ok(lines)
}

fn record_from_line(line: &ForecastLine, today: NaiveDate, draft: bool, last_month: bool) -> PayrollRecord {
    PayrollRecord {
        id: 0,
        record_key: line.key(),
        employee: line.employee.clone(),
        employee_name: line.employee_name.clone(),
        company: line.company.clone(),
        course: line.course.clone(),
        source_type: line.source_type.clone(),
        source_doc: line.source_doc.clone(),
        month: line.month,
        year: line.year,
        hours: line.hours,
        extra_hours: Decimal::ZERO,
        days_worked: line.days_worked as i64,
        hourly_rate: line.hourly_rate,
        extra_rate: line.extra_rate,
        gross: line.gross,
        vacation_accrual: line.vacation_accrual,
        net_of_vacation: line.net_of_vacation,
        social_security: line.social_security,
        total: line.total,
        state: PayrollState::Settled,
        docstatus: if draft {
            DocStatus::Draft
        } else {
            DocStatus::Submitted
        },
        settled_on: today,
        sent_on: None,
        paid_on: None,
        last_month,
    }
}

/// Recompute gross and the deduction chain from hours and rates.
fn apply_amounts(rec: &mut PayrollRecord) {
    let a = derive_amounts(gross_of(
        rec.hours,
        rec.hourly_rate,
        rec.extra_hours,
        rec.extra_rate,
    ));
    rec.gross = a.gross;
    rec.vacation_accrual = a.vacation_accrual;
    rec.net_of_vacation = a.net_of_vacation;
    rec.social_security = a.social_security;
    rec.total = a.total;
}

/// Totals over (employee, hours, gross, social security, total) tuples.
pub fn summarize<'a, I>(lines: I) -> PayrollSummary
where
    I: IntoIterator<Item = (&'a str, Decimal, Decimal, Decimal, Decimal)>,
{
    let mut employees = HashSet::new();
    let mut s = PayrollSummary::default();

    for (emp, hours, gross, ss, total) in lines {
        employees.insert(emp);
        s.total_lines += 1;
        s.total_hours += hours;
        s.total_gross += gross;
        s.total_social_security += ss;
        s.total_payable += total;
    }

    s.total_employees = employees.len();
    s
}
