//! Realized records: payroll lines and HR-verified attendance.
//!
//! Money is stored as decimal strings so that amounts read back exactly as
//! they were computed.

use crate::errors::{AppError, AppResult};
use crate::models::docstatus::DocStatus;
use crate::models::payroll::{PayrollRecord, PayrollState};
use crate::models::verified::VerifiedAttendance;
use crate::utils::time::parse_time;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashSet;
use std::str::FromStr;

const DATE_FMT: &str = "%Y-%m-%d";

fn bad(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn get_decimal(row: &Row, col: &str) -> rusqlite::Result<Decimal> {
    let s: String = row.get(col)?;
    Decimal::from_str(s.trim()).map_err(|_| bad(0, AppError::InvalidAmount(s)))
}

fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| bad(0, AppError::InvalidDate(s)))
}

fn get_opt_date(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let s: Option<String> = row.get(col)?;
    Ok(s.and_then(|s| NaiveDate::parse_from_str(&s, DATE_FMT).ok()))
}

fn fmt_date(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

// ---------------------------------------------------------------------------
// Payroll records
// ---------------------------------------------------------------------------

/// Optional filters of `list_payroll`. `None` means "any"; employee and
/// course match on substrings.
#[derive(Debug, Clone, Default)]
pub struct PayrollFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub employee: Option<String>,
    pub course: Option<String>,
    pub state: Option<PayrollState>,
    pub include_cancelled: bool,
}

fn map_payroll(row: &Row) -> rusqlite::Result<PayrollRecord> {
    let state_str: String = row.get("state")?;
    let state = PayrollState::from_db_str(&state_str)
        .ok_or_else(|| bad(0, AppError::InvalidValue(format!("payroll state {}", state_str))))?;

    let ds: i32 = row.get("docstatus")?;
    let docstatus = DocStatus::from_db(ds)
        .ok_or_else(|| bad(0, AppError::InvalidValue(format!("docstatus {}", ds))))?;

    Ok(PayrollRecord {
        id: row.get("id")?,
        record_key: row.get("record_key")?,
        employee: row.get("employee")?,
        employee_name: row.get("employee_name")?,
        company: row.get("company")?,
        course: row.get("course")?,
        source_type: row.get("source_type")?,
        source_doc: row.get("source_doc")?,
        month: row.get("month")?,
        year: row.get("year")?,
        hours: get_decimal(row, "hours")?,
        extra_hours: get_decimal(row, "extra_hours")?,
        days_worked: row.get("days_worked")?,
        hourly_rate: get_decimal(row, "hourly_rate")?,
        extra_rate: get_decimal(row, "extra_rate")?,
        gross: get_decimal(row, "gross")?,
        vacation_accrual: get_decimal(row, "vacation_accrual")?,
        net_of_vacation: get_decimal(row, "net_of_vacation")?,
        social_security: get_decimal(row, "social_security")?,
        total: get_decimal(row, "total")?,
        state,
        docstatus,
        settled_on: get_date(row, "settled_on")?,
        sent_on: get_opt_date(row, "sent_on")?,
        paid_on: get_opt_date(row, "paid_on")?,
        last_month: row.get::<_, i32>("last_month")? == 1,
    })
}

/// Insert a new record. A live record with the same key already present
/// surfaces as `AppError::DuplicateKey`.
pub fn insert_payroll(conn: &Connection, r: &PayrollRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO payroll_records (
            record_key, employee, employee_name, company, course, source_type, source_doc,
            month, year, hours, extra_hours, days_worked, hourly_rate, extra_rate,
            gross, vacation_accrual, net_of_vacation, social_security, total,
            state, docstatus, settled_on, sent_on, paid_on, last_month)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                 ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
        params![
            r.record_key,
            r.employee,
            r.employee_name,
            r.company,
            r.course,
            r.source_type,
            r.source_doc,
            r.month,
            r.year,
            r.hours.to_string(),
            r.extra_hours.to_string(),
            r.days_worked,
            r.hourly_rate.to_string(),
            r.extra_rate.to_string(),
            r.gross.to_string(),
            r.vacation_accrual.to_string(),
            r.net_of_vacation.to_string(),
            r.social_security.to_string(),
            r.total.to_string(),
            r.state.to_db_str(),
            r.docstatus.to_db(),
            fmt_date(&r.settled_on),
            r.sent_on.as_ref().map(fmt_date),
            r.paid_on.as_ref().map(fmt_date),
            r.last_month as i32,
        ],
    )
    .map_err(|e| AppError::from_insert(e, &r.record_key))?;

    Ok(conn.last_insert_rowid())
}

/// Rewrite the hours and money columns of an existing record.
pub fn update_payroll_amounts(conn: &Connection, r: &PayrollRecord) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE payroll_records SET
            employee_name = ?1, company = ?2, source_type = ?3, source_doc = ?4,
            hours = ?5, extra_hours = ?6, days_worked = ?7,
            hourly_rate = ?8, extra_rate = ?9,
            gross = ?10, vacation_accrual = ?11, net_of_vacation = ?12,
            social_security = ?13, total = ?14, settled_on = ?15
         WHERE id = ?16",
        params![
            r.employee_name,
            r.company,
            r.source_type,
            r.source_doc,
            r.hours.to_string(),
            r.extra_hours.to_string(),
            r.days_worked,
            r.hourly_rate.to_string(),
            r.extra_rate.to_string(),
            r.gross.to_string(),
            r.vacation_accrual.to_string(),
            r.net_of_vacation.to_string(),
            r.social_security.to_string(),
            r.total.to_string(),
            fmt_date(&r.settled_on),
            r.id,
        ],
    )?;
    Ok(n)
}

pub fn load_payroll(conn: &Connection, id: i64) -> AppResult<Option<PayrollRecord>> {
    let mut stmt = conn.prepare("SELECT * FROM payroll_records WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_payroll).optional()?)
}

/// The non-cancelled record of an employee and course for a month.
pub fn load_live_payroll(
    conn: &Connection,
    employee: &str,
    course: &str,
    month: u32,
    year: i32,
) -> AppResult<Option<PayrollRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM payroll_records
         WHERE employee = ?1 AND course = ?2 AND month = ?3 AND year = ?4 AND docstatus != 2
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![employee, course, month, year], map_payroll)
        .optional()?)
}

/// (employee, course) pairs already holding a non-cancelled record for a month.
pub fn live_keys(
    conn: &Connection,
    month: u32,
    year: i32,
) -> AppResult<HashSet<(String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT employee, course FROM payroll_records
         WHERE month = ?1 AND year = ?2 AND docstatus != 2",
    )?;
    let rows = stmt.query_map(params![month, year], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

pub fn list_payroll(conn: &Connection, f: &PayrollFilter) -> AppResult<Vec<PayrollRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM payroll_records
         WHERE (?1 IS NULL OR month = ?1)
           AND (?2 IS NULL OR year = ?2)
           AND (?3 IS NULL OR employee LIKE '%' || ?3 || '%')
           AND (?4 IS NULL OR course LIKE '%' || ?4 || '%')
           AND (?5 IS NULL OR state = ?5)
           AND (?6 = 1 OR docstatus != 2)
         ORDER BY year ASC, month ASC, employee ASC, course ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            f.month,
            f.year,
            f.employee,
            f.course,
            f.state.map(|s| s.to_db_str()),
            f.include_cancelled as i32,
        ],
        map_payroll,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_docstatus(conn: &Connection, id: i64, ds: DocStatus) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE payroll_records SET docstatus = ?1 WHERE id = ?2",
        params![ds.to_db(), id],
    )?)
}

/// Move a record to `state`, stamping the matching date column.
pub fn set_state(
    conn: &Connection,
    id: i64,
    state: PayrollState,
    on: Option<NaiveDate>,
) -> AppResult<usize> {
    let on = on.as_ref().map(fmt_date);
    let n = match state {
        PayrollState::Settled => conn.execute(
            "UPDATE payroll_records SET state = ?1 WHERE id = ?2",
            params![state.to_db_str(), id],
        )?,
        PayrollState::SentToAdvisor => conn.execute(
            "UPDATE payroll_records SET state = ?1, sent_on = ?2 WHERE id = ?3",
            params![state.to_db_str(), on, id],
        )?,
        PayrollState::Paid => conn.execute(
            "UPDATE payroll_records SET state = ?1, paid_on = ?2 WHERE id = ?3",
            params![state.to_db_str(), on, id],
        )?,
    };
    Ok(n)
}

// ---------------------------------------------------------------------------
// Verified attendance
// ---------------------------------------------------------------------------

fn map_verified(row: &Row) -> rusqlite::Result<VerifiedAttendance> {
    let in_time: Option<String> = row.get("in_time")?;
    let out_time: Option<String> = row.get("out_time")?;

    Ok(VerifiedAttendance {
        name: row.get("name")?,
        employee: row.get("employee")?,
        date: get_date(row, "date")?,
        total_hours: row.get("total_hours")?,
        in_time: in_time.as_deref().and_then(parse_time),
        out_time: out_time.as_deref().and_then(parse_time),
        rest_time: row.get("rest_time")?,
        owner: row.get("owner")?,
        modified: row.get("modified")?,
    })
}

fn hhmm(t: Option<chrono::NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M").to_string())
}

pub fn insert_verified(conn: &Connection, v: &VerifiedAttendance) -> AppResult<()> {
    conn.execute(
        "INSERT INTO verified_attendance
            (name, employee, date, total_hours, in_time, out_time, rest_time, owner, modified)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            v.name,
            v.employee,
            fmt_date(&v.date),
            v.total_hours,
            hhmm(v.in_time),
            hhmm(v.out_time),
            v.rest_time,
            v.owner,
            v.modified,
        ],
    )
    .map_err(|e| AppError::from_insert(e, &v.name))?;
    Ok(())
}

/// Overwrite the values of an existing verified day. The owner is kept.
pub fn update_verified(conn: &Connection, v: &VerifiedAttendance) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE verified_attendance
         SET total_hours = ?1, in_time = ?2, out_time = ?3, rest_time = ?4, modified = ?5
         WHERE name = ?6",
        params![
            v.total_hours,
            hhmm(v.in_time),
            hhmm(v.out_time),
            v.rest_time,
            v.modified,
            v.name,
        ],
    )?)
}

pub fn load_verified(conn: &Connection, name: &str) -> AppResult<Option<VerifiedAttendance>> {
    let mut stmt = conn.prepare("SELECT * FROM verified_attendance WHERE name = ?1")?;
    Ok(stmt.query_row([name], map_verified).optional()?)
}

pub fn load_verified_between(
    conn: &Connection,
    employee: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<VerifiedAttendance>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM verified_attendance
         WHERE employee = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![employee, fmt_date(&from), fmt_date(&to)],
        map_verified,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
