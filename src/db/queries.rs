//! Reads and writes for people and time data: employees, punches,
//! attendance, leaves, holidays, course calendars and assignments.

use crate::errors::{AppError, AppResult};
use crate::models::assignment::{Assignment, SourceType};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::calendar::{CalendarSlot, MAX_RANGES, TimeRange};
use crate::models::employee::{Employee, EmployeeStatus, OfferStatus};
use crate::models::leave::{LeaveApplication, LeaveStatus};
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use crate::ui::messages::warning;
use crate::utils::time::{parse_time, parse_timestamp};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

const DATE_FMT: &str = "%Y-%m-%d";

fn fmt_date(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

fn conversion_err(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| conversion_err(0, AppError::InvalidDate(s)))
}

fn get_opt_date(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let s: Option<String> = row.get(col)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(&s, DATE_FMT)
            .map(Some)
            .map_err(|_| conversion_err(0, AppError::InvalidDate(s))),
        _ => Ok(None),
    }
}

fn get_opt_time(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveTime>> {
    let s: Option<String> = row.get(col)?;
    Ok(s.as_deref().and_then(parse_time))
}

/// "?, ?, ?" for dynamic IN (...) lists
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    let status_str: String = row.get("status")?;
    let status = EmployeeStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_err(0, AppError::InvalidValue(format!("employee status {}", status_str)))
    })?;

    let offer: Option<String> = row.get("offer_status")?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        status,
        company: row.get("company")?,
        department: row.get("department")?,
        holiday_list: row.get("holiday_list")?,
        user_id: row.get("user_id")?,
        offer_status: offer.as_deref().and_then(OfferStatus::from_db_str),
        date_of_joining: get_opt_date(row, "date_of_joining")?,
    })
}

pub fn insert_employee(conn: &Connection, e: &Employee) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (id, name, status, company, department, holiday_list, user_id, offer_status, date_of_joining)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            e.id,
            e.name,
            e.status.to_db_str(),
            e.company,
            e.department,
            e.holiday_list,
            e.user_id,
            e.offer_status.map(|o| o.to_db_str()),
            e.date_of_joining.as_ref().map(fmt_date),
        ],
    )
    .map_err(|err| AppError::from_insert(err, &e.id))?;
    Ok(())
}

pub fn update_employee_status(
    conn: &Connection,
    id: &str,
    status: Option<EmployeeStatus>,
    offer: Option<OfferStatus>,
) -> AppResult<usize> {
    let mut changed = 0;
    if let Some(s) = status {
        changed += conn.execute(
            "UPDATE employees SET status = ?1 WHERE id = ?2",
            params![s.to_db_str(), id],
        )?;
    }
    if let Some(o) = offer {
        changed += conn.execute(
            "UPDATE employees SET offer_status = ?1 WHERE id = ?2",
            params![o.to_db_str(), id],
        )?;
    }
    Ok(changed)
}

pub fn load_employee(conn: &Connection, id: &str) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE id = ?1")?;
    Ok(stmt.query_row([id.trim()], map_employee).optional()?)
}

pub fn load_employees(conn: &Connection, active_only: bool) -> AppResult<Vec<Employee>> {
    let sql = if active_only {
        "SELECT * FROM employees WHERE status = 'Active' ORDER BY id ASC"
    } else {
        "SELECT * FROM employees ORDER BY id ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Punches
// ---------------------------------------------------------------------------

pub fn insert_punch(conn: &Connection, p: &Punch) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO punches (employee, time, kind, device_id, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.employee,
            p.to_db_time(),
            p.kind.to_db_str(),
            p.device_id,
            p.source,
            p.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Raw punch row; the timestamp is parsed afterwards so that one bad row
/// does not abort a whole report.
struct RawPunch {
    id: i64,
    employee: String,
    time: String,
    kind: String,
    device_id: Option<String>,
    source: String,
    created_at: String,
}

fn map_raw_punch(row: &Row) -> rusqlite::Result<RawPunch> {
    Ok(RawPunch {
        id: row.get("id")?,
        employee: row.get("employee")?,
        time: row.get("time")?,
        kind: row.get("kind")?,
        device_id: row.get("device_id")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

/// Punches of `employees` with `from <= time < to_exclusive`, ordered by time.
/// Rows flagged `skip_auto_attendance` are ignored; unparseable rows are
/// skipped with a warning.
pub fn load_punches_between(
    conn: &Connection,
    employees: &[String],
    from: NaiveDate,
    to_exclusive: NaiveDate,
) -> AppResult<Vec<Punch>> {
    if employees.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT * FROM punches
         WHERE employee IN ({})
           AND time >= ? AND time < ?
           AND skip_auto_attendance = 0
         ORDER BY time ASC, id ASC",
        placeholders(employees.len())
    );

    let mut args: Vec<String> = employees.to_vec();
    args.push(fmt_date(&from));
    args.push(fmt_date(&to_exclusive));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_raw_punch)?;

    let mut out = Vec::new();
    let mut skipped = 0;

    for r in rows {
        let raw = r?;
        let (Some(timestamp), Some(kind)) =
            (parse_timestamp(&raw.time), PunchKind::from_db_str(&raw.kind))
        else {
            skipped += 1;
            continue;
        };

        out.push(Punch {
            id: raw.id,
            employee: raw.employee,
            timestamp,
            kind,
            device_id: raw.device_id,
            source: raw.source,
            created_at: raw.created_at,
        });
    }

    if skipped > 0 {
        warning(format!("Skipped {} malformed punch row(s).", skipped));
    }

    Ok(out)
}

/// Employees with at least one punch in the whole history.
pub fn employees_with_punches(conn: &Connection) -> AppResult<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT employee FROM punches")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

fn map_attendance(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_err(0, AppError::InvalidValue(format!("attendance status {}", status_str)))
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        employee: row.get("employee")?,
        date: get_date(row, "date")?,
        status,
        late_entry: row.get::<_, i32>("late_entry")? == 1,
        early_exit: row.get::<_, i32>("early_exit")? == 1,
        in_time: get_opt_time(row, "in_time")?,
        out_time: get_opt_time(row, "out_time")?,
        working_hours: row.get("working_hours")?,
    })
}

pub fn insert_attendance(conn: &Connection, a: &AttendanceRecord) -> AppResult<i64> {
    let key = format!("{} on {}", a.employee, fmt_date(&a.date));

    conn.execute(
        "INSERT INTO attendance (employee, date, status, late_entry, early_exit, in_time, out_time, working_hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            a.employee,
            fmt_date(&a.date),
            a.status.to_db_str(),
            a.late_entry as i32,
            a.early_exit as i32,
            a.in_time.map(|t| t.format("%H:%M").to_string()),
            a.out_time.map(|t| t.format("%H:%M").to_string()),
            a.working_hours,
        ],
    )
    .map_err(|e| match AppError::from_insert(e, &key) {
        AppError::DuplicateKey(k) => AppError::AttendanceExists(k),
        other => other,
    })?;

    Ok(conn.last_insert_rowid())
}

pub fn load_attendance_between(
    conn: &Connection,
    employees: &[String],
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    if employees.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT * FROM attendance
         WHERE employee IN ({})
           AND date BETWEEN ? AND ?
         ORDER BY date DESC",
        placeholders(employees.len())
    );

    let mut args: Vec<String> = employees.to_vec();
    args.push(fmt_date(&from));
    args.push(fmt_date(&to));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

fn map_leave(row: &Row) -> rusqlite::Result<LeaveApplication> {
    let status_str: String = row.get("status")?;
    let status = LeaveStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_err(0, AppError::InvalidValue(format!("leave status {}", status_str)))
    })?;

    Ok(LeaveApplication {
        id: row.get("id")?,
        employee: row.get("employee")?,
        from_date: get_date(row, "from_date")?,
        to_date: get_date(row, "to_date")?,
        leave_type: row.get("leave_type")?,
        status,
        half_day: row.get::<_, i32>("half_day")? == 1,
        half_day_date: get_opt_date(row, "half_day_date")?,
    })
}

pub fn insert_leave(conn: &Connection, l: &LeaveApplication) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO leaves (employee, from_date, to_date, leave_type, status, half_day, half_day_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            l.employee,
            fmt_date(&l.from_date),
            fmt_date(&l.to_date),
            l.leave_type,
            l.status.to_db_str(),
            l.half_day as i32,
            l.half_day_date.as_ref().map(fmt_date),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Approved leave of `employees` overlapping [from, to].
pub fn load_approved_leaves(
    conn: &Connection,
    employees: &[String],
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<LeaveApplication>> {
    if employees.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT * FROM leaves
         WHERE employee IN ({})
           AND status = 'Approved'
           AND from_date <= ? AND to_date >= ?
         ORDER BY from_date ASC, id ASC",
        placeholders(employees.len())
    );

    let mut args: Vec<String> = employees.to_vec();
    args.push(fmt_date(&to));
    args.push(fmt_date(&from));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_leave)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Holidays
// ---------------------------------------------------------------------------

pub fn insert_holiday(conn: &Connection, list: &str, date: &NaiveDate, description: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO holidays (holiday_list, date, description) VALUES (?1, ?2, ?3)",
        params![list, fmt_date(date), description],
    )
    .map_err(|e| AppError::from_insert(e, &format!("{} {}", list, fmt_date(date))))?;
    Ok(())
}

/// Holiday dates in [from, to] grouped by holiday list.
pub fn load_holidays(
    conn: &Connection,
    lists: &[String],
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<HashMap<String, HashSet<NaiveDate>>> {
    let mut out: HashMap<String, HashSet<NaiveDate>> = HashMap::new();
    if lists.is_empty() {
        return Ok(out);
    }

    let sql = format!(
        "SELECT holiday_list, date FROM holidays
         WHERE holiday_list IN ({})
           AND date BETWEEN ? AND ?",
        placeholders(lists.len())
    );

    let mut args: Vec<String> = lists.to_vec();
    args.push(fmt_date(&from));
    args.push(fmt_date(&to));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    for r in rows {
        let (list, d) = r?;
        if let Ok(date) = NaiveDate::parse_from_str(&d, DATE_FMT) {
            out.entry(list).or_default().insert(date);
        }
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Course calendars
// ---------------------------------------------------------------------------

/// Store a calendar day. Bounds are kept verbatim: malformed ones are
/// accepted and simply contribute zero hours when forecasting.
pub fn insert_calendar_slot(
    conn: &Connection,
    course: &str,
    date: &NaiveDate,
    teaching: bool,
    ranges: &[(String, String)],
) -> AppResult<i64> {
    if ranges.len() > MAX_RANGES {
        return Err(AppError::InvalidValue(format!(
            "at most {} time ranges per day, got {}",
            MAX_RANGES,
            ranges.len()
        )));
    }

    let mut bounds: Vec<Option<String>> = Vec::with_capacity(MAX_RANGES * 2);
    for i in 0..MAX_RANGES {
        match ranges.get(i) {
            Some((s, e)) => {
                bounds.push((!s.is_empty()).then(|| s.clone()));
                bounds.push((!e.is_empty()).then(|| e.clone()));
            }
            None => {
                bounds.push(None);
                bounds.push(None);
            }
        }
    }

    conn.execute(
        "INSERT INTO calendar_slots (course, date, teaching,
            start_1, end_1, start_2, end_2, start_3, end_3,
            start_4, end_4, start_5, end_5, start_6, end_6)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            course,
            fmt_date(date),
            teaching as i32,
            bounds[0],
            bounds[1],
            bounds[2],
            bounds[3],
            bounds[4],
            bounds[5],
            bounds[6],
            bounds[7],
            bounds[8],
            bounds[9],
            bounds[10],
            bounds[11],
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

fn map_slot(row: &Row) -> rusqlite::Result<Option<CalendarSlot>> {
    let date_str: String = row.get("date")?;
    let Ok(date) = NaiveDate::parse_from_str(&date_str, DATE_FMT) else {
        return Ok(None);
    };

    let mut ranges = Vec::with_capacity(MAX_RANGES);
    for i in 1..=MAX_RANGES {
        let start = get_opt_time(row, &format!("start_{}", i))?;
        let end = get_opt_time(row, &format!("end_{}", i))?;
        ranges.push(TimeRange { start, end });
    }

    Ok(Some(CalendarSlot {
        course: row.get("course")?,
        date,
        is_teaching_day: row.get::<_, i32>("teaching")? == 1,
        ranges,
    }))
}

pub fn load_calendar(conn: &Connection, course: &str) -> AppResult<Vec<CalendarSlot>> {
    let mut stmt =
        conn.prepare("SELECT * FROM calendar_slots WHERE course = ?1 ORDER BY date ASC, id ASC")?;
    let rows = stmt.query_map([course], map_slot)?;

    let mut out = Vec::new();
    for r in rows {
        if let Some(slot) = r? {
            out.push(slot);
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

fn map_assignment(row: &Row) -> rusqlite::Result<Assignment> {
    let rate_str: String = row.get("hourly_rate")?;
    let hourly_rate = Decimal::from_str(&rate_str)
        .map_err(|_| conversion_err(0, AppError::InvalidAmount(rate_str.clone())))?;

    let st: String = row.get("source_type")?;
    let source_type = SourceType::from_db_str(&st)
        .ok_or_else(|| conversion_err(0, AppError::InvalidValue(format!("source type {}", st))))?;

    Ok(Assignment {
        id: row.get("id")?,
        employee: row.get("employee")?,
        course: row.get("course")?,
        hourly_rate,
        source_type,
        source_doc: row.get("source_doc")?,
    })
}

pub fn insert_assignment(conn: &Connection, a: &Assignment) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO assignments (employee, course, hourly_rate, source_type, source_doc)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            a.employee,
            a.course,
            a.hourly_rate.to_string(),
            a.source_type.to_db_str(),
            a.source_doc,
        ],
    )
    .map_err(|e| AppError::from_insert(e, &format!("{} / {}", a.employee, a.course)))?;
    Ok(conn.last_insert_rowid())
}

/// Assignments with a positive rate, optionally for one employee.
pub fn load_assignments(conn: &Connection, employee: Option<&str>) -> AppResult<Vec<Assignment>> {
    let mut out = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT * FROM assignments
         WHERE (?1 IS NULL OR employee = ?1)
         ORDER BY employee ASC, course ASC, id ASC",
    )?;
    let rows = stmt.query_map([employee], map_assignment)?;

    for r in rows {
        let a = r?;
        if a.hourly_rate > Decimal::ZERO {
            out.push(a);
        }
    }
    Ok(out)
}
