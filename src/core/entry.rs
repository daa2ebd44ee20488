//! Data entry: employees, punches, calendars, leave and assignments.
//!
//! Every write leaves an audit line in the `log` table.

use crate::core::access::{self, Caller};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::Assignment;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::calendar::MAX_RANGES;
use crate::models::employee::{Employee, EmployeeStatus, OfferStatus};
use crate::models::leave::LeaveApplication;
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

pub struct EntryLogic;

impl EntryLogic {
    // ---------------------------------------------------------------
    // Employees
    // ---------------------------------------------------------------

    pub fn add_employee(pool: &mut DbPool, caller: &Caller, emp: &Employee) -> AppResult<()> {
        access::require_hr(caller, "employee add")?;

        if emp.id.trim().is_empty() || emp.name.trim().is_empty() {
            return Err(AppError::InvalidValue(
                "employee id and name cannot be empty".into(),
            ));
        }

        queries::insert_employee(&pool.conn, emp)?;
        ttlog_soft(
            &pool.conn,
            "add",
            &emp.id,
            &format!("Employee {} ({}) created", emp.id, emp.name),
        );
        Ok(())
    }

    pub fn update_employee(
        pool: &mut DbPool,
        caller: &Caller,
        id: &str,
        status: Option<EmployeeStatus>,
        offer: Option<OfferStatus>,
    ) -> AppResult<()> {
        access::require_hr(caller, "employee offer")?;
        require_employee(pool, id)?;

        queries::update_employee_status(&pool.conn, id, status, offer)?;

        let mut parts = Vec::new();
        if let Some(s) = status {
            parts.push(format!("status={}", s.to_db_str()));
        }
        if let Some(o) = offer {
            parts.push(format!("offer={}", o.to_db_str()));
        }
        ttlog_soft(&pool.conn, "edit", id, &format!("Employee updated: {}", parts.join(", ")));
        Ok(())
    }

    pub fn list_employees(pool: &mut DbPool, caller: &Caller, all: bool) -> AppResult<Vec<Employee>> {
        let employees = queries::load_employees(&pool.conn, !all)?;
        Ok(access::narrow(caller, employees))
    }

    // ---------------------------------------------------------------
    // Punches
    // ---------------------------------------------------------------

    /// Manual punch. Employees may punch for themselves; HR for anybody.
    pub fn add_punch(
        pool: &mut DbPool,
        caller: &Caller,
        employee: &str,
        timestamp: NaiveDateTime,
        kind: PunchKind,
        device: Option<String>,
    ) -> AppResult<i64> {
        let emp = require_employee(pool, employee)?;
        access::authorize_view(caller, Some(&emp), employee)?;

        let mut p = Punch::new(&emp.id, timestamp, kind);
        if device.is_some() {
            p.device_id = device;
            p.source = "device".to_string();
        }

        let id = queries::insert_punch(&pool.conn, &p)?;
        ttlog_soft(
            &pool.conn,
            "add",
            &emp.id,
            &format!("Punch #{} {} at {}", id, kind.to_db_str(), p.to_db_time()),
        );
        Ok(id)
    }

    pub fn list_punches(
        pool: &mut DbPool,
        caller: &Caller,
        employee: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Punch>> {
        let found = queries::load_employee(&pool.conn, employee)?;
        let emp = access::authorize_view(caller, found.as_ref(), employee)?;

        let to_exclusive = to.checked_add_days(Days::new(1)).unwrap_or(to);
        queries::load_punches_between(&pool.conn, &[emp.id.clone()], from, to_exclusive)
    }

    // ---------------------------------------------------------------
    // Holidays / leave
    // ---------------------------------------------------------------

    pub fn add_holiday(
        pool: &mut DbPool,
        caller: &Caller,
        list: &str,
        date: NaiveDate,
        description: &str,
    ) -> AppResult<()> {
        access::require_hr(caller, "holiday add")?;
        queries::insert_holiday(&pool.conn, list, &date, description)?;
        ttlog_soft(&pool.conn, "add", list, &format!("Holiday {} {}", date, description));
        Ok(())
    }

    pub fn add_leave(pool: &mut DbPool, caller: &Caller, leave: &LeaveApplication) -> AppResult<i64> {
        access::require_hr(caller, "leave add")?;
        require_employee(pool, &leave.employee)?;

        if leave.to_date < leave.from_date {
            return Err(AppError::InvalidDate(format!(
                "leave ends ({}) before it starts ({})",
                leave.to_date, leave.from_date
            )));
        }

        let id = queries::insert_leave(&pool.conn, leave)?;
        ttlog_soft(
            &pool.conn,
            "add",
            &leave.employee,
            &format!(
                "Leave #{} {} {}..{} ({})",
                id,
                leave.leave_type,
                leave.from_date,
                leave.to_date,
                leave.status.to_db_str()
            ),
        );
        Ok(id)
    }

    // ---------------------------------------------------------------
    // Attendance
    // ---------------------------------------------------------------

    /// One attendance record per employee-day; a second one is rejected.
    #[allow(clippy::too_many_arguments)]
    pub fn mark_attendance(
        pool: &mut DbPool,
        caller: &Caller,
        employee: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        in_time: Option<NaiveTime>,
        out_time: Option<NaiveTime>,
        late_entry: bool,
        early_exit: bool,
    ) -> AppResult<AttendanceRecord> {
        let emp = require_employee(pool, employee)?;
        access::authorize_view(caller, Some(&emp), employee)?;

        let working_hours = match (in_time, out_time) {
            (Some(i), Some(o)) if o > i => Some((o - i).num_seconds() as f64 / 3600.0),
            _ => None,
        };

        let mut rec = AttendanceRecord {
            id: 0,
            employee: emp.id.clone(),
            date,
            status,
            late_entry,
            early_exit,
            in_time,
            out_time,
            working_hours,
        };

        rec.id = queries::insert_attendance(&pool.conn, &rec)?;
        ttlog_soft(
            &pool.conn,
            "add",
            &emp.id,
            &format!("Attendance {} on {}", status.to_db_str(), date),
        );
        Ok(rec)
    }

    pub fn list_attendance(
        pool: &mut DbPool,
        caller: &Caller,
        employee: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let found = queries::load_employee(&pool.conn, employee)?;
        let emp = access::authorize_view(caller, found.as_ref(), employee)?;
        queries::load_attendance_between(&pool.conn, &[emp.id.clone()], from, to)
    }

    // ---------------------------------------------------------------
    // Courses
    // ---------------------------------------------------------------

    /// Calendar day of a course. Ranges are raw (start, end) strings.
    pub fn add_calendar_slot(
        pool: &mut DbPool,
        caller: &Caller,
        course: &str,
        date: NaiveDate,
        teaching: bool,
        ranges: &[(String, String)],
    ) -> AppResult<i64> {
        access::require_hr(caller, "course slot")?;

        if ranges.len() > MAX_RANGES {
            return Err(AppError::InvalidValue(format!(
                "a calendar day holds at most {} ranges",
                MAX_RANGES
            )));
        }

        let id = queries::insert_calendar_slot(&pool.conn, course, &date, teaching, ranges)?;
        ttlog_soft(
            &pool.conn,
            "add",
            course,
            &format!("Calendar slot #{} on {} ({} ranges)", id, date, ranges.len()),
        );
        Ok(id)
    }

    pub fn assign(pool: &mut DbPool, caller: &Caller, a: &Assignment) -> AppResult<i64> {
        access::require_hr(caller, "course assign")?;
        require_employee(pool, &a.employee)?;

        if a.hourly_rate <= rust_decimal::Decimal::ZERO {
            return Err(AppError::InvalidAmount(a.hourly_rate.to_string()));
        }

        let id = queries::insert_assignment(&pool.conn, a)?;
        ttlog_soft(
            &pool.conn,
            "add",
            &a.employee,
            &format!(
                "Assigned to {} at {}/h ({} {})",
                a.course,
                a.hourly_rate,
                a.source_type.to_db_str(),
                a.source_doc
            ),
        );
        Ok(id)
    }
}

fn require_employee(pool: &DbPool, id: &str) -> AppResult<Employee> {
    queries::load_employee(&pool.conn, id)?.ok_or_else(|| AppError::EmployeeNotFound(id.to_string()))
}
