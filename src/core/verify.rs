use crate::core::access::{self, Caller};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::{ledger, queries};
use crate::errors::{AppError, AppResult};
use crate::models::verified::{VerifiedAttendance, verified_key};
use chrono::{Local, NaiveDate, NaiveTime};

/// Outcome of a verify run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Created,
    Updated,
}

pub struct VerifyLogic;

impl VerifyLogic {
    /// Record the HR-verified hours of one employee-day. One row per
    /// (employee, date): a second run overwrites the first.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        pool: &mut DbPool,
        caller: &Caller,
        employee: &str,
        date: NaiveDate,
        total_hours: f64,
        in_time: Option<NaiveTime>,
        out_time: Option<NaiveTime>,
        rest_time: Option<String>,
    ) -> AppResult<(VerifyOutcome, VerifiedAttendance)> {
        access::require_hr(caller, "verify")?;

        if !total_hours.is_finite() || total_hours < 0.0 {
            return Err(AppError::InvalidValue(format!(
                "hours must be a non-negative number, got {}",
                total_hours
            )));
        }

        if let (Some(i), Some(o)) = (in_time, out_time)
            && o < i
        {
            return Err(AppError::InvalidTime(format!(
                "verified out time {} is before in time {}",
                o.format("%H:%M"),
                i.format("%H:%M")
            )));
        }

        let conn = &pool.conn;
        if queries::load_employee(conn, employee)?.is_none() {
            return Err(AppError::EmployeeNotFound(employee.to_string()));
        }

        let name = verified_key(employee, &date);
        let now = Local::now().to_rfc3339();

        let mut record = VerifiedAttendance {
            name: name.clone(),
            employee: employee.trim().to_string(),
            date,
            total_hours,
            in_time,
            out_time,
            rest_time: rest_time.filter(|r| !r.trim().is_empty()),
            owner: caller.user.clone(),
            modified: now,
        };

        // check first, then insert; a concurrent insert is caught by the key
        let existing = ledger::load_verified(conn, &name)?;

        let outcome = match existing {
            Some(prev) => {
                record.owner = prev.owner;
                ledger::update_verified(conn, &record)?;
                VerifyOutcome::Updated
            }
            None => match ledger::insert_verified(conn, &record) {
                Ok(()) => VerifyOutcome::Created,
                Err(AppError::DuplicateKey(_)) => {
                    ledger::update_verified(conn, &record)?;
                    VerifyOutcome::Updated
                }
                Err(e) => return Err(e),
            },
        };

        let op = match outcome {
            VerifyOutcome::Created => "add",
            VerifyOutcome::Updated => "edit",
        };
        ttlog_soft(
            conn,
            op,
            &name,
            &format!("Verified {:.2} hours for {} on {}", total_hours, employee, date),
        );

        Ok((outcome, record))
    }
}
