use crate::core::access::{self, Caller};
use crate::core::calculator::sessions;
use crate::db::pool::DbPool;
use crate::db::{ledger, queries};
use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::models::report_day::{ReportDay, ReportLog};
use crate::utils::date::days_between;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Longest range a report may cover, in days (both ends included).
pub const MAX_REPORT_DAYS: i64 = 366;

/// Day-by-day attendance report of one employee.
pub struct ReportLogic;

impl ReportLogic {
    pub fn build(
        pool: &mut DbPool,
        caller: &Caller,
        employee: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ReportDay>> {
        if from > to {
            return Err(AppError::InvalidDate(format!(
                "--from {} is after --to {}",
                from, to
            )));
        }

        let span = (to - from).num_days() + 1;
        if span > MAX_REPORT_DAYS {
            return Err(AppError::InvalidDate(format!(
                "report range {}..{} covers {} days, at most {} allowed",
                from, to, span, MAX_REPORT_DAYS
            )));
        }

        let conn = &pool.conn;
        let found = queries::load_employee(conn, employee)?;
        let emp = access::authorize_view(caller, found.as_ref(), employee)?;
        let ids = vec![emp.id.clone()];

        let to_exclusive = to.checked_add_days(Days::new(1)).unwrap_or(to);
        let punches = queries::load_punches_between(conn, &ids, from, to_exclusive)?;
        let leaves = queries::load_approved_leaves(conn, &ids, from, to)?;
        let verified = ledger::load_verified_between(conn, &emp.id, from, to)?;

        // one row per calendar day, even without data
        let mut rows: BTreeMap<NaiveDate, ReportDay> = days_between(from, to)
            .into_iter()
            .map(|d| (d, ReportDay::empty(d.format("%Y-%m-%d").to_string())))
            .collect();

        let mut per_day: BTreeMap<NaiveDate, Vec<Punch>> = BTreeMap::new();
        for p in punches {
            per_day.entry(p.date()).or_default().push(p);
        }

        for (date, day_punches) in &per_day {
            let Some(row) = rows.get_mut(date) else {
                continue;
            };

            row.logs = day_punches
                .iter()
                .map(|p| ReportLog {
                    time: p.time_str(),
                    kind: p.kind.to_db_str().to_string(),
                })
                .collect();

            let s = sessions::reconstruct_sessions(day_punches);
            row.hours = sessions::hours_of(&s);
        }

        // HR corrections win over computed values
        for v in verified {
            let Some(row) = rows.get_mut(&v.date) else {
                continue;
            };

            row.hours = v.total_hours;
            row.is_verified = true;
            row.verified_id = Some(v.name.clone());

            let mut logs = Vec::new();
            if let Some(t) = v.in_time {
                logs.push(ReportLog {
                    time: t.format("%H:%M").to_string(),
                    kind: "IN".to_string(),
                });
            }
            if let Some(t) = v.out_time {
                logs.push(ReportLog {
                    time: t.format("%H:%M").to_string(),
                    kind: "OUT".to_string(),
                });
            }
            if !logs.is_empty() {
                row.logs = logs;
            }

            if let Some(rest) = v.rest_time.filter(|r| !r.trim().is_empty()) {
                row.verified_rest_time = Some(rest);
            }
        }

        for leave in &leaves {
            let start = leave.from_date.max(from);
            let end = leave.to_date.min(to);

            for d in days_between(start, end) {
                let Some(row) = rows.get_mut(&d) else {
                    continue;
                };

                let mut note = leave.leave_type.clone();
                if leave.is_half_day_on(d) {
                    note.push_str(" (Half Day)");
                }

                if row.status.is_empty() {
                    row.status = note;
                } else {
                    row.status.push_str(", ");
                    row.status.push_str(&note);
                }
            }
        }

        Ok(rows.into_values().collect())
    }
}
