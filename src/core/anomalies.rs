use crate::core::access::{self, Caller};
use crate::core::calculator::{anomalies, ghost};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::anomaly::Anomaly;
use crate::models::day_context::DayInput;
use crate::models::employee::Employee;
use chrono::{Days, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Loads the data of a date range and runs the anomaly rules over it.
pub struct AnomalyLogic;

impl AnomalyLogic {
    pub fn run(
        pool: &mut DbPool,
        caller: &Caller,
        from: NaiveDate,
        to: NaiveDate,
        employee: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Vec<Anomaly>> {
        if from > to {
            return Err(AppError::InvalidDate(format!(
                "--from {} is after --to {}",
                from, to
            )));
        }

        let conn = &pool.conn;

        // ------------------------------------------------
        // 1️⃣ Scope employees
        // ------------------------------------------------
        let employees: Vec<Employee> = match employee {
            Some(id) => {
                let found = queries::load_employee(conn, id)?;
                let e = access::authorize_view(caller, found.as_ref(), id)?;
                if e.is_active() { vec![e.clone()] } else { Vec::new() }
            }
            None => access::narrow(caller, queries::load_employees(conn, true)?),
        };

        if employees.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();

        // ------------------------------------------------
        // 2️⃣ Load the range
        // ------------------------------------------------
        let to_exclusive = to.checked_add_days(Days::new(1)).unwrap_or(to);
        let punches = queries::load_punches_between(conn, &ids, from, to_exclusive)?;
        let attendance = queries::load_attendance_between(conn, &ids, from, to)?;
        let leaves = queries::load_approved_leaves(conn, &ids, from, to)?;

        let lists: Vec<String> = employees
            .iter()
            .filter_map(|e| e.holiday_list.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let holidays = queries::load_holidays(conn, &lists, from, to)?;

        // ------------------------------------------------
        // 3️⃣ Group by employee / day
        // ------------------------------------------------
        let mut days: BTreeMap<String, BTreeMap<NaiveDate, DayInput>> = BTreeMap::new();

        for p in punches {
            days.entry(p.employee.clone())
                .or_default()
                .entry(p.date())
                .or_insert_with(|| DayInput::new(p.date()))
                .punches
                .push(p);
        }

        for a in attendance {
            let date = a.date;
            let employee = a.employee.clone();
            days.entry(employee)
                .or_default()
                .entry(date)
                .or_insert_with(|| DayInput::new(date))
                .attendance = Some(a);
        }

        let by_id: HashMap<&str, &Employee> =
            employees.iter().map(|e| (e.id.as_str(), e)).collect();

        for (emp_id, per_day) in days.iter_mut() {
            let holiday_dates = by_id
                .get(emp_id.as_str())
                .and_then(|e| e.holiday_list.as_ref())
                .and_then(|l| holidays.get(l));

            for (date, day) in per_day.iter_mut() {
                day.is_holiday = holiday_dates.is_some_and(|h| h.contains(date));
                day.leave_type = leaves
                    .iter()
                    .find(|l| &l.employee == emp_id && l.covers(*date))
                    .map(|l| l.leave_type.clone());
            }
        }

        // ------------------------------------------------
        // 4️⃣ Rules, then the history-wide ghost check
        // ------------------------------------------------
        let mut out = anomalies::detect_days(&employees, &days, today);

        let with_punches = queries::employees_with_punches(conn)?;
        out.extend(ghost::detect_ghosts(&employees, &with_punches, today));

        Ok(out)
    }
}
