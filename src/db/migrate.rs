//! Versioned schema migrations.
//!
//! Every migration runs once, inside a transaction, and is recorded in the
//! `log` table as `migration_applied` with its version as target.

use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260301_0001_create_people_and_time_tables",
        description: "Created employees, punches, attendance, leaves and holidays tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            id               TEXT PRIMARY KEY,
            name             TEXT NOT NULL,
            status           TEXT NOT NULL DEFAULT 'Active'
                             CHECK(status IN ('Active','Inactive','Left')),
            company          TEXT,
            department       TEXT,
            holiday_list     TEXT,
            user_id          TEXT,
            offer_status     TEXT
                             CHECK(offer_status IS NULL OR offer_status IN ('Pending','Accepted','Rejected')),
            date_of_joining  TEXT
        );

        CREATE TABLE IF NOT EXISTS punches (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            employee              TEXT NOT NULL,
            time                  TEXT NOT NULL,
            kind                  TEXT NOT NULL CHECK(kind IN ('IN','OUT')),
            device_id             TEXT,
            skip_auto_attendance  INTEGER NOT NULL DEFAULT 0,
            source                TEXT NOT NULL DEFAULT 'cli',
            created_at            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_punches_employee_time ON punches(employee, time);

        CREATE TABLE IF NOT EXISTS attendance (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee       TEXT NOT NULL,
            date           TEXT NOT NULL,
            status         TEXT NOT NULL,
            late_entry     INTEGER NOT NULL DEFAULT 0,
            early_exit     INTEGER NOT NULL DEFAULT 0,
            in_time        TEXT,
            out_time       TEXT,
            working_hours  REAL,
            UNIQUE(employee, date)
        );

        CREATE TABLE IF NOT EXISTS leaves (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee       TEXT NOT NULL,
            from_date      TEXT NOT NULL,
            to_date        TEXT NOT NULL,
            leave_type     TEXT NOT NULL,
            status         TEXT NOT NULL DEFAULT 'Approved'
                           CHECK(status IN ('Open','Approved','Rejected','Cancelled')),
            half_day       INTEGER NOT NULL DEFAULT 0,
            half_day_date  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_leaves_employee ON leaves(employee, from_date, to_date);

        CREATE TABLE IF NOT EXISTS holidays (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            holiday_list  TEXT NOT NULL,
            date          TEXT NOT NULL,
            description   TEXT NOT NULL DEFAULT '',
            UNIQUE(holiday_list, date)
        );
        "#,
    },
    Migration {
        version: "20260301_0002_create_course_tables",
        description: "Created calendar_slots and assignments tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS calendar_slots (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            course    TEXT NOT NULL,
            date      TEXT NOT NULL,
            teaching  INTEGER NOT NULL DEFAULT 1,
            start_1 TEXT, end_1 TEXT,
            start_2 TEXT, end_2 TEXT,
            start_3 TEXT, end_3 TEXT,
            start_4 TEXT, end_4 TEXT,
            start_5 TEXT, end_5 TEXT,
            start_6 TEXT, end_6 TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_calendar_course_date ON calendar_slots(course, date);

        CREATE TABLE IF NOT EXISTS assignments (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee     TEXT NOT NULL,
            course       TEXT NOT NULL,
            hourly_rate  TEXT NOT NULL,
            source_type  TEXT NOT NULL CHECK(source_type IN ('Job Offer','HR Modification')),
            source_doc   TEXT NOT NULL DEFAULT '',
            UNIQUE(employee, course, source_doc)
        );
        "#,
    },
    Migration {
        version: "20260301_0003_create_ledger_tables",
        description: "Created payroll_records and verified_attendance tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS payroll_records (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            record_key        TEXT NOT NULL,
            employee          TEXT NOT NULL,
            employee_name     TEXT NOT NULL,
            company           TEXT,
            course            TEXT NOT NULL,
            source_type       TEXT NOT NULL,
            source_doc        TEXT NOT NULL DEFAULT '',
            month             INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
            year              INTEGER NOT NULL,
            hours             TEXT NOT NULL,
            extra_hours       TEXT NOT NULL DEFAULT '0',
            days_worked       INTEGER NOT NULL DEFAULT 0,
            hourly_rate       TEXT NOT NULL,
            extra_rate        TEXT NOT NULL,
            gross             TEXT NOT NULL,
            vacation_accrual  TEXT NOT NULL,
            net_of_vacation   TEXT NOT NULL,
            social_security   TEXT NOT NULL,
            total             TEXT NOT NULL,
            state             TEXT NOT NULL DEFAULT 'Settled'
                              CHECK(state IN ('Settled','Sent to Advisor','Paid')),
            docstatus         INTEGER NOT NULL DEFAULT 1 CHECK(docstatus IN (0,1,2)),
            settled_on        TEXT NOT NULL,
            sent_on           TEXT,
            paid_on           TEXT,
            last_month        INTEGER NOT NULL DEFAULT 0
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_payroll_live_key
            ON payroll_records(record_key) WHERE docstatus != 2;
        CREATE INDEX IF NOT EXISTS idx_payroll_period ON payroll_records(year, month);

        CREATE TABLE IF NOT EXISTS verified_attendance (
            name         TEXT PRIMARY KEY,
            employee     TEXT NOT NULL,
            date         TEXT NOT NULL,
            total_hours  REAL NOT NULL,
            in_time      TEXT,
            out_time     TEXT,
            rest_time    TEXT,
            owner        TEXT NOT NULL,
            modified     TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260301_0004_payroll_unique_by_period",
        description: "Payroll uniqueness keyed on (employee, course, year, month)",
        sql: r#"
        DROP INDEX IF EXISTS idx_payroll_live_key;

        CREATE UNIQUE INDEX IF NOT EXISTS idx_payroll_live_period
            ON payroll_records(employee, course, year, month) WHERE docstatus != 2;
        "#,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute_batch("BEGIN;")?;

    let res = conn.execute_batch(m.sql).and_then(|_| {
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            params![m.version, m.description],
        )
    });

    match res {
        Ok(_) => {
            conn.execute_batch("COMMIT;")?;
            success(format!("Migration applied: {} → {}", m.version, m.description));
            Ok(())
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK;");
            Err(e)
        }
    }
}

/// Versions not yet recorded in the `log` table.
pub fn pending_versions(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
