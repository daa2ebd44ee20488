use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_versions, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            let pending = pending_versions(&pool.conn)?;
            if pending.is_empty() {
                println!("{}✔ No pending migrations.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}▶ Running {} migration(s)…{}",
                    CYAN,
                    pending.len(),
                    RESET
                );
                run_pending_migrations(&pool.conn)?;
                println!("{}✔ Migration completed.{}\n", GREEN, RESET);
            }
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            // one live payroll record per employee, course and period
            let clashes: i64 = pool.conn.query_row(
                "SELECT COUNT(*) FROM (
                    SELECT employee FROM payroll_records
                    WHERE docstatus != 2
                    GROUP BY employee, course, year, month HAVING COUNT(*) > 1
                 )",
                [],
                |row| row.get(0),
            )?;

            if clashes == 0 {
                println!("{}✔ Payroll keys are unique.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✘ {} payroll key(s) held by more than one live record.{}\n",
                    RED, clashes, RESET
                );
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
