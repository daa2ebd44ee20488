use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDateTime;
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str, filter: &str) -> rusqlite::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {} {}", table, filter);
    pool.conn.query_row(&sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COUNTS
    //
    let employees = count(pool, "employees", "")?;
    let active = count(pool, "employees", "WHERE status = 'Active'")?;
    let punches = count(pool, "punches", "")?;
    let live_payroll = count(pool, "payroll_records", "WHERE docstatus != 2")?;
    let verified = count(pool, "verified_attendance", "")?;

    println!(
        "{}• Employees:{} {}{}{} ({} active)",
        CYAN, RESET, GREEN, employees, RESET, active
    );
    println!("{}• Punches:{} {}{}{}", CYAN, RESET, GREEN, punches, RESET);
    println!(
        "{}• Payroll records:{} {}{}{}",
        CYAN, RESET, GREEN, live_payroll, RESET
    );
    println!(
        "{}• Verified days:{} {}{}{}",
        CYAN, RESET, GREEN, verified, RESET
    );

    //
    // 3) PUNCH RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(time) FROM punches", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(time) FROM punches", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt_first = first
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Punch range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE PUNCHES/DAY
    //
    if let (Some(f), Some(l)) = (first, last)
        && let (Some(d1), Some(d2)) = (parse_ts(&f), parse_ts(&l))
    {
        let days = (d2.date() - d1.date()).num_days().max(1);
        let avg = punches as f64 / days as f64;
        println!("{}• Average punches/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_ts(s: &str) -> Option<NaiveDateTime> {
    crate::utils::time::parse_timestamp(s)
}
