//! One handler per top-level command, plus the argument parsing they share.

pub mod anomalies;
pub mod attendance;
pub mod config;
pub mod course;
pub mod db;
pub mod employee;
pub mod forecast;
pub mod holiday;
pub mod init;
pub mod leave;
pub mod log;
pub mod payroll;
pub mod punch;
pub mod report;
pub mod verify;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Open the configured database, bringing its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Optional date, defaulting to today.
pub(crate) fn date_or_today(s: Option<&String>) -> AppResult<NaiveDate> {
    match s {
        Some(s) => parse_date_arg(s),
        None => Ok(date::today()),
    }
}

pub(crate) fn parse_month_arg(s: &str) -> AppResult<u32> {
    date::parse_month(s).ok_or_else(|| AppError::InvalidMonth(s.to_string()))
}

pub(crate) fn parse_decimal_arg(s: &str) -> AppResult<Decimal> {
    Decimal::from_str(s.trim().replace(',', ".").as_str())
        .map_err(|_| AppError::InvalidAmount(s.to_string()))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))?;
    println!("{}", out);
    Ok(())
}
