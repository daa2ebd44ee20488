//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage. The pure calculators never fail:
//! bad input there degrades to zero hours or a finding instead.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid punch type: {0}")]
    InvalidPunchKind(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    // ---------------------------
    // Domain / access errors
    // ---------------------------
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Attendance already marked for {0}")]
    AttendanceExists(String),

    #[error("Payroll error: {0}")]
    Payroll(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Map a SQLite UNIQUE violation to `DuplicateKey`, leave everything else as `Db`.
    pub fn from_insert(err: rusqlite::Error, key: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                AppError::DuplicateKey(key.to_string())
            }
            _ => AppError::Db(err),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
