pub mod access;
pub mod anomalies;
pub mod calculator;
pub mod config;
pub mod entry;
pub mod log;
pub mod payroll;
pub mod report;
pub mod verify;
