pub mod anomaly;
pub mod assignment;
pub mod attendance;
pub mod calendar;
pub mod day_context;
pub mod docstatus;
pub mod employee;
pub mod forecast;
pub mod leave;
pub mod payroll;
pub mod punch;
pub mod punch_kind;
pub mod report_day;
pub mod session;
pub mod verified;
