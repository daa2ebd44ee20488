use crate::cli::parser::{Commands, LeaveCmd};
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::entry::EntryLogic;
use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveApplication, LeaveStatus};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    if let Commands::Leave {
        action:
            LeaveCmd::Add {
                employee,
                from,
                to,
                leave_type,
                status,
                half_day,
                half_day_date,
            },
    } = cmd
    {
        let leave = LeaveApplication {
            id: 0,
            employee: employee.trim().to_string(),
            from_date: super::parse_date_arg(from)?,
            to_date: super::parse_date_arg(to)?,
            leave_type: leave_type.trim().to_string(),
            status: LeaveStatus::from_code(status)
                .ok_or_else(|| AppError::InvalidValue(format!("leave status '{}'", status)))?,
            half_day: *half_day,
            half_day_date: half_day_date
                .as_deref()
                .map(super::parse_date_arg)
                .transpose()?,
        };

        let mut pool = super::open_pool(cfg)?;
        let id = EntryLogic::add_leave(&mut pool, caller, &leave)?;

        success(format!(
            "Leave #{} recorded: {} {} → {} ({})",
            id,
            leave.leave_type,
            leave.from_date,
            leave.to_date,
            leave.status.to_db_str()
        ));
    }

    Ok(())
}
