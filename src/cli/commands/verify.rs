use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::verify::{VerifyLogic, VerifyOutcome};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_time;

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    if let Commands::Verify {
        employee,
        date,
        hours,
        in_time,
        out_time,
        rest,
    } = cmd
    {
        let d = super::parse_date_arg(date)?;
        let i = parse_optional_time(in_time.as_ref())?;
        let o = parse_optional_time(out_time.as_ref())?;

        let mut pool = super::open_pool(cfg)?;
        let (outcome, rec) =
            VerifyLogic::apply(&mut pool, caller, employee, d, *hours, i, o, rest.clone())?;

        let verb = match outcome {
            VerifyOutcome::Created => "created",
            VerifyOutcome::Updated => "updated",
        };
        success(format!(
            "Verified attendance {} {}: {:.2} hours.",
            rec.name, verb, rec.total_hours
        ));
    }

    Ok(())
}
