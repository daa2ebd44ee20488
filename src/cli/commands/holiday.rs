use crate::cli::parser::{Commands, HolidayCmd};
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::entry::EntryLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    if let Commands::Holiday {
        action:
            HolidayCmd::Add {
                list,
                date,
                description,
            },
    } = cmd
    {
        let d = super::parse_date_arg(date)?;
        let mut pool = super::open_pool(cfg)?;

        EntryLogic::add_holiday(&mut pool, caller, list, d, description)?;
        success(format!("Holiday {} added to {}.", d, list));
    }

    Ok(())
}
