use crate::cli::parser::{Commands, PunchCmd};
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::entry::EntryLogic;
use crate::errors::{AppError, AppResult};
use crate::models::punch_kind::PunchKind;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET, colorize_in_out};
use crate::utils::table::Table;
use crate::utils::time::{at, parse_time};

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    let Commands::Punch { action } = cmd else {
        return Ok(());
    };

    let mut pool = super::open_pool(cfg)?;

    match action {
        PunchCmd::Add {
            employee,
            date,
            time,
            kind,
            device,
        } => {
            let d = super::parse_date_arg(date)?;
            let t = parse_time(time).ok_or_else(|| AppError::InvalidTime(time.to_string()))?;
            let k = PunchKind::pk_from_str(kind)
                .ok_or_else(|| AppError::InvalidPunchKind(kind.to_string()))?;

            let id = EntryLogic::add_punch(&mut pool, caller, employee, at(d, t), k, device.clone())?;
            success(format!(
                "Punch #{} recorded: {} {} {}",
                id,
                employee,
                k.to_db_str(),
                at(d, t).format("%Y-%m-%d %H:%M")
            ));
        }

        PunchCmd::List { employee, from, to } => {
            let from = super::parse_date_arg(from)?;
            let to = super::parse_date_arg(to)?;

            let punches = EntryLogic::list_punches(&mut pool, caller, employee, from, to)?;
            if punches.is_empty() {
                info(format!("No punches for {} between {} and {}.", employee, from, to));
                return Ok(());
            }

            let mut table = Table::with_headers(&["ID", "DATE", "TIME", "TYPE", "DEVICE"]);
            for p in &punches {
                table.add_row(vec![
                    p.id.to_string(),
                    p.date().to_string(),
                    p.time_str(),
                    colorize_in_out(p.kind.to_db_str(), p.kind.is_in()),
                    p.device_id
                        .clone()
                        .unwrap_or_else(|| format!("{GREY}--{RESET}")),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
