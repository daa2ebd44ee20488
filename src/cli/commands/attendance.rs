use crate::cli::parser::{AttendanceCmd, Commands};
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::entry::EntryLogic;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceStatus;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET, colorize_in_out};
use crate::utils::table::Table;
use crate::utils::time::{format_optional_time, parse_optional_time};

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    let Commands::Attendance { action } = cmd else {
        return Ok(());
    };

    let mut pool = super::open_pool(cfg)?;

    match action {
        AttendanceCmd::Mark {
            employee,
            status,
            date,
            in_time,
            out_time,
            late,
            early,
        } => {
            let d = super::date_or_today(date.as_ref())?;
            let st = AttendanceStatus::from_code(status)
                .ok_or_else(|| AppError::InvalidValue(format!("attendance status '{}'", status)))?;
            let i = parse_optional_time(in_time.as_ref())?;
            let o = parse_optional_time(out_time.as_ref())?;

            let rec = EntryLogic::mark_attendance(&mut pool, caller, employee, d, st, i, o, *late, *early)?;

            match rec.working_hours {
                Some(h) => success(format!(
                    "Attendance marked: {} {} on {} ({:.2} h)",
                    rec.employee,
                    st.to_db_str(),
                    d,
                    h
                )),
                None => success(format!(
                    "Attendance marked: {} {} on {}",
                    rec.employee,
                    st.to_db_str(),
                    d
                )),
            }
        }

        AttendanceCmd::List { employee, from, to } => {
            let from = super::parse_date_arg(from)?;
            let to = super::parse_date_arg(to)?;

            let records = EntryLogic::list_attendance(&mut pool, caller, employee, from, to)?;
            if records.is_empty() {
                info(format!("No attendance for {} between {} and {}.", employee, from, to));
                return Ok(());
            }

            let mut table =
                Table::with_headers(&["DATE", "STATUS", "IN", "OUT", "HOURS", "FLAGS"]);
            for r in &records {
                let mut flags = Vec::new();
                if r.late_entry {
                    flags.push("late");
                }
                if r.early_exit {
                    flags.push("early");
                }

                table.add_row(vec![
                    r.date.to_string(),
                    r.status.to_db_str().to_string(),
                    colorize_in_out(&format_optional_time(r.in_time), true),
                    colorize_in_out(&format_optional_time(r.out_time), false),
                    r.working_hours
                        .map(|h| format!("{:.2}", h))
                        .unwrap_or_else(|| format!("{GREY}--{RESET}")),
                    flags.join(","),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
