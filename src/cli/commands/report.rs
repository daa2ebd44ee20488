use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, GREY, RESET, colorize_in_out};
use crate::utils::formatting::separator;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    if let Commands::Report {
        employee,
        from,
        to,
        json,
    } = cmd
    {
        let from = super::parse_date_arg(from)?;
        let to = super::parse_date_arg(to)?;

        let mut pool = super::open_pool(cfg)?;
        let days = ReportLogic::build(&mut pool, caller, employee, from, to)?;

        if *json {
            return super::print_json(&days);
        }

        header(format!("Attendance report {} ({} → {})", employee, from, to));

        let mut table = Table::with_headers(&["DATE", "HOURS", "PUNCHES", "REST", "STATUS"]);
        let mut total = 0.0;

        for d in &days {
            total += d.hours;

            let logs = if d.logs.is_empty() {
                format!("{GREY}--{RESET}")
            } else {
                d.logs
                    .iter()
                    .map(|l| colorize_in_out(&l.time, l.kind == "IN"))
                    .collect::<Vec<_>>()
                    .join(" ")
            };

            let hours = if d.is_verified {
                format!("{GREEN}{:.2} ✔{RESET}", d.hours)
            } else {
                format!("{:.2}", d.hours)
            };

            table.add_row(vec![
                d.date.clone(),
                hours,
                logs,
                d.verified_rest_time.clone().unwrap_or_default(),
                d.status.clone(),
            ]);
        }

        print!("{}", table.render());
        println!("{}", separator(&cfg.separator_char, 40));
        println!("Total hours: {:.2}", total);
    }

    Ok(())
}
