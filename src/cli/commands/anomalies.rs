use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::anomalies::AnomalyLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::utils::formatting::severity_colored;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    if let Commands::Anomalies {
        from,
        to,
        employee,
        json,
        today,
    } = cmd
    {
        let from = super::parse_date_arg(from)?;
        let to = super::parse_date_arg(to)?;
        let today = super::date_or_today(today.as_ref())?;

        let mut pool = super::open_pool(cfg)?;
        let found = AnomalyLogic::run(&mut pool, caller, from, to, employee.as_deref(), today)?;

        if *json {
            return super::print_json(&found);
        }

        if found.is_empty() {
            success(format!("No anomalies between {} and {}.", from, to));
            return Ok(());
        }

        header(format!("Anomalies {} → {} ({})", from, to, found.len()));

        let mut table =
            Table::with_headers(&["DATE", "EMPLOYEE", "NAME", "TYPE", "SEVERITY", "DESCRIPTION"]);
        for a in &found {
            table.add_row(vec![
                a.date.to_string(),
                a.employee.clone(),
                a.employee_name.clone(),
                a.kind.label().to_string(),
                severity_colored(a.severity),
                a.description.clone(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
