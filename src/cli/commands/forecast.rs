use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::payroll::PayrollLogic;
use crate::errors::AppResult;
use crate::models::forecast::{ForecastLine, PayrollSummary};
use crate::ui::messages::{header, info};
use crate::utils::date::month_name;
use crate::utils::formatting::{hours, money, separator};
use crate::utils::table::Table;
use serde::Serialize;

#[derive(Serialize)]
struct ForecastOutput<'a> {
    lines: &'a [ForecastLine],
    summary: &'a PayrollSummary,
}

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    if let Commands::Forecast {
        month,
        year,
        employee,
        course,
        json,
    } = cmd
    {
        let m = super::parse_month_arg(month)?;

        let mut pool = super::open_pool(cfg)?;
        let (lines, summary) = PayrollLogic::forecast(
            &mut pool,
            caller,
            m,
            *year,
            employee.as_deref(),
            course.as_deref(),
        )?;

        if *json {
            return super::print_json(&ForecastOutput {
                lines: &lines,
                summary: &summary,
            });
        }

        if lines.is_empty() {
            info(format!("Nothing to forecast for {} {}.", month_name(m), year));
            return Ok(());
        }

        header(format!("Payroll forecast {} {}", month_name(m), year));
        print!("{}", render_lines(&lines).render());
        print_summary(&summary, &cfg.separator_char);
    }

    Ok(())
}

fn render_lines(lines: &[ForecastLine]) -> Table {
    let mut table = Table::with_headers(&[
        "EMPLOYEE", "NAME", "COURSE", "DAYS", "HOURS", "RATE", "GROSS", "VACATION", "NET", "SS",
        "TOTAL",
    ]);

    for l in lines {
        table.add_row(vec![
            l.employee.clone(),
            l.employee_name.clone(),
            l.course.clone(),
            l.days_worked.to_string(),
            hours(l.hours),
            money(l.hourly_rate),
            money(l.gross),
            money(l.vacation_accrual),
            money(l.net_of_vacation),
            money(l.social_security),
            money(l.total),
        ]);
    }

    table
}

pub(crate) fn print_summary(s: &PayrollSummary, sep: &str) {
    println!("{}", separator(sep, 60));
    println!(
        "Employees: {}   Lines: {}   Hours: {}",
        s.total_employees,
        s.total_lines,
        hours(s.total_hours)
    );
    println!(
        "Gross: {}   Social security: {}   Payable: {}",
        money(s.total_gross),
        money(s.total_social_security),
        money(s.total_payable)
    );
}
