use crate::cli::parser::{Commands, PayrollCmd};
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::payroll::{BatchOutcome, PayrollLogic};
use crate::db::ledger::PayrollFilter;
use crate::errors::{AppError, AppResult};
use crate::models::docstatus::DocStatus;
use crate::models::payroll::{PayrollRecord, PayrollState};
use crate::models::forecast::PayrollSummary;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{GREY, RED, RESET, YELLOW};
use crate::utils::date::month_name;
use crate::utils::formatting::{hours, money};
use crate::utils::table::Table;
use serde::Serialize;

#[derive(Serialize)]
struct ListOutput<'a> {
    records: &'a [PayrollRecord],
    summary: &'a PayrollSummary,
}

fn report_batch(what: &str, o: BatchOutcome) {
    success(format!("{} record(s) {}.", o.updated, what));
    if o.skipped > 0 {
        warning(format!("{} record(s) skipped (not found or wrong status).", o.skipped));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    let Commands::Payroll { action } = cmd else {
        return Ok(());
    };

    let mut pool = super::open_pool(cfg)?;

    match action {
        PayrollCmd::Finalize {
            month,
            year,
            employee,
            course,
            draft,
            last_month,
            today,
        } => {
            let m = super::parse_month_arg(month)?;
            let on = super::date_or_today(today.as_ref())?;

            let o = PayrollLogic::finalize(
                &mut pool,
                caller,
                m,
                *year,
                employee.as_deref(),
                course.as_deref(),
                *draft,
                *last_month,
                on,
            )?;

            success(format!(
                "{} {}: {} created, {} updated.",
                month_name(m),
                year,
                o.created,
                o.updated
            ));
            if o.locked > 0 {
                warning(format!(
                    "{} record(s) already sent or paid were left untouched.",
                    o.locked
                ));
            }
        }

        PayrollCmd::List {
            month,
            year,
            employee,
            course,
            state,
            all,
            json,
        } => {
            let filter = PayrollFilter {
                month: month.as_deref().map(super::parse_month_arg).transpose()?,
                year: *year,
                employee: employee.clone(),
                course: course.clone(),
                state: state
                    .as_deref()
                    .map(|s| {
                        PayrollState::from_code(s)
                            .ok_or_else(|| AppError::InvalidValue(format!("payroll state '{}'", s)))
                    })
                    .transpose()?,
                include_cancelled: *all,
            };

            let (records, summary) = PayrollLogic::list(&mut pool, caller, &filter)?;

            if *json {
                return super::print_json(&ListOutput {
                    records: &records,
                    summary: &summary,
                });
            }

            if records.is_empty() {
                info("No payroll records found.");
                return Ok(());
            }

            header("Payroll records");

            let mut table = Table::with_headers(&[
                "ID", "PERIOD", "EMPLOYEE", "COURSE", "HOURS", "EXTRA", "GROSS", "SS", "TOTAL",
                "STATE", "DOC",
            ]);
            for r in &records {
                let doc = match r.docstatus {
                    DocStatus::Draft => format!("{YELLOW}Draft{RESET}"),
                    DocStatus::Submitted => "Submitted".to_string(),
                    DocStatus::Cancelled => format!("{RED}Cancelled{RESET}"),
                };
                let extra = if r.extra_hours.is_zero() {
                    format!("{GREY}--{RESET}")
                } else {
                    hours(r.extra_hours)
                };

                table.add_row(vec![
                    r.id.to_string(),
                    format!("{}-{:02}", r.year, r.month),
                    r.employee.clone(),
                    r.course.clone(),
                    hours(r.hours),
                    extra,
                    money(r.gross),
                    money(r.social_security),
                    money(r.total),
                    r.state.to_db_str().to_string(),
                    doc,
                ]);
            }
            print!("{}", table.render());
            super::forecast::print_summary(&summary, &cfg.separator_char);
        }

        PayrollCmd::Extra { id, hours: h, rate } => {
            let extra = super::parse_decimal_arg(h)?;
            let rate = rate.as_deref().map(super::parse_decimal_arg).transpose()?;

            let rec = PayrollLogic::set_extra_hours(&mut pool, caller, *id, extra, rate)?;
            success(format!(
                "Record #{}: {} extra hours at {}, gross {}, total {}.",
                rec.id,
                hours(rec.extra_hours),
                money(rec.extra_rate),
                money(rec.gross),
                money(rec.total)
            ));
        }

        PayrollCmd::Submit { ids } => {
            report_batch("submitted", PayrollLogic::submit(&mut pool, caller, ids)?);
        }

        PayrollCmd::Sent { ids, date } => {
            let on = super::date_or_today(date.as_ref())?;
            report_batch(
                "marked as sent to advisor",
                PayrollLogic::mark_sent(&mut pool, caller, ids, on)?,
            );
        }

        PayrollCmd::Paid { ids, date } => {
            let on = super::date_or_today(date.as_ref())?;
            report_batch("marked as paid", PayrollLogic::mark_paid(&mut pool, caller, ids, on)?);
        }

        PayrollCmd::Cancel { ids } => {
            report_batch("cancelled", PayrollLogic::cancel(&mut pool, caller, ids)?);
        }
    }

    Ok(())
}
