use crate::cli::parser::{Commands, EmployeeCmd};
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::entry::EntryLogic;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeStatus, OfferStatus};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::Table;

fn parse_offer(s: &str) -> AppResult<OfferStatus> {
    OfferStatus::from_code(s).ok_or_else(|| AppError::InvalidValue(format!("offer status '{}'", s)))
}

fn parse_status(s: &str) -> AppResult<EmployeeStatus> {
    EmployeeStatus::from_code(s)
        .ok_or_else(|| AppError::InvalidValue(format!("employee status '{}'", s)))
}

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let mut pool = super::open_pool(cfg)?;

    match action {
        EmployeeCmd::Add {
            id,
            name,
            company,
            department,
            holiday_list,
            user_id,
            offer,
            status,
            joined,
        } => {
            let mut emp = Employee::new(id.trim(), name.trim());
            emp.company = company.clone();
            emp.department = department.clone();
            emp.holiday_list = holiday_list.clone();
            emp.user_id = user_id.clone();
            emp.offer_status = offer.as_deref().map(parse_offer).transpose()?;
            if let Some(s) = status {
                emp.status = parse_status(s)?;
            }
            emp.date_of_joining = joined.as_deref().map(super::parse_date_arg).transpose()?;

            EntryLogic::add_employee(&mut pool, caller, &emp)?;
            success(format!("Employee {} ({}) created.", emp.id, emp.name));
        }

        EmployeeCmd::List { all } => {
            let employees = EntryLogic::list_employees(&mut pool, caller, *all)?;
            if employees.is_empty() {
                info("No employees found.");
                return Ok(());
            }

            let dash = || format!("{GREY}--{RESET}");
            let mut table = Table::with_headers(&[
                "ID", "NAME", "STATUS", "COMPANY", "HOLIDAYS", "USER", "OFFER",
            ]);
            for e in &employees {
                table.add_row(vec![
                    e.id.clone(),
                    e.name.clone(),
                    e.status.to_db_str().to_string(),
                    e.company.clone().unwrap_or_else(dash),
                    e.holiday_list.clone().unwrap_or_else(dash),
                    e.user_id.clone().unwrap_or_else(dash),
                    e.offer_status
                        .map(|o| o.to_db_str().to_string())
                        .unwrap_or_else(dash),
                ]);
            }
            print!("{}", table.render());
        }

        EmployeeCmd::Offer { id, offer, status } => {
            if offer.is_none() && status.is_none() {
                return Err(AppError::InvalidValue(
                    "nothing to change: give an offer status and/or --status".into(),
                ));
            }

            let offer = offer.as_deref().map(parse_offer).transpose()?;
            let status = status.as_deref().map(parse_status).transpose()?;

            EntryLogic::update_employee(&mut pool, caller, id, status, offer)?;
            success(format!("Employee {} updated.", id));
        }
    }

    Ok(())
}
