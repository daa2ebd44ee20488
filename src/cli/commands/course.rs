use crate::cli::parser::{Commands, CourseCmd};
use crate::config::Config;
use crate::core::access::Caller;
use crate::core::entry::EntryLogic;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::{Assignment, SourceType};
use crate::ui::messages::{success, warning};
use crate::utils::time::{parse_time, split_range};

pub fn handle(cmd: &Commands, cfg: &Config, caller: &Caller) -> AppResult<()> {
    let Commands::Course { action } = cmd else {
        return Ok(());
    };

    let mut pool = super::open_pool(cfg)?;

    match action {
        CourseCmd::Slot {
            course,
            date,
            ranges,
            non_teaching,
        } => {
            let d = super::parse_date_arg(date)?;
            let raw: Vec<(String, String)> = ranges.iter().map(|r| split_range(r)).collect();

            // stored anyway: a bad range just counts as zero hours
            for (r, (s, e)) in ranges.iter().zip(&raw) {
                match (parse_time(s), parse_time(e)) {
                    (Some(st), Some(en)) if en > st => {}
                    _ => warning(format!("Range '{}' is not valid and will count as 0 hours.", r)),
                }
            }

            let id = EntryLogic::add_calendar_slot(&mut pool, caller, course, d, !non_teaching, &raw)?;
            success(format!(
                "Calendar slot #{} added to {} on {} ({} range(s)).",
                id,
                course,
                d,
                raw.len()
            ));
        }

        CourseCmd::Assign {
            employee,
            course,
            rate,
            source,
            doc,
        } => {
            let a = Assignment {
                id: 0,
                employee: employee.trim().to_string(),
                course: course.trim().to_string(),
                hourly_rate: super::parse_decimal_arg(rate)?,
                source_type: SourceType::from_code(source)
                    .ok_or_else(|| AppError::InvalidValue(format!("source '{}'", source)))?,
                source_doc: doc.trim().to_string(),
            };

            EntryLogic::assign(&mut pool, caller, &a)?;
            success(format!(
                "{} assigned to {} at {}/h ({}).",
                a.employee,
                a.course,
                a.hourly_rate,
                a.source_type.to_db_str()
            ));
        }
    }

    Ok(())
}
