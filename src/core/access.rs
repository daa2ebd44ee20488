//! Who may see and change whose data.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;

/// Roles with full access to every employee.
pub const HR_ROLES: [&str; 2] = ["HR Manager", "System Manager"];

/// Identity on whose behalf a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user: String,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn new(user: &str, roles: &[&str]) -> Self {
        Self {
            user: user.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Identity from the config, with command-line overrides applied.
    /// Passing any `--role` replaces the configured roles.
    pub fn resolve(cfg: &Config, user: Option<&String>, roles: &[String]) -> Self {
        Self {
            user: user.cloned().unwrap_or_else(|| cfg.user.clone()),
            roles: if roles.is_empty() {
                cfg.roles.clone()
            } else {
                roles.to_vec()
            },
        }
    }

    pub fn is_hr(&self) -> bool {
        self.roles
            .iter()
            .any(|r| HR_ROLES.iter().any(|hr| hr.eq_ignore_ascii_case(r.trim())))
    }

    pub fn can_view(&self, employee: &Employee) -> bool {
        self.is_hr() || employee.user_id.as_deref() == Some(self.user.as_str())
    }
}

/// Fails closed: an unknown employee is as forbidden as somebody else's.
pub fn authorize_view<'a>(
    caller: &Caller,
    employee: Option<&'a Employee>,
    id: &str,
) -> AppResult<&'a Employee> {
    match employee {
        Some(e) if caller.can_view(e) => Ok(e),
        _ => Err(AppError::PermissionDenied(format!(
            "{} cannot view attendance of {}",
            caller.user, id
        ))),
    }
}

/// The subset of `employees` the caller may see.
pub fn narrow(caller: &Caller, employees: Vec<Employee>) -> Vec<Employee> {
    if caller.is_hr() {
        return employees;
    }
    employees.into_iter().filter(|e| caller.can_view(e)).collect()
}

pub fn require_hr(caller: &Caller, action: &str) -> AppResult<()> {
    if caller.is_hr() {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(format!(
            "{} requires one of the roles {} ({} has [{}])",
            action,
            HR_ROLES.join(", "),
            caller.user,
            caller.roles.join(", ")
        )))
    }
}
