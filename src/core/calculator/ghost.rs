//! Ghost employee check: a global, history-wide rule evaluated once per run
//! instead of per day.

use crate::models::anomaly::{Anomaly, AnomalyKind};
use crate::models::employee::Employee;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Flag active employees with an accepted offer and no punch ever recorded.
///
/// `with_punches` must be the set of employees having at least one punch in
/// the whole history, not only inside the queried range. Findings are dated
/// `today` and sorted by employee id.
pub fn detect_ghosts(
    employees: &[Employee],
    with_punches: &HashSet<String>,
    today: NaiveDate,
) -> Vec<Anomaly> {
    let mut ghosts: Vec<&Employee> = employees
        .iter()
        .filter(|e| e.is_active() && e.has_accepted_offer() && !with_punches.contains(&e.id))
        .collect();
    ghosts.sort_by(|a, b| a.id.cmp(&b.id));
    ghosts.dedup_by(|a, b| a.id == b.id);

    ghosts
        .into_iter()
        .map(|e| {
            Anomaly::new(
                &e.id,
                &e.name,
                today,
                AnomalyKind::GhostEmployee,
                "Employee has an accepted job offer but no punch record in history.",
            )
        })
        .collect()
}
