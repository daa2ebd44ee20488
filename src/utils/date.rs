use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Every date from `start` to `end`, both included. Empty when start > end.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;

    while d <= end {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Accepts "1".."12", English or Spanish month names (case-insensitive).
pub fn parse_month(s: &str) -> Option<u32> {
    let t = s.trim().to_lowercase();

    if let Ok(n) = t.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }

    MONTHS_ES
        .iter()
        .position(|m| *m == t)
        .or_else(|| MONTHS_EN.iter().position(|m| *m == t))
        .map(|i| i as u32 + 1)
}

/// Spanish display name of a month number, as used on payroll documents.
pub fn month_name(month: u32) -> String {
    let idx = month.saturating_sub(1) as usize;
    match MONTHS_ES.get(idx) {
        Some(m) => {
            let mut c = m.chars();
            match c.next() {
                Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
                None => String::new(),
            }
        }
        None => month.to_string(),
    }
}
