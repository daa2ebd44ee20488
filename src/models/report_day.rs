use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportLog {
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One row of the attendance report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDay {
    pub date: String,
    pub hours: f64,
    pub status: String,
    pub logs: Vec<ReportLog>,
    pub is_verified: bool,
    pub verified_id: Option<String>,
    pub verified_rest_time: Option<String>,
}

impl ReportDay {
    pub fn empty(date: String) -> Self {
        Self {
            date,
            hours: 0.0,
            status: String::new(),
            logs: Vec::new(),
            is_verified: false,
            verified_id: None,
            verified_rest_time: None,
        }
    }
}
