use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::{iso_date, LogEntry};
use crate::nutrition::Macros;

#[derive(Debug, Deserialize)]
pub struct LogFoodRequest {
    /// Defaults to today (UTC).
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    pub food_name: String,
    pub grams: f64,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub entries: Vec<LogEntry>,
    pub totals: Macros,
    /// Present only when the user has saved target macros.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Macros>,
}
