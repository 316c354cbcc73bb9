use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::season_type::SeasonType;

/// Week-by-week metadata for a season from the CFBD `/calendar` endpoint.
/// Passed through to the caller after validation, never transformed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub season: String,
    pub week: i64,
    pub season_type: SeasonType,
    pub first_game_start: DateTime<Utc>,
    pub last_game_start: DateTime<Utc>,
}
