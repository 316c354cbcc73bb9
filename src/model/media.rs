use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::media_type::MediaType;
use crate::model::season_type::SeasonType;

/// One broadcast slot from the CFBD `/games/media` endpoint. `id` is the id
/// of the game being aired. `date_only`, `day` and `dow` are not upstream
/// fields: the validator derives them from `start_time` (broadcast-day
/// rules) and the assembler's grouping depends on them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub id: i64,
    pub season: i64,
    pub week: i64,
    pub season_type: SeasonType,
    pub start_time: DateTime<Utc>,
    pub date_only: NaiveDate,
    pub day: String,
    pub dow: u32,
    #[serde(rename = "isStartTimeTBD")]
    pub is_start_time_tbd: bool,
    pub home_team: String,
    pub home_conference: String,
    pub away_team: String,
    pub away_conference: String,
    pub media_type: MediaType,
    pub outlet: String,
}
