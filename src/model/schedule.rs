use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::media_type::MediaType;
use crate::model::season_type::SeasonType;
use crate::model::team::Team;

/// One calendar date of the assembled schedule: ordered outlet groups plus
/// the tight min/max start instants seen across the day's broadcasts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub day: String,
    pub dow: u32,
    pub first_game_start: DateTime<Utc>,
    pub last_game_start: DateTime<Utc>,
    pub outlets: Vec<OutletGroup>,
}

/// A run of games airing on one outlet within a single schedule day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutletGroup {
    pub name: String,
    pub media_type: MediaType,
    pub games: Vec<ScheduledGame>,
}

/// A game with its team references resolved to full Team objects, ready for
/// serialization. Built by the assembler, discarded after the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub id: i64,
    pub season: i64,
    pub week: i64,
    pub season_type: SeasonType,
    pub start_time: DateTime<Utc>,
    pub start_time_tbd: bool,
    pub completed: bool,
    pub home_team: Team,
    pub away_team: Team,
    pub home_points: Option<i64>,
    pub away_points: Option<i64>,
}
