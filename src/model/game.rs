use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::season_type::SeasonType;

/// One game as returned by the CFBD `/games` endpoint. `home_id`/`away_id`
/// must resolve against the teams lookup for the game to appear in a
/// schedule; scores are null until `completed` flips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub id: i64,
    pub season: i64,
    pub week: i64,
    pub season_type: SeasonType,
    pub start_date: DateTime<Utc>,
    pub start_time_tbd: bool,
    pub completed: bool,
    pub home_id: i64,
    pub home_team: String,
    pub home_points: Option<i64>,
    pub away_id: i64,
    pub away_team: String,
    pub away_points: Option<i64>,
}
