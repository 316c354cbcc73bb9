use std::collections::HashMap;

use tracing::warn;

use crate::model::game::Game;
use crate::model::media::MediaEntry;
use crate::model::schedule::{OutletGroup, ScheduleDay, ScheduledGame};
use crate::model::team::Team;

/// Merge games, teams and broadcast media into the nested by-date,
/// by-outlet schedule.
///
/// Single forward pass over `media`, which the data source hands over
/// pre-sorted by (date_only, outlet, start_time); grouping exploits that
/// order instead of re-sorting, so unsorted input fragments the groups.
/// A media entry whose game or team ids cannot be resolved is an upstream
/// inconsistency between the parallel fetches: it is skipped with a
/// warning rather than failing the whole week. With `exclude_tbd` set,
/// entries whose start time is still undetermined are left out entirely.
pub fn assemble_schedule(
    games: &HashMap<i64, Game>,
    teams: &HashMap<i64, Team>,
    media: &[MediaEntry],
    exclude_tbd: bool,
) -> Vec<ScheduleDay> {
    let mut days: Vec<ScheduleDay> = Vec::new();
    let mut current_date = None;
    let mut current_outlet: Option<String> = None;

    for entry in media {
        if exclude_tbd && entry.is_start_time_tbd {
            continue;
        }
        let Some(game) = games.get(&entry.id) else {
            warn!(game_id = entry.id, "media entry references unknown game, skipping");
            continue;
        };
        let Some(home_team) = teams.get(&game.home_id) else {
            warn!(game_id = game.id, team_id = game.home_id, "unknown home team, skipping");
            continue;
        };
        let Some(away_team) = teams.get(&game.away_id) else {
            warn!(game_id = game.id, team_id = game.away_id, "unknown away team, skipping");
            continue;
        };

        if current_date != Some(entry.date_only) {
            days.push(ScheduleDay {
                date: entry.date_only,
                day: entry.day.clone(),
                dow: entry.dow,
                first_game_start: entry.start_time,
                last_game_start: entry.start_time,
                outlets: Vec::new(),
            });
            current_date = Some(entry.date_only);
            current_outlet = None;
        }

        if let Some(day) = days.last_mut() {
            if current_outlet.as_deref() != Some(entry.outlet.as_str()) {
                day.outlets.push(OutletGroup {
                    name: entry.outlet.clone(),
                    media_type: entry.media_type,
                    games: Vec::new(),
                });
                current_outlet = Some(entry.outlet.clone());
            }

            if let Some(group) = day.outlets.last_mut() {
                group.games.push(ScheduledGame {
                    id: game.id,
                    season: game.season,
                    week: game.week,
                    season_type: game.season_type,
                    start_time: entry.start_time,
                    start_time_tbd: game.start_time_tbd,
                    completed: game.completed,
                    home_team: home_team.clone(),
                    away_team: away_team.clone(),
                    home_points: game.home_points,
                    away_points: game.away_points,
                });
            }

            day.first_game_start = day.first_game_start.min(entry.start_time);
            day.last_game_start = day.last_game_start.max(entry.start_time);
        }
    }

    days
}
