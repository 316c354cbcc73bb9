use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc, Weekday};
use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationErrorKind};
use crate::model::calendar::CalendarEntry;
use crate::model::game::Game;
use crate::model::media::MediaEntry;
use crate::model::media_type::MediaType;
use crate::model::season_type::SeasonType;
use crate::model::team::Team;

/// Time zone the CFBD API expresses kickoff times in.
const API_TIME_ZONE: chrono_tz::Tz = chrono_tz::America::New_York;

/// Kickoffs before this local hour belong to the previous evening's slate.
const BROADCAST_DAY_ROLLOVER_HOUR: u32 = 7;

/// Validate a raw `/games` payload into typed games.
/// Fails on the first record that does not match the expected shape.
pub fn validate_games(raw: &Value) -> Result<Vec<Game>, ValidationError> {
    each(raw, game_from_value)
}

/// Validate a raw `/teams` payload into typed teams.
pub fn validate_teams(raw: &Value) -> Result<Vec<Team>, ValidationError> {
    each(raw, team_from_value)
}

/// Validate a raw `/games/media` payload into typed media entries,
/// deriving the broadcast-day fields (`date_only`, `day`, `dow`) that the
/// schedule assembler groups on.
pub fn validate_media(raw: &Value) -> Result<Vec<MediaEntry>, ValidationError> {
    each(raw, media_from_value)
}

/// Validate a raw `/calendar` payload into typed calendar entries.
pub fn validate_calendar(raw: &Value) -> Result<Vec<CalendarEntry>, ValidationError> {
    each(raw, calendar_from_value)
}

/// Calendar date a kickoff belongs to for scheduling display: the local
/// (Eastern) date of the instant, rolled back one day for starts before
/// 07:00 local so past-midnight games stay with the prior evening.
pub fn broadcast_date(start: DateTime<Utc>) -> NaiveDate {
    let local = start.with_timezone(&API_TIME_ZONE);
    let date = local.date_naive();
    if local.hour() < BROADCAST_DAY_ROLLOVER_HOUR {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// English weekday name used in the schedule output.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn each<T>(
    raw: &Value,
    record: fn(&Value, &str) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    let items = as_array(raw, "$")?;
    items
        .iter()
        .enumerate()
        .map(|(i, value)| record(value, &format!("$[{i}]")))
        .collect()
}

fn game_from_value(value: &Value, path: &str) -> Result<Game, ValidationError> {
    let obj = as_object(value, path)?;
    Ok(Game {
        id: require_i64(obj, path, "id")?,
        season: require_i64(obj, path, "season")?,
        week: require_i64(obj, path, "week")?,
        season_type: require_season_type(obj, path, "season_type")?,
        start_date: require_instant(obj, path, "start_date")?,
        start_time_tbd: require_bool(obj, path, "start_time_tbd")?,
        completed: require_bool(obj, path, "completed")?,
        home_id: require_i64(obj, path, "home_id")?,
        home_team: require_string(obj, path, "home_team")?,
        home_points: require_nullable_i64(obj, path, "home_points")?,
        away_id: require_i64(obj, path, "away_id")?,
        away_team: require_string(obj, path, "away_team")?,
        away_points: require_nullable_i64(obj, path, "away_points")?,
    })
}

fn team_from_value(value: &Value, path: &str) -> Result<Team, ValidationError> {
    let obj = as_object(value, path)?;
    Ok(Team {
        id: require_i64(obj, path, "id")?,
        school: require_string(obj, path, "school")?,
        mascot: require_nullable_string(obj, path, "mascot")?,
        abbreviation: require_nullable_string(obj, path, "abbreviation")?,
        conference: require_nullable_string(obj, path, "conference")?,
        color: require_nullable_string(obj, path, "color")?,
        alt_color: require_nullable_string(obj, path, "alt_color")?,
        logos: require_nullable_string_list(obj, path, "logos")?,
    })
}

fn media_from_value(value: &Value, path: &str) -> Result<MediaEntry, ValidationError> {
    let obj = as_object(value, path)?;
    let start_time = require_instant(obj, path, "startTime")?;
    let date_only = broadcast_date(start_time);
    Ok(MediaEntry {
        id: require_i64(obj, path, "id")?,
        season: require_i64(obj, path, "season")?,
        week: require_i64(obj, path, "week")?,
        season_type: require_season_type(obj, path, "seasonType")?,
        start_time,
        date_only,
        day: weekday_name(date_only).to_string(),
        dow: date_only.weekday().num_days_from_sunday(),
        is_start_time_tbd: require_bool(obj, path, "isStartTimeTBD")?,
        home_team: require_string(obj, path, "homeTeam")?,
        home_conference: require_string(obj, path, "homeConference")?,
        away_team: require_string(obj, path, "awayTeam")?,
        away_conference: require_string(obj, path, "awayConference")?,
        media_type: require_media_type(obj, path, "mediaType")?,
        outlet: require_string(obj, path, "outlet")?,
    })
}

fn calendar_from_value(value: &Value, path: &str) -> Result<CalendarEntry, ValidationError> {
    let obj = as_object(value, path)?;
    Ok(CalendarEntry {
        season: require_string(obj, path, "season")?,
        week: require_i64(obj, path, "week")?,
        season_type: require_season_type(obj, path, "seasonType")?,
        first_game_start: require_instant(obj, path, "firstGameStart")?,
        last_game_start: require_instant(obj, path, "lastGameStart")?,
    })
}

// Field access. A required field must be present; nullable fields may hold
// null but their key must still exist.

fn require<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<(&'a Value, String), ValidationError> {
    let child = format!("{path}.{name}");
    match obj.get(name) {
        Some(value) => Ok((value, child)),
        None => Err(ValidationError {
            path: child,
            kind: ValidationErrorKind::MissingField,
        }),
    }
}

fn require_i64(obj: &Map<String, Value>, path: &str, name: &str) -> Result<i64, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    as_i64(value, &child)
}

fn require_bool(obj: &Map<String, Value>, path: &str, name: &str) -> Result<bool, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    value
        .as_bool()
        .ok_or_else(|| mismatch(&child, "boolean", value))
}

fn require_string(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<String, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    Ok(as_str(value, &child)?.to_string())
}

fn require_nullable_i64(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<Option<i64>, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    if value.is_null() {
        return Ok(None);
    }
    as_i64(value, &child).map(Some)
}

fn require_nullable_string(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<Option<String>, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(as_str(value, &child)?.to_string()))
}

fn require_nullable_string_list(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<Option<Vec<String>>, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    if value.is_null() {
        return Ok(None);
    }
    let items = as_array(value, &child)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(as_str(item, &format!("{child}[{i}]"))?.to_string());
    }
    Ok(Some(out))
}

fn require_instant(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<DateTime<Utc>, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    let text = as_str(value, &child)?;
    parse_instant(text).ok_or_else(|| ValidationError {
        path: child,
        kind: ValidationErrorKind::TypeMismatch {
            expected: "ISO-8601 date-time string",
            found: format!("{text:?}"),
        },
    })
}

fn require_season_type(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<SeasonType, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    let token = as_str(value, &child)?;
    SeasonType::from_token(token).ok_or_else(|| invalid_enum(&child, token, &SeasonType::TOKENS))
}

fn require_media_type(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<MediaType, ValidationError> {
    let (value, child) = require(obj, path, name)?;
    let token = as_str(value, &child)?;
    MediaType::from_token(token).ok_or_else(|| invalid_enum(&child, token, &MediaType::TOKENS))
}

// Shape checks against the decoded JSON.

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| mismatch(path, "object", value))
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ValidationError> {
    value.as_array().ok_or_else(|| mismatch(path, "array", value))
}

fn as_i64(value: &Value, path: &str) -> Result<i64, ValidationError> {
    value
        .as_i64()
        .ok_or_else(|| mismatch(path, "integer", value))
}

fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| mismatch(path, "string", value))
}

/// RFC 3339 first, then a naive timestamp without offset treated as UTC.
fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
        .ok()
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError {
        path: path.to_string(),
        kind: ValidationErrorKind::TypeMismatch {
            expected,
            found: json_type_name(found).to_string(),
        },
    }
}

fn invalid_enum(path: &str, token: &str, allowed: &'static [&'static str]) -> ValidationError {
    ValidationError {
        path: path.to_string(),
        kind: ValidationErrorKind::InvalidEnum {
            token: token.to_string(),
            allowed,
        },
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
