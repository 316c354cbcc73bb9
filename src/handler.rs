use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::cfbd::Cfbd;
use crate::error::CfbdError;
use crate::model::media_type::MediaType;
use crate::model::season_type::SeasonType;
use crate::schedule::assemble_schedule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Production,
    /// Enables the local snapshot cache and permissive dev headers.
    Development,
}

/// Which of the three views of the week the caller wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Schedule,
    Calendar,
    Media,
}

/// Query parameters carried in the Lambda event payload. `seasonType` and
/// `mediaType` stay raw strings here so an unrecognized token turns into a
/// 400 response instead of a payload deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub endpoint: Endpoint,
    #[serde(default)]
    pub mode: Mode,
    /// Season year; empty or absent means the current UTC year.
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default = "default_week")]
    pub week: String,
    #[serde(default = "default_season_type")]
    pub season_type: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    #[serde(default)]
    pub exclude_tbd: bool,
}

fn default_week() -> String {
    "1".to_string()
}

fn default_season_type() -> String {
    "regular".to_string()
}

fn default_media_type() -> String {
    "tv".to_string()
}

/// Proxy-style response: the status code mirrors the upstream outcome, the
/// body is already-serialized JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Listing row for the media endpoint: which outlet airs on which date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaListing {
    pub date: NaiveDate,
    pub outlet: String,
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let payload = event.payload;

    // Required config; the credential is only ever passed through to CFBD.
    let api_key = env::var("CFBD_API_KEY").expect("CFBD_API_KEY must be set");

    let cfbd = match payload.mode {
        Mode::Development => {
            let dir = env::var("CFBD_SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir());
            Cfbd::new(api_key).with_snapshot_dir(dir)
        }
        Mode::Production => Cfbd::new(api_key),
    };

    let season = match payload.season.as_deref() {
        Some(season) if !season.is_empty() => season.to_string(),
        _ => Utc::now().year().to_string(),
    };

    let response = match payload.endpoint {
        Endpoint::Schedule => {
            schedule_response(
                cfbd,
                payload.mode,
                season,
                payload.week,
                &payload.season_type,
                &payload.media_type,
                payload.exclude_tbd,
            )
            .await
        }
        Endpoint::Calendar => calendar_response(cfbd, payload.mode, season).await,
        Endpoint::Media => {
            media_response(
                cfbd,
                payload.mode,
                season,
                payload.week,
                &payload.season_type,
                &payload.media_type,
            )
            .await
        }
    };

    Ok(response)
}

async fn schedule_response(
    cfbd: Cfbd,
    mode: Mode,
    season: String,
    week: String,
    season_type: &str,
    media_type: &str,
    exclude_tbd: bool,
) -> Response {
    let season_type = match parse_season_type(season_type) {
        Ok(parsed) => parsed,
        Err(e) => return failure_response(&e, mode),
    };
    let media_type = match parse_media_type(media_type) {
        Ok(parsed) => parsed,
        Err(e) => return failure_response(&e, mode),
    };

    // Three independent reads, none depends on another's result; ureq
    // blocks, so each gets its own blocking task and owns its inputs.
    let games_task = {
        let cfbd = cfbd.clone();
        let (season, week) = (season.clone(), week.clone());
        tokio::task::spawn_blocking(move || cfbd.fetch_games(&season, &week, season_type))
    };
    let teams_task = {
        let cfbd = cfbd.clone();
        tokio::task::spawn_blocking(move || cfbd.fetch_teams())
    };
    let media_task = {
        let cfbd = cfbd.clone();
        let (season, week) = (season.clone(), week.clone());
        tokio::task::spawn_blocking(move || {
            cfbd.fetch_media(&season, &week, season_type, media_type)
        })
    };

    // The assembler never runs on partial data: the first failed fetch
    // fails the whole query with its own status.
    let games = match games_task.await {
        Ok(Ok(games)) => games,
        Ok(Err(e)) => return failure_response(&e, mode),
        Err(e) => return join_failure_response(&e, mode),
    };
    let teams = match teams_task.await {
        Ok(Ok(teams)) => teams,
        Ok(Err(e)) => return failure_response(&e, mode),
        Err(e) => return join_failure_response(&e, mode),
    };
    let media = match media_task.await {
        Ok(Ok(media)) => media,
        Ok(Err(e)) => return failure_response(&e, mode),
        Err(e) => return join_failure_response(&e, mode),
    };

    let schedule = assemble_schedule(&games, &teams, &media, exclude_tbd);
    info!(days = schedule.len(), "assembled schedule");
    json_response(&schedule, mode)
}

async fn calendar_response(cfbd: Cfbd, mode: Mode, season: String) -> Response {
    let task = tokio::task::spawn_blocking(move || cfbd.fetch_calendar(&season));
    match task.await {
        Ok(Ok(calendar)) => json_response(&calendar, mode),
        Ok(Err(e)) => failure_response(&e, mode),
        Err(e) => join_failure_response(&e, mode),
    }
}

async fn media_response(
    cfbd: Cfbd,
    mode: Mode,
    season: String,
    week: String,
    season_type: &str,
    media_type: &str,
) -> Response {
    let season_type = match parse_season_type(season_type) {
        Ok(parsed) => parsed,
        Err(e) => return failure_response(&e, mode),
    };
    let media_type = match parse_media_type(media_type) {
        Ok(parsed) => parsed,
        Err(e) => return failure_response(&e, mode),
    };

    let task = tokio::task::spawn_blocking(move || {
        cfbd.fetch_media(&season, &week, season_type, media_type)
    });
    match task.await {
        Ok(Ok(media)) => {
            let listings: Vec<MediaListing> = media
                .into_iter()
                .map(|entry| MediaListing {
                    date: entry.date_only,
                    outlet: entry.outlet,
                })
                .collect();
            json_response(&listings, mode)
        }
        Ok(Err(e)) => failure_response(&e, mode),
        Err(e) => join_failure_response(&e, mode),
    }
}

/// Reject an unrecognized seasonType token before any fetch is issued.
fn parse_season_type(token: &str) -> Result<SeasonType, CfbdError> {
    SeasonType::from_token(token).ok_or_else(|| CfbdError::InvalidParam {
        param: "seasonType",
        value: token.to_string(),
        allowed: &SeasonType::TOKENS,
    })
}

/// Reject an unrecognized mediaType token before any fetch is issued.
fn parse_media_type(token: &str) -> Result<MediaType, CfbdError> {
    MediaType::from_token(token).ok_or_else(|| CfbdError::InvalidParam {
        param: "mediaType",
        value: token.to_string(),
        allowed: &MediaType::TOKENS,
    })
}

fn json_response<T: Serialize>(value: &T, mode: Mode) -> Response {
    match serde_json::to_string(value) {
        Ok(body) => Response {
            status_code: 200,
            headers: headers(mode),
            body,
        },
        Err(e) => {
            error!(error = %e, "failed to serialize response body");
            Response {
                status_code: 500,
                headers: headers(mode),
                body: "\"serialization failure\"".to_string(),
            }
        }
    }
}

/// Map a data-source failure onto a response: upstream failures keep their
/// status, bad request params become 400, the rest surface as 502.
pub fn failure_response(error: &CfbdError, mode: Mode) -> Response {
    error!(error = %error, "request failed");
    let body = serde_json::to_string(&error.to_string()).unwrap_or_default();
    Response {
        status_code: error.status_code(),
        headers: headers(mode),
        body,
    }
}

fn join_failure_response(error: &tokio::task::JoinError, mode: Mode) -> Response {
    error!(error = %error, "fetch task failed to join");
    Response {
        status_code: 500,
        headers: headers(mode),
        body: "\"internal failure\"".to_string(),
    }
}

/// Response headers; development adds CORS and disables caching.
pub fn headers(mode: Mode) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    match mode {
        Mode::Production => {
            headers.insert(
                "Cache-Control".to_string(),
                "max-age=300, public".to_string(),
            );
        }
        Mode::Development => {
            headers.insert("Cache-Control".to_string(), "no-cache".to_string());
            headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        }
    }
    headers
}
