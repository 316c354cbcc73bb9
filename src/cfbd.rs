use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, info_span, instrument, warn};
use ureq::Agent;

use crate::error::CfbdError;
use crate::model::calendar::CalendarEntry;
use crate::model::game::Game;
use crate::model::media::MediaEntry;
use crate::model::media_type::MediaType;
use crate::model::season_type::SeasonType;
use crate::model::team::Team;
use crate::validate;

const DEFAULT_BASE_URL: &str = "https://api.collegefootballdata.com";

/// Client for the CollegeFootballData API. Holds the bearer credential and
/// a pre-configured agent; HTTP error statuses are surfaced as upstream
/// failures with their own status code, never as transport errors.
///
/// When a snapshot directory is set (development mode), each fetch first
/// tries `<dir>/<key>.json` and skips the network on a hit; after a
/// successful fetch the validated records are written back there. Snapshot
/// trouble is only ever a warning.
#[derive(Debug, Clone)]
pub struct Cfbd {
    agent: Agent,
    base_url: String,
    api_key: String,
    snapshot_dir: Option<PathBuf>,
}

impl Cfbd {
    pub fn new(api_key: String) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(10)))
            .build();
        Cfbd {
            agent: Agent::new_with_config(config),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            snapshot_dir: None,
        }
    }

    /// Point the client at a different API host (local stubs in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Enable the development snapshot cache under the given directory.
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    /// Fetch one week's games, keyed by game id.
    #[instrument(skip(self))]
    pub fn fetch_games(
        &self,
        year: &str,
        week: &str,
        season_type: SeasonType,
    ) -> Result<HashMap<i64, Game>, CfbdError> {
        let url = format!(
            "{}/games?year={}&week={}&seasonType={}",
            self.base_url,
            year,
            week,
            season_type.as_token()
        );
        let key = format!("games-{}-{}-{}", year, week, season_type.as_token());

        let (raw, from_snapshot) = self.load(&key, &url)?;
        let games = validate::validate_games(&raw)?;
        if !from_snapshot {
            self.write_snapshot(&key, &games);
        }

        let by_id: HashMap<i64, Game> = games.into_iter().map(|game| (game.id, game)).collect();
        info!(count = by_id.len(), "fetched games");
        Ok(by_id)
    }

    /// Fetch all teams, keyed by team id.
    #[instrument(skip(self))]
    pub fn fetch_teams(&self) -> Result<HashMap<i64, Team>, CfbdError> {
        let url = format!("{}/teams", self.base_url);

        let (raw, from_snapshot) = self.load("teams", &url)?;
        let teams = validate::validate_teams(&raw)?;
        if !from_snapshot {
            self.write_snapshot("teams", &teams);
        }

        let by_id: HashMap<i64, Team> = teams.into_iter().map(|team| (team.id, team)).collect();
        info!(count = by_id.len(), "fetched teams");
        Ok(by_id)
    }

    /// Fetch one week's broadcast media, validated and sorted by
    /// (date_only, outlet, start_time), the order the schedule assembler
    /// relies on.
    #[instrument(skip(self))]
    pub fn fetch_media(
        &self,
        year: &str,
        week: &str,
        season_type: SeasonType,
        media_type: MediaType,
    ) -> Result<Vec<MediaEntry>, CfbdError> {
        let url = format!(
            "{}/games/media?year={}&week={}&seasonType={}&mediaType={}",
            self.base_url,
            year,
            week,
            season_type.as_token(),
            media_type.as_token()
        );
        let key = format!(
            "media-{}-{}-{}-{}",
            year,
            week,
            season_type.as_token(),
            media_type.as_token()
        );

        let (raw, from_snapshot) = self.load(&key, &url)?;
        let mut media = validate::validate_media(&raw)?;
        media.sort_by(|a, b| {
            a.date_only
                .cmp(&b.date_only)
                .then_with(|| a.outlet.cmp(&b.outlet))
                .then_with(|| a.start_time.cmp(&b.start_time))
        });
        if !from_snapshot {
            self.write_snapshot(&key, &media);
        }

        info!(count = media.len(), "fetched media");
        Ok(media)
    }

    /// Fetch the week-by-week calendar for a season. Validation only, no
    /// reshaping.
    #[instrument(skip(self))]
    pub fn fetch_calendar(&self, year: &str) -> Result<Vec<CalendarEntry>, CfbdError> {
        let url = format!("{}/calendar?year={}", self.base_url, year);
        let key = format!("calendar-{}", year);

        let (raw, from_snapshot) = self.load(&key, &url)?;
        let calendar = validate::validate_calendar(&raw)?;
        if !from_snapshot {
            self.write_snapshot(&key, &calendar);
        }

        info!(count = calendar.len(), "fetched calendar");
        Ok(calendar)
    }

    /// Raw payload for a fetch: the snapshot if one is readable, otherwise
    /// the network. The flag reports which path was taken.
    fn load(&self, key: &str, url: &str) -> Result<(Value, bool), CfbdError> {
        if let Some(value) = self.read_snapshot(key) {
            return Ok((value, true));
        }
        Ok((self.http_get(url)?, false))
    }

    fn http_get(&self, url: &str) -> Result<Value, CfbdError> {
        let _span = info_span!("cfbd_fetch", url = %url).entered();
        let response = self
            .agent
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .call()?;

        let status = response.status();
        let mut body = response.into_body();
        if !status.is_success() {
            // Upstream message is the response text; fall back to the
            // status line when the body itself cannot be read.
            let message = body
                .read_to_string()
                .unwrap_or_else(|_| status.to_string());
            return Err(CfbdError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body.read_json::<Value>()?)
    }

    fn snapshot_path(&self, key: &str) -> Option<PathBuf> {
        self.snapshot_dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }

    fn read_snapshot(&self, key: &str) -> Option<Value> {
        let path = self.snapshot_path(key)?;
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(value) => {
                    info!(snapshot = %path.display(), "loaded snapshot");
                    Some(value)
                }
                Err(e) => {
                    warn!(snapshot = %path.display(), error = %e, "unreadable snapshot, refetching");
                    None
                }
            },
            Err(e) => {
                warn!(snapshot = %path.display(), error = %e, "failed to read snapshot, refetching");
                None
            }
        }
    }

    fn write_snapshot<T: Serialize>(&self, key: &str, records: &T) {
        let Some(path) = self.snapshot_path(key) else {
            return;
        };
        let serialized = match serde_json::to_string(records) {
            Ok(s) => s,
            Err(e) => {
                warn!(snapshot = %path.display(), error = %e, "failed to serialize snapshot");
                return;
            }
        };
        if let Err(e) = std::fs::write(&path, serialized) {
            warn!(snapshot = %path.display(), error = %e, "failed to write snapshot");
        }
    }
}
