use std::fs;
use std::path::{Path, PathBuf};

use lambda_runtime::{Context, LambdaEvent};
use serde_json::json;

use cfb_schedule_lambda_rust::error::{CfbdError, ValidationError, ValidationErrorKind};
use cfb_schedule_lambda_rust::handler::{
    failure_response, handler, headers, Endpoint, Mode, Request, Response,
};

fn snapshot_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cfbd-snapshots-{}-{}", tag, std::process::id()));
    fs::create_dir_all(&dir).expect("failed to create snapshot dir");
    dir
}

fn seed(dir: &Path, key: &str, fixture: &str) {
    let contents =
        fs::read_to_string(format!("tests/{}", fixture)).expect("failed to read fixture");
    fs::write(dir.join(format!("{}.json", key)), contents).expect("failed to seed snapshot");
}

fn schedule_request() -> Request {
    Request {
        endpoint: Endpoint::Schedule,
        mode: Mode::Development,
        season: Some("2023".to_string()),
        week: "1".to_string(),
        season_type: "regular".to_string(),
        media_type: "tv".to_string(),
        exclude_tbd: false,
    }
}

#[test]
fn request_defaults_fill_missing_fields() {
    let req: Request = serde_json::from_value(json!({})).unwrap();

    assert_eq!(req.endpoint, Endpoint::Schedule);
    assert_eq!(req.mode, Mode::Production);
    assert_eq!(req.season, None);
    assert_eq!(req.week, "1");
    assert_eq!(req.season_type, "regular");
    assert_eq!(req.media_type, "tv");
    assert!(!req.exclude_tbd);
}

#[test]
fn request_reads_camel_case_tokens() {
    let req: Request = serde_json::from_value(json!({
        "endpoint": "media",
        "mode": "development",
        "season": "2024",
        "week": "3",
        "seasonType": "postseason",
        "mediaType": "web",
        "excludeTbd": true
    }))
    .unwrap();

    assert_eq!(req.endpoint, Endpoint::Media);
    assert_eq!(req.mode, Mode::Development);
    assert_eq!(req.season.as_deref(), Some("2024"));
    assert_eq!(req.week, "3");
    assert_eq!(req.season_type, "postseason");
    assert_eq!(req.media_type, "web");
    assert!(req.exclude_tbd);

    // An unknown endpoint token is a payload error, not a 400
    let bad: Result<Request, _> = serde_json::from_value(json!({ "endpoint": "scores" }));
    assert!(bad.is_err());
}

#[test]
fn response_serializes_camel_case() {
    let resp = Response {
        status_code: 200,
        headers: headers(Mode::Production),
        body: "[]".to_string(),
    };

    let value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value["statusCode"], 200);
    assert_eq!(value["body"], "[]");
    assert!(value["headers"].is_object());
}

#[test]
fn production_headers_enable_caching() {
    let h = headers(Mode::Production);

    assert_eq!(h.get("Content-Type").map(String::as_str), Some("application/json"));
    assert_eq!(
        h.get("Cache-Control").map(String::as_str),
        Some("max-age=300, public")
    );
    assert!(h.get("Access-Control-Allow-Origin").is_none());
}

#[test]
fn development_headers_allow_cors_and_disable_caching() {
    let h = headers(Mode::Development);

    assert_eq!(h.get("Cache-Control").map(String::as_str), Some("no-cache"));
    assert_eq!(
        h.get("Access-Control-Allow-Origin").map(String::as_str),
        Some("*")
    );
}

#[test]
fn failure_response_maps_error_statuses() {
    let invalid = CfbdError::InvalidParam {
        param: "seasonType",
        value: "spring".to_string(),
        allowed: &["regular", "postseason"],
    };
    let resp = failure_response(&invalid, Mode::Production);
    assert_eq!(resp.status_code, 400);
    let message: String = serde_json::from_str(&resp.body).expect("body is a JSON string");
    assert!(message.contains("seasonType"), "message was: {}", message);

    let upstream = CfbdError::Upstream {
        status: 401,
        message: "Unauthorized".to_string(),
    };
    assert_eq!(failure_response(&upstream, Mode::Production).status_code, 401);

    let validation = CfbdError::Validation(ValidationError {
        path: "$[0].id".to_string(),
        kind: ValidationErrorKind::MissingField,
    });
    assert_eq!(failure_response(&validation, Mode::Development).status_code, 502);
}

/// Drives the full handler offline: development mode reads every payload
/// from seeded snapshots, so no network is involved. All env-dependent
/// cases run inside this one test; parallel test threads never touch
/// these vars.
#[tokio::test]
async fn handler_serves_the_week_from_snapshots() {
    let dir = snapshot_dir("handler");
    seed(&dir, "games-2023-1-regular", "sample_games.json");
    seed(&dir, "teams", "sample_teams.json");
    seed(&dir, "media-2023-1-regular-tv", "sample_media.json");
    seed(&dir, "calendar-2023", "sample_calendar.json");
    unsafe {
        std::env::set_var("CFBD_API_KEY", "test-key");
        std::env::set_var("CFBD_SNAPSHOT_DIR", &dir);
    }

    // Schedule endpoint: nested days, dev headers
    let response = handler(LambdaEvent::new(schedule_request(), Context::default()))
        .await
        .expect("handler should not error");
    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.headers.get("Access-Control-Allow-Origin").map(String::as_str),
        Some("*")
    );
    let days: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(days.as_array().map(Vec::len), Some(2));
    assert_eq!(days[0]["date"], "2023-09-02");
    assert_eq!(days[0]["day"], "Saturday");
    assert_eq!(days[0]["outlets"][1]["name"], "FOX");
    assert_eq!(days[0]["outlets"][1]["games"][0]["homeTeam"]["school"], "TCU");

    // Calendar endpoint: validated pass-through
    let request = Request {
        endpoint: Endpoint::Calendar,
        ..schedule_request()
    };
    let response = handler(LambdaEvent::new(request, Context::default()))
        .await
        .expect("handler should not error");
    assert_eq!(response.status_code, 200);
    let calendar: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(calendar.as_array().map(Vec::len), Some(2));
    assert_eq!(calendar[0]["seasonType"], "regular");
    assert_eq!(calendar[0]["firstGameStart"], "2023-08-26T16:00:00Z");

    // Media endpoint: flat date/outlet listing in broadcast order
    let request = Request {
        endpoint: Endpoint::Media,
        ..schedule_request()
    };
    let response = handler(LambdaEvent::new(request, Context::default()))
        .await
        .expect("handler should not error");
    assert_eq!(response.status_code, 200);
    let listings: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(listings.as_array().map(Vec::len), Some(3));
    assert_eq!(listings[0]["outlet"], "CBS");
    assert_eq!(listings[0]["date"], "2023-09-02");
    assert_eq!(listings[2]["outlet"], "ABC");

    // A bad token is rejected before any fetch happens
    let request = Request {
        season_type: "spring".to_string(),
        ..schedule_request()
    };
    let response = handler(LambdaEvent::new(request, Context::default()))
        .await
        .expect("handler should not error");
    assert_eq!(response.status_code, 400);
    let message: String = serde_json::from_str(&response.body).unwrap();
    assert!(message.contains("seasonType"), "message was: {}", message);
}
