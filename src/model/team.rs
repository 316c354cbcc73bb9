use serde::Serialize;

/// Reference data for one school, keyed by its CFBD id. Fetched once per
/// request cycle and never mutated; field names mirror the upstream payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: i64,
    pub school: String,
    pub mascot: Option<String>,
    pub abbreviation: Option<String>,
    pub conference: Option<String>,
    pub color: Option<String>,
    pub alt_color: Option<String>,
    pub logos: Option<Vec<String>>,
}
