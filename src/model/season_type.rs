use serde::{Deserialize, Serialize};

/// Regular season vs postseason bracket, mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    Regular,
    Postseason,
}

impl SeasonType {
    /// Tokens accepted from query parameters and upstream records.
    pub const TOKENS: [&'static str; 2] = ["regular", "postseason"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "regular" => Some(SeasonType::Regular),
            "postseason" => Some(SeasonType::Postseason),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            SeasonType::Regular => "regular",
            SeasonType::Postseason => "postseason",
        }
    }
}
