use serde::{Deserialize, Serialize};

/// Distribution channel a broadcast slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Tv,
    Web,
    Radio,
    Ppv,
    Mobile,
}

impl MediaType {
    /// Tokens accepted from query parameters and upstream records.
    pub const TOKENS: [&'static str; 5] = ["tv", "web", "radio", "ppv", "mobile"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "tv" => Some(MediaType::Tv),
            "web" => Some(MediaType::Web),
            "radio" => Some(MediaType::Radio),
            "ppv" => Some(MediaType::Ppv),
            "mobile" => Some(MediaType::Mobile),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            MediaType::Tv => "tv",
            MediaType::Web => "web",
            MediaType::Radio => "radio",
            MediaType::Ppv => "ppv",
            MediaType::Mobile => "mobile",
        }
    }
}
