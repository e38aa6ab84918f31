use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

const WEB3_KEYWORDS: &[&str] = &["web3", "blockchain", "crypto"];
const AI_KEYWORDS: &[&str] = &["ai", "ml", "llm"];
const CLOUD_KEYWORDS: &[&str] = &["cloud", "devops"];

/// Coarse classification of a hackathon, derived from its category tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Web3,
    Ai,
    Cloud,
    Generic,
}

impl EventType {
    pub const ALL: [EventType; 4] = [Self::Web3, Self::Ai, Self::Cloud, Self::Generic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web3 => "web3",
            Self::Ai => "ai",
            Self::Cloud => "cloud",
            Self::Generic => "generic",
        }
    }

    /// Keyword sets are checked in priority order; the first set that shares a
    /// tag with `categories` decides the type.
    pub fn infer<S: AsRef<str>>(categories: &[S]) -> Self {
        let tags: Vec<String> = categories
            .iter()
            .map(|tag| tag.as_ref().trim().to_lowercase())
            .collect();
        let has_any = |keywords: &[&str]| tags.iter().any(|tag| keywords.contains(&tag.as_str()));

        if has_any(WEB3_KEYWORDS) {
            Self::Web3
        } else if has_any(AI_KEYWORDS) {
            Self::Ai
        } else if has_any(CLOUD_KEYWORDS) {
            Self::Cloud
        } else {
            Self::Generic
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
