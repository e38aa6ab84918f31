use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub profile_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub subscription_tier: String,
    pub show_on_face_map: bool,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: chrono::NaiveDateTime,
}

impl Profile {
    /// Unrecognised tier strings are treated as free.
    pub fn tier(&self) -> SubscriptionTier {
        self.subscription_tier.parse().unwrap_or_default()
    }

    pub fn is_premium(&self) -> bool {
        self.tier().is_premium()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Team,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Team => "team",
        }
    }

    pub fn is_premium(&self) -> bool {
        !matches!(self, Self::Free)
    }
}

impl FromStr for SubscriptionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "team" => Ok(Self::Team),
            other => Err(format!("unknown subscription tier '{}'", other)),
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values for a new `profiles` row. Coordinates are final (already jittered).
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub show_on_face_map: bool,
    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
}
