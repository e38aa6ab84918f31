use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Continent, Coordinates, EventType};
use crate::error::MappingError;

/// A hackathon row as stored, joined with the submitter's subscription tier.
#[derive(Debug, Clone, FromRow)]
pub struct HackathonRow {
    pub hackathon_id: Uuid,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub prize_pool: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub submitted_by: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub is_premium: bool,
}

/// A JSON scalar that upstream data sends either as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(serde_json::Number),
    Text(String),
}

impl RawScalar {
    /// Numeric value, parsing text if needed. Non-finite values count as absent.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => number.as_f64(),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for RawScalar {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

/// Untrusted incoming hackathon record. Every field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHackathon {
    pub id: Option<RawScalar>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<RawScalar>,
    pub longitude: Option<RawScalar>,
    pub categories: Option<Vec<String>>,
    pub prize_pool: Option<RawScalar>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_premium: Option<bool>,
}

impl RawHackathon {
    /// Schema check for a single untyped record.
    pub fn from_value(value: serde_json::Value) -> Result<Self, MappingError> {
        if !value.is_object() {
            return Err(MappingError::Schema(format!(
                "expected an object, found {}",
                json_kind(&value)
            )));
        }

        serde_json::from_value(value).map_err(|e| MappingError::Schema(e.to_string()))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl From<HackathonRow> for RawHackathon {
    fn from(row: HackathonRow) -> Self {
        Self {
            id: Some(RawScalar::Text(row.hackathon_id.to_string())),
            name: row.name,
            start_date: row.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: row.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            city: row.city,
            country: row.country,
            latitude: row.latitude.map(RawScalar::from),
            longitude: row.longitude.map(RawScalar::from),
            categories: row.categories,
            prize_pool: row.prize_pool.map(RawScalar::Text),
            website_url: row.website_url,
            description: row.description,
            logo_url: row.logo_url,
            is_premium: Some(row.is_premium),
        }
    }
}

/// Canonical, UI-ready hackathon produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Hackathon {
    pub id: String,
    pub title: String,
    /// Human readable date range, or "TBA".
    pub date: String,
    pub start_date: NaiveDate,
    pub location: String,
    pub country: Option<String>,
    pub continent: Continent,
    pub coordinates: Coordinates,
    pub prize_pool: String,
    pub categories: Vec<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub website: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_premium: bool,
}

/// Values for a new `hackathons` row. Coordinates are final (already jittered).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewHackathon {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub categories: Vec<String>,
    pub prize_pool: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub submitted_by: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_scalar_accepts_number_and_text() {
        let raw = RawHackathon::from_value(json!({
            "id": 7,
            "latitude": "48.85",
            "longitude": 2.35,
        }))
        .unwrap();

        assert_eq!(raw.id.as_ref().map(ToString::to_string).as_deref(), Some("7"));
        assert_eq!(raw.latitude.and_then(|v| v.as_f64()), Some(48.85));
        assert_eq!(raw.longitude.and_then(|v| v.as_f64()), Some(2.35));
    }

    #[test]
    fn test_raw_scalar_rejects_garbage_text() {
        assert_eq!(RawScalar::Text("north".into()).as_f64(), None);
        assert_eq!(RawScalar::Text("NaN".into()).as_f64(), None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = RawHackathon::from_value(json!(["not", "a", "record"])).unwrap_err();
        assert!(matches!(err, MappingError::Schema(_)));
    }

    #[test]
    fn test_from_value_rejects_wrong_field_types() {
        let err = RawHackathon::from_value(json!({ "id": "a", "categories": "ai" })).unwrap_err();
        assert!(matches!(err, MappingError::Schema(_)));
    }

    #[test]
    fn test_nulls_are_accepted() {
        let raw = RawHackathon::from_value(json!({
            "id": "x",
            "name": null,
            "categories": null,
            "is_premium": null,
        }))
        .unwrap();
        assert!(raw.name.is_none());
        assert!(raw.categories.is_none());
    }
}
