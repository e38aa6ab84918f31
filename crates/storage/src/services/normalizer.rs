//! Turns raw hackathon records into canonical [`Hackathon`]s.
//!
//! A record that cannot be mapped is logged and dropped; it never stops the
//! rest of the batch from being normalized.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::MappingError;
use crate::models::coordinates::{is_valid_latitude, is_valid_longitude};
use crate::models::{Continent, Coordinates, EventType, Hackathon, RawHackathon, RawScalar};

pub const UNTITLED: &str = "Untitled Hackathon";
pub const TBA: &str = "TBA";

/// Maps one raw record. `today` stands in for a missing start date.
pub fn normalize(raw: &RawHackathon, today: NaiveDate) -> Result<Hackathon, MappingError> {
    let id = raw
        .id
        .as_ref()
        .map(ToString::to_string)
        .filter(|id| !id.trim().is_empty())
        .ok_or(MappingError::MissingField("id"))?;

    let (start_date, date) = match non_blank(raw.start_date.as_deref()) {
        None => (today, TBA.to_string()),
        Some(text) => {
            let start = parse_date(text).ok_or_else(|| MappingError::InvalidDate {
                field: "start_date",
                value: text.to_string(),
            })?;
            let end = non_blank(raw.end_date.as_deref()).and_then(|text| {
                let parsed = parse_date(text);
                if parsed.is_none() {
                    debug!(id = %id, end_date = text, "Ignoring unparseable end_date");
                }
                parsed
            });
            (start, date_label(start, end))
        }
    };

    let categories: Vec<String> = raw
        .categories
        .iter()
        .flatten()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect();

    let country = non_blank(raw.country.as_deref()).map(String::from);

    Ok(Hackathon {
        title: non_blank(raw.name.as_deref())
            .unwrap_or(UNTITLED)
            .to_string(),
        date,
        start_date,
        location: location_label(raw.city.as_deref(), country.as_deref()),
        continent: Continent::infer(country.as_deref()),
        country,
        coordinates: Coordinates::new(
            coerce_axis(raw.latitude.as_ref(), is_valid_latitude),
            coerce_axis(raw.longitude.as_ref(), is_valid_longitude),
        ),
        prize_pool: raw
            .prize_pool
            .as_ref()
            .map(ToString::to_string)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| TBA.to_string()),
        event_type: EventType::infer(&categories),
        categories,
        website: non_blank(raw.website_url.as_deref()).map(String::from),
        description: non_blank(raw.description.as_deref()).map(String::from),
        logo_url: non_blank(raw.logo_url.as_deref()).map(String::from),
        is_premium: raw.is_premium.unwrap_or(false),
        id,
    })
}

/// Normalizes a whole fetch. `None` is an empty batch, not an error.
pub fn normalize_batch(rows: Option<Vec<RawHackathon>>, today: NaiveDate) -> Vec<Hackathon> {
    let rows = rows.unwrap_or_default();
    let total = rows.len();

    let hackathons: Vec<Hackathon> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize(raw, today) {
            Ok(hackathon) => Some(hackathon),
            Err(e) => {
                warn!(
                    index,
                    id = ?raw.id.as_ref().map(ToString::to_string),
                    "Skipping hackathon record: {}",
                    e
                );
                None
            }
        })
        .collect();

    if hackathons.len() < total {
        debug!(
            "Normalized {} of {} hackathon records",
            hackathons.len(),
            total
        );
    }

    hackathons
}

/// Schema check plus mapping for untyped records, e.g. a JSON array read from disk.
pub fn normalize_values(values: Vec<serde_json::Value>, today: NaiveDate) -> Vec<Hackathon> {
    let rows = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match RawHackathon::from_value(value) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(index, "Skipping hackathon record: {}", e);
                None
            }
        })
        .collect();

    normalize_batch(Some(rows), today)
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// "Mar 15, 2025", "Mar 15 - Mar 17, 2025" or "Dec 30, 2025 - Jan 2, 2026".
pub fn date_label(start: NaiveDate, end: Option<NaiveDate>) -> String {
    const DAY: &str = "%b %-d";
    const FULL: &str = "%b %-d, %Y";

    match end.filter(|end| *end > start) {
        None => start.format(FULL).to_string(),
        Some(end) if end.year() == start.year() => {
            format!("{} - {}", start.format(DAY), end.format(FULL))
        }
        Some(end) => format!("{} - {}", start.format(FULL), end.format(FULL)),
    }
}

fn location_label(city: Option<&str>, country: Option<&str>) -> String {
    match (non_blank(city), non_blank(country)) {
        (Some(city), Some(country)) => format!("{}, {}", city, country),
        (Some(part), None) | (None, Some(part)) => part.to_string(),
        (None, None) => TBA.to_string(),
    }
}

fn coerce_axis(value: Option<&RawScalar>, in_range: fn(f64) -> bool) -> f64 {
    value
        .and_then(RawScalar::as_f64)
        .filter(|v| in_range(*v))
        .unwrap_or(0.0)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn raw(id: &str) -> RawHackathon {
        RawHackathon {
            id: Some(RawScalar::Text(id.to_string())),
            name: Some("ETHBerlin".to_string()),
            start_date: Some("2025-03-15".to_string()),
            end_date: Some("2025-03-17".to_string()),
            city: Some("Berlin".to_string()),
            country: Some("Germany".to_string()),
            latitude: Some(RawScalar::Text("52.52".to_string())),
            longitude: Some(RawScalar::from(13.405)),
            categories: Some(vec!["Web3".to_string(), "DeFi".to_string()]),
            prize_pool: Some(RawScalar::Text("$50,000".to_string())),
            website_url: Some("https://ethberlin.org".to_string()),
            description: None,
            logo_url: None,
            is_premium: Some(true),
        }
    }

    #[test]
    fn test_normalize_full_record() {
        let hackathon = normalize(&raw("h1"), today()).unwrap();

        assert_eq!(hackathon.id, "h1");
        assert_eq!(hackathon.title, "ETHBerlin");
        assert_eq!(hackathon.date, "Mar 15 - Mar 17, 2025");
        assert_eq!(hackathon.start_date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(hackathon.location, "Berlin, Germany");
        assert_eq!(hackathon.continent, Continent::Europe);
        assert_eq!(hackathon.coordinates, Coordinates::new(52.52, 13.405));
        assert_eq!(hackathon.prize_pool, "$50,000");
        assert_eq!(hackathon.event_type, EventType::Web3);
        assert_eq!(hackathon.categories, vec!["Web3", "DeFi"]);
        assert!(hackathon.is_premium);
    }

    #[test]
    fn test_normalize_sparse_record_uses_defaults() {
        let sparse = RawHackathon {
            id: Some(RawScalar::Text("h2".to_string())),
            ..Default::default()
        };

        let hackathon = normalize(&sparse, today()).unwrap();

        assert_eq!(hackathon.title, UNTITLED);
        assert_eq!(hackathon.date, TBA);
        assert_eq!(hackathon.start_date, today());
        assert_eq!(hackathon.location, TBA);
        assert_eq!(hackathon.continent, Continent::Unknown);
        assert_eq!(hackathon.coordinates, Coordinates::ORIGIN);
        assert_eq!(hackathon.prize_pool, TBA);
        assert_eq!(hackathon.event_type, EventType::Generic);
        assert!(!hackathon.is_premium);
    }

    #[test]
    fn test_invalid_coordinates_default_to_origin() {
        let mut record = raw("h3");
        record.latitude = Some(RawScalar::Text("not a number".to_string()));
        record.longitude = Some(RawScalar::from(540.0));

        let hackathon = normalize(&record, today()).unwrap();
        assert_eq!(hackathon.coordinates, Coordinates::ORIGIN);
    }

    #[test]
    fn test_malformed_start_date_fails() {
        let mut record = raw("h4");
        record.start_date = Some("15/03/2025".to_string());

        assert_eq!(
            normalize(&record, today()),
            Err(MappingError::InvalidDate {
                field: "start_date",
                value: "15/03/2025".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_end_date_is_ignored() {
        let mut record = raw("h5");
        record.end_date = Some("soon".to_string());

        let hackathon = normalize(&record, today()).unwrap();
        assert_eq!(hackathon.date, "Mar 15, 2025");
    }

    #[test]
    fn test_missing_id_fails() {
        let mut record = raw("h6");
        record.id = None;
        assert_eq!(
            normalize(&record, today()),
            Err(MappingError::MissingField("id"))
        );
    }

    #[test]
    fn test_batch_skips_only_bad_records() {
        let mut bad = raw("bad");
        bad.start_date = Some("2025-13-45".to_string());
        let rows = vec![raw("a"), bad, raw("c")];

        let good_alone = normalize(&raw("a"), today()).unwrap();
        let hackathons = normalize_batch(Some(rows), today());

        assert_eq!(hackathons.len(), 2);
        assert_eq!(hackathons[0], good_alone);
        assert_eq!(hackathons[1].id, "c");
    }

    #[test]
    fn test_batch_none_is_empty() {
        assert!(normalize_batch(None, today()).is_empty());
    }

    #[test]
    fn test_every_valid_record_has_coordinates_and_type() {
        let countries = [Some("Kenya"), Some("Atlantis"), None, Some("Peru")];
        let tags = [vec!["llm"], vec!["cloud"], vec![], vec!["crypto", "ai"]];

        for (i, (country, tags)) in countries.iter().zip(tags.iter()).enumerate() {
            let record = RawHackathon {
                id: Some(RawScalar::Text(i.to_string())),
                country: country.map(String::from),
                categories: Some(tags.iter().map(|t| t.to_string()).collect()),
                ..Default::default()
            };
            let hackathon = normalize(&record, today()).unwrap();
            assert!(EventType::ALL.contains(&hackathon.event_type));
            assert!(Continent::ALL.contains(&hackathon.continent));
            assert!(hackathon.coordinates.latitude.is_finite());
        }
    }

    #[test]
    fn test_normalize_values_drops_schema_failures() {
        let values = vec![
            json!({ "id": 1, "name": "One", "start_date": "2025-04-01" }),
            json!("garbage"),
            json!({ "id": 3, "name": "Three", "latitude": {"nested": true} }),
            json!({ "id": 4, "name": "Four", "start_date": "2025-05-01T09:00:00Z" }),
        ];

        let hackathons = normalize_values(values, today());
        let ids: Vec<&str> = hackathons.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(hackathons[1].date, "May 1, 2025");
    }

    #[test]
    fn test_date_label_across_years() {
        let start = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(date_label(start, Some(end)), "Dec 30, 2025 - Jan 2, 2026");
        assert_eq!(date_label(start, Some(start)), "Dec 30, 2025");
    }

    #[test]
    fn test_location_label_partial() {
        assert_eq!(location_label(Some("Lagos"), None), "Lagos");
        assert_eq!(location_label(None, Some("Nigeria")), "Nigeria");
        assert_eq!(location_label(Some(" "), Some("")), TBA);
    }
}
