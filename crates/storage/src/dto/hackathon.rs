use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Coordinates, NewHackathon};
use crate::services::filter::{CategoryMode, FilterState};

pub const MAX_WEEKS_AHEAD: u32 = 52;

/// Request payload for submitting a new hackathon
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateHackathonRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 255))]
    pub city: Option<String>,

    #[validate(length(max = 255))]
    pub country: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within [-90, 90]"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within [-180, 180]"))]
    pub longitude: Option<f64>,

    #[serde(default)]
    #[validate(custom(function = "validate_categories"))]
    pub categories: Vec<String>,

    #[validate(length(max = 255))]
    pub prize_pool: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website_url: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,

    pub submitted_by: Option<Uuid>,
}

/// Request payload for editing an existing hackathon. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateHackathonRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 255))]
    pub city: Option<String>,

    #[validate(length(max = 255))]
    pub country: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[validate(custom(function = "validate_categories"))]
    pub categories: Option<Vec<String>>,

    #[validate(length(max = 255))]
    pub prize_pool: Option<String>,

    #[validate(url)]
    pub website_url: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(url)]
    pub logo_url: Option<String>,
}

// Validation helpers
fn validate_categories(categories: &Vec<String>) -> Result<(), validator::ValidationError> {
    if categories.len() > 10 {
        return Err(validator::ValidationError::new("too_many_categories"));
    }

    let is_valid = categories
        .iter()
        .all(|tag| !tag.trim().is_empty() && tag.len() <= 50);

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_category"))
    }
}

fn check_date_order(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), &'static str> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err("End date must be on or after start date");
    }
    Ok(())
}

fn check_coordinate_pair(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), &'static str> {
    if latitude.is_some() != longitude.is_some() {
        return Err("Latitude and longitude must be provided together");
    }
    Ok(())
}

impl CreateHackathonRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_consistency(&self) -> Result<(), &'static str> {
        check_date_order(Some(self.start_date), self.end_date)?;
        check_coordinate_pair(self.latitude, self.longitude)
    }

    /// Submitted location, before any jitter is applied.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }

    pub fn into_new_hackathon(self, coordinates: Option<Coordinates>) -> NewHackathon {
        NewHackathon {
            name: self.name.trim().to_string(),
            start_date: Some(self.start_date),
            end_date: self.end_date,
            city: self.city,
            country: self.country,
            coordinates,
            categories: self.categories,
            prize_pool: self.prize_pool,
            website_url: self.website_url,
            description: self.description,
            logo_url: self.logo_url,
            submitted_by: self.submitted_by,
        }
    }
}

impl UpdateHackathonRequest {
    pub fn validate_consistency(&self) -> Result<(), &'static str> {
        check_date_order(self.start_date, self.end_date)?;
        check_coordinate_pair(self.latitude, self.longitude)
    }
}

/// Map/list filter as sent in the query string.
///
/// `categories` and `continents` are comma separated, e.g.
/// `?categories=ai,web3&continents=Europe,North%20America&weeks_ahead=4`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HackathonFilterQuery {
    pub categories: Option<String>,
    pub continents: Option<String>,
    pub location: Option<String>,
    pub weeks_ahead: Option<u32>,
    pub category_mode: Option<CategoryMode>,
}

impl HackathonFilterQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(weeks) = self.weeks_ahead
            && weeks > MAX_WEEKS_AHEAD
        {
            return Err(format!("weeks_ahead must be between 0 and {}", MAX_WEEKS_AHEAD));
        }
        Ok(())
    }

    pub fn to_filter_state(&self) -> FilterState {
        let mut filter = FilterState::new();

        for category in split_list(self.categories.as_deref()) {
            filter.select_category(category);
        }
        for continent in split_list(self.continents.as_deref()) {
            filter.select_continent(continent);
        }
        if let Some(location) = self.location.as_deref() {
            filter.set_location(location);
        }
        filter
            .set_weeks_ahead(self.weeks_ahead.unwrap_or(0))
            .set_category_mode(self.category_mode.unwrap_or_default());

        filter
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .into_iter()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateHackathonRequest {
        CreateHackathonRequest {
            name: "HackZurich".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 14),
            city: Some("Zurich".to_string()),
            country: Some("Switzerland".to_string()),
            latitude: Some(47.3769),
            longitude: Some(8.5417),
            categories: vec!["AI".to_string()],
            prize_pool: None,
            website_url: Some("https://hackzurich.com".to_string()),
            description: None,
            logo_url: None,
            submitted_by: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = create_request();
        assert!(req.validate().is_ok());
        assert!(req.validate_consistency().is_ok());
    }

    #[test]
    fn test_field_validation_failures() {
        let mut req = create_request();
        req.name = String::new();
        req.latitude = Some(120.0);
        req.website_url = Some("not a url".to_string());
        req.categories = vec![" ".to_string()];

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("latitude"));
        assert!(fields.contains_key("website_url"));
        assert!(fields.contains_key("categories"));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut req = create_request();
        req.end_date = NaiveDate::from_ymd_opt(2025, 9, 1);
        assert!(req.validate_consistency().is_err());
    }

    #[test]
    fn test_half_coordinate_rejected() {
        let mut req = create_request();
        req.longitude = None;
        assert!(req.validate_consistency().is_err());

        let update = UpdateHackathonRequest {
            latitude: Some(1.0),
            ..Default::default()
        };
        assert!(update.validate_consistency().is_err());
    }

    #[test]
    fn test_into_new_hackathon_keeps_given_coordinates() {
        let jittered = Coordinates::new(47.378, 8.54);
        let new = create_request().into_new_hackathon(Some(jittered));
        assert_eq!(new.coordinates, Some(jittered));
        assert_eq!(new.start_date, NaiveDate::from_ymd_opt(2025, 9, 12));
    }

    #[test]
    fn test_query_to_filter_state() {
        let query = HackathonFilterQuery {
            categories: Some("AI, web3,,".to_string()),
            continents: Some("Europe,North America".to_string()),
            location: Some(" Berlin ".to_string()),
            weeks_ahead: Some(4),
            category_mode: Some(CategoryMode::Tags),
        };

        let filter = query.to_filter_state();
        assert_eq!(filter.categories().len(), 2);
        assert!(filter.categories().contains("web3"));
        assert!(filter.continents().contains("north america"));
        assert_eq!(filter.location(), "berlin");
        assert_eq!(filter.weeks_ahead(), 4);
        assert_eq!(filter.category_mode(), CategoryMode::Tags);
    }

    #[test]
    fn test_empty_query_is_default_filter() {
        assert_eq!(
            HackathonFilterQuery::default().to_filter_state(),
            FilterState::default()
        );
    }

    #[test]
    fn test_weeks_ahead_bound() {
        let query = HackathonFilterQuery {
            weeks_ahead: Some(53),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
