use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::models::Hackathon;

/// What a selected category is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMode {
    /// The inferred coarse type (`web3`, `ai`, `cloud`, `generic`).
    #[default]
    Type,
    /// The raw category tags.
    Tags,
}

/// User-selected constraints. Empty dimensions do not constrain anything.
///
/// Selections are stored lower-cased so matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    categories: BTreeSet<String>,
    continents: BTreeSet<String>,
    location: String,
    weeks_ahead: u32,
    category_mode: CategoryMode,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn continents(&self) -> &BTreeSet<String> {
        &self.continents
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn weeks_ahead(&self) -> u32 {
        self.weeks_ahead
    }

    pub fn category_mode(&self) -> CategoryMode {
        self.category_mode
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.continents.is_empty()
            && self.location.is_empty()
            && self.weeks_ahead == 0
    }

    pub fn select_category(&mut self, category: &str) -> &mut Self {
        if let Some(key) = selection_key(category) {
            self.categories.insert(key);
        }
        self
    }

    pub fn deselect_category(&mut self, category: &str) -> &mut Self {
        if let Some(key) = selection_key(category) {
            self.categories.remove(&key);
        }
        self
    }

    /// Checkbox semantics: adds the category if absent, removes it otherwise.
    pub fn toggle_category(&mut self, category: &str) -> &mut Self {
        if let Some(key) = selection_key(category)
            && !self.categories.remove(&key)
        {
            self.categories.insert(key);
        }
        self
    }

    pub fn select_continent(&mut self, continent: &str) -> &mut Self {
        if let Some(key) = selection_key(continent) {
            self.continents.insert(key);
        }
        self
    }

    pub fn deselect_continent(&mut self, continent: &str) -> &mut Self {
        if let Some(key) = selection_key(continent) {
            self.continents.remove(&key);
        }
        self
    }

    pub fn toggle_continent(&mut self, continent: &str) -> &mut Self {
        if let Some(key) = selection_key(continent)
            && !self.continents.remove(&key)
        {
            self.continents.insert(key);
        }
        self
    }

    pub fn set_location(&mut self, location: &str) -> &mut Self {
        self.location = location.trim().to_lowercase();
        self
    }

    pub fn set_weeks_ahead(&mut self, weeks: u32) -> &mut Self {
        self.weeks_ahead = weeks;
        self
    }

    pub fn set_category_mode(&mut self, mode: CategoryMode) -> &mut Self {
        self.category_mode = mode;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Conjunction of all active dimensions.
    pub fn matches(&self, hackathon: &Hackathon, today: NaiveDate) -> bool {
        self.matches_category(hackathon)
            && self.matches_continent(hackathon)
            && self.matches_location(hackathon)
            && self.matches_window(hackathon, today)
    }

    fn matches_category(&self, hackathon: &Hackathon) -> bool {
        if self.categories.is_empty() {
            return true;
        }

        match self.category_mode {
            CategoryMode::Type => self.categories.contains(hackathon.event_type.as_str()),
            CategoryMode::Tags => hackathon
                .categories
                .iter()
                .any(|tag| self.categories.contains(&tag.trim().to_lowercase())),
        }
    }

    fn matches_continent(&self, hackathon: &Hackathon) -> bool {
        self.continents.is_empty()
            || self
                .continents
                .contains(&hackathon.continent.as_str().to_lowercase())
    }

    fn matches_location(&self, hackathon: &Hackathon) -> bool {
        if self.location.is_empty() {
            return true;
        }

        let needle = self.location.as_str();
        hackathon.title.to_lowercase().contains(needle)
            || hackathon.location.to_lowercase().contains(needle)
            || hackathon
                .country
                .as_deref()
                .is_some_and(|country| country.to_lowercase().contains(needle))
    }

    /// Start date must fall on or after `today + 7 * weeks_ahead` days.
    fn matches_window(&self, hackathon: &Hackathon, today: NaiveDate) -> bool {
        if self.weeks_ahead == 0 {
            return true;
        }

        today
            .checked_add_days(Days::new(7 * u64::from(self.weeks_ahead)))
            .is_some_and(|threshold| hackathon.start_date >= threshold)
    }
}

fn selection_key(value: &str) -> Option<String> {
    let key = value.trim().to_lowercase();
    (!key.is_empty()).then_some(key)
}

/// Returns the hackathons passing `filter`, in their original order.
pub fn apply_filters<'a>(
    hackathons: &'a [Hackathon],
    filter: &FilterState,
    today: NaiveDate,
) -> Vec<&'a Hackathon> {
    hackathons
        .iter()
        .filter(|hackathon| filter.matches(hackathon, today))
        .collect()
}
