use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Continent buckets shown on the map filter.
///
/// `Other` means a country was given but none of the keyword tables knew it,
/// `Unknown` means no country was given at all. The two are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Continent {
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    Asia,
    #[serde(rename = "South America")]
    SouthAmerica,
    Oceania,
    Africa,
    Other,
    Unknown,
}

/// Substring keywords per continent, checked top to bottom.
const CONTINENT_KEYWORDS: &[(Continent, &[&str])] = &[
    (
        Continent::NorthAmerica,
        &[
            "united states",
            "usa",
            "canada",
            "mexico",
            "costa rica",
            "panama",
            "guatemala",
            "cuba",
            "jamaica",
            "puerto rico",
            "dominican republic",
        ],
    ),
    (
        Continent::Europe,
        &[
            "united kingdom",
            "uk",
            "england",
            "scotland",
            "ireland",
            "germany",
            "france",
            "spain",
            "portugal",
            "italy",
            "netherlands",
            "belgium",
            "switzerland",
            "austria",
            "sweden",
            "norway",
            "denmark",
            "finland",
            "poland",
            "czech",
            "ukraine",
            "greece",
            "romania",
            "hungary",
            "estonia",
            "lithuania",
            "croatia",
        ],
    ),
    (
        Continent::Asia,
        &[
            "india",
            "china",
            "japan",
            "korea",
            "singapore",
            "indonesia",
            "malaysia",
            "thailand",
            "vietnam",
            "philippines",
            "taiwan",
            "hong kong",
            "pakistan",
            "bangladesh",
            "israel",
            "united arab emirates",
            "uae",
            "saudi arabia",
            "turkey",
        ],
    ),
    (
        Continent::SouthAmerica,
        &[
            "brazil",
            "argentina",
            "chile",
            "colombia",
            "peru",
            "venezuela",
            "ecuador",
            "uruguay",
            "paraguay",
            "bolivia",
        ],
    ),
    (
        Continent::Oceania,
        &["australia", "new zealand", "fiji", "papua new guinea"],
    ),
    (
        Continent::Africa,
        &[
            "nigeria",
            "kenya",
            "south africa",
            "egypt",
            "ghana",
            "morocco",
            "ethiopia",
            "rwanda",
            "uganda",
            "tanzania",
            "senegal",
            "tunisia",
        ],
    ),
];

impl Continent {
    pub const ALL: [Continent; 8] = [
        Self::NorthAmerica,
        Self::Europe,
        Self::Asia,
        Self::SouthAmerica,
        Self::Oceania,
        Self::Africa,
        Self::Other,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::SouthAmerica => "South America",
            Self::Oceania => "Oceania",
            Self::Africa => "Africa",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }

    /// Heuristic lookup from free-text country to continent.
    pub fn infer(country: Option<&str>) -> Self {
        let Some(country) = country.map(str::trim).filter(|c| !c.is_empty()) else {
            return Self::Unknown;
        };
        let country = country.to_lowercase();

        CONTINENT_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| country.contains(keyword)))
            .map(|(continent, _)| *continent)
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_examples() {
        assert_eq!(Continent::infer(Some("Germany")), Continent::Europe);
        assert_eq!(Continent::infer(Some("Brazil")), Continent::SouthAmerica);
        assert_eq!(Continent::infer(Some("Atlantis")), Continent::Other);
        assert_eq!(Continent::infer(None), Continent::Unknown);
    }

    #[test]
    fn test_infer_is_case_insensitive() {
        assert_eq!(Continent::infer(Some("  JAPAN ")), Continent::Asia);
        assert_eq!(
            Continent::infer(Some("United States of America")),
            Continent::NorthAmerica
        );
    }

    #[test]
    fn test_blank_country_is_unknown() {
        assert_eq!(Continent::infer(Some("   ")), Continent::Unknown);
    }

    #[test]
    fn test_first_table_wins() {
        assert_eq!(Continent::infer(Some("Papua New Guinea")), Continent::Oceania);
        assert_eq!(Continent::infer(Some("South Africa")), Continent::Africa);
        assert_eq!(Continent::infer(Some("South Korea")), Continent::Asia);
    }

    #[test]
    fn test_serializes_display_name() {
        assert_eq!(
            serde_json::to_string(&Continent::NorthAmerica).unwrap(),
            "\"North America\""
        );
        assert_eq!(Continent::SouthAmerica.to_string(), "South America");
    }
}
