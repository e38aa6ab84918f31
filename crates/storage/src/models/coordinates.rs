use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const ORIGIN: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a pair only when both axes are present, finite and in range.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let latitude = latitude.filter(|lat| is_valid_latitude(*lat))?;
        let longitude = longitude.filter(|lng| is_valid_longitude(*lng))?;
        Some(Self::new(latitude, longitude))
    }
}

pub fn is_valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

pub fn is_valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both_axes() {
        assert_eq!(
            Coordinates::from_parts(Some(52.52), Some(13.405)),
            Some(Coordinates::new(52.52, 13.405))
        );
        assert_eq!(Coordinates::from_parts(Some(52.52), None), None);
        assert_eq!(Coordinates::from_parts(None, Some(13.405)), None);
    }

    #[test]
    fn test_from_parts_rejects_out_of_range() {
        assert_eq!(Coordinates::from_parts(Some(91.0), Some(0.0)), None);
        assert_eq!(Coordinates::from_parts(Some(0.0), Some(-180.5)), None);
        assert_eq!(Coordinates::from_parts(Some(f64::NAN), Some(0.0)), None);
    }

    #[test]
    fn test_default_is_origin() {
        assert_eq!(Coordinates::default(), Coordinates::ORIGIN);
    }
}
