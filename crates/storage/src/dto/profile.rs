use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Coordinates, NewProfile, Profile, SubscriptionTier};

/// Public view of a profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub profile_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub is_premium: bool,
    pub show_on_face_map: bool,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A face on the face map
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaceMapEntry {
    pub profile_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_premium: bool,
    pub coordinates: Coordinates,
}

/// Request payload for creating a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: String,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub subscription_tier: SubscriptionTier,

    #[serde(default)]
    pub show_on_face_map: bool,

    #[validate(length(max = 255))]
    pub city: Option<String>,

    #[validate(length(max = 255))]
    pub country: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Request payload for updating a profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,

    #[validate(url)]
    pub avatar_url: Option<String>,

    pub subscription_tier: Option<SubscriptionTier>,

    pub show_on_face_map: Option<bool>,

    #[validate(length(max = 255))]
    pub city: Option<String>,

    #[validate(length(max = 255))]
    pub country: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl CreateProfileRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_location(&self) -> Result<(), &'static str> {
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err("Latitude and longitude must be provided together");
        }
        if self.show_on_face_map && self.latitude.is_none() {
            return Err("A location is required to appear on the face map");
        }
        Ok(())
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }

    pub fn into_new_profile(self, coordinates: Option<Coordinates>) -> NewProfile {
        NewProfile {
            display_name: self.display_name.trim().to_string(),
            avatar_url: self.avatar_url,
            subscription_tier: self.subscription_tier,
            show_on_face_map: self.show_on_face_map,
            city: self.city,
            country: self.country,
            coordinates,
        }
    }
}

impl UpdateProfileRequest {
    pub fn validate_location(&self) -> Result<(), &'static str> {
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err("Latitude and longitude must be provided together");
        }
        Ok(())
    }

    /// Opting in to the face map needs a location, either sent now or already stored.
    pub fn validate_against(&self, stored: &Profile) -> Result<(), &'static str> {
        if self.show_on_face_map != Some(true) {
            return Ok(());
        }

        let location = Coordinates::from_parts(
            self.latitude.or(stored.latitude),
            self.longitude.or(stored.longitude),
        );
        if location.is_none() {
            return Err("A location is required to appear on the face map");
        }
        Ok(())
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let tier = profile.tier();
        Self {
            profile_id: profile.profile_id,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            subscription_tier: tier,
            is_premium: tier.is_premium(),
            show_on_face_map: profile.show_on_face_map,
            city: profile.city,
            country: profile.country,
            created_at: profile.created_at,
        }
    }
}

impl FaceMapEntry {
    /// `None` for profiles without a usable location.
    pub fn from_profile(profile: Profile) -> Option<Self> {
        let coordinates = profile.coordinates()?;
        Some(Self {
            is_premium: profile.is_premium(),
            profile_id: profile.profile_id,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProfileRequest {
        CreateProfileRequest {
            display_name: "Grace".to_string(),
            avatar_url: Some("https://cdn.example.com/grace.png".to_string()),
            subscription_tier: SubscriptionTier::Pro,
            show_on_face_map: true,
            city: Some("Nairobi".to_string()),
            country: Some("Kenya".to_string()),
            latitude: Some(-1.2921),
            longitude: Some(36.8219),
        }
    }

    #[test]
    fn test_face_map_requires_location() {
        let mut req = request();
        assert!(req.validate_location().is_ok());

        req.latitude = None;
        req.longitude = None;
        assert!(req.validate_location().is_err());

        req.show_on_face_map = false;
        assert!(req.validate_location().is_ok());
    }

    #[test]
    fn test_tier_defaults_to_free() {
        let req: CreateProfileRequest =
            serde_json::from_value(serde_json::json!({ "display_name": "Linus" })).unwrap();
        assert_eq!(req.subscription_tier, SubscriptionTier::Free);
        assert!(!req.show_on_face_map);
    }

    fn stored_profile(latitude: Option<f64>, longitude: Option<f64>) -> Profile {
        Profile {
            profile_id: Uuid::new_v4(),
            display_name: "Barbara".to_string(),
            avatar_url: None,
            subscription_tier: "free".to_string(),
            show_on_face_map: false,
            city: None,
            country: None,
            latitude,
            longitude,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_update_opt_in_needs_location() {
        let opt_in = UpdateProfileRequest {
            show_on_face_map: Some(true),
            ..Default::default()
        };

        assert!(opt_in.validate_against(&stored_profile(None, None)).is_err());
        assert!(
            opt_in
                .validate_against(&stored_profile(Some(48.85), Some(2.35)))
                .is_ok()
        );

        let opt_in_with_location = UpdateProfileRequest {
            latitude: Some(35.68),
            longitude: Some(139.69),
            ..opt_in.clone()
        };
        assert!(
            opt_in_with_location
                .validate_against(&stored_profile(None, None))
                .is_ok()
        );

        let rename = UpdateProfileRequest {
            display_name: Some("Barb".to_string()),
            ..Default::default()
        };
        assert!(rename.validate_against(&stored_profile(None, None)).is_ok());
    }

    #[test]
    fn test_face_map_entry_skips_missing_location() {
        let profile = Profile {
            profile_id: Uuid::new_v4(),
            display_name: "Ken".to_string(),
            avatar_url: None,
            subscription_tier: "team".to_string(),
            show_on_face_map: true,
            city: None,
            country: None,
            latitude: Some(10.0),
            longitude: None,
            created_at: NaiveDateTime::default(),
        };
        assert!(FaceMapEntry::from_profile(profile.clone()).is_none());

        let located = Profile {
            longitude: Some(20.0),
            ..profile
        };
        let entry = FaceMapEntry::from_profile(located).unwrap();
        assert!(entry.is_premium);
        assert_eq!(entry.coordinates, Coordinates::new(10.0, 20.0));
    }
}
