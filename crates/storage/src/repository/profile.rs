use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::profile::UpdateProfileRequest;
use crate::error::{Result, StorageError};
use crate::models::{NewProfile, Profile};

const PROFILE_COLUMNS: &str = r#"
    profile_id, display_name, avatar_url, subscription_tier, show_on_face_map,
    city, country, latitude, longitude, created_at
"#;

/// Repository for submitter profiles
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Profile> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE profile_id = $1");

        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, profile: &NewProfile) -> Result<Profile> {
        let sql = format!(
            r#"
            INSERT INTO profiles (
                display_name, avatar_url, subscription_tier, show_on_face_map,
                city, country, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Profile>(&sql)
            .bind(&profile.display_name)
            .bind(profile.avatar_url.as_deref())
            .bind(profile.subscription_tier.as_str())
            .bind(profile.show_on_face_map)
            .bind(profile.city.as_deref())
            .bind(profile.country.as_deref())
            .bind(profile.coordinates.map(|c| c.latitude))
            .bind(profile.coordinates.map(|c| c.longitude))
            .fetch_one(self.pool)
            .await?;

        Ok(created)
    }

    /// Partial update; a new location is stored exactly as given.
    pub async fn update(&self, id: Uuid, req: &UpdateProfileRequest) -> Result<Profile> {
        let sql = format!(
            r#"
            UPDATE profiles
            SET
                display_name = COALESCE($2, display_name),
                avatar_url = COALESCE($3, avatar_url),
                subscription_tier = COALESCE($4, subscription_tier),
                show_on_face_map = COALESCE($5, show_on_face_map),
                city = COALESCE($6, city),
                country = COALESCE($7, country),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude)
            WHERE profile_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(req.display_name.as_deref())
            .bind(req.avatar_url.as_deref())
            .bind(req.subscription_tier.map(|tier| tier.as_str()))
            .bind(req.show_on_face_map)
            .bind(req.city.as_deref())
            .bind(req.country.as_deref())
            .bind(req.latitude)
            .bind(req.longitude)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Opted-in profiles that have a stored location, oldest first.
    pub async fn list_face_map(&self) -> Result<Vec<Profile>> {
        let sql = format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles
            WHERE show_on_face_map
              AND latitude IS NOT NULL
              AND longitude IS NOT NULL
            ORDER BY created_at ASC
            "#
        );

        let profiles = sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(profiles)
    }
}
