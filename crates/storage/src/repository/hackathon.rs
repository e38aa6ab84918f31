use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::dto::hackathon::UpdateHackathonRequest;
use crate::error::{Result, StorageError};
use crate::models::{HackathonRow, NewHackathon};

/// Columns selected for every hackathon read, joined with the submitter profile.
const SELECT_HACKATHON: &str = r#"
    SELECT h.hackathon_id, h.name, h.start_date, h.end_date, h.city, h.country,
           h.latitude, h.longitude, h.categories, h.prize_pool, h.website_url,
           h.description, h.logo_url, h.submitted_by, h.created_at,
           COALESCE(p.subscription_tier <> 'free', FALSE) AS is_premium
"#;

const UNKNOWN_SUBMITTER: &str = "Submitting profile does not exist";

/// Repository for hackathon database operations
pub struct HackathonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HackathonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every stored hackathon, earliest start first; undated ones last.
    pub async fn list_raw(&self) -> Result<Vec<HackathonRow>> {
        let sql = format!(
            r#"{SELECT_HACKATHON}
            FROM hackathons h
            LEFT JOIN profiles p ON p.profile_id = h.submitted_by
            ORDER BY h.start_date ASC NULLS LAST, h.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, HackathonRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn find_raw_by_id(&self, id: Uuid) -> Result<HackathonRow> {
        let sql = format!(
            r#"{SELECT_HACKATHON}
            FROM hackathons h
            LEFT JOIN profiles p ON p.profile_id = h.submitted_by
            WHERE h.hackathon_id = $1
            "#
        );

        sqlx::query_as::<_, HackathonRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, hackathon: &NewHackathon) -> Result<HackathonRow> {
        insert_hackathon(self.pool, hackathon).await
    }

    /// Partial update; coordinates are stored as given, never re-jittered.
    pub async fn update(&self, id: Uuid, req: &UpdateHackathonRequest) -> Result<HackathonRow> {
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE hackathons
                SET
                    name = COALESCE($2, name),
                    start_date = COALESCE($3, start_date),
                    end_date = COALESCE($4, end_date),
                    city = COALESCE($5, city),
                    country = COALESCE($6, country),
                    latitude = COALESCE($7, latitude),
                    longitude = COALESCE($8, longitude),
                    categories = COALESCE($9, categories),
                    prize_pool = COALESCE($10, prize_pool),
                    website_url = COALESCE($11, website_url),
                    description = COALESCE($12, description),
                    logo_url = COALESCE($13, logo_url)
                WHERE hackathon_id = $1
                RETURNING *
            )
            {SELECT_HACKATHON}
            FROM updated h
            LEFT JOIN profiles p ON p.profile_id = h.submitted_by
            "#
        );

        sqlx::query_as::<_, HackathonRow>(&sql)
            .bind(id)
            .bind(req.name.as_deref())
            .bind(req.start_date)
            .bind(req.end_date)
            .bind(req.city.as_deref())
            .bind(req.country.as_deref())
            .bind(req.latitude)
            .bind(req.longitude)
            .bind(req.categories.as_deref())
            .bind(req.prize_pool.as_deref())
            .bind(req.website_url.as_deref())
            .bind(req.description.as_deref())
            .bind(req.logo_url.as_deref())
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM hackathons WHERE hackathon_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Inserts one hackathon on any executor, so callers can batch inside a transaction.
pub async fn insert_hackathon<'e, E>(executor: E, hackathon: &NewHackathon) -> Result<HackathonRow>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        r#"
        WITH inserted AS (
            INSERT INTO hackathons (
                name, start_date, end_date, city, country, latitude, longitude,
                categories, prize_pool, website_url, description, logo_url, submitted_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
        )
        {SELECT_HACKATHON}
        FROM inserted h
        LEFT JOIN profiles p ON p.profile_id = h.submitted_by
        "#
    );

    sqlx::query_as::<_, HackathonRow>(&sql)
        .bind(&hackathon.name)
        .bind(hackathon.start_date)
        .bind(hackathon.end_date)
        .bind(hackathon.city.as_deref())
        .bind(hackathon.country.as_deref())
        .bind(hackathon.coordinates.map(|c| c.latitude))
        .bind(hackathon.coordinates.map(|c| c.longitude))
        .bind(&hackathon.categories)
        .bind(hackathon.prize_pool.as_deref())
        .bind(hackathon.website_url.as_deref())
        .bind(hackathon.description.as_deref())
        .bind(hackathon.logo_url.as_deref())
        .bind(hackathon.submitted_by)
        .fetch_one(executor)
        .await
        .map_err(|e| StorageError::from(e).with_foreign_key_message(UNKNOWN_SUBMITTER))
}
