use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use storage::{
    dto::hackathon::{CreateHackathonRequest, UpdateHackathonRequest},
    models::{Hackathon, HackathonRow, RawHackathon},
    repository::hackathon::HackathonRepository,
    services::{FilterState, apply_filters, jitter_random, normalize, normalize_batch},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Calendar day used for date-window filtering and missing start dates.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Fetch everything, normalize, then filter in the stored order.
pub async fn list_hackathons(
    pool: &PgPool,
    filter: &FilterState,
    today: NaiveDate,
) -> WebResult<Vec<Hackathon>> {
    let repo = HackathonRepository::new(pool);
    let rows = repo.list_raw().await?;

    Ok(visible_hackathons(rows, filter, today))
}

fn visible_hackathons(
    rows: Vec<HackathonRow>,
    filter: &FilterState,
    today: NaiveDate,
) -> Vec<Hackathon> {
    let raw: Vec<RawHackathon> = rows.into_iter().map(RawHackathon::from).collect();
    let hackathons = normalize_batch(Some(raw), today);

    apply_filters(&hackathons, filter, today)
        .into_iter()
        .cloned()
        .collect()
}

/// Get one hackathon; a stored row that cannot be normalized is reported as missing.
pub async fn get_hackathon(pool: &PgPool, id: Uuid, today: NaiveDate) -> WebResult<Hackathon> {
    let repo = HackathonRepository::new(pool);
    let row = repo.find_raw_by_id(id).await?;
    to_canonical(row, today)
}

/// Submit a new hackathon. The submitted location is jittered once, here.
pub async fn create_hackathon(
    pool: &PgPool,
    request: CreateHackathonRequest,
    today: NaiveDate,
) -> WebResult<Hackathon> {
    let coordinates = request.coordinates().map(jitter_random);
    let new_hackathon = request.into_new_hackathon(coordinates);

    let repo = HackathonRepository::new(pool);
    let row = repo.create(&new_hackathon).await?;
    info!(hackathon_id = %row.hackathon_id, "Hackathon submitted: {}", new_hackathon.name);

    to_canonical(row, today)
}

/// Edit a hackathon. Coordinates are stored as given.
pub async fn update_hackathon(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateHackathonRequest,
    today: NaiveDate,
) -> WebResult<Hackathon> {
    let repo = HackathonRepository::new(pool);
    let row = repo.update(id, request).await?;
    to_canonical(row, today)
}

pub async fn delete_hackathon(pool: &PgPool, id: Uuid) -> WebResult<()> {
    let repo = HackathonRepository::new(pool);
    repo.delete(id).await?;
    info!(hackathon_id = %id, "Hackathon deleted");
    Ok(())
}

fn to_canonical(row: HackathonRow, today: NaiveDate) -> WebResult<Hackathon> {
    let id = row.hackathon_id;
    normalize(&RawHackathon::from(row), today).map_err(|e| {
        warn!(hackathon_id = %id, "Stored hackathon could not be normalized: {}", e);
        WebError::NotFound
    })
}
