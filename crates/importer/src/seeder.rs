use rand::Rng;
use sqlx::PgPool;
use storage::{
    models::{Coordinates, NewHackathon, RawHackathon},
    repository::hackathon::insert_hackathon,
    services::{
        jitter,
        normalizer::{UNTITLED, parse_date},
    },
};
use tracing::{debug, info};

use crate::{Result, validator::ValidationReport};

pub struct Seeder<'a> {
    pool: &'a PgPool,
}

impl<'a> Seeder<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Inserts every accepted record in one transaction. Source ids are not
    /// kept; stored rows get fresh ids.
    pub async fn seed(&self, report: &ValidationReport) -> Result<usize> {
        let payloads: Vec<(&str, NewHackathon)> = {
            let mut rng = rand::thread_rng();
            report
                .records
                .iter()
                .map(|record| {
                    (
                        record.hackathon.id.as_str(),
                        to_new_hackathon(&record.raw, &mut rng),
                    )
                })
                .collect()
        };

        let mut tx = self.pool.begin().await?;

        for (source_id, new_hackathon) in &payloads {
            let row = insert_hackathon(&mut *tx, new_hackathon).await?;
            debug!(
                source_id = %source_id,
                hackathon_id = %row.hackathon_id,
                "Inserted hackathon"
            );
        }

        tx.commit().await?;
        info!("Seeded {} hackathon(s)", report.records.len());

        Ok(report.records.len())
    }
}

/// Builds the insert payload from a raw record. Valid coordinates are
/// jittered; invalid or partial ones are stored as missing.
pub fn to_new_hackathon<R: Rng + ?Sized>(raw: &RawHackathon, rng: &mut R) -> NewHackathon {
    let coordinates = Coordinates::from_parts(
        raw.latitude.as_ref().and_then(|v| v.as_f64()),
        raw.longitude.as_ref().and_then(|v| v.as_f64()),
    )
    .map(|coords| jitter(coords, rng));

    NewHackathon {
        name: text(raw.name.as_deref()).unwrap_or_else(|| UNTITLED.to_string()),
        start_date: raw.start_date.as_deref().and_then(parse_date),
        end_date: raw.end_date.as_deref().and_then(parse_date),
        city: text(raw.city.as_deref()),
        country: text(raw.country.as_deref()),
        coordinates,
        categories: raw
            .categories
            .iter()
            .flatten()
            .filter_map(|tag| text(Some(tag)))
            .collect(),
        prize_pool: raw
            .prize_pool
            .as_ref()
            .and_then(|p| text(Some(&p.to_string()))),
        website_url: text(raw.website_url.as_deref()),
        description: text(raw.description.as_deref()),
        logo_url: text(raw.logo_url.as_deref()),
        submitted_by: None,
    }
}

fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
