use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use storage::{
    models::{Continent, Coordinates, Hackathon, RawHackathon},
    services::normalize,
};
use tracing::{error, warn};

use crate::{ImporterError, Result};

/// A record that passed the schema check and normalization.
#[derive(Debug, Clone)]
pub struct ValidatedRecord {
    pub index: usize,
    pub raw: RawHackathon,
    pub hackathon: Hackathon,
}

pub struct BatchValidator;

impl BatchValidator {
    /// Checks every record independently. Failures are collected, never fatal.
    pub fn validate(values: Vec<Value>, today: NaiveDate) -> ValidationReport {
        let mut report = ValidationReport {
            total: values.len(),
            ..Default::default()
        };
        let mut seen_ids = HashSet::new();

        for (index, value) in values.into_iter().enumerate() {
            let label = format!("record #{}", index + 1);

            let raw = match RawHackathon::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    report.errors.push(format!("{}: {}", label, e));
                    continue;
                }
            };

            let hackathon = match normalize(&raw, today) {
                Ok(hackathon) => hackathon,
                Err(e) => {
                    report.errors.push(format!("{}: {}", label, e));
                    continue;
                }
            };

            let label = format!("{} ('{}')", label, hackathon.title);

            if !seen_ids.insert(hackathon.id.clone()) {
                report
                    .errors
                    .push(format!("{}: duplicate id '{}'", label, hackathon.id));
                continue;
            }

            if raw.start_date.as_deref().is_none_or(|d| d.trim().is_empty()) {
                report
                    .warnings
                    .push(format!("{}: start date is missing, shown as TBA", label));
            }
            if hackathon.coordinates == Coordinates::ORIGIN {
                report.warnings.push(format!(
                    "{}: coordinates missing or invalid, placed at (0, 0)",
                    label
                ));
            }
            match hackathon.continent {
                Continent::Unknown => report
                    .warnings
                    .push(format!("{}: country is missing", label)),
                Continent::Other => report.warnings.push(format!(
                    "{}: country '{}' is not in any continent table",
                    label,
                    hackathon.country.as_deref().unwrap_or_default()
                )),
                _ => {}
            }
            if hackathon.categories.is_empty() {
                report
                    .warnings
                    .push(format!("{}: no categories, classified as generic", label));
            }

            report.records.push(ValidatedRecord {
                index,
                raw,
                hackathon,
            });
        }

        report
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub total: usize,
    pub records: Vec<ValidatedRecord>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }

    pub fn log_errors(&self) {
        for err in &self.errors {
            error!("{}", err);
        }
    }

    pub fn hackathons(&self) -> Vec<Hackathon> {
        self.records
            .iter()
            .map(|record| record.hackathon.clone())
            .collect()
    }

    pub fn ensure_valid(&self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ImporterError::ValidationError(format!(
                "{} of {} record(s) failed: {}",
                self.errors.len(),
                self.total,
                self.errors.join("; ")
            )))
        }
    }
}
