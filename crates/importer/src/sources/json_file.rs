use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{ImporterError, Result, traits::HackathonSource};

/// A JSON file holding an array of raw hackathon records.
///
/// Also accepts `{"hackathons": [...]}` and a bare `null`, which counts as an
/// empty batch.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn records_from_document(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Null => Ok(Vec::new()),
        Value::Array(records) => Ok(records),
        Value::Object(mut object) => match object.remove("hackathons") {
            Some(Value::Array(records)) => Ok(records),
            Some(Value::Null) => Ok(Vec::new()),
            _ => Err(ImporterError::FormatError(
                "expected a JSON array or an object with a 'hackathons' array".to_string(),
            )),
        },
        _ => Err(ImporterError::FormatError(
            "expected a JSON array of hackathon records".to_string(),
        )),
    }
}

#[async_trait::async_trait]
impl HackathonSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Value>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let document: Value = serde_json::from_str(&content)?;
        let records = records_from_document(document)?;

        debug!("Loaded {} raw records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_shapes() {
        assert_eq!(records_from_document(json!(null)).unwrap().len(), 0);
        assert_eq!(records_from_document(json!([{}, {}])).unwrap().len(), 2);
        assert_eq!(
            records_from_document(json!({ "hackathons": [{}] }))
                .unwrap()
                .len(),
            1
        );
        assert!(records_from_document(json!("nope")).is_err());
        assert!(records_from_document(json!({ "events": [] })).is_err());
    }

    #[tokio::test]
    async fn test_load_demo_data() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/demo_hackathons.json");
        let source = JsonFileSource::new(path);

        let records = source.load().await.unwrap();
        assert!(records.len() >= 8);
        assert!(source.name().ends_with("demo_hackathons.json"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        assert!(matches!(source.load().await, Err(ImporterError::IoError(_))));
    }
}
