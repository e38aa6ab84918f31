use crate::Result;

/// Somewhere raw hackathon records can be loaded from.
///
/// Records are returned untyped; the schema check happens per record during
/// validation so one malformed entry never hides the rest of the batch.
#[async_trait::async_trait]
pub trait HackathonSource: Send + Sync {
    async fn load(&self) -> Result<Vec<serde_json::Value>>;

    fn name(&self) -> String;
}
