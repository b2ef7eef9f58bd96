use crate::error::{ExportError, GenerationError};
use crate::export::{Artifact, ExportFormat};
use crate::generation::{GeneratedText, GenerationRequest};
use crate::models::RecordSequence;
use async_trait::async_trait;

/// Serializes records into one output format.
///
/// Implementations hold no state between calls, so one instance may be shared across threads.
pub trait Exporter {
    fn format(&self) -> ExportFormat;

    fn export(&self, records: &RecordSequence) -> Result<Artifact, ExportError>;
}

#[async_trait]
pub trait TextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedText, GenerationError>;
}
