pub mod delivery;
pub mod error;
pub mod export;
pub mod exporters;
pub mod generation;
pub mod models;
pub mod orchestrator;
pub mod segmenter;
pub mod traits;

pub use delivery::{save_artifact, DEFAULT_FILE_STEM};
pub use error::{ExportCause, ExportError, GenerationError};
pub use export::{Artifact, ExportFormat, DOCX_MIME_TYPE, XLSX_MIME_TYPE};
pub use exporters::{DocumentExporter, TabularExporter};
pub use generation::{
    Complexity, GeminiConfig, GeminiGenerator, GeneratedText, GenerationRequest, SamplingConfig,
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL,
};
pub use models::{Extraction, ExtractionDegraded, Record, RecordSequence};
pub use orchestrator::{export_all, ExportCoordinator, ExportReport};
pub use segmenter::{segment, segment_with_report};
pub use traits::{Exporter, TextGenerator};
