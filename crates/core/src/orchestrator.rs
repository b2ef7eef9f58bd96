use crate::error::ExportError;
use crate::export::{Artifact, ExportFormat};
use crate::exporters::{DocumentExporter, TabularExporter};
use crate::models::RecordSequence;
use crate::traits::Exporter;
use tracing::{info, warn};

pub type SharedExporter = Box<dyn Exporter + Send + Sync>;

/// Outcome of running several exporters over the same records.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<ExportError>,
}

impl ExportReport {
    pub fn artifact(&self, format: ExportFormat) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|artifact| artifact.format == format)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs a fixed set of exporters, best effort.
///
/// A failing exporter is recorded in the report and does not stop the others.
pub struct ExportCoordinator {
    exporters: Vec<SharedExporter>,
}

impl ExportCoordinator {
    pub fn new(exporters: Vec<SharedExporter>) -> Self {
        Self { exporters }
    }

    pub fn for_formats(formats: &[ExportFormat]) -> Self {
        let mut exporters: Vec<SharedExporter> = Vec::new();
        for format in formats {
            if exporters.iter().any(|exporter| exporter.format() == *format) {
                continue;
            }
            let exporter: SharedExporter = match format {
                ExportFormat::Tabular => Box::new(TabularExporter),
                ExportFormat::Document => Box::new(DocumentExporter),
            };
            exporters.push(exporter);
        }
        Self::new(exporters)
    }

    pub fn formats(&self) -> Vec<ExportFormat> {
        self.exporters
            .iter()
            .map(|exporter| exporter.format())
            .collect()
    }

    pub fn export(&self, records: &RecordSequence) -> ExportReport {
        let mut report = ExportReport::default();

        for exporter in &self.exporters {
            match exporter.export(records) {
                Ok(artifact) => {
                    info!(
                        format = %artifact.format,
                        records = records.len(),
                        bytes = artifact.bytes.len(),
                        "export complete"
                    );
                    report.artifacts.push(artifact);
                }
                Err(error) => {
                    warn!(format = %error.format, reason = %error.cause, "export failed");
                    report.failures.push(error);
                }
            }
        }

        report
    }
}

impl Default for ExportCoordinator {
    fn default() -> Self {
        Self::for_formats(&ExportFormat::ALL)
    }
}

/// Runs the built-in exporter for each requested format.
pub fn export_all(records: &RecordSequence, formats: &[ExportFormat]) -> ExportReport {
    ExportCoordinator::for_formats(formats).export(records)
}
