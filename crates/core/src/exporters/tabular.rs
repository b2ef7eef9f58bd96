use crate::error::{ExportCause, ExportError};
use crate::export::{Artifact, ExportFormat};
use crate::models::RecordSequence;
use crate::traits::Exporter;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, XlsxError};
use tracing::debug;

pub const SHEET_NAME: &str = "Interview Questions";
pub const HEADERS: [&str; 2] = ["Question", "Answer"];

const COLUMN_WIDTH: f64 = 60.0;

/// Writes records to a single-sheet XLSX workbook.
///
/// Row 0 holds the `Question`/`Answer` headers and record `i` lands on row `i + 1`. There is no
/// index column.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularExporter;

impl Exporter for TabularExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Tabular
    }

    fn export(&self, records: &RecordSequence) -> Result<Artifact, ExportError> {
        let bytes = build_workbook(records)
            .map_err(|error| ExportError::new(ExportFormat::Tabular, ExportCause::from(error)))?;

        debug!(rows = records.len(), bytes = bytes.len(), "workbook serialized");
        Ok(Artifact::new(ExportFormat::Tabular, bytes))
    }
}

fn build_workbook(records: &RecordSequence) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    // Fixed creation time keeps docProps/core.xml stable across exports.
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let header_format = Format::new().set_bold();
    // Formatted blanks are still written, so rows of empty records survive.
    let body_format = Format::new().set_text_wrap();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (column, header) in (0..).zip(HEADERS) {
        worksheet.set_column_width(column, COLUMN_WIDTH)?;
        worksheet.write_string_with_format(0, column, header, &header_format)?;
    }

    for (row, record) in (1..).zip(records.iter()) {
        worksheet.write_string_with_format(row, 0, record.question(), &body_format)?;
        worksheet.write_string_with_format(row, 1, record.answer(), &body_format)?;
    }

    workbook.save_to_buffer()
}
