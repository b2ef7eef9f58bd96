use crate::error::{ExportCause, ExportError};
use crate::export::{Artifact, ExportFormat};
use crate::models::RecordSequence;
use crate::traits::Exporter;
use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use std::io::Cursor;
use tracing::debug;

pub const DOCUMENT_TITLE: &str = "Interview Questions and Answers";
pub const TITLE_STYLE: &str = "Title";
pub const QUESTION_STYLE: &str = "Heading1";

/// Writes records to a DOCX document.
///
/// Layout: one `Title` paragraph, then for every record a `Heading1` paragraph with the question
/// followed by a plain paragraph with the answer. Blank records still emit both paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExporter;

impl Exporter for DocumentExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Document
    }

    fn export(&self, records: &RecordSequence) -> Result<Artifact, ExportError> {
        ensure_xml_safe(records).map_err(|cause| ExportError::new(ExportFormat::Document, cause))?;

        let mut docx = Docx::new()
            .add_style(
                Style::new(TITLE_STYLE, StyleType::Paragraph)
                    .name("Title")
                    .size(56)
                    .bold(),
            )
            .add_style(
                Style::new(QUESTION_STYLE, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_paragraph(styled_paragraph(DOCUMENT_TITLE, TITLE_STYLE));

        for record in records {
            docx = docx
                .add_paragraph(styled_paragraph(record.question(), QUESTION_STYLE))
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text(record.answer())));
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).map_err(|error| {
            ExportError::new(
                ExportFormat::Document,
                ExportCause::Packaging(error.to_string()),
            )
        })?;

        let bytes = buffer.into_inner();
        debug!(
            sections = records.len(),
            bytes = bytes.len(),
            "document serialized"
        );
        Ok(Artifact::new(ExportFormat::Document, bytes))
    }
}

fn styled_paragraph(text: &str, style: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .style(style)
}

// XML 1.0 cannot carry most C0 controls or U+FFFE/U+FFFF, even escaped.
fn ensure_xml_safe(records: &RecordSequence) -> Result<(), ExportCause> {
    for (index, record) in records.iter().enumerate() {
        let offending = record
            .question()
            .chars()
            .chain(record.answer().chars())
            .find(|ch| !is_xml_char(*ch));

        if let Some(ch) = offending {
            return Err(ExportCause::UnsupportedCharacter {
                record: index,
                codepoint: ch as u32,
            });
        }
    }
    Ok(())
}

fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
