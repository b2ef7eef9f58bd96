use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Single-sheet workbook, one row per record.
    Tabular,
    /// Word document, one heading and paragraph per record.
    Document,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Tabular, ExportFormat::Document];

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Tabular => XLSX_MIME_TYPE,
            ExportFormat::Document => DOCX_MIME_TYPE,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Tabular => "xlsx",
            ExportFormat::Document => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Tabular => f.write_str("tabular"),
            ExportFormat::Document => f.write_str("document"),
        }
    }
}

/// Serialized output of one exporter, kept in memory until delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.format.extension())
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::{Artifact, ExportFormat};

    #[test]
    fn file_names_follow_format() {
        let sheet = Artifact::new(ExportFormat::Tabular, Vec::new());
        let doc = Artifact::new(ExportFormat::Document, Vec::new());
        assert_eq!(sheet.file_name("Interview"), "Interview.xlsx");
        assert_eq!(doc.file_name("Interview"), "Interview.docx");
        assert!(doc.mime_type().ends_with("wordprocessingml.document"));
        assert!(sheet.mime_type().ends_with("spreadsheetml.sheet"));
    }

    #[test]
    fn checksum_is_reproducible() {
        let first = Artifact::new(ExportFormat::Tabular, b"abc".to_vec());
        let second = first.clone();
        assert_eq!(first.checksum(), second.checksum());
        assert_eq!(
            first.checksum(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
