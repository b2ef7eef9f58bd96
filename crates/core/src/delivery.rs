use crate::export::Artifact;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_FILE_STEM: &str = "Interview_Question_Answer";

/// Writes the artifact to `<dir>/<stem>.<ext>`, creating `dir` when missing.
pub fn save_artifact(dir: &Path, stem: &str, artifact: &Artifact) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(artifact.file_name(stem));
    fs::write(&path, &artifact.bytes)?;

    info!(
        path = %path.display(),
        mime = artifact.mime_type(),
        checksum = %artifact.checksum(),
        "artifact saved"
    );
    Ok(path)
}
