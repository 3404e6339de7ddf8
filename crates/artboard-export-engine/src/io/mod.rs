use crate::models::{DocumentFile, VectorDocument};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse document {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to serialize document: {0}")]
    Serialize(serde_json::Error),
    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),
    #[error("Output path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Load a JSON document description
pub fn load_document(path: &Path) -> Result<VectorDocument, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let file: DocumentFile =
        serde_json::from_str(&content).map_err(|source| IoError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(VectorDocument::from(file))
}

/// Write a document description as pretty JSON
pub fn save_document(document: &VectorDocument, path: &Path) -> Result<(), IoError> {
    let content =
        serde_json::to_string_pretty(&document.to_file()).map_err(IoError::Serialize)?;
    fs::write(path, content).map_err(IoError::Io)
}

pub fn validate_output_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() {
        return Err(IoError::OutputDirMissing(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(IoError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Write an exported file, replacing any previous export at the same path
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    fs::write(path, bytes).map_err(IoError::Io)
}
