use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::Document;
use crate::error::ParseError;
use crate::rendering::RenderOptions;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },
}

/// Read and parse a properties file
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read(path).map_err(IoError::Io)?;
    Document::from_bytes(&content).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a document and write it to `path`
pub fn write_document(
    path: &Path,
    document: &Document,
    options: &RenderOptions,
) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    log::debug!("Writing {}", path.display());
    fs::write(path, document.render(options)).map_err(IoError::Io)
}
