use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ProgressDocument;

/// Read the progress document at `path`. `Ok(None)` when the file does not exist.
pub fn load_document(path: &Path) -> Result<Option<ProgressDocument>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No progress document at {:?}", path);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let document = serde_json::from_str(&text).map_err(|source| Error::MalformedDocument {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(document))
}

/// Overwrite `path` with the whole document, two-space indented UTF-8.
pub fn save_document(path: &Path, document: &ProgressDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    debug!("Saved progress document to {:?}", path);
    Ok(())
}
