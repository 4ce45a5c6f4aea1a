use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::BookId;

const BOOK_PREFIX: &str = "book_";

/// Parse the id out of a `book_<id>.<ext>` file name.
///
/// Returns `Ok(None)` for names that do not follow the pattern at all
/// (other prefix or extension) and an error when the prefix and extension
/// match but the id segment is not an integer. Anything after a further
/// underscore is ignored, so `book_12_v2.txt` yields 12.
pub fn parse_book_id(file_name: &str, extension: &str) -> Result<Option<BookId>> {
    let Some(rest) = file_name.strip_prefix(BOOK_PREFIX) else {
        return Ok(None);
    };
    let Some(stem) = rest
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
    else {
        return Ok(None);
    };
    let segment = stem.split('_').next().unwrap_or_default();
    segment
        .parse::<BookId>()
        .map(Some)
        .map_err(|_| Error::InvalidBookFileName {
            name: file_name.to_string(),
        })
}

/// Collect ids of every `book_<id>.<extension>` file directly inside `dir`,
/// sorted ascending and deduplicated. A missing directory yields no ids.
pub fn scan_book_ids(dir: &Path, extension: &str) -> Result<Vec<BookId>> {
    if !dir.is_dir() {
        debug!("Scan directory {:?} not found, skipping", dir);
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks, so linked book files count too.
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!("Skipping non UTF-8 file name in {:?}", dir);
            continue;
        };
        if let Some(id) = parse_book_id(name, extension)? {
            ids.push(id);
        }
    }
    ids.sort_unstable();
    ids.dedup();
    debug!("Found {} book files in {:?}", ids.len(), dir);
    Ok(ids)
}
