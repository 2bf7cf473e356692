//! Unified diff of what `generate` would write, for `relman diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::error::io_err;
use crate::update_site::RenderedDescriptor;
use crate::writer::normalize_line_endings;
use crate::SyncError;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Compare rendered descriptors to the files on disk. Identical files are omitted.
///
/// No files are written.
pub fn diff_descriptors(documents: &[RenderedDescriptor]) -> Result<Vec<FileDiff>, SyncError> {
    let mut diffs = Vec::new();
    for doc in documents {
        let rendered = normalize_line_endings(&doc.content);
        let existing = read_existing_or_empty(&doc.path)?;
        if existing == rendered {
            continue;
        }

        let old_header = format!("a/{}", doc.path.display());
        let new_header = format!("b/{}", doc.path.display());
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();
        diffs.push(FileDiff {
            path: doc.path.clone(),
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(normalize_line_endings(&contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(io_err(path, e)),
    }
}
