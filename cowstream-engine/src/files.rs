//! Corpus file listing using glob

use crate::error::{EngineError, Result};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// List the files in `dir` matching `pattern`, sorted by path
///
/// An empty directory is an empty corpus, not an error. An empty path
/// means the current directory.
pub fn corpus_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let full = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()).trim_end_matches('/'),
        pattern
    );

    let mut files = Vec::new();
    for entry in glob(&full)? {
        let path = entry.map_err(|err| EngineError::Io(err.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    log::debug!("{} corpus file(s) match {full}", files.len());
    Ok(files)
}
