//! Input resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use cowstream_engine::corpus_files;
use glob::glob;
use std::path::{Path, PathBuf};

/// Resolve inputs to corpus file paths
///
/// Directories are listed with `dir_pattern`; every other input is treated
/// as a glob pattern. The result is sorted and free of duplicates.
pub fn resolve_inputs(inputs: &[String], dir_pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let listed = corpus_files(path, dir_pattern)
                .with_context(|| format!("Error listing directory: {input}"))?;
            log::debug!("{} file(s) in {input}", listed.len());
            files.extend(listed);
            continue;
        }

        let paths = glob(input).map_err(|_| CliError::InvalidPattern(input.clone()))?;

        for path_result in paths {
            let path = path_result.with_context(|| format!("Error resolving pattern: {input}"))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputFiles.into());
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}
