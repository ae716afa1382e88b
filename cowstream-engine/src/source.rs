//! Byte sources for corpus files
//!
//! A source turns a path into a buffered byte stream. Gzip files are
//! decoded as multi-member streams, so concatenated archives read through.

use crate::error::{EngineError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read buffer size for corpus files
pub const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Boxed stream handed to the walker
pub type ByteStream = Box<dyn BufRead + Send>;

/// Pluggable opener for corpus files
pub trait ByteSource: Send + Sync {
    /// Open `path` for reading
    ///
    /// Implementations report missing or unreadable files, and for
    /// compressed sources a corrupt header, as [`EngineError::Open`].
    fn open(&self, path: &Path) -> Result<ByteStream>;

    /// Name used in log messages
    fn name(&self) -> &'static str;
}

/// Gzip-decompressing source
#[derive(Debug, Clone)]
pub struct GzipSource {
    buffer_size: usize,
}

impl Default for GzipSource {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

impl GzipSource {
    /// Create a source with the given read buffer size
    pub fn new(buffer_size: usize) -> Self {
        Self { buffer_size }
    }
}

impl ByteSource for GzipSource {
    fn open(&self, path: &Path) -> Result<ByteStream> {
        let file = open_file(path)?;
        let mut reader = BufReader::with_capacity(self.buffer_size, MultiGzDecoder::new(file));

        // Decode the header now so a non-gzip file fails at open time
        reader.fill_buf().map_err(|source| EngineError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Box::new(reader))
    }

    fn name(&self) -> &'static str {
        "gzip"
    }
}

/// Uncompressed source
#[derive(Debug, Clone)]
pub struct PlainSource {
    buffer_size: usize,
}

impl Default for PlainSource {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

impl PlainSource {
    /// Create a source with the given read buffer size
    pub fn new(buffer_size: usize) -> Self {
        Self { buffer_size }
    }
}

impl ByteSource for PlainSource {
    fn open(&self, path: &Path) -> Result<ByteStream> {
        let file = open_file(path)?;
        Ok(Box::new(BufReader::with_capacity(self.buffer_size, file)))
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}

/// Source matching the `gzipped` setting
pub fn source_for(gzipped: bool) -> Box<dyn ByteSource> {
    if gzipped {
        Box::new(GzipSource::default())
    } else {
        Box::new(PlainSource::default())
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })
}
