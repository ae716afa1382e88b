//! Engine error types
//!
//! Malformed token records never show up here: the decoder drops them and
//! the walker only counts them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while streaming sentences
#[derive(Error, Debug)]
pub enum EngineError {
    /// The byte source could not be opened (missing, unreadable or not gzip)
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// File that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Read or decompression failure after the source was opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The markup tokenizer could not continue
    #[error("markup error at byte {position}: {message}")]
    Xml {
        /// Byte offset into the decompressed stream
        position: usize,
        /// Tokenizer message
        message: String,
    },

    /// Input ended while a sentence element was still open
    #[error("unclosed <{tag}> element opened at byte {position}")]
    MalformedMarkup {
        /// Sentence tag name
        tag: String,
        /// Byte offset of the opening tag
        position: usize,
    },

    /// Error raised while streaming a particular file
    #[error("{}: {source}", path.display())]
    InFile {
        /// File being streamed
        path: PathBuf,
        /// What went wrong
        #[source]
        source: Box<EngineError>,
    },

    /// File listing pattern is not a valid glob
    #[error("invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// Attach the file being streamed, unless the error already names it
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            err @ (EngineError::Open { .. } | EngineError::InFile { .. }) => err,
            err => EngineError::InFile {
                path: path.into(),
                source: Box::new(err),
            },
        }
    }

    /// True for failures of the underlying byte source
    pub fn is_io(&self) -> bool {
        match self {
            EngineError::Open { .. } | EngineError::Io(_) => true,
            EngineError::InFile { source, .. } => source.is_io(),
            _ => false,
        }
    }
}

impl From<glob::PatternError> for EngineError {
    fn from(err: glob::PatternError) -> Self {
        EngineError::InvalidPattern(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
