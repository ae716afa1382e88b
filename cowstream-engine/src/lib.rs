//! Streaming sentence extraction for COW corpora
//!
//! This crate drives [`cowstream_core`] over real files: it opens
//! (optionally gzip-compressed) byte sources, walks their markup with a
//! pull-based event reader and yields one [`SentenceRecord`] at a time,
//! releasing each sentence's buffered subtree as soon as it is extracted.
//!
//! # Example
//!
//! ```rust
//! use cowstream_engine::{sentences_from_reader, WalkerConfig};
//!
//! let input = "<doc>\n<s id=\"1\">\ncat\tNN\tcat\t1\t0\troot\n</s>\n</doc>\n";
//! let records: Vec<_> = sentences_from_reader(input.as_bytes(), WalkerConfig::new())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].metadata["id"], "1");
//! assert_eq!(records[0].tokens()[0].lemma, "cat");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod files;
pub mod source;
pub mod stats;
pub mod unit;
pub mod walker;

// Re-export key types
pub use config::{ConfigBuilder, CorpusConfig, ErrorPolicy, WalkerConfig, DEFAULT_PATTERN};
pub use corpus::Corpus;
pub use error::{EngineError, Result};
pub use files::corpus_files;
pub use source::{source_for, ByteSource, ByteStream, GzipSource, PlainSource};
pub use stats::{CorpusStats, WalkStats};
pub use unit::SentenceUnit;
pub use walker::SentenceWalker;

// Re-export from core for convenience
pub use cowstream_core::{
    separate, Metadata, SentenceData, SentenceRecord, StructureMarker, Token, TokenColumns,
};

use std::io::BufRead;
use std::path::Path;

/// Walk sentences from any buffered reader
pub fn sentences_from_reader<R: BufRead>(reader: R, config: WalkerConfig) -> SentenceWalker<R> {
    SentenceWalker::new(reader, config)
}

/// Walk sentences of a single file
///
/// Fails immediately when the file cannot be opened.
pub fn sentences_from_file(
    path: &Path,
    gzipped: bool,
    structure: bool,
) -> Result<SentenceWalker<ByteStream>> {
    let stream = source_for(gzipped).open(path)?;
    let config = WalkerConfig {
        structure,
        ..WalkerConfig::default()
    };
    Ok(SentenceWalker::new(stream, config))
}

/// Iterate over every corpus file in a directory
pub fn sentences_for_dir(dir: &Path, config: &CorpusConfig) -> Result<Corpus> {
    Corpus::from_dir(dir, config)
}
