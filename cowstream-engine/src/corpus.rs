//! Corpus iterator
//!
//! Chains one walker per file, strictly in the given order: a file is read
//! to the end (or to its first error) before the next one is opened, and
//! only one source is open at any time.

use crate::config::{CorpusConfig, ErrorPolicy, WalkerConfig};
use crate::error::Result;
use crate::files::corpus_files;
use crate::source::{source_for, ByteSource, ByteStream};
use crate::stats::CorpusStats;
use crate::walker::SentenceWalker;
use cowstream_core::SentenceRecord;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::vec;

/// Lazy sentence sequence over many corpus files
pub struct Corpus {
    files: vec::IntoIter<PathBuf>,
    source: Box<dyn ByteSource>,
    walker_config: WalkerConfig,
    error_policy: ErrorPolicy,
    current: Option<(PathBuf, SentenceWalker<ByteStream>)>,
    stats: CorpusStats,
    halted: bool,
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corpus")
            .field("remaining_files", &self.files.len())
            .field("source", &self.source.name())
            .field("current_file", &self.current_file())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Corpus {
    /// Iterate over `files` using the source selected by `config.gzipped`
    pub fn new(files: Vec<PathBuf>, config: &CorpusConfig) -> Self {
        Self::with_source(files, config, source_for(config.gzipped))
    }

    /// Iterate over `files` using a custom byte source
    pub fn with_source(
        files: Vec<PathBuf>,
        config: &CorpusConfig,
        source: Box<dyn ByteSource>,
    ) -> Self {
        Self {
            files: files.into_iter(),
            source,
            walker_config: config.walker_config(),
            error_policy: config.error_policy,
            current: None,
            stats: CorpusStats::default(),
            halted: false,
        }
    }

    /// Iterate over the files of `dir` matching `config.pattern`
    pub fn from_dir(dir: &Path, config: &CorpusConfig) -> Result<Self> {
        let files = corpus_files(dir, &config.pattern)?;
        Ok(Self::new(files, config))
    }

    /// File currently being streamed
    pub fn current_file(&self) -> Option<&Path> {
        self.current.as_ref().map(|(path, _)| path.as_path())
    }

    /// Counters for completed files plus the file in progress
    pub fn stats(&self) -> CorpusStats {
        let mut stats = self.stats;
        if let Some((_, walker)) = &self.current {
            stats.walk.merge(walker.stats());
        }
        stats
    }

    /// Close the current file, folding its counters into the totals
    fn close_current(&mut self) -> Option<PathBuf> {
        let (path, walker) = self.current.take()?;
        self.stats.walk.merge(walker.stats());
        log::debug!(
            "closed {} after {} sentence(s)",
            path.display(),
            walker.stats().sentences
        );
        Some(path)
    }

    fn open_next(&mut self) -> Option<Result<()>> {
        let path = self.files.next()?;
        log::debug!("opening {} ({})", path.display(), self.source.name());

        match self.source.open(&path) {
            Ok(stream) => {
                let walker = SentenceWalker::new(stream, self.walker_config.clone());
                self.current = Some((path, walker));
                Some(Ok(()))
            }
            Err(err) => Some(Err(err.in_file(path))),
        }
    }
}

impl Iterator for Corpus {
    type Item = Result<SentenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.halted {
                return None;
            }

            if let Some((_, walker)) = self.current.as_mut() {
                match walker.next() {
                    Some(Ok(record)) => return Some(Ok(record)),
                    Some(Err(err)) => {
                        let path = self.close_current().unwrap_or_default();
                        let err = err.in_file(path);
                        match self.error_policy {
                            ErrorPolicy::Abort => {
                                self.halted = true;
                                return Some(Err(err));
                            }
                            ErrorPolicy::Skip => {
                                log::warn!("skipping rest of file: {err}");
                                self.stats.files_skipped += 1;
                            }
                        }
                    }
                    None => {
                        self.close_current();
                        self.stats.files_processed += 1;
                    }
                }
                continue;
            }

            match self.open_next()? {
                Ok(()) => {}
                Err(err) => match self.error_policy {
                    ErrorPolicy::Abort => {
                        self.halted = true;
                        return Some(Err(err));
                    }
                    ErrorPolicy::Skip => {
                        log::warn!("skipping file: {err}");
                        self.stats.files_skipped += 1;
                    }
                },
            }
        }
    }
}

impl FusedIterator for Corpus {}
