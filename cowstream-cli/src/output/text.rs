//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use cowstream_engine::SentenceRecord;
use std::io::Write;

/// Plain text formatter - outputs one sentence per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, record: &SentenceRecord) -> Result<()> {
        let mut first = true;
        for token in record.tokens() {
            if !first {
                self.writer.write_all(b" ")?;
            }
            self.writer.write_all(token.token.as_bytes())?;
            first = false;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
