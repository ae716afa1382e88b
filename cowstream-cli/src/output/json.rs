//! JSON lines output formatter

use super::OutputFormatter;
use anyhow::Result;
use cowstream_engine::{Metadata, SentenceRecord, StructureMarker, Token};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs one JSON object per sentence and line
pub struct JsonFormatter<W: Write> {
    writer: W,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct JsonRecord<'a> {
    /// Sentence attributes
    pub metadata: &'a Metadata,
    /// Decoded tokens
    pub tokens: &'a [Token],
    /// Structure trace, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<&'a [StructureMarker]>,
}

impl<'a> From<&'a SentenceRecord> for JsonRecord<'a> {
    fn from(record: &'a SentenceRecord) -> Self {
        Self {
            metadata: &record.metadata,
            tokens: record.tokens(),
            structure: record.data.structure(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, record: &SentenceRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &JsonRecord::from(record))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cowstream_engine::SentenceData;
    use serde_json::{json, Value};

    fn cat() -> Token {
        Token::new("cat", "NN", "cat", "1", "0", "root")
    }

    fn metadata() -> Metadata {
        Metadata::from([("id".to_string(), "1".to_string())])
    }

    fn output(record: &SentenceRecord) -> Value {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.format_sentence(record).unwrap();
        let text = String::from_utf8(formatter.writer).unwrap();
        assert_eq!(text.lines().count(), 1);
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_plain_record() {
        let record = SentenceRecord::new(metadata(), SentenceData::Tokens(vec![cat()]));

        assert_eq!(
            output(&record),
            json!({
                "metadata": {"id": "1"},
                "tokens": [{
                    "token": "cat", "POS": "NN", "lemma": "cat",
                    "depid": "1", "dephead": "0", "deprel": "root"
                }]
            })
        );
    }

    #[test]
    fn test_structured_record() {
        let record = SentenceRecord::new(
            metadata(),
            SentenceData::Structured {
                structure: vec![
                    StructureMarker::Open("w".into()),
                    StructureMarker::Token("NN".into()),
                    StructureMarker::Close("w".into()),
                ],
                tokens: vec![cat()],
            },
        );

        assert_eq!(output(&record)["structure"], json!(["w_open", "NN", "w_close"]));
    }
}
