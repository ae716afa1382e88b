//! Streaming walker
//!
//! Pulls markup events from a decompressed byte stream and yields one
//! [`SentenceRecord`] per sentence element. The walker is a two-state
//! machine:
//!
//! - `Idle`: outside any sentence. Only the count of open ancestor elements
//!   is kept; their content is not buffered.
//! - `InUnit`: inside a sentence. Every event is serialized into the unit's
//!   fragment until the matching end tag arrives, at which point the fragment
//!   is extracted, the record is returned and the unit is dropped.
//!
//! Nothing is read ahead of the record being returned, and the event buffer
//! is cleared after each event, so peak memory follows the largest sentence
//! rather than the file size.

use crate::config::WalkerConfig;
use crate::error::{EngineError, Result};
use crate::stats::WalkStats;
use crate::unit::SentenceUnit;
use cowstream_core::{SentenceExtractor, SentenceRecord};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;
use std::iter::FusedIterator;

/// Walker state
#[derive(Debug)]
enum WalkState {
    /// Between sentences
    Idle,
    /// Buffering one sentence
    InUnit(SentenceUnit),
}

impl WalkState {
    fn take_unit(&mut self) -> Option<SentenceUnit> {
        match std::mem::replace(self, WalkState::Idle) {
            WalkState::InUnit(unit) => Some(unit),
            WalkState::Idle => None,
        }
    }
}

/// Pull-based iterator over the sentences of one stream
///
/// The walker owns its reader; dropping the walker closes the underlying
/// source, including when a consumer stops early.
pub struct SentenceWalker<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    extractor: SentenceExtractor,
    state: WalkState,
    ancestors: usize,
    stats: WalkStats,
    finished: bool,
}

impl<R: BufRead> std::fmt::Debug for SentenceWalker<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceWalker")
            .field("sentence_tag", &self.extractor.sentence_tag())
            .field("state", &self.state)
            .field("stats", &self.stats)
            .field("finished", &self.finished)
            .finish()
    }
}

impl<R: BufRead> SentenceWalker<R> {
    /// Create a walker over a buffered stream
    pub fn new(reader: R, config: WalkerConfig) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.trim_text(false);
        reader.check_end_names(false);
        reader.check_comments(false);
        reader.expand_empty_elements(false);

        Self {
            reader,
            buf: Vec::new(),
            extractor: SentenceExtractor::new(config.sentence_tag, config.structure),
            state: WalkState::Idle,
            ancestors: 0,
            stats: WalkStats::new(),
            finished: false,
        }
    }

    /// Counters so far
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    /// Byte offset reached in the decompressed stream
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// True while a sentence is being buffered
    pub fn in_unit(&self) -> bool {
        matches!(self.state, WalkState::InUnit(_))
    }

    fn fail(&mut self, err: EngineError) -> Option<Result<SentenceRecord>> {
        self.finished = true;
        Some(Err(err))
    }

    fn step(&mut self) -> Option<Result<SentenceRecord>> {
        let Self {
            reader,
            buf,
            extractor,
            state,
            ancestors,
            stats,
            ..
        } = self;
        let tag = extractor.sentence_tag().as_bytes();

        loop {
            buf.clear();
            let position = reader.buffer_position();
            let event = match reader.read_event_into(buf) {
                Ok(event) => event,
                Err(err) => {
                    release_open_nodes(state, ancestors, stats);
                    return Some(Err(xml_error(err, reader.buffer_position())));
                }
            };

            match event {
                Event::Start(start) => {
                    stats.open_node();
                    match state {
                        WalkState::InUnit(unit) => unit.push_start(&start, tag),
                        WalkState::Idle if start.name().as_ref() == tag => {
                            *state = WalkState::InUnit(SentenceUnit::open(&start, position));
                        }
                        WalkState::Idle => *ancestors += 1,
                    }
                }
                Event::Empty(start) => {
                    stats.open_node();
                    match state {
                        WalkState::InUnit(unit) => unit.push_empty(&start),
                        WalkState::Idle if start.name().as_ref() == tag => {
                            let mut unit = SentenceUnit::open(&start, position);
                            unit.push_end(tag, tag);
                            return Some(Ok(finish_unit(unit, extractor, stats)));
                        }
                        WalkState::Idle => stats.reclaim(1),
                    }
                }
                Event::End(end) => {
                    let closes_unit = match state {
                        WalkState::InUnit(unit) => unit.push_end(end.name().as_ref(), tag),
                        // A stray sentence close tag while idle is ignored
                        WalkState::Idle if end.name().as_ref() == tag => false,
                        WalkState::Idle => {
                            if *ancestors > 0 {
                                *ancestors -= 1;
                                stats.reclaim(1);
                            }
                            false
                        }
                    };
                    if closes_unit {
                        if let Some(unit) = state.take_unit() {
                            return Some(Ok(finish_unit(unit, extractor, stats)));
                        }
                    }
                }
                Event::Text(text) => {
                    if let WalkState::InUnit(unit) = state {
                        unit.push_text(&text);
                    }
                }
                Event::CData(cdata) => {
                    if let WalkState::InUnit(unit) = state {
                        let raw = String::from_utf8_lossy(&cdata);
                        unit.push_text(quick_xml::escape::escape(&raw).as_bytes());
                    }
                }
                Event::Eof => {
                    // unclosed ancestors are released with the stream
                    return release_open_nodes(state, ancestors, stats).map(|position| {
                        Err(EngineError::MalformedMarkup {
                            tag: extractor.sentence_tag().to_string(),
                            position,
                        })
                    });
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }
    }
}

/// Release every node still open when the stream ends or breaks
///
/// Returns the start position of the unfinished unit, if there was one.
fn release_open_nodes(
    state: &mut WalkState,
    ancestors: &mut usize,
    stats: &mut WalkStats,
) -> Option<usize> {
    stats.reclaim(*ancestors);
    *ancestors = 0;
    state.take_unit().map(|unit| {
        stats.reclaim(unit.nodes());
        unit.position()
    })
}

/// Extract a completed unit and release its nodes
fn finish_unit(
    unit: SentenceUnit,
    extractor: &SentenceExtractor,
    stats: &mut WalkStats,
) -> SentenceRecord {
    let (metadata, fragment, nodes) = unit.into_parts();
    let (data, dropped) = extractor.extract_counting(&fragment);
    drop(fragment);
    stats.reclaim(nodes);

    if dropped > 0 {
        log::trace!(
            "dropped {dropped} malformed record(s) in sentence {:?}",
            metadata
        );
    }
    stats.record_sentence(data.tokens().len(), dropped);

    SentenceRecord::new(metadata, data)
}

fn xml_error(err: quick_xml::Error, position: usize) -> EngineError {
    match err {
        quick_xml::Error::Io(io) => EngineError::Io(std::io::Error::new(io.kind(), io.to_string())),
        other => EngineError::Xml {
            position,
            message: other.to_string(),
        },
    }
}

impl<R: BufRead> Iterator for SentenceWalker<R> {
    type Item = Result<SentenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Some(Ok(record)) => Some(Ok(record)),
            Some(Err(err)) => self.fail(err),
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl<R: BufRead> FusedIterator for SentenceWalker<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use cowstream_core::{SentenceData, StructureMarker, Token};

    fn walk(input: &str, config: WalkerConfig) -> Vec<Result<SentenceRecord>> {
        SentenceWalker::new(input.as_bytes(), config).collect()
    }

    fn cat() -> Token {
        Token::new("cat", "NN", "cat", "1", "0", "root")
    }

    #[test]
    fn test_single_sentence_tokens() {
        let records = walk(
            "<s id=\"1\"><w>cat\tNN\tcat\t1\t0\troot\n</w></s>",
            WalkerConfig::new(),
        );
        assert_eq!(records.len(), 1);

        let record = records.into_iter().next().unwrap().unwrap();
        assert_eq!(record.metadata.get("id").map(String::as_str), Some("1"));
        assert_eq!(record.data, SentenceData::Tokens(vec![cat()]));
    }

    #[test]
    fn test_single_sentence_structured() {
        let mut walker = SentenceWalker::new(
            "<s id=\"1\"><w>cat\tNN\tcat\t1\t0\troot\n</w></s>".as_bytes(),
            WalkerConfig::structured(),
        );
        let record = walker.next().unwrap().unwrap();

        assert_eq!(
            record.data,
            SentenceData::Structured {
                structure: vec![
                    StructureMarker::Open("w".into()),
                    StructureMarker::Token("NN".into()),
                    StructureMarker::Close("w".into()),
                ],
                tokens: vec![cat()],
            }
        );
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_content_outside_sentences_ignored() {
        let input = "<doc id=\"d\">\n<p>\nstray\tline\n<s>\nx\tX\tx\t1\t0\troot\n</s>\n</p>\n</doc>\n";
        let records: Vec<_> = walk(input, WalkerConfig::structured())
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data.structure().unwrap().len(), 1);
        assert!(records[0].metadata.is_empty());
    }

    #[test]
    fn test_empty_sentence_element() {
        let records = walk("<doc><s id=\"e\"/></doc>", WalkerConfig::new());
        let record = records.into_iter().next().unwrap().unwrap();
        assert_eq!(record.metadata.get("id").map(String::as_str), Some("e"));
        assert!(record.tokens().is_empty());
    }

    #[test]
    fn test_unclosed_sentence_is_malformed() {
        let input = "<doc>\n<s id=\"1\">\na\tA\ta\t1\t0\troot\n</s>\n<s id=\"2\">\nb\tB\tb\t1\t0\troot\n";
        let mut walker = SentenceWalker::new(input.as_bytes(), WalkerConfig::new());

        assert!(walker.next().unwrap().is_ok());
        match walker.next() {
            Some(Err(EngineError::MalformedMarkup { tag, .. })) => assert_eq!(tag, "s"),
            other => panic!("expected malformed markup, got {other:?}"),
        }
        assert!(walker.next().is_none());
        assert_eq!(walker.stats().live_nodes(), 0);
    }

    #[test]
    fn test_stray_close_tag_ignored() {
        let records = walk("</s>\n<s>\na\tA\ta\t1\t0\troot\n</s>\n", WalkerConfig::new());
        assert_eq!(records.len(), 1);
        assert!(records[0].is_ok());
    }

    #[test]
    fn test_nodes_reclaimed_after_each_sentence() {
        let input = "<doc>\n<s>\n<w>\na\tA\ta\t1\t0\troot\n</w>\n</s>\n<s>\n<w>\nb\tB\tb\t1\t0\troot\n</w>\n</s>\n</doc>\n";
        let mut walker = SentenceWalker::new(input.as_bytes(), WalkerConfig::new());

        walker.next().unwrap().unwrap();
        // only <doc> is still open
        assert_eq!(walker.stats().live_nodes(), 1);
        walker.next().unwrap().unwrap();
        assert_eq!(walker.stats().live_nodes(), 1);
        assert!(walker.next().is_none());

        let stats = walker.stats();
        assert_eq!(stats.live_nodes(), 0);
        assert_eq!(stats.nodes_opened, 5);
        assert_eq!(stats.peak_live_nodes, 3);
        assert_eq!(stats.sentences, 2);
    }

    #[test]
    fn test_dropped_records_counted() {
        let input = "<s>\nfoo\tbar\na\tA\ta\t1\t0\troot\n</s>\n";
        let mut walker = SentenceWalker::new(input.as_bytes(), WalkerConfig::new());
        let record = walker.next().unwrap().unwrap();

        assert_eq!(record.tokens().len(), 1);
        assert_eq!(walker.stats().dropped_records, 1);
        assert_eq!(walker.stats().tokens, 1);
    }

    #[test]
    fn test_cdata_text_is_read() {
        let input = "<s><![CDATA[a&b\tCC\ta&b\t1\t0\troot]]></s>";
        let record = walk(input, WalkerConfig::new()).remove(0).unwrap();
        assert_eq!(record.tokens()[0].token, "a&amp;b");
    }

    #[test]
    fn test_escaped_angle_bracket_token() {
        let input = "<s>\n&lt;\t$(\t&lt;\t1\t0\tpunct\n</s>\n";
        let record = walk(input, WalkerConfig::structured()).remove(0).unwrap();
        assert_eq!(record.tokens()[0].token, "&lt;");
        assert_eq!(record.data.structure().unwrap().len(), 1);
    }

    #[test]
    fn test_tokenizer_error_releases_open_nodes() {
        for tail in ["<!-- x", "<![CDATA[x", "<!x"] {
            let input = format!("<doc>\n<s>\n<b>\na\tA\ta\t1\t0\troot\n{tail}");
            let mut walker = SentenceWalker::new(input.as_bytes(), WalkerConfig::new());

            match walker.next() {
                Some(Err(EngineError::Xml { .. })) => {}
                other => panic!("expected xml error for {tail:?}, got {other:?}"),
            }
            assert!(walker.next().is_none());
            assert!(!walker.in_unit());
            assert_eq!(walker.stats().nodes_opened, 3);
            assert_eq!(walker.stats().live_nodes(), 0);
        }
    }

    #[test]
    fn test_nested_sentence_tag_stays_in_outer_unit() {
        let input = "<doc>\n<s id=\"outer\">\na\tA\ta\t1\t0\troot\n<s id=\"inner\">\nb\tB\tb\t1\t0\troot\n</s>\n</s>\n</doc>\n";
        let mut walker = SentenceWalker::new(input.as_bytes(), WalkerConfig::structured());
        let records: Vec<_> = walker.by_ref().collect::<Result<_>>().unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.metadata.get("id").map(String::as_str), Some("outer"));
        let words: Vec<_> = record.tokens().iter().map(|t| t.token.as_str()).collect();
        assert_eq!(words, ["a", "b"]);
        // the inner sentence tags leave no markers
        assert_eq!(
            record.data.structure().unwrap(),
            [
                StructureMarker::Token("A".to_string()),
                StructureMarker::Token("B".to_string())
            ]
        );
        assert_eq!(walker.stats().live_nodes(), 0);
    }

    #[test]
    fn test_custom_sentence_tag() {
        let config = WalkerConfig {
            sentence_tag: "sent".to_string(),
            structure: false,
        };
        let input = "<s>\n<sent n=\"1\">\na\tA\ta\t1\t0\troot\n</sent>\n</s>\n";
        let records = walk(input, config);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].as_ref().unwrap().metadata.get("n").map(String::as_str),
            Some("1")
        );
    }

    #[test]
    fn test_comments_and_declarations_skipped() {
        let input = "<?xml version=\"1.0\"?>\n<!-- corpus -->\n<s>\n<!-- note -->\na\tA\ta\t1\t0\troot\n</s>\n";
        let records = walk(input, WalkerConfig::new());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().tokens().len(), 1);
    }
}
