//! Per-sentence arena
//!
//! A [`SentenceUnit`] owns everything buffered for one sentence: the
//! metadata from its opening tag and the serialized fragment of its subtree.
//! The fragment puts every tag on a line of its own and keeps text exactly
//! as it appears in the file (still entity-escaped), which is the layout the
//! extractor classifies. Dropping the unit releases the whole subtree.

use cowstream_core::Metadata;
use quick_xml::events::BytesStart;
use std::borrow::Cow;

/// Buffered content of one sentence element
#[derive(Debug)]
pub struct SentenceUnit {
    metadata: Metadata,
    fragment: String,
    position: usize,
    depth: usize,
    nodes: usize,
}

impl SentenceUnit {
    /// Start a unit from the sentence's opening tag
    pub(crate) fn open(start: &BytesStart<'_>, position: usize) -> Self {
        let mut unit = Self {
            metadata: attributes(start),
            fragment: String::new(),
            position,
            depth: 0,
            nodes: 1,
        };
        unit.write_start(start);
        unit
    }

    /// A nested element opened
    pub(crate) fn push_start(&mut self, start: &BytesStart<'_>, tag: &[u8]) {
        if start.name().as_ref() == tag {
            self.depth += 1;
        }
        self.nodes += 1;
        self.write_start(start);
    }

    /// A self-closing nested element
    pub(crate) fn push_empty(&mut self, start: &BytesStart<'_>) {
        self.nodes += 1;
        let name = start.name();
        self.write_start_name(name.as_ref());
        self.write_end(name.as_ref());
    }

    /// An element closed; returns true when it closes the unit itself
    pub(crate) fn push_end(&mut self, name: &[u8], tag: &[u8]) -> bool {
        self.write_end(name);
        if name != tag {
            return false;
        }
        if self.depth == 0 {
            return true;
        }
        self.depth -= 1;
        false
    }

    /// Character data, kept escaped
    pub(crate) fn push_text(&mut self, raw: &[u8]) {
        self.fragment.push_str(&String::from_utf8_lossy(raw));
    }

    /// Attributes of the opening tag
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Serialized subtree so far
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Byte offset of the opening tag
    pub fn position(&self) -> usize {
        self.position
    }

    /// Element nodes held by this unit, its own element included
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub(crate) fn into_parts(self) -> (Metadata, String, usize) {
        (self.metadata, self.fragment, self.nodes)
    }

    fn begin_line(&mut self) {
        if !self.fragment.is_empty() && !self.fragment.ends_with('\n') {
            self.fragment.push('\n');
        }
    }

    fn write_start(&mut self, start: &BytesStart<'_>) {
        self.begin_line();
        self.fragment.push('<');
        let raw = String::from_utf8_lossy(start);
        // A tag spread over several lines must still occupy one
        if raw.contains(['\n', '\r']) {
            self.fragment.push_str(&raw.replace(['\n', '\r'], " "));
        } else {
            self.fragment.push_str(&raw);
        }
        self.fragment.push_str(">\n");
    }

    fn write_start_name(&mut self, name: &[u8]) {
        self.begin_line();
        self.fragment.push('<');
        self.fragment.push_str(&String::from_utf8_lossy(name));
        self.fragment.push_str(">\n");
    }

    fn write_end(&mut self, name: &[u8]) {
        self.begin_line();
        self.fragment.push_str("</");
        self.fragment.push_str(&String::from_utf8_lossy(name));
        self.fragment.push_str(">\n");
    }
}

/// Attribute mapping of a start tag
///
/// HTML-style unquoted values are accepted. A malformed attribute is
/// skipped; a value with a broken entity reference is kept verbatim.
pub(crate) fn attributes(start: &BytesStart<'_>) -> Metadata {
    let mut metadata = Metadata::new();

    for attr in start.html_attributes().with_checks(false) {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                log::debug!("skipping malformed attribute: {err}");
                continue;
            }
        };
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(Cow::Borrowed(v)) => v.to_string(),
            Ok(Cow::Owned(v)) => v,
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        metadata.insert(key, value);
    }

    metadata
}
