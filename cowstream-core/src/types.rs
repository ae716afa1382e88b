//! Record types produced by sentence extraction

use std::collections::BTreeMap;
use std::fmt;

/// Attribute name → value mapping taken from a sentence's opening tag
pub type Metadata = BTreeMap<String, String>;

/// Number of tab-separated fields in a well-formed token line
pub const TOKEN_FIELDS: usize = 6;

/// One token line of a sentence
///
/// Fields appear in the same order as in the corpus file: surface form,
/// part-of-speech tag, lemma, dependency id, dependency head id and
/// dependency relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Surface form
    pub token: String,
    /// Part-of-speech tag
    #[cfg_attr(feature = "serde", serde(rename = "POS"))]
    pub pos: String,
    /// Lemma
    pub lemma: String,
    /// Dependency id
    pub depid: String,
    /// Dependency head id
    pub dephead: String,
    /// Dependency relation label
    pub deprel: String,
}

impl Token {
    /// Build a token from its six fields
    pub fn new(
        token: impl Into<String>,
        pos: impl Into<String>,
        lemma: impl Into<String>,
        depid: impl Into<String>,
        dephead: impl Into<String>,
        deprel: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            pos: pos.into(),
            lemma: lemma.into(),
            depid: depid.into(),
            dephead: dephead.into(),
            deprel: deprel.into(),
        }
    }

    /// Fields in file order
    pub fn fields(&self) -> [&str; TOKEN_FIELDS] {
        [
            &self.token,
            &self.pos,
            &self.lemma,
            &self.depid,
            &self.dephead,
            &self.deprel,
        ]
    }
}

impl fmt::Display for Token {
    /// Writes the token back as a tab-separated line (without newline)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.token, self.pos, self.lemma, self.depid, self.dephead, self.deprel
        )
    }
}

/// One entry of a sentence's structure trace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StructureMarker {
    /// An element opened inside the sentence
    Open(String),
    /// An element closed inside the sentence
    Close(String),
    /// A token occurred here; carries the token's POS tag as its label
    Token(String),
}

impl StructureMarker {
    /// Label as it appears in the trace, e.g. `p_open`, `p_close` or `NN`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StructureMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureMarker::Open(name) => write!(f, "{name}_open"),
            StructureMarker::Close(name) => write!(f, "{name}_close"),
            StructureMarker::Token(pos) => f.write_str(pos),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StructureMarker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sentence content, with or without its structure trace
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SentenceData {
    /// Tokens only
    Tokens(Vec<Token>),
    /// Structure trace interleaved with token positions, plus the tokens
    Structured {
        /// Open/close/token markers in document order
        structure: Vec<StructureMarker>,
        /// Decoded tokens in document order
        tokens: Vec<Token>,
    },
}

impl SentenceData {
    /// Decoded tokens regardless of variant
    pub fn tokens(&self) -> &[Token] {
        match self {
            SentenceData::Tokens(tokens) => tokens,
            SentenceData::Structured { tokens, .. } => tokens,
        }
    }

    /// Structure trace, if one was requested
    pub fn structure(&self) -> Option<&[StructureMarker]> {
        match self {
            SentenceData::Tokens(_) => None,
            SentenceData::Structured { structure, .. } => Some(structure),
        }
    }

    /// Take ownership of the tokens, discarding any structure trace
    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            SentenceData::Tokens(tokens) => tokens,
            SentenceData::Structured { tokens, .. } => tokens,
        }
    }
}

/// One sentence as handed to consumers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SentenceRecord {
    /// Attributes of the sentence's opening tag
    pub metadata: Metadata,
    /// Extracted content
    pub data: SentenceData,
}

impl SentenceRecord {
    /// Pair metadata with extracted data
    pub fn new(metadata: Metadata, data: SentenceData) -> Self {
        Self { metadata, data }
    }

    /// Decoded tokens
    pub fn tokens(&self) -> &[Token] {
        self.data.tokens()
    }
}

/// Tokens transposed into one column per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenColumns {
    /// Surface forms
    pub token: Vec<String>,
    /// Part-of-speech tags
    pub pos: Vec<String>,
    /// Lemmas
    pub lemma: Vec<String>,
    /// Dependency ids
    pub depid: Vec<String>,
    /// Dependency head ids
    pub dephead: Vec<String>,
    /// Dependency relation labels
    pub deprel: Vec<String>,
}

impl TokenColumns {
    /// Transpose a token list into columns
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut columns = Self::with_capacity(tokens.len());
        for t in tokens {
            columns.token.push(t.token.clone());
            columns.pos.push(t.pos.clone());
            columns.lemma.push(t.lemma.clone());
            columns.depid.push(t.depid.clone());
            columns.dephead.push(t.dephead.clone());
            columns.deprel.push(t.deprel.clone());
        }
        columns
    }

    fn with_capacity(n: usize) -> Self {
        Self {
            token: Vec::with_capacity(n),
            pos: Vec::with_capacity(n),
            lemma: Vec::with_capacity(n),
            depid: Vec::with_capacity(n),
            dephead: Vec::with_capacity(n),
            deprel: Vec::with_capacity(n),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.token.len()
    }

    /// True when no tokens were transposed
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Token {
        Token::new("cat", "NN", "cat", "1", "0", "root")
    }

    #[test]
    fn test_token_display_is_tab_separated() {
        assert_eq!(cat().to_string(), "cat\tNN\tcat\t1\t0\troot");
    }

    #[test]
    fn test_token_fields_order() {
        assert_eq!(cat().fields(), ["cat", "NN", "cat", "1", "0", "root"]);
    }

    #[test]
    fn test_structure_marker_labels() {
        assert_eq!(StructureMarker::Open("p".into()).label(), "p_open");
        assert_eq!(StructureMarker::Close("p".into()).label(), "p_close");
        assert_eq!(StructureMarker::Token("NN".into()).label(), "NN");
    }

    #[test]
    fn test_sentence_data_accessors() {
        let plain = SentenceData::Tokens(vec![cat()]);
        assert_eq!(plain.tokens().len(), 1);
        assert!(plain.structure().is_none());

        let structured = SentenceData::Structured {
            structure: vec![StructureMarker::Token("NN".into())],
            tokens: vec![cat()],
        };
        assert_eq!(structured.structure().map(|s| s.len()), Some(1));
        assert_eq!(structured.into_tokens(), vec![cat()]);
    }

    #[test]
    fn test_columns_transpose() {
        let dog = Token::new("dogs", "NNS", "dog", "2", "1", "conj");
        let columns = TokenColumns::from_tokens(&[cat(), dog]);

        assert_eq!(columns.len(), 2);
        assert_eq!(columns.token, vec!["cat", "dogs"]);
        assert_eq!(columns.pos, vec!["NN", "NNS"]);
        assert_eq!(columns.lemma, vec!["cat", "dog"]);
        assert_eq!(columns.deprel, vec!["root", "conj"]);
    }

    #[test]
    fn test_columns_empty() {
        let columns = TokenColumns::from_tokens(&[]);
        assert!(columns.is_empty());
        assert!(columns.dephead.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_structure_marker_serializes_as_label() {
        let json = serde_json::to_string(&vec![
            StructureMarker::Open("w".into()),
            StructureMarker::Token("NN".into()),
            StructureMarker::Close("w".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"["w_open","NN","w_close"]"#);
    }
}
