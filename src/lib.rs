extern crate self as tasador;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod attribute;
mod dictionary;
mod engine;
mod error;
mod product_type;
mod rules;

pub use api::{
    CandidateSummary, ExtractDetails, Extraction, ExtractionVerbose, Options, PairPolicy, PassSummary, Product,
    PurityPolicy, extract, extract_batch, extract_verbose_with, extract_with,
};
pub use attribute::{AttributeKey, AttributeValue, Attributes, Conflict, Metafield};
pub use dictionary::{Dictionary, normalize};
pub use error::{Error, Result};
pub use product_type::{ProductType, TypeSource, UnknownProductType, classify};

use crate::dictionary::{Label, Unit};

// --- Internal types ---------------------------------------------------------

/// Independent extraction passes. Spans are consumed per dimension, so a
/// number read by the measurement pass can still be read by the diamond pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Dimension {
    Measurement,
    Diamond,
    Gemstone,
    Metal,
}

impl Dimension {
    pub(crate) const ALL: [Dimension; 4] =
        [Dimension::Measurement, Dimension::Diamond, Dimension::Gemstone, Dimension::Metal];
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub dim: Dimension,
    pub kind: TokenKind,
}

impl Token {
    /// A token that claims its span but yields no attribute (e.g. `LARGO 5MM`).
    pub(crate) fn consumed(dim: Dimension) -> Token {
        Token { dim, kind: TokenKind::Consumed }
    }
}

/// A measurement expression found in the title, before disambiguation.
///
/// For pairs, `value` holds the first written number (alto) and `paired_with`
/// the second (ancho).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MeasurementCandidate {
    pub label: Option<Label>,
    pub value: String,
    pub unit: Option<Unit>,
    pub paired_with: Option<String>,
    /// Pair immediately preceded by `GRABADO`.
    pub engraved: bool,
}

impl MeasurementCandidate {
    pub(crate) fn is_paired(&self) -> bool {
        self.paired_with.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Carat(pub String);

/// Color letter and purity code as written in the title.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DiamondGrade {
    pub color: char,
    pub purity: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Stone(pub String);

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MetalData {
    Gold { karats: u8 },
    GoldColor(&'static str),
}

#[derive(Debug, Clone)]
pub(crate) enum TokenKind {
    Measurement(MeasurementCandidate),
    Carat(Carat),
    Grade(DiamondGrade),
    Stone(Stone),
    Metal(MetalData),
    Consumed,
}

// Trait to convert rule production results into tokens
pub(crate) trait IntoToken {
    fn into_token(self) -> Option<Token>;
}

impl IntoToken for Token {
    fn into_token(self) -> Option<Token> {
        Some(self)
    }
}

impl IntoToken for MeasurementCandidate {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Measurement, kind: TokenKind::Measurement(self) })
    }
}

impl IntoToken for Carat {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Diamond, kind: TokenKind::Carat(self) })
    }
}

impl IntoToken for DiamondGrade {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Diamond, kind: TokenKind::Grade(self) })
    }
}

impl IntoToken for Stone {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Gemstone, kind: TokenKind::Stone(self) })
    }
}

impl IntoToken for MetalData {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Metal, kind: TokenKind::Metal(self) })
    }
}

/// What a rule matches against the normalized title.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Pattern {
    /// A regular expression stored as a static reference (created via the
    /// `regex!` helper macro in `src/macros.rs`).
    ///
    /// A named group `lead` is left context: it must match but is dropped
    /// from both the node's span and the production's captures.
    Regex(&'static Regex),

    /// A vocabulary owned by the [`Dictionary`] passed to the parse call.
    /// Used for word lists that configuration can extend at runtime.
    Lexicon(Lexicon),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lexicon {
    Stones,
}

/// Capture groups of one rule match, taken from the normalized (uppercased,
/// accent-folded) title. For `Pattern::Lexicon` matches, group 0 holds the
/// canonical vocabulary entry instead of the written word.
#[derive(Debug, Clone)]
pub(crate) struct Captures {
    groups: Vec<Option<String>>,
}

impl Captures {
    pub(crate) fn new(groups: Vec<Option<String>>) -> Self {
        Captures { groups }
    }

    /// Capture group `idx` (0 is the whole match); `None` if it did not participate.
    pub(crate) fn get(&self, idx: usize) -> Option<&str> {
        self.groups.get(idx).and_then(|g| g.as_deref())
    }
}

pub(crate) type Production = Box<dyn Fn(&Captures) -> Option<Token> + Send + Sync>;

/// An extraction rule: a name, the dimension whose spans it consumes, a
/// `pattern` and a `production` turning one match into a `Token`.
///
/// Gating metadata (`optional_phrases`, `buckets`) lets the parser skip
/// rules that cannot match; `priority` orders rules inside a dimension
/// (higher runs first and claims its spans first).
pub(crate) struct Rule {
    pub name: &'static str,
    pub dim: Dimension,
    pub pattern: Pattern,
    pub production: Production,
    /// Optional phrases - ANY one must appear in input for this rule to activate (OR logic).
    pub optional_phrases: &'static [&'static str],
    /// Bucket mask - rule only activates if input has all these buckets.
    pub buckets: u32,
    pub priority: u16,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("dim", &self.dim)
            .field("pattern", &self.pattern)
            .field("production", &"<function>")
            .field("buckets", &self.buckets)
            .field("priority", &self.priority)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub(crate) fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A match produced by a rule: the consumed `Range` of the normalized title
/// and the resulting `Token`.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub range: Range,
    pub token: Token,
    /// Name of the rule that produced this node.
    pub rule_name: &'static str,
}
