//! Trigger scanning (input pre-classification).
//!
//! Inspects the normalized title and produces coarse signals that let the
//! parser decide which rules to consider.
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains digits" or
//!   "mentions a diamond". Used with `RuleIndex::by_bucket`.
//! - **Phrases** (`TriggerInfo::phrases`): key words found in the title
//!   (labels, `COLOR`, `QTS`, ...). Used for phrase gating in `Parser::new`.
//!
//! ## Design notes
//!
//! - Apart from `DIAMONDISH` (which is the diamond trigger itself) this is a
//!   heuristic scan. False positives are fine because rules still have to
//!   match their full pattern; false negatives are not, so phrases are found
//!   by substring, which also catches glued forms like `ANCHO22MM`.
//! - Input is expected to be normalized already (see [`crate::normalize`]).

use super::compiled_rules::BucketMask;
use std::collections::HashSet;

/// Words whose presence gates rules.
const KEY_PHRASES: &[&str] =
    &["ANCHO", "ALTO", "LARGO", "LONGITUD", "GROSOR", "DIAMETRO", "GRABADO", "COLOR", "QT", "ORO"];

/// Words that enable diamond quality extraction.
const DIAMOND_TRIGGERS: &[&str] = &["BRILLANTE", "DIAMANTE"];

/// Input characteristics detected from the normalized title.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
    pub phrases: HashSet<&'static str>,
}

impl TriggerInfo {
    /// Scan a normalized title for coarse buckets and key phrases.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }

        if input.contains("MM") || input.contains("CM") {
            buckets |= BucketMask::HAS_UNIT;
        }

        if input.contains('X') {
            buckets |= BucketMask::HAS_PAIR;
        }

        if DIAMOND_TRIGGERS.iter().any(|word| input.contains(word)) {
            buckets |= BucketMask::DIAMONDISH;
        }

        if input.contains("ORO") || input.contains('K') {
            buckets |= BucketMask::GOLDISH;
        }

        let phrases = KEY_PHRASES.iter().copied().filter(|phrase| input.contains(phrase)).collect();

        TriggerInfo { buckets, phrases }
    }
}
