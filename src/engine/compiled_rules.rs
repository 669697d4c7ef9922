//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: the structures derived
//! from the full rule list that make a run cheap and its order predictable.
//!
//! Parsing is split into two phases:
//!
//! 1. **Compile/index rules** (this module): fix the execution order and
//!    pre-index rules with coarse metadata.
//! 2. **Run** (see `parser.rs`): scan the title for coarse triggers
//!    (`trigger.rs`), select a subset of rules, then sweep and resolve.
//!
//! ## Execution order
//!
//! Rules run grouped by dimension, then by descending `priority`, then in
//! declaration order. Within a dimension the order is the precedence between
//! overlapping patterns (labeled before paired before bare measurements).
//!
//! ## Buckets
//!
//! A rule's `buckets` are *all required*: the rule is active only when the
//! title shows every bucket it names. `DIAMONDISH` is the diamond trigger
//! itself, so gating on it is semantic, not just an optimization.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules` and `CompiledRules::metas`.
//!   Those vectors must stay aligned.
//! - `CompiledRules::order` is a permutation of all rule ids.

use crate::{Dimension, Rule};

// --- Rule compilation and indexing -------------------------------------------

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS  = 1 << 0;
        const HAS_UNIT    = 1 << 1;
        const HAS_PAIR    = 1 << 2;
        const DIAMONDISH  = 1 << 3;
        const GOLDISH     = 1 << 4;
    }
}

/// Metadata attached to a rule.
#[derive(Clone, Copy, Debug)]
pub struct RuleMeta {
    pub optional_phrases: &'static [&'static str],
    pub buckets: BucketMask,
    pub dim: Dimension,
    pub priority: u16,
}

#[derive(Default, Debug)]
pub struct RuleIndex {
    pub always_on: Vec<RuleId>,
    pub by_bucket: [Vec<RuleId>; BUCKET_COUNT],
}

pub const BUCKET_COUNT: usize = 5;
pub const BUCKET_HAS_DIGITS: usize = 0;
pub const BUCKET_HAS_UNIT: usize = 1;
pub const BUCKET_HAS_PAIR: usize = 2;
pub const BUCKET_DIAMONDISH: usize = 3;
pub const BUCKET_GOLDISH: usize = 4;

/// Bucket bit paired with its slot in `RuleIndex::by_bucket`.
pub(crate) const BUCKET_SLOTS: [(BucketMask, usize); BUCKET_COUNT] = [
    (BucketMask::HAS_DIGITS, BUCKET_HAS_DIGITS),
    (BucketMask::HAS_UNIT, BUCKET_HAS_UNIT),
    (BucketMask::HAS_PAIR, BUCKET_HAS_PAIR),
    (BucketMask::DIAMONDISH, BUCKET_DIAMONDISH),
    (BucketMask::GOLDISH, BUCKET_GOLDISH),
];

/// Pre-compiled rule set with metadata, execution order and indexes.
#[derive(Debug)]
pub struct CompiledRules<'a> {
    pub rules: Vec<&'a Rule>,
    pub metas: Vec<RuleMeta>,
    /// Rule ids in execution order.
    pub order: Vec<RuleId>,
    pub index: RuleIndex,
}

impl<'a> CompiledRules<'a> {
    /// Create a compiled rule set from a slice of rules.
    ///
    /// This is intentionally lightweight: patterns are static regexes that
    /// compile lazily on first use, so nothing here touches regex state.
    pub fn new(rules: &'a [Rule]) -> Self {
        let rule_refs: Vec<&Rule> = rules.iter().collect();

        let metas: Vec<RuleMeta> = rule_refs
            .iter()
            .map(|r| RuleMeta {
                optional_phrases: r.optional_phrases,
                buckets: BucketMask::from_bits_truncate(r.buckets),
                dim: r.dim,
                priority: r.priority,
            })
            .collect();

        // Stable sort keeps declaration order between equal priorities.
        let mut order: Vec<RuleId> = (0..metas.len()).collect();
        order.sort_by(|&a, &b| {
            metas[a].dim.cmp(&metas[b].dim).then(metas[b].priority.cmp(&metas[a].priority))
        });

        let mut index = RuleIndex::default();
        for (id, meta) in metas.iter().enumerate() {
            if meta.buckets.is_empty() {
                // No bucket requirements -> always on (phrase filtering happens later)
                index.always_on.push(id);
                continue;
            }
            for (bit, slot) in BUCKET_SLOTS {
                if meta.buckets.contains(bit) {
                    index.by_bucket[slot].push(id);
                }
            }
        }

        CompiledRules { rules: rule_refs, metas, order, index }
    }
}
