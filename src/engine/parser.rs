//! Matching parser.
//!
//! This module is the operational core of the engine:
//!
//! - Select the rules that are plausible for the title (bucket + phrase
//!   gating; see `compiled_rules.rs` and `trigger.rs`).
//! - Sweep each dimension once, running its rules in priority order against
//!   the normalized title and claiming spans as nodes are produced (see
//!   `spans.rs`).
//! - Resolve nodes into attribute assignments (see `resolve.rs`).
//!
//! ## Pass structure
//!
//! ```text
//! (0) trigger scan          -> buckets + phrases
//! (1) measurement pass      -> labeled, paired, bare candidates
//! (2) diamond pass          -> carat, color/purity
//! (3) gemstone pass         -> stone lexicon
//! (4) metal pass            -> karats, gold color
//! (5) resolve               -> Assignment list in title order
//! ```
//!
//! Output is deterministic given the same title, rules, dictionary and
//! options: rule order is fixed at compile time and regex hits are visited
//! left to right.

use super::compiled_rules::{BUCKET_SLOTS, CompiledRules, RuleId};
use super::metrics::{PassMetrics, RunMetrics, RunResult};
use super::resolve::{ResolveContext, resolve_node};
use super::spans::ConsumedSpans;
use super::trigger::TriggerInfo;
use crate::{Captures, Dictionary, Dimension, Lexicon, Node, Pattern, Range, Rule};
use std::collections::HashSet;
use std::time::Instant;

/// Name of the optional leading group that anchors a number on its left
/// (`(?P<lead>^|[^0-9.,])`), standing in for a look-behind.
const LEAD_GROUP: &str = "lead";

/// Parser orchestrates applying `Rule`s against a normalized title.
///
/// Usage: create with `Parser::new(input, &compiled, &dictionary)` then call
/// `run_with_metrics(&context)`.
#[derive(Debug)]
pub struct Parser<'a> {
    /// Normalized title.
    input: &'a str,
    dictionary: &'a Dictionary,
    compiled: &'a CompiledRules<'a>,
    /// Active rule ids in execution order.
    active: Vec<RuleId>,
}

impl<'a> Parser<'a> {
    /// Create a parser for `input`, which must already be normalized.
    pub fn new(input: &'a str, compiled: &'a CompiledRules<'a>, dictionary: &'a Dictionary) -> Self {
        let trigger_info = TriggerInfo::scan(input);
        tracing::trace!(buckets = ?trigger_info.buckets, phrases = ?trigger_info.phrases, "trigger scan");

        let mut candidates: HashSet<RuleId> = compiled.index.always_on.iter().copied().collect();
        for (bit, slot) in BUCKET_SLOTS {
            if trigger_info.buckets.contains(bit) {
                candidates.extend(&compiled.index.by_bucket[slot]);
            }
        }

        let mut gated = 0;
        let active: Vec<RuleId> = compiled
            .order
            .iter()
            .copied()
            .filter(|id| candidates.contains(id))
            .filter(|&id| {
                let meta = &compiled.metas[id];

                // Every bucket the rule names must be present.
                if !trigger_info.buckets.contains(meta.buckets) {
                    gated += 1;
                    return false;
                }

                // Check optional_phrases (OR logic - at least one must be present)
                if !meta.optional_phrases.is_empty()
                    && !meta.optional_phrases.iter().any(|phrase| trigger_info.phrases.contains(phrase))
                {
                    gated += 1;
                    return false;
                }

                true
            })
            .collect();

        tracing::debug!(active = active.len(), total = compiled.rules.len(), gated, "active rules");

        Parser { input, dictionary, compiled, active }
    }

    pub(crate) fn active_rule_names(&self) -> Vec<&'static str> {
        self.active.iter().map(|&id| self.compiled.rules[id].name).collect()
    }

    /// All hits of `pattern` in the input, left to right, with their captures.
    fn lookup(&self, pattern: &Pattern) -> Vec<(Range, Captures)> {
        match pattern {
            Pattern::Regex(re) => {
                // `lead` is context the hit must follow; it is neither span nor capture.
                let lead = re.capture_names().position(|name| name == Some(LEAD_GROUP));
                re.captures_iter(self.input)
                    .filter_map(|caps| {
                        let whole = caps.get(0)?;
                        let start = lead.and_then(|idx| caps.get(idx)).map_or(whole.start(), |m| m.end());
                        let groups = caps
                            .iter()
                            .enumerate()
                            .filter(|&(idx, _)| Some(idx) != lead)
                            .map(|(_, g)| g.map(|m| m.as_str().to_string()))
                            .collect();
                        Some((Range { start, end: whole.end() }, Captures::new(groups)))
                    })
                    .collect()
            }
            Pattern::Lexicon(Lexicon::Stones) => self
                .dictionary
                .find_stones(self.input)
                .into_iter()
                .map(|(start, end, canonical)| {
                    (Range { start, end }, Captures::new(vec![Some(canonical.to_string())]))
                })
                .collect(),
        }
    }

    /// Run one rule over the title, producing nodes for hits whose span is
    /// still free in the rule's dimension. Returns `(hits, produced)`.
    fn apply_rule(&self, rule: &Rule, spans: &mut ConsumedSpans, out: &mut Vec<Node>) -> (usize, usize) {
        let hits = self.lookup(&rule.pattern);
        let hit_count = hits.len();
        let mut produced = 0;

        for (range, caps) in hits {
            if !spans.is_free(rule.dim, &range) {
                tracing::trace!(rule = rule.name, start = range.start, end = range.end, "span already consumed");
                continue;
            }

            match (rule.production)(&caps) {
                Some(token) => {
                    tracing::debug!(
                        rule = rule.name,
                        text = &self.input[range.start..range.end],
                        token = ?token.kind,
                        "production ok"
                    );
                    spans.consume(rule.dim, range);
                    out.push(Node { range, token, rule_name: rule.name });
                    produced += 1;
                }
                None => {
                    tracing::trace!(rule = rule.name, text = &self.input[range.start..range.end], "production none");
                }
            }
        }

        (hit_count, produced)
    }

    /// Run every active rule, one dimension at a time, and return the nodes
    /// ordered by position.
    fn sweep(&self) -> (Vec<Node>, Vec<PassMetrics>) {
        let mut spans = ConsumedSpans::new();
        let mut nodes = Vec::new();
        let mut passes = Vec::new();

        for dim in Dimension::ALL {
            let pass_start = Instant::now();
            let mut rules_considered = 0;
            let mut matches = 0;
            let mut produced = 0;

            for &id in &self.active {
                let rule = self.compiled.rules[id];
                if rule.dim != dim {
                    continue;
                }
                rules_considered += 1;
                let (hits, made) = self.apply_rule(rule, &mut spans, &mut nodes);
                matches += hits;
                produced += made;
            }

            passes.push(PassMetrics { dim, duration: pass_start.elapsed(), rules_considered, matches, produced });
        }

        // Stable: equal starts keep sweep order.
        nodes.sort_by_key(|n| (n.range.start, n.range.end));
        (nodes, passes)
    }

    /// Sweep the title and resolve nodes into assignments, with timings.
    pub fn run_with_metrics(&self, context: &ResolveContext) -> RunResult {
        let total_start = Instant::now();

        let sweep_start = Instant::now();
        let (nodes, passes) = self.sweep();
        let sweep = sweep_start.elapsed();

        let resolve_start = Instant::now();
        let context = context.with_nodes(&nodes);
        let assignments = nodes.iter().filter_map(|node| resolve_node(&context, node)).collect();
        let resolve = resolve_start.elapsed();

        RunResult { nodes, assignments, metrics: RunMetrics { total: total_start.elapsed(), sweep, passes, resolve } }
    }
}
