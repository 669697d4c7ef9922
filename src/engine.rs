//! Extraction engine.
//!
//! This module is the entry point for turning a normalized title into
//! attribute assignments. It is split into focused submodules under
//! `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! rules (all)  ──┐
//!               │  CompiledRules::new           (compiled_rules.rs)
//!               └───────────────┬──────────────
//!                               │
//! title ── TriggerInfo::scan ───┼─ select active rules (buckets + phrases)
//!         (trigger.rs)          │
//!                               v
//!                     Parser::sweep (parser.rs)
//!                       - one pass per dimension
//!                       - rules in priority order
//!                       - skip consumed spans (spans.rs)
//!                               │
//!                               v
//!                     resolve_node (resolve.rs)
//!                       - candidate + product type -> attribute key
//!                       - policy points (pairs, purity)
//!                               │
//!                               v
//!                        Vec<Assignment>
//! ```
//!
//! Every rule reads the normalized title only; rules never consume each
//! other's output. What makes the result
//! deterministic is the sweep order: within a dimension, a higher-priority
//! rule claims its spans first and lower-priority rules cannot re-read them.
//! Dimensions are independent, so the diamond pass may read a number the
//! measurement pass already used.
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: orders rules and indexes them by bucket.
//! - `trigger.rs`: coarse scan of the title for buckets and key phrases.
//! - `parser.rs`: runs the active rules and collects `Node`s.
//! - `spans.rs`: consumed-range bookkeeping per dimension.
//! - `resolve.rs`: turns nodes into attribute assignments.
//! - `metrics.rs`: timing/debug data for runs and passes.
//!
//! ## Debugging
//!
//! Rule activation and resolution are traced with `tracing` at `debug` and
//! `trace` level (e.g. `RUST_LOG=tasador=trace` with the CLI).

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/spans.rs"]
mod spans;
#[path = "engine/trigger.rs"]
mod trigger;

pub use compiled_rules::{BucketMask, CompiledRules};
pub use metrics::RunResult;
pub use parser::Parser;
pub(crate) use resolve::ResolveContext;
