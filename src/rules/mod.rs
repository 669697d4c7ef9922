//! Rule families, one per extraction dimension.
//!
//! Each family exposes `rules::get()`; [`all`] concatenates them into the
//! default rule set compiled once by the API layer.

pub(crate) mod diamond;
pub(crate) mod gem;
pub(crate) mod measure;
pub(crate) mod metal;

use crate::Rule;

/// Default rule set: every family, in dimension order.
pub(crate) fn all() -> Vec<Rule> {
    let mut rules = measure::rules::get();
    rules.extend(diamond::rules::get());
    rules.extend(gem::rules::get());
    rules.extend(metal::rules::get());
    rules
}
