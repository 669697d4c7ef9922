use crate::{Captures, Dimension, Rule, Stone};

/// Any stone in the active vocabulary, singular or plural (`RUBI`, `RUBIES`,
/// `PERLAS`). Group 0 carries the canonical singular name.
fn rule_stone() -> Rule {
    rule! {
        name: "gemstone (vocabulary)",
        dim: Dimension::Gemstone,
        pattern: lexicon!(Stones),
        prod: |caps: &Captures| -> Option<Stone> {
            Some(Stone(caps.get(0)?.to_string()))
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_stone()]
}
