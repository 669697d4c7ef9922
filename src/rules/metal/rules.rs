use crate::engine::BucketMask;
use crate::{Captures, Dimension, MetalData, Rule};

/// Leading `18K`, `9 KT`, `18KTS`, `18 KILATES`. Only the title prefix
/// counts: karats further in usually describe a part (`CIERRE 9K`), not
/// the piece.
fn rule_karats() -> Rule {
    rule! {
        name: "gold (karats prefix)",
        dim: Dimension::Metal,
        pattern: re!(r"^\s*(18|9)\s*K(?:ILATES|TS?)?\b"),
        buckets: (BucketMask::GOLDISH | BucketMask::HAS_DIGITS).bits(),
        prod: |caps: &Captures| -> Option<MetalData> {
            let karats = caps.get(1)?.parse().ok()?;
            Some(MetalData::Gold { karats })
        },
    }
}

/// `ORO BLANCO`, `ORO ROSADO`
fn rule_gold_color() -> Rule {
    rule! {
        name: "gold (color)",
        dim: Dimension::Metal,
        pattern: re!(r"\bORO\s+(AMARILLO|BLANCO|ROSA|ROSADO|BICOLOR|TRICOLOR)\b"),
        optional_phrases: ["ORO"],
        buckets: BucketMask::GOLDISH.bits(),
        prod: |caps: &Captures| -> Option<MetalData> {
            let color = match caps.get(1)? {
                "AMARILLO" => "Amarillo",
                "BLANCO" => "Blanco",
                "ROSA" | "ROSADO" => "Rosa",
                "BICOLOR" => "Bicolor",
                "TRICOLOR" => "Tricolor",
                _ => return None,
            };
            Some(MetalData::GoldColor(color))
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_karats(), rule_gold_color()]
}
