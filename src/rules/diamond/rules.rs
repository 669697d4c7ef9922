use crate::engine::BucketMask;
use crate::rules::diamond::helpers::grade;
use crate::rules::measure::helpers::decimal;
use crate::{Captures, Carat, DiamondGrade, Dimension, Rule};

// Every rule here requires DIAMONDISH: without BRILLANTE or DIAMANTE in the
// title, a `COLOR H` or `0.10 QTS` belongs to something else.

/// `0.10 QTS.`, `0,25QT`, `2X0.10 QTS`
fn rule_carat() -> Rule {
    rule! {
        name: "carat (qts)",
        dim: Dimension::Diamond,
        pattern: re!(r"(?P<lead>^|[^0-9.,])(\d+(?:[.,]\d+)?)\s*QTS?\b\.?"),
        optional_phrases: ["QT"],
        buckets: (BucketMask::DIAMONDISH | BucketMask::HAS_DIGITS).bits(),
        prod: |caps: &Captures| -> Option<Carat> {
            Some(Carat(decimal(caps.get(1)?)?))
        },
    }
}

/// `COLOR H VSI`, `COLOR: G-VS1`, `COLOR I, SI2`, `COLOR H. VS1`
fn rule_color_label_with_purity() -> Rule {
    rule! {
        name: "grade (COLOR <color> <purity>)",
        dim: Dimension::Diamond,
        pattern: re!(r"\bCOLOR\s*:?\s*([GHI])(?:\s*[-/.]\s*|[\s,]+)(VVS1|VVS2|VVSI|VVS|VS1|VS2|VSI|VS|SI1|SI2|SII|SI|I1|I2|I3|FL|IF)\b"),
        optional_phrases: ["COLOR"],
        buckets: BucketMask::DIAMONDISH.bits(),
        priority: 30,
        prod: |caps: &Captures| -> Option<DiamondGrade> {
            grade(caps.get(1)?, caps.get(2))
        },
    }
}

/// `H-VS1`, `G/VVS2`
fn rule_color_dash_purity() -> Rule {
    rule! {
        name: "grade (<color>-<purity>)",
        dim: Dimension::Diamond,
        pattern: re!(r"\b([GHI])\s*[-/]\s*(VVS1|VVS2|VVSI|VVS|VS1|VS2|VSI|VS|SI1|SI2|SII|SI|I1|I2|I3|FL|IF)\b"),
        buckets: BucketMask::DIAMONDISH.bits(),
        priority: 20,
        prod: |caps: &Captures| -> Option<DiamondGrade> {
            grade(caps.get(1)?, caps.get(2))
        },
    }
}

/// `VS1-H`, `SI/G`
fn rule_purity_dash_color() -> Rule {
    rule! {
        name: "grade (<purity>-<color>)",
        dim: Dimension::Diamond,
        pattern: re!(r"\b(VVS1|VVS2|VVSI|VVS|VS1|VS2|VSI|VS|SI1|SI2|SII|SI|I1|I2|I3|FL|IF)\s*[-/]\s*([GHI])\b"),
        buckets: BucketMask::DIAMONDISH.bits(),
        priority: 20,
        prod: |caps: &Captures| -> Option<DiamondGrade> {
            grade(caps.get(2)?, caps.get(1))
        },
    }
}

/// `COLOR H`, `COLOR: G`
fn rule_color_label() -> Rule {
    rule! {
        name: "grade (COLOR <color>)",
        dim: Dimension::Diamond,
        pattern: re!(r"\bCOLOR\s*:?\s*([GHI])\b"),
        optional_phrases: ["COLOR"],
        buckets: BucketMask::DIAMONDISH.bits(),
        priority: 10,
        prod: |caps: &Captures| -> Option<DiamondGrade> {
            grade(caps.get(1)?, None)
        },
    }
}

/// `H COLOR`
fn rule_color_before_label() -> Rule {
    rule! {
        name: "grade (<color> COLOR)",
        dim: Dimension::Diamond,
        pattern: re!(r"\b([GHI])\s+COLOR\b"),
        optional_phrases: ["COLOR"],
        buckets: BucketMask::DIAMONDISH.bits(),
        priority: 10,
        prod: |caps: &Captures| -> Option<DiamondGrade> {
            grade(caps.get(1)?, None)
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![
        rule_carat(),
        rule_color_label_with_purity(),
        rule_color_dash_purity(),
        rule_purity_dash_color(),
        rule_color_label(),
        rule_color_before_label(),
    ]
}
