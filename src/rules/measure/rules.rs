use crate::dictionary::{Label, Unit};
use crate::engine::BucketMask;
use crate::rules::measure::helpers::{decimal, unit};
use crate::{Captures, Dimension, MeasurementCandidate, Rule, Token};

// Precedence between overlapping forms is the priority order below:
// labeled (30) claims its span before paired (20), paired before bare (10).

/// `ANCHO: 22MM`, `LONGITUD 45 CM`, `DIAMETRO 2,5MM`.
///
/// `LARGO`/`LONGITUD` in millimetres is not a length the catalog publishes;
/// the match still consumes its span so the number is not re-read as bare.
///
/// A trailing `X 15MM` (`ALTO 20MM X 15MM`) belongs to the label and is
/// swallowed with it; only the labeled value is kept.
fn rule_labeled() -> Rule {
    rule! {
        name: "measurement (labeled)",
        dim: Dimension::Measurement,
        pattern: re!(r"\b(ANCHO|ALTO|LARGO|LONGITUD|GROSOR|DIAMETRO)\s*:?\s*(\d+(?:[.,]\d+)?)\s*(MM|CM)\b(?:\s*X\s*\d+(?:[.,]\d+)?\s*(?:MM|CM)?\b)?"),
        optional_phrases: ["ANCHO", "ALTO", "LARGO", "LONGITUD", "GROSOR", "DIAMETRO"],
        buckets: (BucketMask::HAS_DIGITS | BucketMask::HAS_UNIT).bits(),
        priority: 30,
        prod: |caps: &Captures| -> Option<Token> {
            let label = Label::parse(caps.get(1)?)?;
            let unit = Unit::parse(caps.get(3)?)?;
            if label == Label::Largo && unit == Unit::Mm {
                return Some(Token::consumed(Dimension::Measurement));
            }
            let value = decimal(caps.get(2)?)?;

            MeasurementCandidate { label: Some(label), value, unit: Some(unit), paired_with: None, engraved: false }
                .into_token()
        },
    }
}

/// `20X15MM`, `20 x 15`, `20MM X 15MM`, optionally after `GRABADO`.
///
/// The first number is alto and the second ancho, whatever the surrounding
/// text says. Two different written units make the pair unreadable, and so
/// does a trailing `QTS` (`2X0.10 QTS` counts stones, it measures nothing).
fn rule_paired() -> Rule {
    rule! {
        name: "measurement (paired)",
        dim: Dimension::Measurement,
        pattern: re!(r"(?P<lead>^|[^0-9.,])(?:\b(GRABADO)\s*:?\s*)?(\d+(?:[.,]\d+)?)\s*(MM|CM)?\s*X\s*(\d+(?:[.,]\d+)?)\s*(MM|CM)?(\s*QTS?)?\b"),
        buckets: (BucketMask::HAS_DIGITS | BucketMask::HAS_PAIR).bits(),
        priority: 20,
        prod: |caps: &Captures| -> Option<Token> {
            let first_unit = unit(caps.get(3));
            let second_unit = unit(caps.get(5));
            if caps.get(6).is_some() || matches!((first_unit, second_unit), (Some(a), Some(b)) if a != b) {
                return Some(Token::consumed(Dimension::Measurement));
            }
            let alto = decimal(caps.get(2)?)?;
            let ancho = decimal(caps.get(4)?)?;

            MeasurementCandidate {
                label: None,
                value: alto,
                unit: second_unit.or(first_unit),
                paired_with: Some(ancho),
                engraved: caps.get(1).is_some(),
            }
            .into_token()
        },
    }
}

/// `22MM`, `45 CM` with no label in front.
fn rule_bare() -> Rule {
    rule! {
        name: "measurement (bare)",
        dim: Dimension::Measurement,
        pattern: re!(r"(?P<lead>^|[^0-9.,])(\d+(?:[.,]\d+)?)\s*(MM|CM)\b"),
        buckets: (BucketMask::HAS_DIGITS | BucketMask::HAS_UNIT).bits(),
        priority: 10,
        prod: |caps: &Captures| -> Option<MeasurementCandidate> {
            let value = decimal(caps.get(1)?)?;
            let unit = unit(caps.get(2))?;
            Some(MeasurementCandidate { label: None, value, unit: Some(unit), paired_with: None, engraved: false })
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_labeled(), rule_paired(), rule_bare()]
}
