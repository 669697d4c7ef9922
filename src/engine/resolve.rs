//! Node resolution.
//!
//! The sweep produces `Node`s: a span plus a `Token`. Resolution turns each
//! node into at most one attribute [`Assignment`] by:
//!
//! - choosing the attribute key (for measurements this depends on the
//!   product type, see `rules::measure::dispatch`)
//! - formatting the canonical value string
//! - applying the policy points carried by `Options`
//!
//! Nodes that resolve to nothing (a bare value on an `OTHER` product, a
//! purity code rejected by `PurityPolicy::Strict`, a consumed `LARGO 5MM`)
//! are simply dropped; nothing here can fail.

use crate::api::{Options, PairPolicy};
use crate::attribute::AttributeKey;
use crate::dictionary::{Label, resolve_purity};
use crate::product_type::ProductType;
use crate::rules::measure::dispatch::{CandidateShape, attribute_for};
use crate::rules::measure::helpers::format_measurement;
use crate::{DiamondGrade, MetalData, Node, Range, TokenKind};

/// Everything resolution needs besides the node itself.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolveContext<'a> {
    pub product_type: ProductType,
    pub options: &'a Options,
    /// The title carries an explicit `ANCHO` or `ALTO` label.
    pub has_width_or_height_label: bool,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(product_type: ProductType, options: &'a Options) -> Self {
        ResolveContext { product_type, options, has_width_or_height_label: false }
    }

    /// Derive title-wide facts from the swept nodes.
    pub(crate) fn with_nodes(&self, nodes: &[Node]) -> Self {
        let has_width_or_height_label = nodes.iter().any(|n| {
            matches!(&n.token.kind, TokenKind::Measurement(c) if matches!(c.label, Some(Label::Ancho | Label::Alto)))
        });
        ResolveContext { has_width_or_height_label, ..*self }
    }
}

/// One attribute write, in title order.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub key: AttributeKey,
    pub value: String,
    pub range: Range,
    pub rule: &'static str,
}

/// Resolve a node into an assignment.
///
/// ```text
/// Token ──┬─ Measurement -> dispatch table (product type, shape) -> key
///         ├─ Carat       -> kilates_diamante
///         ├─ Grade       -> color_diamante ("H" or "H-VS1")
///         ├─ Stone       -> tipo_de_piedra (accumulates)
///         ├─ Metal       -> material / color_del_oro
///         └─ Consumed    -> None
/// ```
pub(crate) fn resolve_node(context: &ResolveContext, node: &Node) -> Option<Assignment> {
    let (key, value) = resolve(context, &node.token.kind)?;

    tracing::debug!(
        rule = node.rule_name,
        start = node.range.start,
        end = node.range.end,
        key = %key,
        value = %value,
        "resolved"
    );

    Some(Assignment { key, value, range: node.range, rule: node.rule_name })
}

fn resolve(context: &ResolveContext, kind: &TokenKind) -> Option<(AttributeKey, String)> {
    match kind {
        TokenKind::Measurement(candidate) => {
            let shape = CandidateShape::of(candidate)?;
            if matches!(shape, CandidateShape::Paired { .. })
                && context.options.pair_policy == PairPolicy::LabelsWin
                && context.has_width_or_height_label
            {
                tracing::debug!("pair dropped: explicit ANCHO/ALTO label present");
                return None;
            }
            let Some(key) = attribute_for(context.product_type, shape) else {
                tracing::debug!(product_type = %context.product_type, ?shape, "unresolved measurement");
                return None;
            };
            Some((key, format_measurement(key, candidate)))
        }
        TokenKind::Carat(carat) => Some((AttributeKey::KilatesDiamante, carat.0.clone())),
        TokenKind::Grade(grade) => Some((AttributeKey::ColorDiamante, grade_value(grade, context.options))),
        TokenKind::Stone(stone) => Some((AttributeKey::TipoDePiedra, stone.0.clone())),
        TokenKind::Metal(MetalData::Gold { karats }) => Some((AttributeKey::Material, format!("Oro {karats} kilates"))),
        TokenKind::Metal(MetalData::GoldColor(color)) => Some((AttributeKey::ColorDelOro, color.to_string())),
        TokenKind::Consumed => None,
    }
}

/// `"<COLOR>-<PURITY>"`, or the bare color when purity is absent or rejected.
fn grade_value(grade: &DiamondGrade, options: &Options) -> String {
    match grade.purity.as_deref().and_then(|p| resolve_purity(p, options.purity_policy)) {
        Some(purity) => format!("{}-{}", grade.color, purity),
        None => grade.color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PurityPolicy;

    fn grade(purity: Option<&str>) -> DiamondGrade {
        DiamondGrade { color: 'H', purity: purity.map(str::to_string) }
    }

    #[test]
    fn grade_value_follows_purity_policy() {
        let mut options = Options::default();
        assert_eq!(grade_value(&grade(Some("VSI")), &options), "H-VSI");
        assert_eq!(grade_value(&grade(None), &options), "H");

        options.purity_policy = PurityPolicy::Canonical;
        assert_eq!(grade_value(&grade(Some("VSI")), &options), "H-VS1");

        options.purity_policy = PurityPolicy::Strict;
        assert_eq!(grade_value(&grade(Some("VSI")), &options), "H");
        assert_eq!(grade_value(&grade(Some("SI2")), &options), "H-SI2");
    }
}
