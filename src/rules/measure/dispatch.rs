//! Category dispatch for measurement candidates.
//!
//! The same number means different things on different products: `3MM` on
//! a bracelet is its thickness, on a ring its width. All of that lives in
//! [`attribute_for`], a pure table from `(ProductType, CandidateShape)` to the
//! attribute key. Explicit labels bypass the product type entirely.

use crate::MeasurementCandidate;
use crate::attribute::AttributeKey;
use crate::dictionary::{Label, Unit};
use crate::product_type::ProductType;

/// What the matcher saw, as far as dispatch is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CandidateShape {
    Labeled(Label),
    Paired { engraved: bool },
    Single(Unit),
}

impl CandidateShape {
    pub(crate) fn of(candidate: &MeasurementCandidate) -> Option<CandidateShape> {
        if let Some(label) = candidate.label {
            return Some(CandidateShape::Labeled(label));
        }
        if candidate.is_paired() {
            return Some(CandidateShape::Paired { engraved: candidate.engraved });
        }
        candidate.unit.map(CandidateShape::Single)
    }
}

pub(crate) fn attribute_for(product_type: ProductType, shape: CandidateShape) -> Option<AttributeKey> {
    use AttributeKey as K;
    use ProductType as P;

    match (shape, product_type) {
        (CandidateShape::Labeled(label), _) => Some(label.attribute()),

        (CandidateShape::Paired { engraved: true }, P::Sello) => Some(K::MedidasZonaGrabado),
        (CandidateShape::Paired { engraved: false }, P::Sello) => Some(K::MedidasChaton),
        (CandidateShape::Paired { .. }, _) => Some(K::Medidas),

        (CandidateShape::Single(Unit::Mm), P::Alianza | P::Solitario | P::Sortija) => Some(K::Ancho),
        (CandidateShape::Single(Unit::Mm), P::Esclava | P::Pulsera) => Some(K::Grosor),
        (CandidateShape::Single(Unit::Mm), P::Aros) => Some(K::Diametro),
        (CandidateShape::Single(Unit::Mm), P::Cadena | P::Collar) => Some(K::Ancho),
        (CandidateShape::Single(Unit::Mm), P::Colgante) => Some(K::Diametro),
        (CandidateShape::Single(Unit::Cm), P::Cadena | P::Collar) => Some(K::Largo),

        (CandidateShape::Single(_), _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mm_table() {
        let cases = [
            (ProductType::Alianza, Some(AttributeKey::Ancho)),
            (ProductType::Solitario, Some(AttributeKey::Ancho)),
            (ProductType::Sortija, Some(AttributeKey::Ancho)),
            (ProductType::Esclava, Some(AttributeKey::Grosor)),
            (ProductType::Pulsera, Some(AttributeKey::Grosor)),
            (ProductType::Aros, Some(AttributeKey::Diametro)),
            (ProductType::Cadena, Some(AttributeKey::Ancho)),
            (ProductType::Collar, Some(AttributeKey::Ancho)),
            (ProductType::Colgante, Some(AttributeKey::Diametro)),
            (ProductType::Sello, None),
            (ProductType::Other, None),
        ];
        for (product_type, expected) in cases {
            assert_eq!(attribute_for(product_type, CandidateShape::Single(Unit::Mm)), expected, "{product_type}");
        }
    }

    #[test]
    fn single_cm_only_for_chains_and_necklaces() {
        assert_eq!(attribute_for(ProductType::Cadena, CandidateShape::Single(Unit::Cm)), Some(AttributeKey::Largo));
        assert_eq!(attribute_for(ProductType::Collar, CandidateShape::Single(Unit::Cm)), Some(AttributeKey::Largo));
        assert_eq!(attribute_for(ProductType::Pulsera, CandidateShape::Single(Unit::Cm)), None);
        assert_eq!(attribute_for(ProductType::Other, CandidateShape::Single(Unit::Cm)), None);
    }

    #[test]
    fn labels_ignore_product_type() {
        for product_type in [ProductType::Other, ProductType::Esclava, ProductType::Sello] {
            let shape = CandidateShape::Labeled(Label::Ancho);
            assert_eq!(attribute_for(product_type, shape), Some(AttributeKey::Ancho));
        }
    }

    #[test]
    fn pairs_depend_on_sello_and_engraving() {
        let plain = CandidateShape::Paired { engraved: false };
        let engraved = CandidateShape::Paired { engraved: true };
        assert_eq!(attribute_for(ProductType::Sello, plain), Some(AttributeKey::MedidasChaton));
        assert_eq!(attribute_for(ProductType::Sello, engraved), Some(AttributeKey::MedidasZonaGrabado));
        assert_eq!(attribute_for(ProductType::Sortija, engraved), Some(AttributeKey::Medidas));
        assert_eq!(attribute_for(ProductType::Other, plain), Some(AttributeKey::Medidas));
    }
}
