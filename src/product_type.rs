//! Product-type classification.
//!
//! A declared category always wins. Without one, the title's words are
//! checked against keyword sets in a fixed priority order (most specific
//! product words first) and the first hit decides.

use crate::dictionary::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Alianza,
    Solitario,
    Sortija,
    Sello,
    Esclava,
    Pulsera,
    Aros,
    Cadena,
    Collar,
    Colgante,
    Other,
}

/// Where the product type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSource {
    /// Externally supplied category (recognized or not).
    Declared,
    /// Keyword found in the title.
    Keyword,
    /// Nothing matched.
    Unknown,
}

/// Keyword sets, checked top to bottom. Words match singular or plural.
const KEYWORDS: &[(ProductType, &[&str])] = &[
    (ProductType::Sello, &["SELLO"]),
    (ProductType::Alianza, &["ALIANZA"]),
    (ProductType::Solitario, &["SOLITARIO"]),
    (ProductType::Sortija, &["SORTIJA", "ANILLO"]),
    (ProductType::Esclava, &["ESCLAVA"]),
    (ProductType::Pulsera, &["PULSERA"]),
    (ProductType::Aros, &["AROS", "ARO", "PENDIENTE", "ARETE"]),
    (ProductType::Colgante, &["COLGANTE"]),
    (ProductType::Collar, &["COLLAR", "GARGANTILLA"]),
    (ProductType::Cadena, &["CADENA"]),
];

impl ProductType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Alianza => "ALIANZA",
            ProductType::Solitario => "SOLITARIO",
            ProductType::Sortija => "SORTIJA",
            ProductType::Sello => "SELLO",
            ProductType::Esclava => "ESCLAVA",
            ProductType::Pulsera => "PULSERA",
            ProductType::Aros => "AROS",
            ProductType::Cadena => "CADENA",
            ProductType::Collar => "COLLAR",
            ProductType::Colgante => "COLGANTE",
            ProductType::Other => "OTHER",
        }
    }

    /// Interpret an externally declared category.
    ///
    /// Unrecognized categories map to [`ProductType::Other`].
    pub fn from_declared(category: &str) -> ProductType {
        category.parse().unwrap_or_else(|_| {
            tracing::debug!(category, "unrecognized declared category");
            ProductType::Other
        })
    }

    fn from_keyword(word: &str) -> Option<ProductType> {
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|kw| word_matches(word, kw)))
            .map(|(product_type, _)| *product_type)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProductType(pub String);

impl fmt::Display for UnknownProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown product type '{}'", self.0)
    }
}

impl std::error::Error for UnknownProductType {}

impl FromStr for ProductType {
    type Err = UnknownProductType;

    /// Accepts the canonical names plus plural forms and catalog synonyms
    /// (`Anillos`, `Pendientes`, `Gargantilla`), case- and accent-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = normalize(s.trim());
        if word == "OTHER" {
            return Ok(ProductType::Other);
        }
        ProductType::from_keyword(&word).ok_or_else(|| UnknownProductType(s.to_string()))
    }
}

/// `word` is `keyword`, or its plural with `S`/`ES`.
fn word_matches(word: &str, keyword: &str) -> bool {
    match word.strip_prefix(keyword) {
        Some("") | Some("S") | Some("ES") => true,
        _ => false,
    }
}

/// Classify a product from its declared category or, failing that, its title.
///
/// ```
/// use tasador::{ProductType, TypeSource, classify};
///
/// assert_eq!(classify("Sello oro 18k", None), (ProductType::Sello, TypeSource::Keyword));
/// assert_eq!(classify("Sello oro 18k", Some("Cadenas")), (ProductType::Cadena, TypeSource::Declared));
/// ```
pub fn classify(title: &str, declared: Option<&str>) -> (ProductType, TypeSource) {
    if let Some(category) = declared.map(str::trim).filter(|c| !c.is_empty()) {
        return (ProductType::from_declared(category), TypeSource::Declared);
    }

    let normalized = normalize(title);
    let words: Vec<&str> = normalized.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();

    for (product_type, keywords) in KEYWORDS {
        if words.iter().any(|w| keywords.iter().any(|kw| word_matches(w, kw))) {
            return (*product_type, TypeSource::Keyword);
        }
    }

    (ProductType::Other, TypeSource::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_priority_prefers_specific_words() {
        assert_eq!(classify("SELLO CABALLERO ANILLO ORO", None).0, ProductType::Sello);
        assert_eq!(classify("COLGANTE CON CADENA 45CM", None).0, ProductType::Colgante);
        assert_eq!(classify("18K SOLITARIO ORO AMARILLO DIAMANTE", None).0, ProductType::Solitario);
        assert_eq!(classify("ANILLO RUBI Y ZAFIRO", None).0, ProductType::Sortija);
    }

    #[test]
    fn plural_and_accented_keywords() {
        assert_eq!(classify("Pendientes perla", None).0, ProductType::Aros);
        assert_eq!(classify("ALIANZAS BODA", None).0, ProductType::Alianza);
        assert_eq!(classify("Collares", None).0, ProductType::Collar);
    }

    #[test]
    fn keywords_are_whole_words() {
        // ARO must not fire inside AROMA, CADENA inside CADENAZO
        assert_eq!(classify("AROMA CADENAZO", None), (ProductType::Other, TypeSource::Unknown));
    }

    #[test]
    fn declared_category_takes_precedence() {
        assert_eq!(classify("SORTIJA 22MM", Some("esclava")), (ProductType::Esclava, TypeSource::Declared));
        assert_eq!(classify("SORTIJA 22MM", Some("Relojes")), (ProductType::Other, TypeSource::Declared));
        assert_eq!(classify("SORTIJA 22MM", Some("  ")), (ProductType::Sortija, TypeSource::Keyword));
    }

    #[test]
    fn from_str_accepts_synonyms() {
        assert_eq!("Anillos".parse::<ProductType>(), Ok(ProductType::Sortija));
        assert_eq!("gargantilla".parse::<ProductType>(), Ok(ProductType::Collar));
        assert_eq!("other".parse::<ProductType>(), Ok(ProductType::Other));
        assert!("reloj".parse::<ProductType>().is_err());
    }
}
