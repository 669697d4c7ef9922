//! Attribute keys, values and the emitter that merges them.
//!
//! Every pass produces `(key, value)` assignments; [`Attributes`] folds them
//! into one set per product. Single-valued keys follow last-matched-wins and
//! record a [`Conflict`] when an earlier value is replaced. The gemstone key
//! is multi-valued: stones accumulate, first occurrence first, without
//! duplicates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metafield namespace used for every projected attribute.
pub const METAFIELD_NAMESPACE: &str = "custom";

/// Closed set of attribute names the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    Ancho,
    Alto,
    Largo,
    Grosor,
    Diametro,
    Medidas,
    MedidasZonaGrabado,
    MedidasChaton,
    KilatesDiamante,
    ColorDiamante,
    TipoDePiedra,
    Material,
    ColorDelOro,
}

impl AttributeKey {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKey::Ancho => "ancho",
            AttributeKey::Alto => "alto",
            AttributeKey::Largo => "largo",
            AttributeKey::Grosor => "grosor",
            AttributeKey::Diametro => "diametro",
            AttributeKey::Medidas => "medidas",
            AttributeKey::MedidasZonaGrabado => "medidas_zona_grabado",
            AttributeKey::MedidasChaton => "medidas_chaton",
            AttributeKey::KilatesDiamante => "kilates_diamante",
            AttributeKey::ColorDiamante => "color_diamante",
            AttributeKey::TipoDePiedra => "tipo_de_piedra",
            AttributeKey::Material => "material",
            AttributeKey::ColorDelOro => "color_del_oro",
        }
    }

    /// Keys whose values accumulate instead of replacing each other.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, AttributeKey::TipoDePiedra)
    }

    /// Catalog metafield type for this key.
    pub fn metafield_type(self) -> &'static str {
        match self {
            AttributeKey::KilatesDiamante => "number_decimal",
            AttributeKey::TipoDePiedra => "list.single_line_text_field",
            _ => "single_line_text_field",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single string, or an ordered list for multi-valued keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::Text(_) => None,
            AttributeValue::List(items) => Some(items),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Two assignments that wrote the same single-valued key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub key: AttributeKey,
    /// Value written first (left), discarded.
    pub replaced: String,
    /// Value written last (right), kept.
    pub kept: String,
    /// Rule that produced the kept value.
    pub rule: String,
}

/// Attribute set of one product, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    values: BTreeMap<AttributeKey, AttributeValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.values.get(&key)
    }

    /// Text value of a single-valued key.
    pub fn text(&self, key: AttributeKey) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_text)
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Record one assignment. Assignments must arrive in title order.
    ///
    /// Returns the conflict when a different earlier value of a single-valued
    /// key is replaced. Re-assigning the same value is not a conflict.
    pub(crate) fn assign(&mut self, key: AttributeKey, value: String, rule: &str) -> Option<Conflict> {
        if key.is_multi_valued() {
            match self.values.entry(key).or_insert_with(|| AttributeValue::List(Vec::new())) {
                AttributeValue::List(items) => {
                    if !items.contains(&value) {
                        items.push(value);
                    }
                }
                slot @ AttributeValue::Text(_) => *slot = AttributeValue::List(vec![value]),
            }
            return None;
        }

        let previous = self.values.insert(key, AttributeValue::Text(value.clone()))?;
        let replaced = previous.to_string();
        if replaced == value {
            return None;
        }

        tracing::warn!(key = %key, replaced = %replaced, kept = %value, rule, "conflicting attribute assignment");
        Some(Conflict { key, replaced, kept: value, rule: rule.to_string() })
    }

    /// Project onto catalog metafield records.
    pub fn to_metafields(&self) -> Vec<Metafield> {
        self.iter()
            .map(|(key, value)| {
                let value = match value {
                    AttributeValue::Text(s) => s.clone(),
                    AttributeValue::List(items) => serde_json::Value::from(items.clone()).to_string(),
                };
                Metafield {
                    namespace: METAFIELD_NAMESPACE.to_string(),
                    key: key.as_str().to_string(),
                    value,
                    kind: key.metafield_type().to_string(),
                }
            })
            .collect()
    }
}

/// A catalog metafield record (`namespace.key = value` with a declared type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    pub namespace: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}
