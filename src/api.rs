use crate::attribute::{AttributeKey, Attributes, Conflict, Metafield};
use crate::dictionary::{Dictionary, normalize};
use crate::engine::{self, CompiledRules, ResolveContext, RunResult};
use crate::error::Result;
use crate::product_type::{ProductType, TypeSource, classify};
use crate::{Dimension, Node, Rule, TokenKind};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::all);
static DEFAULT_COMPILED: Lazy<CompiledRules<'static>> = Lazy::new(|| CompiledRules::new(&DEFAULT_RULES));

/// How an unlabeled `N x M` pair relates to explicit `ANCHO`/`ALTO` labels
/// in the same title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairPolicy {
    /// Labels and pairs are extracted side by side.
    #[default]
    Independent,
    /// A title with an `ANCHO` or `ALTO` label emits no pair attribute.
    LabelsWin,
}

/// What to do with purity codes outside the standard vocabulary
/// (`VSI`, `VVS`, `SII`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurityPolicy {
    /// Keep the code as written: `H-VSI`.
    #[default]
    AsWritten,
    /// Map to the closest standard code: `H-VS1`.
    Canonical,
    /// Drop the purity and keep only the color: `H`.
    Strict,
}

/// Options that affect extraction behavior.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```
/// let options = tasador::Options::from_toml("purity_policy = \"canonical\"").unwrap();
/// assert_eq!(options.purity_policy, tasador::PurityPolicy::Canonical);
/// assert!(options.record_conflicts);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub pair_policy: PairPolicy,
    pub purity_policy: PurityPolicy,
    /// Stone names added to the built-in vocabulary (see [`Dictionary::from_options`]).
    pub extra_stones: Vec<String>,
    /// Keep replaced values in [`Extraction::conflicts`].
    pub record_conflicts: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            pair_policy: PairPolicy::default(),
            purity_policy: PurityPolicy::default(),
            extra_stones: Vec::new(),
            record_conflicts: true,
        }
    }
}

impl Options {
    /// Parse options from TOML text.
    pub fn from_toml(text: &str) -> Result<Options> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML options file.
    pub fn load(path: impl AsRef<Path>) -> Result<Options> {
        let text = std::fs::read_to_string(path)?;
        Options::from_toml(&text)
    }
}

/// One catalog product: its title and, optionally, a category supplied by
/// the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "title")]
    pub description: String,
    #[serde(default, alias = "category", alias = "product_type")]
    pub declared_category: Option<String>,
}

impl Product {
    pub fn new(description: impl Into<String>) -> Self {
        Product { description: description.into(), declared_category: None }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.declared_category = Some(category.into());
        self
    }
}

/// Result from [`extract`] and [`extract_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub product_type: ProductType,
    pub type_source: TypeSource,
    pub attributes: Attributes,
    /// Single-valued keys written more than once, in title order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<Conflict>,
}

impl Extraction {
    /// Attributes as catalog metafield records.
    pub fn to_metafields(&self) -> Vec<Metafield> {
        self.attributes.to_metafields()
    }
}

/// One node found in the title, with what it resolved to (if anything).
///
/// `start`/`end` are byte offsets into the normalized title.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSummary {
    pub dimension: &'static str,
    pub start: usize,
    pub end: usize,
    /// Slice of the normalized title that matched.
    pub body: String,
    pub rule: &'static str,
    pub preview: String,
    pub attribute: Option<AttributeKey>,
    pub value: Option<String>,
}

/// Timings and counts of one dimension's sweep.
#[derive(Debug, Clone, Serialize)]
pub struct PassSummary {
    pub dimension: &'static str,
    pub duration: Duration,
    pub rules_considered: usize,
    pub matches: usize,
    pub produced: usize,
}

/// Additional details returned by [`extract_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct ExtractDetails {
    /// The text every rule ran against.
    pub normalized: String,
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent sweeping rules + per-dimension trace.
    pub sweep_total: Duration,
    pub passes: Vec<PassSummary>,
    /// Time spent resolving nodes.
    pub resolve: Duration,
    /// Names of rules that were active for this title.
    pub active_rules: Vec<&'static str>,
    /// Every node in title order, including ones that resolved to nothing.
    pub candidates: Vec<CandidateSummary>,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionVerbose {
    pub text: String,
    pub extraction: Extraction,
    pub elapsed: Duration,
    pub details: ExtractDetails,
}

/// Extract attributes from a bare title using the built-in vocabulary and
/// default [`Options`].
///
/// # Example
/// ```
/// use tasador::{AttributeKey, ProductType, extract};
///
/// let out = extract("Sortija oro 22MM");
/// assert_eq!(out.product_type, ProductType::Sortija);
/// assert_eq!(out.attributes.text(AttributeKey::Ancho), Some("22mm"));
/// ```
pub fn extract(title: &str) -> Extraction {
    extract_with(&Product::new(title), Dictionary::shared(), &Options::default())
}

/// Extract attributes from `product` with the given dictionary and options.
pub fn extract_with(product: &Product, dictionary: &Dictionary, options: &Options) -> Extraction {
    let (product_type, type_source) = classify(&product.description, product.declared_category.as_deref());
    let normalized = normalize(&product.description);

    let parser = engine::Parser::new(&normalized, &DEFAULT_COMPILED, dictionary);
    let run = parser.run_with_metrics(&ResolveContext::new(product_type, options));

    tracing::debug!(
        product_type = %product_type,
        source = ?type_source,
        assignments = run.assignments.len(),
        elapsed = ?run.metrics.total,
        "extracted"
    );

    emit(product_type, type_source, &run, options)
}

/// Extract with extra debug details: normalized text, every candidate with
/// its span and rule, the active rules and per-stage timings.
///
/// The default [`extract_with`] path does not allocate these traces.
pub fn extract_verbose_with(product: &Product, dictionary: &Dictionary, options: &Options) -> ExtractionVerbose {
    let (product_type, type_source) = classify(&product.description, product.declared_category.as_deref());
    let normalized = normalize(&product.description);

    let parser = engine::Parser::new(&normalized, &DEFAULT_COMPILED, dictionary);
    let active_rules = parser.active_rule_names();
    let run = parser.run_with_metrics(&ResolveContext::new(product_type, options));

    let extraction = emit(product_type, type_source, &run, options);
    let candidates = run.nodes.iter().map(|node| node_to_summary(&normalized, node, &run)).collect();
    let passes = run
        .metrics
        .passes
        .iter()
        .map(|p| PassSummary {
            dimension: dimension_name(p.dim),
            duration: p.duration,
            rules_considered: p.rules_considered,
            matches: p.matches,
            produced: p.produced,
        })
        .collect();

    let details = ExtractDetails {
        normalized,
        total: run.metrics.total,
        sweep_total: run.metrics.sweep,
        passes,
        resolve: run.metrics.resolve,
        active_rules,
        candidates,
    };

    ExtractionVerbose { text: product.description.clone(), extraction, elapsed: run.metrics.total, details }
}

/// Extract every product in parallel. Output order matches input order.
pub fn extract_batch(products: &[Product], dictionary: &Dictionary, options: &Options) -> Vec<Extraction> {
    products.par_iter().map(|product| extract_with(product, dictionary, options)).collect()
}

/// Apply assignments in title order: multi-valued keys accumulate, a later
/// single value replaces an earlier one.
fn emit(product_type: ProductType, type_source: TypeSource, run: &RunResult, options: &Options) -> Extraction {
    let mut attributes = Attributes::new();
    let mut conflicts = Vec::new();

    for assignment in &run.assignments {
        if let Some(conflict) = attributes.assign(assignment.key, assignment.value.clone(), assignment.rule) {
            if options.record_conflicts {
                conflicts.push(conflict);
            }
        }
    }

    Extraction { product_type, type_source, attributes, conflicts }
}

fn dimension_name(dim: Dimension) -> &'static str {
    match dim {
        Dimension::Measurement => "measurement",
        Dimension::Diamond => "diamond",
        Dimension::Gemstone => "gemstone",
        Dimension::Metal => "metal",
    }
}

fn node_to_summary(input: &str, node: &Node, run: &RunResult) -> CandidateSummary {
    let start = node.range.start;
    let end = node.range.end;
    let resolved = run.assignments.iter().find(|a| a.range == node.range && a.rule == node.rule_name);

    CandidateSummary {
        dimension: dimension_name(node.token.dim),
        start,
        end,
        body: input.get(start..end).unwrap_or("").to_string(),
        rule: node.rule_name,
        preview: format_token_preview(&node.token.kind),
        attribute: resolved.map(|a| a.key),
        value: resolved.map(|a| a.value.clone()),
    }
}

fn format_token_preview(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Measurement(c) => match (&c.label, &c.paired_with) {
            (Some(label), _) => format!("{label:?} {}{:?}", c.value, c.unit),
            (None, Some(second)) => format!("pair {}x{} {:?}", c.value, second, c.unit),
            (None, None) => format!("bare {} {:?}", c.value, c.unit),
        },
        TokenKind::Carat(c) => format!("{} qts", c.0),
        TokenKind::Grade(g) => format!("color {} purity {:?}", g.color, g.purity),
        TokenKind::Stone(s) => s.0.clone(),
        TokenKind::Metal(m) => format!("{m:?}"),
        TokenKind::Consumed => "(consumed)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_with_returns_attributes() {
        let res = extract_with(&Product::new("SORTIJA 22MM"), Dictionary::shared(), &Options::default());

        assert_eq!(res.product_type, ProductType::Sortija);
        assert_eq!(res.type_source, TypeSource::Keyword);
        assert_eq!(res.attributes.text(AttributeKey::Ancho), Some("22mm"));
        assert!(res.conflicts.is_empty());
    }

    #[test]
    fn extract_verbose_includes_metrics_and_candidates() {
        let product = Product::new("Sortija largo 5mm");
        let res = extract_verbose_with(&product, Dictionary::shared(), &Options::default());

        assert_eq!(res.text, "Sortija largo 5mm");
        assert_eq!(res.details.normalized, "SORTIJA LARGO 5MM");
        assert_eq!(res.elapsed, res.details.total);
        assert!(res.details.sweep_total <= res.details.total);
        assert_eq!(res.details.passes.len(), 4);
        assert!(res.details.active_rules.contains(&"measurement (labeled)"));

        // The consumed LARGO span shows up as a candidate without an attribute.
        let candidate = &res.details.candidates[0];
        assert_eq!(candidate.body, "LARGO 5MM");
        assert_eq!(candidate.rule, "measurement (labeled)");
        assert_eq!(candidate.attribute, None);
        assert!(res.extraction.attributes.is_empty());
    }

    #[test]
    fn declared_category_overrides_title_keywords() {
        let product = Product::new("SORTIJA 3MM").with_category("pulsera");
        let res = extract_with(&product, Dictionary::shared(), &Options::default());
        assert_eq!(res.product_type, ProductType::Pulsera);
        assert_eq!(res.type_source, TypeSource::Declared);
        assert_eq!(res.attributes.text(AttributeKey::Grosor), Some("3mm"));
        assert!(!res.attributes.contains(AttributeKey::Ancho));
    }

    #[test]
    fn unrecognized_declared_category_falls_to_other() {
        let product = Product::new("SORTIJA 3MM").with_category("Relojes");
        let res = extract_with(&product, Dictionary::shared(), &Options::default());
        assert_eq!(res.product_type, ProductType::Other);
        assert!(res.attributes.is_empty());
    }

    #[test]
    fn conflicts_can_be_silenced() {
        let options = Options { record_conflicts: false, ..Options::default() };
        let res = extract_with(&Product::new("SORTIJA 2MM 3MM"), Dictionary::shared(), &options);
        assert_eq!(res.attributes.text(AttributeKey::Ancho), Some("3mm"));
        assert!(res.conflicts.is_empty());
    }

    #[test]
    fn extraction_is_deterministic_and_stateless() {
        let title = "18K SOLITARIO ORO AMARILLO DIAMANTE TALLA BRILLANTE 0.10 QTS. COLOR H VSI";
        let first = extract(title);
        // An unrelated title in between must not leak into the next run.
        let _ = extract("SELLO GRABADO 10X8MM RUBI");
        assert_eq!(extract(title), first);
    }

    #[test]
    fn emitted_values_do_not_reparse() {
        let res = extract("18K SORTIJA ORO AMARILLO DIAMANTE 0.10 QTS COLOR H VSI 22MM");
        assert_eq!(res.attributes.text(AttributeKey::Ancho), Some("22mm"));
        assert_eq!(res.attributes.text(AttributeKey::ColorDiamante), Some("H-VSI"));

        let texts: Vec<&str> = res.attributes.iter().filter_map(|(_, value)| value.as_text()).collect();
        assert_eq!(texts.len(), 5);
        for text in texts {
            assert!(extract(text).attributes.is_empty(), "{text}");
        }
    }

    #[test]
    fn pair_and_stone_values_reparse() {
        let first = extract("COLGANTE 20X15MM");
        let medidas = first.attributes.text(AttributeKey::Medidas).unwrap();
        assert_eq!(medidas, "15x20mm");
        assert_eq!(extract(medidas).attributes.text(AttributeKey::Medidas), Some("20x15mm"));

        assert!(extract("RUBI").attributes.contains(AttributeKey::TipoDePiedra));
    }

    #[test]
    fn batch_preserves_input_order() {
        let products: Vec<Product> = ["SORTIJA 22MM", "ESCLAVA 3MM", "AROS 50MM", "CADENA 45CM", "BROCHE"]
            .into_iter()
            .map(Product::new)
            .collect();
        let batch = extract_batch(&products, Dictionary::shared(), &Options::default());
        let sequential: Vec<Extraction> = products.iter().map(|p| extract(&p.description)).collect();
        assert_eq!(batch, sequential);
        assert_eq!(batch[2].attributes.text(AttributeKey::Diametro), Some("50mm"));
    }

    #[test]
    fn options_from_toml() {
        let options = Options::from_toml(
            r#"
            pair_policy = "labels_win"
            purity_policy = "strict"
            extra_stones = ["espinela"]
            record_conflicts = false
            "#,
        )
        .unwrap();
        assert_eq!(options.pair_policy, PairPolicy::LabelsWin);
        assert_eq!(options.purity_policy, PurityPolicy::Strict);
        assert_eq!(options.extra_stones, vec!["espinela"]);
        assert!(!options.record_conflicts);

        assert_eq!(Options::from_toml("").unwrap(), Options::default());
        assert!(matches!(Options::from_toml("pair_policy = \"sometimes\""), Err(crate::Error::Config(_))));
    }

    #[test]
    fn product_accepts_catalog_field_names() {
        let product: Product = serde_json::from_str(r#"{"title": "SORTIJA", "product_type": "ALIANZA"}"#).unwrap();
        assert_eq!(product, Product::new("SORTIJA").with_category("ALIANZA"));

        let product: Product = serde_json::from_str(r#"{"description": "CADENA 45CM"}"#).unwrap();
        assert_eq!(product.declared_category, None);
    }

    #[test]
    fn metafields_carry_types() {
        let res = extract("SOLITARIO BRILLANTE 0.10 QTS COLOR H VS1 ANCHO 2MM");
        let metafields = res.to_metafields();

        let carat = metafields.iter().find(|m| m.key == "kilates_diamante").unwrap();
        assert_eq!(carat.namespace, "custom");
        assert_eq!(carat.value, "0.10");
        assert_eq!(carat.kind, "number_decimal");

        let width = metafields.iter().find(|m| m.key == "ancho").unwrap();
        assert_eq!(width.value, "2mm");
        assert_eq!(width.kind, "single_line_text_field");
    }
}
