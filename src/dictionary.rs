//! Unit and keyword dictionary.
//!
//! Static lookup tables shared by every parse: measurement labels, units,
//! diamond purity codes, the gemstone vocabulary and title normalization.
//!
//! Everything here is read-only. The only runtime-built piece is the optional
//! extra-stone matcher compiled from [`Options::extra_stones`]; a
//! [`Dictionary`] is built once and passed by reference into each parse.
//!
//! [`Options::extra_stones`]: crate::Options::extra_stones

use crate::api::{Options, PurityPolicy};
use crate::attribute::AttributeKey;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT_DICTIONARY: Lazy<Dictionary> = Lazy::new(Dictionary::default);

/// Uppercase `text` and fold Spanish accents (`Á`→`A`, `Ü`→`U`; `Ñ` is kept).
///
/// Decomposed input is folded the same way: combining marks (U+0300..U+036F)
/// are dropped, except a tilde after `N`, which composes to `Ñ`.
/// The multiplication sign `×` is rewritten to `X` so `20×15` reads as a pair.
/// Every rule runs against this form, so spans refer to the normalized text.
///
/// ```
/// assert_eq!(tasador::normalize("Diámetro 2,5 mm"), "DIAMETRO 2,5 MM");
/// assert_eq!(tasador::normalize("Rubi\u{301}"), "RUBI");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_uppercase) {
        match c {
            '\u{303}' if out.ends_with('N') => {
                out.pop();
                out.push('Ñ');
            }
            '\u{300}'..='\u{36F}' => {}
            'Á' | 'À' | 'Â' | 'Ä' => out.push('A'),
            'É' | 'È' | 'Ê' | 'Ë' => out.push('E'),
            'Í' | 'Ì' | 'Î' | 'Ï' => out.push('I'),
            'Ó' | 'Ò' | 'Ô' | 'Ö' => out.push('O'),
            'Ú' | 'Ù' | 'Û' | 'Ü' => out.push('U'),
            '×' => out.push('X'),
            other => out.push(other),
        }
    }
    out
}

/// Explicit measurement label. `LONGITUD` is read as [`Label::Largo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Label {
    Ancho,
    Alto,
    Largo,
    Grosor,
    Diametro,
}

impl Label {
    pub(crate) fn parse(word: &str) -> Option<Label> {
        match word {
            "ANCHO" => Some(Label::Ancho),
            "ALTO" => Some(Label::Alto),
            "LARGO" | "LONGITUD" => Some(Label::Largo),
            "GROSOR" => Some(Label::Grosor),
            "DIAMETRO" => Some(Label::Diametro),
            _ => None,
        }
    }

    pub(crate) fn attribute(self) -> AttributeKey {
        match self {
            Label::Ancho => AttributeKey::Ancho,
            Label::Alto => AttributeKey::Alto,
            Label::Largo => AttributeKey::Largo,
            Label::Grosor => AttributeKey::Grosor,
            Label::Diametro => AttributeKey::Diametro,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Unit {
    Mm,
    Cm,
}

impl Unit {
    pub(crate) fn parse(word: &str) -> Option<Unit> {
        match word {
            "MM" => Some(Unit::Mm),
            "CM" => Some(Unit::Cm),
            _ => None,
        }
    }

    /// Suffix used in emitted values (`"22mm"`).
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
        }
    }
}

/// Diamond color letters accepted for `color_diamante`.
pub(crate) const DIAMOND_COLORS: &[char] = &['G', 'H', 'I'];

/// Standard clarity grades.
pub(crate) const PURITY_CODES: &[&str] = &["FL", "IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1", "I2", "I3"];

/// Written purity forms outside the standard vocabulary and the code each is
/// closest to (roman `I` read as `1`; bare families read as their higher grade).
pub(crate) const PURITY_ALIASES: &[(&str, &str)] =
    &[("VVSI", "VVS1"), ("VSI", "VS1"), ("SII", "SI2"), ("VVS", "VVS1"), ("VS", "VS1"), ("SI", "SI1")];

/// Resolve a written purity token under `policy`.
///
/// Standard codes are returned unchanged. Aliases are kept as written,
/// mapped to their canonical code, or rejected, depending on the policy.
pub(crate) fn resolve_purity(written: &str, policy: PurityPolicy) -> Option<String> {
    if PURITY_CODES.contains(&written) {
        return Some(written.to_string());
    }
    let canonical = PURITY_ALIASES.iter().find(|(alias, _)| *alias == written).map(|(_, code)| *code)?;
    match policy {
        PurityPolicy::AsWritten => Some(written.to_string()),
        PurityPolicy::Canonical => Some(canonical.to_string()),
        PurityPolicy::Strict => None,
    }
}

/// Built-in gemstone vocabulary (canonical singular names, accent-folded).
///
/// Must stay in sync with the alternation in [`builtin_stone_regex`].
pub(crate) const STONES: &[&str] = &[
    "RUBI",
    "ZAFIRO",
    "ESMERALDA",
    "AMATISTA",
    "TOPACIO",
    "AGUAMARINA",
    "CITRINO",
    "GRANATE",
    "PERIDOTO",
    "TURMALINA",
    "TANZANITA",
    "OPALO",
    "PERLA",
    "ONIX",
    "CORAL",
    "TURQUESA",
    "JADE",
    "AMBAR",
    "CUARZO",
    "CIRCONITA",
    "MORGANITA",
    "AZABACHE",
    "LAPISLAZULI",
    "MALAQUITA",
];

fn builtin_stone_regex() -> &'static Regex {
    regex!(
        r"\b(RUBI|ZAFIRO|ESMERALDA|AMATISTA|TOPACIO|AGUAMARINA|CITRINO|GRANATE|PERIDOTO|TURMALINA|TANZANITA|OPALO|PERLA|ONIX|CORAL|TURQUESA|JADE|AMBAR|CUARZO|CIRCONITA|MORGANITA|AZABACHE|LAPISLAZULI|MALAQUITA)(?:ES|S)?\b"
    )
}

/// Read-only vocabulary tables used by a parse.
///
/// The built-in tables are static; configuration can only append stone names.
/// Build one per process (or use [`Dictionary::shared`]) and pass it by
/// reference to every call.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    extra_stones: Vec<String>,
    extra_stone_regex: Option<Regex>,
}

impl Dictionary {
    /// The process-wide dictionary with the built-in vocabulary only.
    pub fn shared() -> &'static Dictionary {
        &DEFAULT_DICTIONARY
    }

    /// Build a dictionary with the extra stones listed in `options`.
    pub fn from_options(options: &Options) -> Result<Dictionary> {
        Dictionary::with_extra_stones(&options.extra_stones)
    }

    /// Build a dictionary whose stone vocabulary is the built-in list plus
    /// `names`. Names are normalized; duplicates of built-in stones are ignored.
    ///
    /// A name may hold several words (`"Ojo de tigre"`); they match across any
    /// run of whitespace in the title.
    pub fn with_extra_stones<S: AsRef<str>>(names: &[S]) -> Result<Dictionary> {
        let mut extra_stones: Vec<String> = Vec::new();
        for name in names {
            let normalized = normalize(name.as_ref());
            let words: Vec<&str> = normalized.split_whitespace().collect();
            if words.is_empty() || !words.iter().all(|w| w.chars().all(char::is_alphabetic)) {
                return Err(Error::InvalidStone(name.as_ref().to_string()));
            }
            let stone = words.join(" ");
            if STONES.contains(&stone.as_str()) || extra_stones.contains(&stone) {
                continue;
            }
            extra_stones.push(stone);
        }

        if extra_stones.is_empty() {
            return Ok(Dictionary::default());
        }

        let alternation = extra_stones
            .iter()
            .map(|s| s.split(' ').map(regex::escape).collect::<Vec<_>>().join(r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        let extra_stone_regex = Regex::new(&format!(r"\b({alternation})(?:ES|S)?\b"))?;
        tracing::debug!(count = extra_stones.len(), "compiled extra stone vocabulary");

        Ok(Dictionary { extra_stones, extra_stone_regex: Some(extra_stone_regex) })
    }

    /// Every stone name this dictionary recognizes, built-ins first.
    pub fn stones(&self) -> impl Iterator<Item = &str> {
        STONES.iter().copied().chain(self.extra_stones.iter().map(String::as_str))
    }

    /// Find stone mentions in a normalized title as `(start, end, canonical)`,
    /// ordered by position.
    pub(crate) fn find_stones<'t>(&'t self, text: &'t str) -> Vec<(usize, usize, &'t str)> {
        let builtin = builtin_stone_regex().captures_iter(text);
        let extra = self.extra_stone_regex.iter().flat_map(|re| re.captures_iter(text));

        let mut found: Vec<(usize, usize, &str)> = builtin
            .chain(extra)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let stem = caps.get(1)?.as_str();
                // Multi-word hits report the configured spelling, not the title's spacing.
                let canonical = self
                    .extra_stones
                    .iter()
                    .find(|s| s.split(' ').eq(stem.split_whitespace()))
                    .map_or(stem, String::as_str);
                Some((whole.start(), whole.end(), canonical))
            })
            .collect();
        found.sort_by_key(|&(start, end, _)| (start, end));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_accents_and_case() {
        assert_eq!(normalize("Rubí y Ópalo, diámetro"), "RUBI Y OPALO, DIAMETRO");
        assert_eq!(normalize("cigüeña"), "CIGUEÑA");
        assert_eq!(normalize("20×15mm"), "20X15MM");
    }

    #[test]
    fn normalize_folds_decomposed_accents() {
        assert_eq!(normalize("Rubi\u{301}"), "RUBI");
        assert_eq!(normalize("dia\u{301}metro"), "DIAMETRO");
        assert_eq!(normalize("cigu\u{308}en\u{303}a"), "CIGUEÑA");
        assert_eq!(normalize("N\u{303}"), "Ñ");
    }

    #[test]
    fn every_builtin_stone_is_matched_by_the_builtin_regex() {
        let dict = Dictionary::default();
        for stone in STONES {
            let found = dict.find_stones(stone);
            assert_eq!(found, vec![(0, stone.len(), *stone)], "stone {stone}");
        }
    }

    #[test]
    fn plural_stones_resolve_to_singular() {
        let dict = Dictionary::default();
        let text = "RUBIES, PERLAS Y CORALES";
        let names: Vec<&str> = dict.find_stones(text).into_iter().map(|(_, _, s)| s).collect();
        assert_eq!(names, vec!["RUBI", "PERLA", "CORAL"]);
    }

    #[test]
    fn stones_do_not_match_inside_words() {
        let dict = Dictionary::default();
        assert!(dict.find_stones("CORALINO JADEITA").is_empty());
    }

    #[test]
    fn extra_stones_are_normalized_and_matched() {
        let dict = Dictionary::with_extra_stones(&["Espinela", "rubí"]).unwrap();
        assert_eq!(dict.stones().filter(|s| *s == "ESPINELA").count(), 1);
        assert_eq!(dict.stones().filter(|s| *s == "RUBI").count(), 1);

        let names: Vec<&str> = dict.find_stones("ESPINELAS Y RUBI").into_iter().map(|(_, _, s)| s).collect();
        assert_eq!(names, vec!["ESPINELA", "RUBI"]);
    }

    #[test]
    fn extra_stones_reject_non_alphabetic_names() {
        assert!(matches!(Dictionary::with_extra_stones(&["ZAF(IRO"]), Err(Error::InvalidStone(_))));
        assert!(matches!(Dictionary::with_extra_stones(&["  "]), Err(Error::InvalidStone(_))));
        assert!(matches!(Dictionary::with_extra_stones(&["OJO DE 2"]), Err(Error::InvalidStone(_))));
    }

    #[test]
    fn extra_stones_may_span_several_words() {
        let dict = Dictionary::with_extra_stones(&["Ojo  de tigre"]).unwrap();
        assert_eq!(dict.stones().filter(|s| *s == "OJO DE TIGRE").count(), 1);

        let found = dict.find_stones("COLGANTE OJO  DE TIGRE");
        assert_eq!(found, vec![(9, 22, "OJO DE TIGRE")]);
        assert!(dict.find_stones("COLGANTE OJO ROJO").is_empty());
    }

    #[test]
    fn purity_policy_controls_aliases() {
        assert_eq!(resolve_purity("VS1", PurityPolicy::Strict).as_deref(), Some("VS1"));
        assert_eq!(resolve_purity("VSI", PurityPolicy::AsWritten).as_deref(), Some("VSI"));
        assert_eq!(resolve_purity("VSI", PurityPolicy::Canonical).as_deref(), Some("VS1"));
        assert_eq!(resolve_purity("SII", PurityPolicy::Canonical).as_deref(), Some("SI2"));
        assert_eq!(resolve_purity("VSI", PurityPolicy::Strict), None);
        assert_eq!(resolve_purity("XYZ", PurityPolicy::AsWritten), None);
    }

    #[test]
    fn labels_and_units() {
        assert_eq!(Label::parse("LONGITUD"), Some(Label::Largo));
        assert_eq!(Label::parse("MEDIDA"), None);
        assert_eq!(Label::Diametro.attribute(), AttributeKey::Diametro);
        assert_eq!(Unit::parse("CM").map(Unit::suffix), Some("cm"));
    }
}
