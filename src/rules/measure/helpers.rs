use crate::MeasurementCandidate;
use crate::attribute::AttributeKey;
use crate::dictionary::Unit;

/// Validate a written number and normalize its decimal comma (`2,5` -> `2.5`).
///
/// The digits are kept as written so precision survives (`0.10` stays `0.10`).
/// Returns `None` for text that does not parse as a number.
pub fn decimal(s: &str) -> Option<String> {
    let text = s.replace(',', ".");
    text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(text)
}

/// Parse an optional unit capture.
pub fn unit(s: Option<&str>) -> Option<Unit> {
    s.and_then(Unit::parse)
}

/// Render a candidate as the value of `key`.
///
/// Single values are `"{value}{unit}"`. Pairs are written `alto x ancho` in
/// the title; `medidas` reorders them ancho-first, while the SELLO keys keep
/// the written order. A pair without a written unit gets no suffix.
pub fn format_measurement(key: AttributeKey, candidate: &MeasurementCandidate) -> String {
    let suffix = candidate.unit.map(Unit::suffix).unwrap_or("");
    match &candidate.paired_with {
        Some(ancho) if key == AttributeKey::Medidas => format!("{}x{}{}", ancho, candidate.value, suffix),
        Some(ancho) => format!("{}x{}{}", candidate.value, ancho, suffix),
        None => format!("{}{}", candidate.value, suffix),
    }
}
