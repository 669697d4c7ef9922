use crate::DiamondGrade;
use crate::dictionary::DIAMOND_COLORS;

/// Accept a single color letter from the diamond color vocabulary.
pub fn color_letter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() || !DIAMOND_COLORS.contains(&c) {
        return None;
    }
    Some(c)
}

/// Grade from captured color and (optional) purity text.
///
/// The purity is kept as written here; `PurityPolicy` is applied at resolve
/// time so one rule set serves every policy.
pub fn grade(color: &str, purity: Option<&str>) -> Option<DiamondGrade> {
    Some(DiamondGrade { color: color_letter(color)?, purity: purity.map(str::to_string) })
}
