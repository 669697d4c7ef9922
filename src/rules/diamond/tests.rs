use crate::{AttributeKey, Dictionary, Options, Product, PurityPolicy, extract, extract_with};

fn diamond(title: &str) -> (Option<String>, Option<String>) {
    let attributes = extract(title).attributes;
    (
        attributes.text(AttributeKey::KilatesDiamante).map(str::to_string),
        attributes.text(AttributeKey::ColorDiamante).map(str::to_string),
    )
}

#[test]
fn solitaire_scenario() {
    let extraction = extract("18K SOLITARIO ORO AMARILLO DIAMANTE TALLA BRILLANTE 0.10 QTS. COLOR H VSI");
    let attributes = &extraction.attributes;
    assert_eq!(attributes.text(AttributeKey::KilatesDiamante), Some("0.10"));
    assert_eq!(attributes.text(AttributeKey::ColorDiamante), Some("H-VSI"));
    assert!(!attributes.contains(AttributeKey::Ancho));
    assert!(extraction.conflicts.is_empty());
}

#[test]
fn grade_forms() {
    // (input, expected color_diamante)
    let cases: Vec<(&str, &str)> = vec![
        ("SORTIJA BRILLANTES COLOR H VSI", "H-VSI"),
        ("SORTIJA BRILLANTES COLOR: G-VS1", "G-VS1"),
        ("SORTIJA BRILLANTES COLOR I, SI2", "I-SI2"),
        ("SORTIJA BRILLANTES COLOR G/VVS2", "G-VVS2"),
        ("SORTIJA DIAMANTE H-VS2", "H-VS2"),
        ("SORTIJA DIAMANTE VS1-G", "G-VS1"),
        ("SORTIJA DIAMANTE SI / I", "I-SI"),
        ("SORTIJA DIAMANTE COLOR H", "H"),
        ("SORTIJA DIAMANTE COLOR: G", "G"),
        ("SORTIJA DIAMANTE G COLOR", "G"),
        ("sortija diamante color h vs1", "H-VS1"),
        ("SORTIJA DIAMANTE COLOR H. VS1", "H-VS1"),
    ];
    for (title, expected) in cases {
        assert_eq!(diamond(title).1.as_deref(), Some(expected), "{title}");
    }
}

#[test]
fn carat_forms() {
    let cases: Vec<(&str, &str)> = vec![
        ("SOLITARIO BRILLANTE 0.10 QTS.", "0.10"),
        ("SOLITARIO BRILLANTE 0,25QT", "0.25"),
        ("SOLITARIO DIAMANTE 1 QTS", "1"),
        ("SORTIJA DIAMANTE 2X0.10 QTS", "0.10"),
    ];
    for (title, expected) in cases {
        assert_eq!(diamond(title).0.as_deref(), Some(expected), "{title}");
    }
}

#[test]
fn no_trigger_word_no_diamond_attributes() {
    assert_eq!(diamond("SOLITARIO 0.10 QTS COLOR H VSI"), (None, None));
    assert_eq!(diamond("SORTIJA CIRCONITA H-VS1"), (None, None));
}

#[test]
fn letters_outside_the_color_vocabulary_are_ignored() {
    assert_eq!(diamond("SORTIJA DIAMANTE COLOR D").1, None);
    assert_eq!(diamond("SORTIJA DIAMANTE COLOR ROJO").1, None);
    assert_eq!(diamond("SORTIJA BICOLOR DIAMANTE").1, None);
}

#[test]
fn purity_policies() {
    let title = Product::new("SOLITARIO DIAMANTE COLOR H VSI");
    let grade = |policy| {
        let options = Options { purity_policy: policy, ..Options::default() };
        extract_with(&title, Dictionary::shared(), &options)
            .attributes
            .text(AttributeKey::ColorDiamante)
            .map(str::to_string)
    };
    assert_eq!(grade(PurityPolicy::AsWritten).as_deref(), Some("H-VSI"));
    assert_eq!(grade(PurityPolicy::Canonical).as_deref(), Some("H-VS1"));
    assert_eq!(grade(PurityPolicy::Strict).as_deref(), Some("H"));
}

#[test]
fn carat_number_is_not_a_measurement() {
    let extraction = extract("SORTIJA BRILLANTE 0.10 QTS");
    assert_eq!(extraction.attributes.len(), 1);
}

#[test]
fn stone_count_before_carat_is_not_a_pair() {
    let extraction = extract("SORTIJA DIAMANTE 2X0.10 QTS");
    let attributes = &extraction.attributes;
    assert_eq!(attributes.text(AttributeKey::KilatesDiamante), Some("0.10"));
    assert!(!attributes.contains(AttributeKey::Medidas));
    assert!(!attributes.contains(AttributeKey::Alto));
}

#[test]
fn carat_needs_a_whole_number() {
    // `1.0.10 QTS` has no clean number start before `QTS`.
    assert_eq!(diamond("SORTIJA DIAMANTE 1.0.10 QTS").0, None);
}
