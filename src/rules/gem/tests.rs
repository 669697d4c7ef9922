use crate::{AttributeKey, Dictionary, Error, Options, Product, extract, extract_with};

fn stones(title: &str) -> Vec<String> {
    extract(title)
        .attributes
        .get(AttributeKey::TipoDePiedra)
        .and_then(|v| v.as_list())
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

#[test]
fn stones_in_title_order() {
    assert_eq!(stones("ANILLO RUBI Y ZAFIRO"), vec!["RUBI", "ZAFIRO"]);
    assert_eq!(stones("COLGANTE ZAFIRO Y RUBI"), vec!["ZAFIRO", "RUBI"]);
}

#[test]
fn plurals_and_accents_fold_to_the_canonical_name() {
    assert_eq!(stones("Pendientes rubíes y perlas"), vec!["RUBI", "PERLA"]);
    assert_eq!(stones("COLLAR ÓPALO"), vec!["OPALO"]);
    assert_eq!(stones("SORTIJA ESMERALDAS"), vec!["ESMERALDA"]);
    // Decomposed accent, as pasted from some catalog exports.
    assert_eq!(stones("SORTIJA RUBI\u{301}"), vec!["RUBI"]);
}

#[test]
fn repeated_stone_is_listed_once() {
    assert_eq!(stones("SORTIJA RUBI ORO CON RUBIES"), vec!["RUBI"]);
}

#[test]
fn stones_need_whole_words() {
    assert!(stones("SORTIJA CORALINA").is_empty());
    assert!(stones("ALIANZA DIAMANTES").is_empty());
}

#[test]
fn extra_stones_extend_the_vocabulary() {
    let dictionary = Dictionary::with_extra_stones(&["Espinela", "rubí"]).unwrap();
    assert_eq!(dictionary.stones().filter(|s| *s == "RUBI").count(), 1);

    let product = Product::new("SORTIJA ESPINELAS Y RUBI");
    let extraction = extract_with(&product, &dictionary, &Options::default());
    let list = extraction.attributes.get(AttributeKey::TipoDePiedra).and_then(|v| v.as_list());
    assert_eq!(list, Some(&["ESPINELA".to_string(), "RUBI".to_string()][..]));

    // The shared dictionary does not know it.
    assert!(stones("SORTIJA ESPINELA").is_empty());
}

#[test]
fn multi_word_extra_stone() {
    let dictionary = Dictionary::with_extra_stones(&["Ojo de tigre"]).unwrap();
    let product = Product::new("COLGANTE OJO  DE TIGRE Y PERLA");
    let extraction = extract_with(&product, &dictionary, &Options::default());
    let list = extraction.attributes.get(AttributeKey::TipoDePiedra).and_then(|v| v.as_list());
    assert_eq!(list, Some(&["OJO DE TIGRE".to_string(), "PERLA".to_string()][..]));
}

#[test]
fn invalid_extra_stones_are_rejected() {
    assert!(matches!(Dictionary::with_extra_stones(&[""]), Err(Error::InvalidStone(_))));
    assert!(matches!(Dictionary::with_extra_stones(&["RUBI.*"]), Err(Error::InvalidStone(_))));
}

#[test]
fn stones_are_a_list_metafield() {
    let extraction = extract("ANILLO RUBI Y ZAFIRO");
    let metafield = extraction
        .to_metafields()
        .into_iter()
        .find(|m| m.key == "tipo_de_piedra")
        .unwrap();
    assert_eq!(metafield.value, r#"["RUBI","ZAFIRO"]"#);
    assert_eq!(metafield.kind, "list.single_line_text_field");
}
