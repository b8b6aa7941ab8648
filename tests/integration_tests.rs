use jbo_english::{GlossError, Lexicon, RawNode, Translator, TranslatorConfig, annotate};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::io::Write;

// Builders for camxes-shaped parse trees. Words are spelled out letter by
// letter and followed by whitespace, the way the parser emits them.

fn spaces() -> Value {
    json!(["spaces", " "])
}

fn letters(label: &str, word: &str) -> Value {
    let mut node = vec![json!(label)];
    node.extend(word.chars().map(|c| json!(["letter", c.to_string()])));
    Value::Array(node)
}

fn clause(class: &str, word: &str) -> Value {
    json!([
        format!("{}_clause", class),
        [format!("{}_pre", class), letters(class, word), spaces()]
    ])
}

fn pro(word: &str) -> Value {
    json!(["sumti", ["sumti_1", ["sumti_6", clause("KOhA", word)]]])
}

fn letteral(word: &str) -> Value {
    json!(["sumti", ["sumti_6", ["lerfu_string", ["lerfu_word", letters("BY", word)]], ["BOI_elidible"]]])
}

fn gismu(word: &str) -> Value {
    json!(["tanru_unit", ["BRIVLA_clause", ["BRIVLA_pre", ["BRIVLA", letters("gismu", word)], spaces()]]])
}

fn selbri(units: &[&str]) -> Value {
    let units: Vec<Value> = units.iter().map(|u| gismu(u)).collect();
    json!(["selbri", ["selbri_1", ["selbri_6", units]]])
}

fn lo(selbri: Value) -> Value {
    json!(["sumti", ["sumti_6",
        ["LE_clause", ["LE_pre", letters("LE", "lo"), spaces()]],
        ["sumti_tail", ["sumti_tail_1", selbri]],
        ["KU_elidible", clause("KU", "ku")]]])
}

fn la(name: &str) -> Value {
    json!(["sumti", ["sumti_6",
        ["LA_clause", ["LA_pre", letters("LA", "la"), spaces()]],
        ["CMENE_clause", ["CMENE_pre", letters("cmevla", name), spaces()]]]])
}

fn tagged(tag: &str, sumti: Value) -> Value {
    json!(["term", ["term_1", clause("FA", tag), sumti]])
}

fn sentence(head: Vec<Value>, selbri: Value, tail: Vec<Value>) -> Value {
    json!(["sentence",
        ["terms", head],
        ["CU_clause", ["CU_pre", letters("CU", "cu"), spaces()]],
        ["bridi_tail", ["bridi_tail_1", selbri, ["tail_terms", ["terms", tail], ["VAU_elidible"]]]]])
}

fn text(parts: Vec<Value>) -> RawNode {
    let tree = json!(["text",
        ["initial_spaces", " "],
        ["text_1", ["paragraphs", ["paragraph", parts]]]]);
    serde_json::from_value(tree).unwrap()
}

fn ui(word: &str) -> Value {
    json!(["indicators", ["indicator", clause("UI", word)]])
}

fn translate(tree: &RawNode) -> String {
    Translator::new(Lexicon::builtin()).translate(tree).unwrap()
}

#[test]
fn test_i_talk_to_you() {
    let tree = text(vec![sentence(vec![pro("mi")], selbri(&["tavla"]), vec![pro("do")])]);
    assert_eq!(translate(&tree), "I talk to you.");
}

#[test]
fn test_you_talk_to_me() {
    let tree = text(vec![sentence(vec![pro("do")], selbri(&["tavla"]), vec![pro("mi")])]);
    assert_eq!(translate(&tree), "You talk to me.");
}

#[test]
fn test_i_am_at_a_house() {
    let tree = text(vec![sentence(
        vec![pro("mi")],
        selbri(&["zvati"]),
        vec![lo(selbri(&["zdani"]))],
    )]);
    assert_eq!(translate(&tree), "I am at a house.");
}

#[test]
fn test_it_is_good() {
    let tree = text(vec![sentence(vec![], selbri(&["xamgu"]), vec![])]);
    assert_eq!(translate(&tree), "It is good.");
}

#[test]
fn test_letterals_talk() {
    let tree = text(vec![sentence(vec![letteral("cy")], selbri(&["tavla"]), vec![letteral("ly")])]);
    assert_eq!(translate(&tree), "C talks to L.");
}

#[test]
fn test_however_you_talk_to_me() {
    let tree = text(vec![
        ui("ku'i"),
        sentence(vec![pro("do")], selbri(&["tavla"]), vec![pro("mi")]),
    ]);
    assert_eq!(translate(&tree), "However, you talk to me.");
}

#[test]
fn test_place_tags_reorder_arguments() {
    // fe do cu tavla fa mi
    let tree = text(vec![sentence(
        vec![tagged("fe", pro("do"))],
        selbri(&["tavla"]),
        vec![tagged("fa", pro("mi"))],
    )]);
    assert_eq!(translate(&tree), "I talk to you.");
}

#[test]
fn test_names_and_tanru() {
    let tree = text(vec![sentence(
        vec![la("alis")],
        selbri(&["zvati"]),
        vec![lo(selbri(&["cmalu", "kumfa"]))],
    )]);
    assert_eq!(translate(&tree), "Alis is at a small room.");
}

#[test]
fn test_abstraction_description() {
    let inner = sentence(vec![pro("mi")], selbri(&["tavla"]), vec![pro("do")]);
    let nu = json!(["selbri", ["tanru_unit",
        clause("NU", "nu"),
        ["subsentence", inner],
        ["KEI_elidible"]]]);
    let tree = text(vec![sentence(vec![pro("do")], selbri(&["jinvi"]), vec![lo(nu)])]);
    assert_eq!(translate(&tree), "You think that I talk to you.");
}

#[test]
fn test_multiple_sentences() {
    let tree = text(vec![
        sentence(vec![pro("mi")], selbri(&["sipna"]), vec![]),
        json!(["I_clause", ["I_pre", letters("I", "i"), spaces()]]),
        ui("si'a"),
        sentence(vec![pro("do")], selbri(&["sipna"]), vec![]),
    ]);
    assert_eq!(translate(&tree), "I sleep. Similarly, you sleep.");
}

#[test]
fn test_translate_json() {
    let tree = text(vec![sentence(vec![pro("mi")], selbri(&["jinvi"]), vec![])]);
    let json = serde_json::to_string(&tree).unwrap();
    let translator = Translator::new(Lexicon::builtin());
    assert_eq!(translator.translate_json(&json).unwrap(), "I think.");

    let err = translator.translate_json("{\"not\": \"a tree\"}").unwrap_err();
    assert!(matches!(err, GlossError::Json(_)));
}

#[test]
fn test_annotated_tree_shape() {
    let tree = text(vec![sentence(vec![pro("mi")], selbri(&["tavla"]), vec![pro("do")])]);
    let typed = serde_json::to_value(annotate(&tree).unwrap()).unwrap();
    assert_eq!(
        typed,
        json!({
            "type": "text",
            "children": [{
                "type": "sentence",
                "children": [
                    {
                        "type": "sumti x",
                        "children": [{"type": "sumka'i", "children": [{"type": "KOhA", "word": "mi"}]}],
                        "sumtiPlace": 1
                    },
                    {"type": "CU", "word": "cu"},
                    {
                        "type": "bridi tail",
                        "children": [
                            {"type": "selbri", "children": [{"type": "gismu", "word": "tavla"}]},
                            {
                                "type": "sumti x",
                                "children": [{"type": "sumka'i", "children": [{"type": "KOhA", "word": "do"}]}],
                                "sumtiPlace": 2
                            }
                        ]
                    }
                ]
            }]
        })
    );
}

#[test]
fn test_lexicon_file_overlay() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "gismu": {{"gerku": {{"noun1": "dog"}}}},
            "pronouns": {{"ti": {{"nominative": "this", "accusative": "this"}}}}
        }}"#
    )
    .unwrap();

    let tree = text(vec![sentence(vec![pro("ti")], selbri(&["gerku"]), vec![])]);

    let err = Translator::new(Lexicon::builtin()).translate(&tree).unwrap_err();
    assert!(matches!(err, GlossError::LexicalGap { .. }));

    let mut lexicon = Lexicon::builtin();
    lexicon.extend(Lexicon::from_file(file.path()).unwrap());
    let translator = Translator::new(lexicon);
    assert_eq!(translator.translate(&tree).unwrap(), "This is a dog.");
}

#[test]
fn test_missing_lexicon_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Lexicon::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, GlossError::Io(_)));
}

#[test]
fn test_quotes_are_unsupported() {
    let quote = json!(["sumti", ["sumti_6", ["ZO_clause", ["ZO_pre", letters("ZO", "zo"), spaces()]],
        ["gismu", "tavla"]]]);
    let tree = text(vec![sentence(vec![quote], selbri(&["sipna"]), vec![])]);
    let err = Translator::new(Lexicon::builtin()).translate(&tree).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported construct: one-word quote");
}

#[test]
fn test_non_lojban_quotes_are_unsupported() {
    let quote = json!(["sumti", ["sumti_6", ["ZOI_clause", ["ZOI_pre",
        letters("ZOI", "zoi"),
        spaces(),
        ["zoi_open", "g", "y"],
        ["zoi_word", "h", "i"],
        ["zoi_close", "g", "y"],
        spaces()]]]]);
    let tree = text(vec![sentence(vec![quote], selbri(&["sipna"]), vec![])]);
    let err = Translator::new(Lexicon::builtin()).translate(&tree).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported construct: non-Lojban quote");
}

#[test]
fn test_fai_holds_for_following_sumti() {
    // mi tavla fai mi do
    let tree = text(vec![sentence(
        vec![pro("mi")],
        selbri(&["tavla"]),
        vec![tagged("fai", pro("mi")), pro("do")],
    )]);
    assert_eq!(translate(&tree), "I talk.");
}

#[test]
fn test_translator_config() {
    let tree = text(vec![
        sentence(vec![], selbri(&["xamgu"]), vec![]),
        sentence(vec![], selbri(&["melbi"]), vec![]),
    ]);
    let mut config = TranslatorConfig::default();
    config.capitalize_sentences = false;
    config.sentence_separator = " / ".to_string();
    let translator = Translator::with_config(Lexicon::builtin(), config);
    assert_eq!(translator.translate(&tree).unwrap(), "it is good. / it is beautiful.");
    assert!(!translator.config().capitalize_sentences);
}

#[test]
fn test_translation_is_repeatable() {
    let tree = text(vec![sentence(vec![pro("do")], selbri(&["cmalu", "tavla"]), vec![pro("mi")])]);
    let translator = Translator::new(Lexicon::builtin());
    let first = translator.translate(&tree).unwrap();
    assert_eq!(first, "You small talk small to me.");
    assert_eq!(translator.translate(&tree).unwrap(), first);
}
