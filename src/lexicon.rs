use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::tree::Place;
use crate::utils::{GlossError, OptionExt, Result};

/// Number of numbered slots a conjugation record keeps per role
const SLOTS: usize = 4;

/// The six English verb forms a gismu can be rendered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbTable {
    #[serde(rename = "I")]
    pub i: String,
    pub you: String,
    pub it: String,
    pub past: String,
    pub pp: String,
    pub ing: String,
}

/// Finite verb form selected by the subject of a bridi
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiniteForm {
    I,
    You,
    It,
}

impl FiniteForm {
    /// Picks the form agreeing with a subject's nominative, `None` meaning no subject
    pub fn for_subject(nominative: Option<&str>) -> Self {
        match nominative {
            Some("I") => FiniteForm::I,
            Some("you") => FiniteForm::You,
            _ => FiniteForm::It,
        }
    }
}

impl VerbTable {
    pub fn new(i: &str, you: &str, it: &str, past: &str, pp: &str, ing: &str) -> Self {
        VerbTable {
            i: i.to_string(),
            you: you.to_string(),
            it: it.to_string(),
            past: past.to_string(),
            pp: pp.to_string(),
            ing: ing.to_string(),
        }
    }

    /// A verb whose first and second person share the infinitive
    pub fn regular(infinitive: &str, third: &str, past: &str, pp: &str, ing: &str) -> Self {
        VerbTable::new(infinitive, infinitive, third, past, pp, ing)
    }

    pub fn form(&self, form: FiniteForm) -> &str {
        match form {
            FiniteForm::I => &self.i,
            FiniteForm::You => &self.you,
            FiniteForm::It => &self.it,
        }
    }

    fn map_words<F: Fn(&str) -> String>(&self, f: &F) -> Self {
        VerbTable {
            i: f(&self.i),
            you: f(&self.you),
            it: f(&self.it),
            past: f(&self.past),
            pp: f(&self.pp),
            ing: f(&self.ing),
        }
    }
}

/// Nominative and accusative English forms of a sumti
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declension {
    pub nominative: String,
    pub accusative: String,
}

impl Declension {
    pub fn new(nominative: &str, accusative: &str) -> Self {
        Declension {
            nominative: nominative.to_string(),
            accusative: accusative.to_string(),
        }
    }

    /// A form that does not change with case
    pub fn same(word: &str) -> Self {
        Declension::new(word, word)
    }
}

/// One value of a serialized conjugation record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    Word(String),
    Verb(VerbTable),
}

enum Role {
    Verb(usize),
    Noun(usize),
    Adjective,
    Prep(usize),
}

impl Role {
    /// Parses keys such as `verb1`, `noun3`, `adjective1` or `prep2`
    fn parse(key: &str) -> Option<Role> {
        let split = key.find(|c: char| c.is_ascii_digit())?;
        let (stem, digits) = key.split_at(split);
        let n: usize = digits.parse().ok()?;
        if !(1..=SLOTS).contains(&n) {
            return None;
        }
        match stem {
            "verb" => Some(Role::Verb(n - 1)),
            "noun" => Some(Role::Noun(n - 1)),
            "prep" => Some(Role::Prep(n - 1)),
            "adjective" if n == 1 => Some(Role::Adjective),
            _ => None,
        }
    }
}

/// How a gismu (or a composed tanru) renders in each of its roles.
///
/// Serialized as a map from role keys (`verb1`..`verb4`, `noun1`..`noun4`,
/// `adjective1`, `prep1`..`prep4`) to words, verb roles holding a [`VerbTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Slot>",
    into = "BTreeMap<String, Slot>"
)]
pub struct Conjugation {
    verbs: [Option<VerbTable>; SLOTS],
    nouns: [Option<String>; SLOTS],
    adjective: Option<String>,
    preps: [Option<String>; SLOTS],
}

impl Conjugation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the verb for place `place` (1-based); out-of-range places are ignored
    pub fn verb(mut self, place: usize, table: VerbTable) -> Self {
        if let Some(slot) = place.checked_sub(1).and_then(|i| self.verbs.get_mut(i)) {
            *slot = Some(table);
        }
        self
    }

    /// Set the noun naming the filler of place `place`
    pub fn noun(mut self, place: usize, word: &str) -> Self {
        if let Some(slot) = place.checked_sub(1).and_then(|i| self.nouns.get_mut(i)) {
            *slot = Some(word.to_string());
        }
        self
    }

    pub fn adjective(mut self, word: &str) -> Self {
        self.adjective = Some(word.to_string());
        self
    }

    /// Set the preposition marking the sumti in place `place`
    pub fn prep(mut self, place: usize, word: &str) -> Self {
        if let Some(slot) = place.checked_sub(1).and_then(|i| self.preps.get_mut(i)) {
            *slot = Some(word.to_string());
        }
        self
    }

    pub fn primary_verb(&self) -> Option<&VerbTable> {
        self.verbs[0].as_ref()
    }

    pub fn primary_noun(&self) -> Option<&str> {
        self.nouns[0].as_deref()
    }

    pub fn adjective_form(&self) -> Option<&str> {
        self.adjective.as_deref()
    }

    pub fn preposition(&self, place: Place) -> Option<&str> {
        let index = usize::from(place.number()?) - 1;
        self.preps.get(index)?.as_deref()
    }

    /// The single word that best stands for this record as a tanru modifier
    pub fn best_word(&self) -> Option<&str> {
        self.adjective_form()
            .or_else(|| self.primary_noun())
            .or_else(|| self.primary_verb().map(|verb| verb.ing.as_str()))
    }

    /// Prefix every word of the record with `modifiers`, space-joined
    pub fn modified_by(&self, modifiers: &[&str]) -> Self {
        if modifiers.is_empty() {
            return self.clone();
        }
        let prefix = modifiers.join(" ");
        self.map_words(&|word: &str| format!("{} {}", prefix, word))
    }

    fn map_words<F: Fn(&str) -> String>(&self, f: &F) -> Self {
        let map = |slot: &Option<String>| slot.as_deref().map(f);
        Conjugation {
            verbs: self.verbs.each_ref().map(|v| v.as_ref().map(|v| v.map_words(f))),
            nouns: self.nouns.each_ref().map(map),
            adjective: map(&self.adjective),
            preps: self.preps.each_ref().map(map),
        }
    }

    fn is_empty(&self) -> bool {
        *self == Conjugation::default()
    }
}

impl TryFrom<BTreeMap<String, Slot>> for Conjugation {
    type Error = String;

    fn try_from(map: BTreeMap<String, Slot>) -> std::result::Result<Self, Self::Error> {
        let mut record = Conjugation::default();
        for (key, slot) in map {
            let role = Role::parse(&key).ok_or_else(|| format!("unknown role {:?}", key))?;
            match (role, slot) {
                (Role::Verb(i), Slot::Verb(table)) => record.verbs[i] = Some(table),
                (Role::Noun(i), Slot::Word(word)) => record.nouns[i] = Some(word),
                (Role::Adjective, Slot::Word(word)) => record.adjective = Some(word),
                (Role::Prep(i), Slot::Word(word)) => record.preps[i] = Some(word),
                (Role::Verb(_), Slot::Word(_)) => {
                    return Err(format!("{} must be a verb table", key));
                }
                (_, Slot::Verb(_)) => return Err(format!("{} must be a single word", key)),
            }
        }
        Ok(record)
    }
}

impl From<Conjugation> for BTreeMap<String, Slot> {
    fn from(record: Conjugation) -> Self {
        let mut map = BTreeMap::new();
        for (i, verb) in record.verbs.into_iter().enumerate() {
            if let Some(table) = verb {
                map.insert(format!("verb{}", i + 1), Slot::Verb(table));
            }
        }
        let words = [("noun", record.nouns), ("prep", record.preps)];
        for (stem, slots) in words {
            for (i, word) in slots.into_iter().enumerate() {
                if let Some(word) = word {
                    map.insert(format!("{}{}", stem, i + 1), Slot::Word(word));
                }
            }
        }
        if let Some(word) = record.adjective {
            map.insert("adjective1".to_string(), Slot::Word(word));
        }
        map
    }
}

/// The knowledge base a translation draws its English words from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Lexicon {
    gismu: HashMap<String, Conjugation>,
    pronouns: HashMap<String, Declension>,
    attitudinals: HashMap<String, String>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// The lexicon shipped with the crate
    pub fn builtin() -> Self {
        let be = VerbTable::new("am", "are", "is", "was", "been", "being");
        let talk = VerbTable::regular("talk", "talks", "talked", "talked", "talking");
        let go = VerbTable::regular("go", "goes", "went", "gone", "going");
        let sleep = VerbTable::regular("sleep", "sleeps", "slept", "slept", "sleeping");
        let think = VerbTable::regular("think", "thinks", "thought", "thought", "thinking");

        LexiconBuilder::new()
            .pronoun("mi", Declension::new("I", "me"))
            .pronoun("do", Declension::same("you"))
            .attitudinal("ku'i", "however")
            .attitudinal("si'a", "similarly")
            .gismu(
                "tavla",
                Conjugation::new()
                    .verb(1, talk)
                    .noun(1, "speaker")
                    .noun(2, "listener")
                    .noun(3, "subject")
                    .noun(4, "language")
                    .prep(1, "by")
                    .prep(2, "to")
                    .prep(3, "about")
                    .prep(4, "in"),
            )
            .gismu(
                "xamgu",
                Conjugation::new()
                    .adjective("good")
                    .noun(1, "good thing")
                    .noun(2, "benefactor")
                    .noun(3, "standard")
                    .prep(1, "of")
                    .prep(2, "for")
                    .prep(3, "by standard"),
            )
            .gismu(
                "klama",
                Conjugation::new()
                    .verb(1, go)
                    .noun(1, "goer")
                    .noun(2, "destination")
                    .noun(3, "origin")
                    .noun(4, "route")
                    .prep(2, "to")
                    .prep(3, "from")
                    .prep(4, "via"),
            )
            .gismu("lalxu", Conjugation::new().noun(1, "lake"))
            .gismu("ractu", Conjugation::new().noun(1, "rabbit"))
            .gismu("prenu", Conjugation::new().noun(1, "person"))
            .gismu("zdani", Conjugation::new().noun(1, "house"))
            .gismu("kumfa", Conjugation::new().noun(1, "room"))
            .gismu("cmalu", Conjugation::new().adjective("small"))
            .gismu("zvati", Conjugation::new().verb(1, be).prep(2, "at"))
            .gismu("sipna", Conjugation::new().verb(1, sleep))
            .gismu("jinvi", Conjugation::new().verb(1, think))
            .gismu(
                "melbi",
                Conjugation::new()
                    .adjective("beautiful")
                    .noun(2, "beauty admirer")
                    .noun(3, "beauty aspect")
                    .noun(4, "aesthetic standard")
                    .prep(2, "to")
                    .prep(3, "in")
                    .prep(4, "by standard"),
            )
            .build()
    }

    /// Parse a lexicon from its JSON form
    pub fn from_json_str(json: &str) -> Result<Self> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Load a lexicon from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        if let Some((word, _)) = self.gismu.iter().find(|(_, record)| record.is_empty()) {
            return Err(GlossError::InvalidLexicon(format!(
                "gismu {:?} has no English forms",
                word
            )));
        }
        if self.gismu.keys().chain(self.pronouns.keys()).any(|w| w.is_empty()) {
            return Err(GlossError::InvalidLexicon("empty headword".to_string()));
        }
        Ok(())
    }

    /// Overlay `other` onto this lexicon, its entries replacing ours
    pub fn extend(&mut self, other: Lexicon) {
        self.gismu.extend(other.gismu);
        self.pronouns.extend(other.pronouns);
        self.attitudinals.extend(other.attitudinals);
    }

    pub fn conjugation(&self, gismu: &str) -> Result<&Conjugation> {
        self.gismu.get(gismu).ok_or_gap("gismu", gismu)
    }

    pub fn declension(&self, pronoun: &str) -> Result<&Declension> {
        self.pronouns.get(pronoun).ok_or_gap("pronoun", pronoun)
    }

    /// English connective for an attitudinal, if it has one
    pub fn attitudinal(&self, ui: &str) -> Option<&str> {
        self.attitudinals.get(ui).map(String::as_str)
    }

    pub fn gismu_count(&self) -> usize {
        self.gismu.len()
    }
}

/// Builder for constructing Lexicon instances
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gismu(mut self, word: &str, record: Conjugation) -> Self {
        self.lexicon.gismu.insert(word.to_string(), record);
        self
    }

    pub fn pronoun(mut self, word: &str, declension: Declension) -> Self {
        self.lexicon.pronouns.insert(word.to_string(), declension);
        self
    }

    pub fn attitudinal(mut self, word: &str, english: &str) -> Self {
        self.lexicon
            .attitudinals
            .insert(word.to_string(), english.to_string());
        self
    }

    pub fn build(self) -> Lexicon {
        self.lexicon
    }
}
