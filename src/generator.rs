use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::lexicon::{Conjugation, Declension, FiniteForm, Lexicon};
use crate::normalize::annotate;
use crate::tree::{Branch, NodeKind, Place, RawNode, SumtiKind, SumtiRole, TypedNode};
use crate::utils::{GlossError, OptionExt, Result, capitalize, capitalize_sentence, with_article};

/// Configuration options for rendering English
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Whether to uppercase the first letter of each sentence
    pub capitalize_sentences: bool,
    /// Text appended to every sentence
    pub sentence_terminator: String,
    /// Text placed between sentences
    pub sentence_separator: String,
    /// Maximum nesting of `nu` abstractions (to bound recursion)
    pub max_abstraction_depth: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            capitalize_sentences: true,
            sentence_terminator: ".".to_string(),
            sentence_separator: " ".to_string(),
            max_abstraction_depth: 16,
        }
    }
}

/// Renders typed Lojban trees as English using a [`Lexicon`]
#[derive(Debug, Clone)]
pub struct Translator {
    lexicon: Lexicon,
    config: TranslatorConfig,
}

impl Translator {
    /// Create a translator with the default configuration
    pub fn new(lexicon: Lexicon) -> Self {
        Translator {
            lexicon,
            config: TranslatorConfig::default(),
        }
    }

    /// Create a translator with a custom configuration
    pub fn with_config(lexicon: Lexicon, config: TranslatorConfig) -> Self {
        Translator { lexicon, config }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TranslatorConfig) {
        self.config = config;
    }

    /// Translate a camxes parse tree given as JSON
    pub fn translate_json(&self, json: &str) -> Result<String> {
        let raw: RawNode = serde_json::from_str(json)?;
        self.translate(&raw)
    }

    /// Normalize, number and render a raw camxes parse tree
    pub fn translate(&self, raw: &RawNode) -> Result<String> {
        let tree = annotate(raw)?;
        self.text_to_english(&tree)
    }

    /// Render a numbered `text` node
    pub fn text_to_english(&self, text: &TypedNode) -> Result<String> {
        let text = text.expect_node(NodeKind::Text)?;
        let mut sentences = Vec::new();
        let mut connectives: Vec<&str> = Vec::new();

        for child in &text.children {
            match child {
                TypedNode::Leaf(word) if word.class == "UI" => {
                    match self.lexicon.attitudinal(&word.text) {
                        Some(english) => connectives.push(english),
                        None => debug!(ui = %word.text, "dropping attitudinal without translation"),
                    }
                }
                TypedNode::Node(branch) if branch.kind == NodeKind::Sentence => {
                    let rendered = self.render_sentence(branch, 0)?;
                    let mut parts: Vec<String> =
                        connectives.drain(..).map(str::to_string).collect();
                    parts.push(rendered);
                    sentences.push(parts.join(", "));
                }
                other => trace!(kind = %other.type_name(), "skipping text element"),
            }
        }
        debug!(sentences = sentences.len(), "rendered text");

        let finished: Vec<String> = sentences
            .iter()
            .map(|sentence| {
                let sentence = if self.config.capitalize_sentences {
                    capitalize_sentence(sentence)
                } else {
                    sentence.clone()
                };
                sentence + &self.config.sentence_terminator
            })
            .collect();
        Ok(finished.join(self.config.sentence_separator.as_str()))
    }

    /// Render one numbered sentence, without capitalization or terminator
    pub fn sentence_to_english(&self, sentence: &TypedNode) -> Result<String> {
        self.render_sentence(sentence.expect_node(NodeKind::Sentence)?, 0)
    }

    /// English forms of a placed sumti
    pub fn sumti_to_declension(&self, sumti: &TypedNode) -> Result<Declension> {
        self.declension(sumti, 0)
    }

    /// Conjugation record of a selbri, composing tanru and abstractions
    pub fn selbri_to_conjugation(&self, selbri: &TypedNode) -> Result<Conjugation> {
        self.conjugation(selbri, 0)
    }

    fn render_sentence(&self, sentence: &Branch, depth: usize) -> Result<String> {
        if depth > self.config.max_abstraction_depth {
            return Err(GlossError::Unsupported(format!(
                "abstractions nested deeper than {}",
                self.config.max_abstraction_depth
            )));
        }

        let mut clause = Clause::default();
        for child in &sentence.children {
            match child {
                TypedNode::Node(tail) if tail.kind == NodeKind::BridiTail => {
                    for element in &tail.children {
                        self.collect(element, &mut clause, depth)?;
                    }
                }
                other => self.collect(other, &mut clause, depth)?,
            }
        }

        let selbri = clause
            .selbri
            .ok_or_else(|| GlossError::mismatch("selbri", "sentence without selbri"))?;
        let record = self.conjugation(selbri, depth)?;
        let subject = clause.places.get(&Place::X1);
        let form = FiniteForm::for_subject(subject.map(|d| d.nominative.as_str()));

        let mut words = vec![subject.map_or("it", |d| d.nominative.as_str()).to_string()];
        if let Some(verb) = record.primary_verb() {
            words.push(verb.form(form).to_string());
        } else if let Some(adjective) = record.adjective_form() {
            words.push("is".to_string());
            words.push(adjective.to_string());
        } else if let Some(noun) = record.primary_noun() {
            words.push("is".to_string());
            words.push(with_article(noun));
        } else {
            return Err(GlossError::Unsupported(
                "selbri without a verb, adjective or noun form".to_string(),
            ));
        }

        for place in &Place::NUMBERED[1..] {
            if let Some(declension) = clause.places.get(place) {
                if let Some(prep) = record.preposition(*place) {
                    words.push(prep.to_string());
                }
                words.push(declension.accusative.clone());
            }
        }
        let rendered = words.join(" ");
        trace!(depth, rendered = %rendered, "rendered sentence");
        Ok(rendered)
    }

    /// Record one element of a sentence (head term or bridi tail element)
    fn collect<'t>(&self, node: &'t TypedNode, clause: &mut Clause<'t>, depth: usize) -> Result<()> {
        match node {
            TypedNode::Node(branch) => match branch.kind {
                NodeKind::Sumti(SumtiRole::Placed(place)) => {
                    let declension = self.declension(node, depth)?;
                    clause.places.insert(place, declension);
                }
                NodeKind::Selbri if clause.modal_selbri_pending => {
                    clause.modal_selbri_pending = false;
                    trace!("skipping fi'o selbri");
                }
                NodeKind::Selbri => {
                    if clause.selbri.is_some() {
                        return Err(GlossError::Unsupported(
                            "more than one selbri in a sentence".to_string(),
                        ));
                    }
                    clause.selbri = Some(node);
                }
                other => debug!(kind = %other, "ignoring sentence element"),
            },
            // place tags were consumed by the numbering pass
            TypedNode::Leaf(word) if word.class == "FA" => {}
            TypedNode::Leaf(word) if word.class == "FIhO" => clause.modal_selbri_pending = true,
            TypedNode::Leaf(word) => trace!(class = %word.class, word = %word.text, "ignoring word"),
        }
        Ok(())
    }

    fn declension(&self, sumti: &TypedNode, depth: usize) -> Result<Declension> {
        let branch = match sumti {
            TypedNode::Node(branch)
                if matches!(
                    branch.kind,
                    NodeKind::Sumti(SumtiRole::Placed(_) | SumtiRole::Unplaced)
                ) =>
            {
                branch
            }
            other => return Err(GlossError::mismatch("sumti", other.type_name())),
        };
        let (kind, form) = match branch.children.first() {
            Some(TypedNode::Node(form)) => match form.kind {
                NodeKind::SumtiForm(kind) => (kind, form),
                other => return Err(GlossError::mismatch("sumti form", other)),
            },
            Some(other) => return Err(GlossError::mismatch("sumti form", other.type_name())),
            None => return Err(GlossError::mismatch("sumti form", "empty sumti")),
        };

        match kind {
            SumtiKind::Sumkahi => match form.children.as_slice() {
                [TypedNode::Leaf(word)] if word.class == "KOhA" => {
                    Ok(self.lexicon.declension(&word.text)?.clone())
                }
                _ => Err(GlossError::Unsupported("compound pro-sumti".to_string())),
            },
            SumtiKind::Letterals => match form.children.as_slice() {
                [TypedNode::Leaf(word)] if word.class == "BY" => {
                    let letter = word
                        .text
                        .chars()
                        .next()
                        .ok_or_unsupported(|| "empty letteral".to_string())?;
                    Ok(Declension::same(&letter.to_uppercase().to_string()))
                }
                _ => Err(GlossError::Unsupported("letteral string".to_string())),
            },
            SumtiKind::Description => match without_ku(&form.children).as_slice() {
                [gadri, selbri, ..]
                    if gadri.is_word("LE") && selbri.kind() == Some(NodeKind::Selbri) =>
                {
                    let record = self.conjugation(selbri, depth)?;
                    let noun = record
                        .primary_noun()
                        .ok_or_unsupported(|| "description of a selbri without a noun".to_string())?;
                    Ok(Declension::same(&with_article(noun)))
                }
                _ => Err(GlossError::Unsupported("description shape".to_string())),
            },
            SumtiKind::NameOrNameDescription => {
                let parts = without_ku(&form.children);
                let mut names = Vec::with_capacity(parts.len().saturating_sub(1));
                for part in parts.iter().skip(1) {
                    let name = match part {
                        TypedNode::Leaf(word) if word.class == "cmevla" => word.text.clone(),
                        TypedNode::Node(branch) if branch.kind == NodeKind::Selbri => {
                            let record = self.conjugation(part, depth)?;
                            record
                                .best_word()
                                .ok_or_unsupported(|| "name without a surface word".to_string())?
                                .to_string()
                        }
                        other => {
                            return Err(GlossError::Unsupported(format!(
                                "name part {}",
                                other.type_name()
                            )));
                        }
                    };
                    names.push(capitalize(&name));
                }
                Ok(Declension::same(&names.join(" ")))
            }
            SumtiKind::OneWordQuote
            | SumtiKind::NonLojbanQuote
            | SumtiKind::UngrammaticalQuote
            | SumtiKind::GrammaticalQuote
            | SumtiKind::Reference
            | SumtiKind::Negated
            | SumtiKind::Number
            | SumtiKind::Unknown => Err(GlossError::Unsupported(kind.name().to_string())),
        }
    }

    fn conjugation(&self, selbri: &TypedNode, depth: usize) -> Result<Conjugation> {
        let branch = selbri.expect_node(NodeKind::Selbri)?;
        match branch.children.as_slice() {
            [nu, TypedNode::Node(body), ..] if nu.is_word("NU") => {
                if body.kind != NodeKind::Sentence {
                    return Err(GlossError::mismatch("sentence", body.kind));
                }
                let clause = self.render_sentence(body, depth + 1)?;
                Ok(Conjugation::new().noun(1, &format!("that {}", clause)))
            }
            [] => Err(GlossError::mismatch("tanru unit", "empty selbri")),
            [seltau @ .., tertau] => {
                let modifiers = seltau
                    .iter()
                    .map(|unit| {
                        self.tanru_unit(unit)?
                            .best_word()
                            .ok_or_unsupported(|| "seltau without a surface word".to_string())
                    })
                    .collect::<Result<Vec<&str>>>()?;
                Ok(self.tanru_unit(tertau)?.modified_by(&modifiers))
            }
        }
    }

    fn tanru_unit(&self, unit: &TypedNode) -> Result<&Conjugation> {
        match unit {
            TypedNode::Leaf(word) if word.class == "gismu" => self.lexicon.conjugation(&word.text),
            other => Err(GlossError::Unsupported(format!(
                "tanru unit {}",
                other.type_name()
            ))),
        }
    }
}

/// Places and selbri gathered from one sentence
#[derive(Default)]
struct Clause<'t> {
    places: BTreeMap<Place, Declension>,
    selbri: Option<&'t TypedNode>,
    /// A `fi'o` was seen and its selbri has not been passed yet
    modal_selbri_pending: bool,
}

fn without_ku(children: &[TypedNode]) -> Vec<&TypedNode> {
    children.iter().filter(|c| !c.is_word("KU")).collect()
}
