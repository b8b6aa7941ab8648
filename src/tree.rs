//! Raw and typed parse trees.
//!
//! A [`RawNode`] is the nested-array tree emitted by the camxes parser: every
//! branch is a sequence whose first element is usually its label. The
//! normalization pipeline turns it into a [`TypedNode`] tree whose structural
//! nodes carry a [`NodeKind`] and whose leaves carry a word class (the camxes
//! label, e.g. `KOhA` or `gismu`) and the word itself.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A node of the untyped camxes parse tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawNode {
    /// A terminal string (a label when it opens a branch)
    Leaf(String),
    /// An ordered sequence, normally `[label, children...]`
    Branch(Vec<RawNode>),
}

impl RawNode {
    /// Returns the label of a labelled branch
    pub fn label(&self) -> Option<&str> {
        match self {
            RawNode::Branch(items) => match items.first() {
                Some(RawNode::Leaf(label)) => Some(label),
                _ => None,
            },
            RawNode::Leaf(_) => None,
        }
    }

    /// Returns `(label, word)` when this node is a terminal pair
    pub fn as_terminal(&self) -> Option<(&str, &str)> {
        match self {
            RawNode::Branch(items) => match items.as_slice() {
                [RawNode::Leaf(label), RawNode::Leaf(word)] => Some((label, word)),
                _ => None,
            },
            RawNode::Leaf(_) => None,
        }
    }

    /// Builds a `[label, children...]` branch
    pub fn labelled(label: &str, children: Vec<RawNode>) -> Self {
        let mut items = Vec::with_capacity(children.len() + 1);
        items.push(RawNode::Leaf(label.to_string()));
        items.extend(children);
        RawNode::Branch(items)
    }

    /// Builds a `[label, word]` terminal pair
    pub fn terminal(label: &str, word: &str) -> Self {
        RawNode::Branch(vec![
            RawNode::Leaf(label.to_string()),
            RawNode::Leaf(word.to_string()),
        ])
    }
}

/// One of the five numbered argument places, or the floating `fai` place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Place {
    X1,
    X2,
    X3,
    X4,
    X5,
    Fai,
}

impl Place {
    /// The numbered places in order
    pub const NUMBERED: [Place; 5] = [Place::X1, Place::X2, Place::X3, Place::X4, Place::X5];

    pub fn from_number(n: u8) -> Option<Place> {
        match n {
            1 => Some(Place::X1),
            2 => Some(Place::X2),
            3 => Some(Place::X3),
            4 => Some(Place::X4),
            5 => Some(Place::X5),
            _ => None,
        }
    }

    /// Ordinal of a numbered place; `None` for `fai`
    pub fn number(self) -> Option<u8> {
        match self {
            Place::X1 => Some(1),
            Place::X2 => Some(2),
            Place::X3 => Some(3),
            Place::X4 => Some(4),
            Place::X5 => Some(5),
            Place::Fai => None,
        }
    }

    /// Place encoded by a FA place tag
    pub fn from_tag(word: &str) -> Option<Place> {
        match word {
            "fa" => Some(Place::X1),
            "fe" => Some(Place::X2),
            "fi" => Some(Place::X3),
            "fo" => Some(Place::X4),
            "fu" => Some(Place::X5),
            "fai" => Some(Place::Fai),
            _ => None,
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "fai"),
        }
    }
}

impl Serialize for Place {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.number() {
            Some(n) => serializer.serialize_u8(n),
            None => serializer.serialize_str("fai"),
        }
    }
}

/// What the place numberer decided about a sumti
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumtiRole {
    /// Not yet numbered, or outside any bridi (vocatives and the like)
    Unplaced,
    /// Fills a numbered (or `fai`) place of its bridi
    Placed(Place),
    /// Governed by a BAI/FIhO/PU tag
    Modal,
}

/// Sub-kind of a sumti, chosen from the shape of its `sumti_6` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumtiKind {
    OneWordQuote,
    NonLojbanQuote,
    UngrammaticalQuote,
    GrammaticalQuote,
    Letterals,
    Reference,
    Negated,
    /// A pro-sumti such as `mi` or `do`
    Sumkahi,
    NameOrNameDescription,
    Description,
    Number,
    Unknown,
}

impl SumtiKind {
    pub fn name(self) -> &'static str {
        match self {
            SumtiKind::OneWordQuote => "one-word quote",
            SumtiKind::NonLojbanQuote => "non-Lojban quote",
            SumtiKind::UngrammaticalQuote => "ungrammatical quote",
            SumtiKind::GrammaticalQuote => "grammatical quote",
            SumtiKind::Letterals => "letterals",
            SumtiKind::Reference => "reference sumti",
            SumtiKind::Negated => "negated sumti",
            SumtiKind::Sumkahi => "sumka'i",
            SumtiKind::NameOrNameDescription => "name or name description",
            SumtiKind::Description => "description",
            SumtiKind::Number => "number",
            SumtiKind::Unknown => "unknown type sumti (bug?)",
        }
    }
}

/// Semantic category of a structural node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    FreeModifier,
    Sentence,
    Prenex,
    BridiTail,
    Selbri,
    Sumti(SumtiRole),
    SumtiForm(SumtiKind),
    RelativeClause,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Text => "text",
            NodeKind::FreeModifier => "free modifier",
            NodeKind::Sentence => "sentence",
            NodeKind::Prenex => "prenex",
            NodeKind::BridiTail => "bridi tail",
            NodeKind::Selbri => "selbri",
            NodeKind::Sumti(SumtiRole::Unplaced) => "sumti",
            NodeKind::Sumti(SumtiRole::Placed(_)) => "sumti x",
            NodeKind::Sumti(SumtiRole::Modal) => "modal sumti",
            NodeKind::SumtiForm(kind) => kind.name(),
            NodeKind::RelativeClause => "relative clause",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A terminal word of the typed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The camxes label: a selma'o such as `KOhA`, or `gismu`, `cmevla`, ...
    pub class: String,
    pub text: String,
}

/// A structural node of the typed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub kind: NodeKind,
    pub children: Vec<TypedNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedNode {
    Leaf(Word),
    Node(Branch),
}

impl TypedNode {
    pub fn leaf(class: &str, text: &str) -> Self {
        TypedNode::Leaf(Word {
            class: class.to_string(),
            text: text.to_string(),
        })
    }

    pub fn node(kind: NodeKind, children: Vec<TypedNode>) -> Self {
        TypedNode::Node(Branch { kind, children })
    }

    /// `true` for a leaf of the given word class
    pub fn is_word(&self, class: &str) -> bool {
        matches!(self, TypedNode::Leaf(word) if word.class == class)
    }

    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            TypedNode::Node(branch) => Some(branch.kind),
            TypedNode::Leaf(_) => None,
        }
    }

    /// Human-readable type name, as used in error messages
    pub fn type_name(&self) -> &str {
        match self {
            TypedNode::Leaf(word) => &word.class,
            TypedNode::Node(branch) => branch.kind.name(),
        }
    }

    /// Returns the branch if it has the expected kind
    pub fn expect_node(&self, expected: NodeKind) -> crate::Result<&Branch> {
        match self {
            TypedNode::Node(branch) if branch.kind == expected => Ok(branch),
            other => Err(crate::GlossError::mismatch(expected.name(), other.type_name())),
        }
    }
}

impl Serialize for TypedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedNode::Leaf(word) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", &word.class)?;
                map.serialize_entry("word", &word.text)?;
                map.end()
            }
            TypedNode::Node(branch) => {
                let place = match branch.kind {
                    NodeKind::Sumti(SumtiRole::Placed(place)) => Some(place),
                    _ => None,
                };
                let mut map = serializer.serialize_map(Some(2 + place.is_some() as usize))?;
                map.serialize_entry("type", branch.kind.name())?;
                map.serialize_entry("children", &branch.children)?;
                if let Some(place) = place {
                    map.serialize_entry("sumtiPlace", &place)?;
                }
                map.end()
            }
        }
    }
}
