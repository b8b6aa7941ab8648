//! jbo-english renders Lojban parse trees as English sentences.
//!
//! The input is the nested-array tree produced by the camxes parser. It is
//! normalized into a typed tree, its sumti are numbered by place, and the
//! result is rendered against a [`Lexicon`] of gismu conjugations.
//!
//! # Example
//!
//! ```rust
//! use jbo_english::{Lexicon, NodeKind, Place, SumtiKind, SumtiRole, Translator, TypedNode};
//!
//! let pronoun = |word: &str, place| {
//!     TypedNode::node(
//!         NodeKind::Sumti(SumtiRole::Placed(place)),
//!         vec![TypedNode::node(
//!             NodeKind::SumtiForm(SumtiKind::Sumkahi),
//!             vec![TypedNode::leaf("KOhA", word)],
//!         )],
//!     )
//! };
//!
//! // mi tavla do
//! let text = TypedNode::node(
//!     NodeKind::Text,
//!     vec![TypedNode::node(
//!         NodeKind::Sentence,
//!         vec![
//!             pronoun("mi", Place::X1),
//!             TypedNode::node(
//!                 NodeKind::BridiTail,
//!                 vec![
//!                     TypedNode::node(NodeKind::Selbri, vec![TypedNode::leaf("gismu", "tavla")]),
//!                     pronoun("do", Place::X2),
//!                 ],
//!             ),
//!         ],
//!     )],
//! );
//!
//! let translator = Translator::new(Lexicon::builtin());
//! assert_eq!(translator.text_to_english(&text).unwrap(), "I talk to you.");
//! ```

pub mod generator;
pub mod lexicon;
pub mod normalize;
pub mod places;
pub mod tree;
pub mod utils;

pub use generator::{Translator, TranslatorConfig};
pub use lexicon::{Conjugation, Declension, FiniteForm, Lexicon, LexiconBuilder, VerbTable};
pub use normalize::{annotate, normalize};
pub use places::number_places;
pub use tree::{NodeKind, Place, RawNode, SumtiKind, SumtiRole, TypedNode};
pub use utils::{GlossError, Result};
