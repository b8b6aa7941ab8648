//! Turns a raw camxes tree into a typed tree.
//!
//! Three pure stages, each rebuilding the tree: morphology joining collapses
//! words spelled out letter by letter into single leaves, whitespace pruning
//! drops `spaces` branches, and simplification maps the labels we care about
//! to [`NodeKind`]s while splicing every other grammar grouping away.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::places::number_places;
use crate::tree::{NodeKind, RawNode, SumtiKind, SumtiRole, TypedNode};
use crate::utils::{GlossError, Result};

static SELMAHO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[IUBCDFGJKLMNPRSTVXZ]?([AEIOUY]|(AI|EI|OI|AU))(h([AEIOUY]|(AI|EI|OI|AU)))*$")
        .expect("selma'o pattern is valid")
});

const WORD_LABELS: [&str; 5] = ["cmevla", "gismu", "lujvo", "fuhivla", "initial_spaces"];
const WHITESPACE_LABELS: [&str; 2] = ["spaces", "initial_spaces"];

/// Whether `label` names a selma'o (word class) such as `KOhA` or `FIhO`
pub fn is_selmaho(label: &str) -> bool {
    SELMAHO.is_match(label)
}

fn is_atomic(label: &str) -> bool {
    WORD_LABELS.contains(&label) || is_selmaho(label)
}

/// Concatenate every terminal below `items`, skipping branch labels
fn join_terminals(items: &[RawNode]) -> String {
    let body = match items.first() {
        Some(RawNode::Leaf(_)) => &items[1..],
        _ => items,
    };
    body.iter()
        .map(|item| match item {
            RawNode::Leaf(s) => s.clone(),
            RawNode::Branch(inner) => join_terminals(inner),
        })
        .collect()
}

/// Collapse every word-level branch into a `[label, word]` terminal pair
pub fn join_morphology(node: &RawNode) -> RawNode {
    let items = match node {
        RawNode::Leaf(_) => return node.clone(),
        RawNode::Branch(items) => items,
    };
    match items.first() {
        Some(RawNode::Leaf(label)) if is_atomic(label) => {
            RawNode::terminal(label, &join_terminals(items))
        }
        _ => RawNode::Branch(items.iter().map(join_morphology).collect()),
    }
}

/// Remove whitespace branches; `None` when `node` itself is whitespace
pub fn prune_whitespace(node: &RawNode) -> Option<RawNode> {
    match node {
        RawNode::Leaf(_) => Some(node.clone()),
        RawNode::Branch(items) => {
            if node.label().is_some_and(|l| WHITESPACE_LABELS.contains(&l)) {
                return None;
            }
            Some(RawNode::Branch(
                items.iter().filter_map(prune_whitespace).collect(),
            ))
        }
    }
}

/// Picks the sumti sub-kind from the first child of a `sumti_6` branch
fn sumti_kind(children: &[RawNode]) -> SumtiKind {
    let Some(first) = children.first() else {
        return SumtiKind::Unknown;
    };
    match first.label() {
        Some("ZO_clause") => SumtiKind::OneWordQuote,
        Some("ZOI_clause") => SumtiKind::NonLojbanQuote,
        Some("LOhU_clause") => SumtiKind::UngrammaticalQuote,
        Some("lerfu_string") => SumtiKind::Letterals,
        Some("LU_clause") => SumtiKind::GrammaticalQuote,
        Some("KOhA_clause") => SumtiKind::Sumkahi,
        Some("LA_clause") => SumtiKind::NameOrNameDescription,
        Some("LE_clause") => SumtiKind::Description,
        Some("li_clause") => SumtiKind::Number,
        Some(_) => SumtiKind::Unknown,
        // unlabelled group: LAhE / NAhE BO open a nested sequence
        None => match first {
            RawNode::Branch(inner) => match inner.first().and_then(RawNode::label) {
                Some("LAhE_clause") => SumtiKind::Reference,
                Some("NAhE_clause") => SumtiKind::Negated,
                _ => SumtiKind::Unknown,
            },
            RawNode::Leaf(_) => SumtiKind::Unknown,
        },
    }
}

fn simplification_rule(label: &str, children: &[RawNode]) -> Option<NodeKind> {
    let kind = match label {
        "text" => NodeKind::Text,
        "free" => NodeKind::FreeModifier,
        "sentence" => NodeKind::Sentence,
        "prenex" => NodeKind::Prenex,
        "bridi_tail" => NodeKind::BridiTail,
        "selbri" => NodeKind::Selbri,
        "sumti" => NodeKind::Sumti(SumtiRole::Unplaced),
        "sumti_6" => NodeKind::SumtiForm(sumti_kind(children)),
        "relative_clause" => NodeKind::RelativeClause,
        _ => return None,
    };
    Some(kind)
}

/// Simplify one raw node into zero or more typed siblings
pub fn simplify(node: &RawNode) -> Result<Vec<TypedNode>> {
    if let Some((label, word)) = node.as_terminal() {
        return Ok(vec![TypedNode::leaf(label, word)]);
    }
    let items = match node {
        RawNode::Branch(items) => items,
        // quote bodies and other non-atomic text carry no grammar
        RawNode::Leaf(s) => {
            trace!(text = %s, "dropping bare string");
            return Ok(vec![]);
        }
    };
    match items.first() {
        Some(RawNode::Leaf(label)) => {
            let children = &items[1..];
            match simplification_rule(label, children) {
                Some(kind) => Ok(vec![TypedNode::node(kind, simplify_all(children)?)]),
                None => {
                    trace!(label = %label, "splicing grammar grouping");
                    simplify_all(children)
                }
            }
        }
        _ => simplify_all(items),
    }
}

fn simplify_all(items: &[RawNode]) -> Result<Vec<TypedNode>> {
    let mut result = Vec::new();
    for item in items {
        result.extend(simplify(item)?);
    }
    Ok(result)
}

/// Run joining, pruning and simplification; the result is a single `text` node
pub fn normalize(raw: &RawNode) -> Result<TypedNode> {
    let joined = join_morphology(raw);
    let pruned = prune_whitespace(&joined)
        .ok_or_else(|| GlossError::mismatch("text", "whitespace"))?;
    let mut nodes = simplify(&pruned)?;
    debug!(roots = nodes.len(), "simplified parse tree");

    match nodes.pop() {
        Some(root) if nodes.is_empty() => {
            root.expect_node(NodeKind::Text)?;
            Ok(root)
        }
        Some(_) => Err(GlossError::mismatch(
            "single text root",
            format!("{} roots", nodes.len() + 1),
        )),
        None => Err(GlossError::mismatch("text", "empty tree")),
    }
}

/// Normalize `raw` and number the sumti of every sentence in it
pub fn annotate(raw: &RawNode) -> Result<TypedNode> {
    let mut tree = normalize(raw)?;
    number_places(&mut tree)?;
    Ok(tree)
}
