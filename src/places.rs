//! Sumti place numbering.
//!
//! Every `sentence` in the tree is walked once: its own children first, then
//! the children of its bridi tail, as a single sequence. Each plain sumti
//! becomes either a placed sumti carrying a [`Place`] or a modal sumti.

use tracing::trace;

use crate::tree::{Branch, NodeKind, Place, SumtiRole, TypedNode};
use crate::utils::{GlossError, OptionExt, Result};

/// Where the next untagged sumti goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Numbered(u8),
    /// Set by `fai`; holds until a numbered tag or a GIhA reset
    Fai,
}

/// Walk state for one sentence
#[derive(Debug)]
struct PlaceCounter {
    next: Cursor,
    tail_start: Cursor,
    modal_pending: bool,
}

impl PlaceCounter {
    fn new() -> Self {
        PlaceCounter {
            next: Cursor::Numbered(1),
            tail_start: Cursor::Numbered(1),
            modal_pending: false,
        }
    }

    fn enter_tail(&mut self) {
        self.tail_start = self.next;
    }

    fn visit(&mut self, node: &mut TypedNode) -> Result<()> {
        match node {
            TypedNode::Leaf(word) => match word.class.as_str() {
                "GIhA" => self.next = self.tail_start,
                "FA" => {
                    self.next = match Place::from_tag(&word.text) {
                        Some(Place::Fai) => Cursor::Fai,
                        Some(place) => Cursor::Numbered(place.number().unwrap_or(1)),
                        None => {
                            return Err(GlossError::Unsupported(format!(
                                "place tag {:?}",
                                word.text
                            )));
                        }
                    }
                }
                "BAI" | "FIhO" | "PU" => self.modal_pending = true,
                _ => {}
            },
            TypedNode::Node(branch) => match branch.kind {
                NodeKind::Sumti(SumtiRole::Unplaced) => {
                    branch.kind = NodeKind::Sumti(self.assign()?);
                    trace!(kind = %branch.kind, "numbered sumti");
                }
                NodeKind::Selbri if self.next == Cursor::Numbered(1) => {
                    self.next = Cursor::Numbered(2)
                }
                _ => {}
            },
        }
        Ok(())
    }

    fn assign(&mut self) -> Result<SumtiRole> {
        if self.modal_pending {
            self.modal_pending = false;
            return Ok(SumtiRole::Modal);
        }
        match self.next {
            Cursor::Fai => Ok(SumtiRole::Placed(Place::Fai)),
            Cursor::Numbered(number) => {
                let place = Place::from_number(number)
                    .ok_or_unsupported(|| format!("sumti in place {}", number))?;
                self.next = Cursor::Numbered(number + 1);
                Ok(SumtiRole::Placed(place))
            }
        }
    }
}

fn number_sentence(sentence: &mut Branch) -> Result<()> {
    let mut counter = PlaceCounter::new();
    for child in sentence.children.iter_mut() {
        match child {
            TypedNode::Node(tail) if tail.kind == NodeKind::BridiTail => {
                counter.enter_tail();
                for element in tail.children.iter_mut() {
                    counter.visit(element)?;
                }
            }
            other => counter.visit(other)?,
        }
    }
    Ok(())
}

/// Number the sumti of every sentence below `node`, nested ones included
pub fn number_places(node: &mut TypedNode) -> Result<()> {
    let TypedNode::Node(branch) = node else {
        return Ok(());
    };
    if branch.kind == NodeKind::Sentence {
        number_sentence(branch)?;
    }
    for child in branch.children.iter_mut() {
        number_places(child)?;
    }
    Ok(())
}
