//! Reachability analysis over the instruction stream.
//!
//! The analysis walks the implicit control-flow graph of a program image,
//! starting at the entry word, and marks every word it can reach as code.
//! Words it never reaches are left as data. Each word is marked before its
//! successors are explored and is never explored twice, so the walk ends
//! after at most one first visit per word.

use std::ops::Range;

use crate::decoder::{ControlFlow, Decoder, Instruction};
use crate::encoding::address_to_index;

/// Number of words assumed reachable from an indexed jump (`BNNN`).
///
/// `V0` is unknown statically, so every offset from `0` to `127` words past
/// the base address is treated as a possible target.
pub const INDEXED_JUMP_SPAN: isize = 128;

/// Candidate successor indices of one instruction.
///
/// Indices may be negative or past the end of the image; the analysis drops
/// those.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Successors {
    /// A single successor.
    One(isize),
    /// Two successors, explored in order.
    Two(isize, isize),
    /// A contiguous run of successors.
    Span(Range<isize>),
}

impl Successors {
    /// Computes the successors of `instruction` stored at `index`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn of(instruction: Instruction, index: usize, load_address: u16) -> Self {
        let here = index as isize;
        match instruction.control_flow() {
            ControlFlow::FallThrough => Self::One(here + 1),
            ControlFlow::Jump(address) => Self::One(address_to_index(load_address, address)),
            ControlFlow::Call(address) => {
                Self::Two(address_to_index(load_address, address), here + 1)
            }
            ControlFlow::Skip => Self::Two(here + 1, here + 2),
            ControlFlow::IndexedJump(address) => {
                let base = address_to_index(load_address, address);
                Self::Span(base..base + INDEXED_JUMP_SPAN)
            }
        }
    }

    /// Iterates the candidate indices in exploration order.
    pub fn iter(&self) -> impl Iterator<Item = isize> {
        let (fixed, span) = match self {
            Self::One(a) => ([Some(*a), None], 0..0),
            Self::Two(a, b) => ([Some(*a), Some(*b)], 0..0),
            Self::Span(range) => ([None, None], range.clone()),
        };
        fixed.into_iter().flatten().chain(span)
    }
}

/// Per-word analysis state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitState {
    /// Not reached from the entry point; rendered as data.
    #[default]
    Unvisited,
    /// Reached from the entry point; rendered as code.
    Reachable,
}

/// Result of a reachability analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reachability {
    states: Vec<VisitState>,
    visit_order: Vec<usize>,
}

impl Reachability {
    /// Returns true if the word at `index` was reached.
    ///
    /// Out-of-range indices are reported as unreachable.
    #[must_use]
    pub fn is_reachable(&self, index: usize) -> bool {
        self.states.get(index) == Some(&VisitState::Reachable)
    }

    /// Returns the state of every word in index order.
    #[must_use]
    pub fn states(&self) -> &[VisitState] {
        &self.states
    }

    /// Returns the indices in the order they were first visited.
    #[must_use]
    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    /// Returns the number of words marked reachable.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.visit_order.len()
    }

    /// Returns the number of words covered by the analysis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the analysis covered no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn in_bounds(candidate: isize, len: usize) -> Option<usize> {
    usize::try_from(candidate).ok().filter(|index| *index < len)
}

/// Marks every word reachable from `entry`.
///
/// Runs a depth-first walk driven by an explicit stack. Successors of each
/// word are explored in the order given by [`Successors::iter`].
#[must_use]
pub fn analyze(words: &[u16], entry: usize, load_address: u16) -> Reachability {
    let mut states = vec![VisitState::Unvisited; words.len()];
    let mut visit_order = Vec::new();
    let mut stack: Vec<isize> = Vec::new();
    if let Ok(entry) = isize::try_from(entry) {
        stack.push(entry);
    }

    let mut dropped = 0usize;
    while let Some(candidate) = stack.pop() {
        let Some(index) = in_bounds(candidate, words.len()) else {
            dropped += 1;
            continue;
        };
        if states[index] == VisitState::Reachable {
            continue;
        }
        states[index] = VisitState::Reachable;
        visit_order.push(index);

        let successors = Successors::of(Decoder::decode(words[index]), index, load_address);
        let pushed_from = stack.len();
        stack.extend(successors.iter());
        stack[pushed_from..].reverse();
    }

    log::debug!(
        "reachability: {} of {} words are code, {dropped} out-of-range targets dropped",
        visit_order.len(),
        words.len()
    );

    Reachability {
        states,
        visit_order,
    }
}
