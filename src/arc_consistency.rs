//! This module contains a crossword-specific implementation of the AC-3 algorithm. A pair of
//! crossing variables `(x, y)` is arc-consistent when every word left in `x`'s domain has at least
//! one word in `y`'s domain with the same letter in the shared cell. We keep revising arcs from a
//! FIFO work queue until nothing else can be eliminated or some domain is wiped out.

use bit_set::BitSet;
use std::collections::{HashSet, VecDeque};

use crate::domain::Domains;
use crate::grid::Grid;
use crate::{VariableId, WordId};

/// An ordered pair of crossing variables; revising it may remove words from the first.
pub type Arc = (VariableId, VariableId);

/// Interface implemented by anything whose domains the propagator can prune. `Domains` implements
/// it directly; the search wraps it so that every elimination lands on the trail.
pub trait ArcConsistencyAdapter {
    /// The words currently available to this variable.
    fn domain(&self, variable_id: VariableId) -> &BitSet;

    /// Remove a word from this variable's domain.
    fn eliminate(&mut self, variable_id: VariableId, word_id: WordId);

    /// Is this variable's domain empty?
    fn is_wiped_out(&self, variable_id: VariableId) -> bool;
}

impl ArcConsistencyAdapter for Domains {
    fn domain(&self, variable_id: VariableId) -> &BitSet {
        self.set(variable_id)
    }

    fn eliminate(&mut self, variable_id: VariableId, word_id: WordId) {
        self.remove(variable_id, word_id);
    }

    fn is_wiped_out(&self, variable_id: VariableId) -> bool {
        self.is_empty(variable_id)
    }
}

/// Result from a call to `establish_arc_consistency` that reached a fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencySuccess {
    /// How many words were removed across all domains.
    pub eliminations: usize,

    /// How many arcs were revised (popped from the queue).
    pub revisions: usize,
}

/// Result from a call to `establish_arc_consistency` that emptied a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub emptied_variable_id: VariableId,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// FIFO queue of arcs that doesn't hold the same arc twice.
#[derive(Debug, Default)]
struct ArcQueue {
    queue: VecDeque<Arc>,
    pending: HashSet<Arc>,
}

impl ArcQueue {
    fn enqueue(&mut self, arc: Arc) {
        if self.pending.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.pending.remove(&arc);
        Some(arc)
    }
}

/// Make `x` arc-consistent with `y`: remove every word from `x`'s domain that has no word in `y`'s
/// domain agreeing with it on the shared cell. Each candidate is checked on its own, and a word too
/// short to reach the shared cell has no letter there, so it is never supported and never supports
/// anything. Returns the number of words removed (zero if the two variables don't cross).
pub fn revise<Adapter: ArcConsistencyAdapter>(
    grid: &Grid,
    adapter: &mut Adapter,
    x: VariableId,
    y: VariableId,
) -> usize {
    let Some(overlap) = grid.overlap(x, y) else {
        return 0;
    };

    // The set of letters `y` can still put in the shared cell.
    let supported_glyphs: HashSet<char> = adapter
        .domain(y)
        .iter()
        .filter_map(|word_id| grid.word(word_id).glyphs.get(overlap.other_cell_idx).copied())
        .collect();

    let unsupported: Vec<WordId> = adapter
        .domain(x)
        .iter()
        .filter(|&word_id| {
            grid.word(word_id)
                .glyphs
                .get(overlap.cell_idx)
                .map_or(true, |glyph| !supported_glyphs.contains(glyph))
        })
        .collect();

    for &word_id in &unsupported {
        adapter.eliminate(x, word_id);
    }

    unsupported.len()
}

/// Run AC-3 starting from the given arcs, or from every arc in the grid if `arcs` is `None`.
/// Whenever revising `(x, y)` removes something from `x`, every arc `(z, x)` with `z != y` goes
/// back on the queue.
pub fn establish_arc_consistency<Adapter: ArcConsistencyAdapter>(
    grid: &Grid,
    adapter: &mut Adapter,
    arcs: Option<Vec<Arc>>,
) -> ArcConsistencyResult {
    let mut queue = ArcQueue::default();
    for arc in arcs.unwrap_or_else(|| grid.arcs()) {
        queue.enqueue(arc);
    }

    let mut success = ArcConsistencySuccess {
        eliminations: 0,
        revisions: 0,
    };

    while let Some((x, y)) = queue.pop_front() {
        success.revisions += 1;

        let removed = revise(grid, adapter, x, y);
        if removed == 0 {
            continue;
        }
        success.eliminations += removed;

        if adapter.is_wiped_out(x) {
            return Err(ArcConsistencyFailure {
                emptied_variable_id: x,
            });
        }

        for &z in grid.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    Ok(success)
}
