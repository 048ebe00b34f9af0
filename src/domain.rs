use bit_set::BitSet;
use std::fmt::{Debug, Formatter};

use crate::grid::Grid;
use crate::{VariableId, WordId};

/// The live candidate words for every variable, stored as bit sets over `WordId` with a cached
/// size per variable.
#[derive(Clone)]
pub struct Domains {
    sets: Vec<BitSet>,
    sizes: Vec<usize>,
}

impl Debug for Domains {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Domains")
            .field("sizes", &self.sizes)
            .finish()
    }
}

impl Domains {
    /// Start every variable off with the full vocabulary.
    pub fn new(grid: &Grid) -> Domains {
        let word_count = grid.word_count();
        let full: BitSet = (0..word_count).collect();

        Domains {
            sets: (0..grid.variable_count()).map(|_| full.clone()).collect(),
            sizes: vec![word_count; grid.variable_count()],
        }
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.sets[variable_id].contains(word_id)
    }

    pub fn word_ids(&self, variable_id: VariableId) -> impl Iterator<Item = WordId> + '_ {
        self.sets[variable_id].iter()
    }

    pub fn set(&self, variable_id: VariableId) -> &BitSet {
        &self.sets[variable_id]
    }

    pub fn size(&self, variable_id: VariableId) -> usize {
        self.sizes[variable_id]
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.sizes[variable_id] == 0
    }

    /// The only remaining word for this variable, if it's down to one.
    pub fn single_word(&self, variable_id: VariableId) -> Option<WordId> {
        if self.sizes[variable_id] == 1 {
            self.sets[variable_id].iter().next()
        } else {
            None
        }
    }

    /// Remove a word from a variable's domain, returning whether it was present.
    pub fn remove(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        let removed = self.sets[variable_id].remove(word_id);
        if removed {
            self.sizes[variable_id] -= 1;
        }
        removed
    }

    /// Put a previously removed word back, returning whether it was absent.
    pub fn restore(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        let restored = self.sets[variable_id].insert(word_id);
        if restored {
            self.sizes[variable_id] += 1;
        }
        restored
    }

    /// Remove every word whose length doesn't match its variable's length. This only ever needs to
    /// run once, since the length constraint can't change. Returns false if any domain is left
    /// empty.
    pub fn enforce_node_consistency(&mut self, grid: &Grid) -> bool {
        for (variable_id, variable) in grid.variables().iter().enumerate() {
            let mismatched: Vec<WordId> = self
                .word_ids(variable_id)
                .filter(|&word_id| grid.word(word_id).len() != variable.length)
                .collect();

            for word_id in mismatched {
                self.remove(variable_id, word_id);
            }
        }

        (0..self.sets.len()).all(|variable_id| !self.is_empty(variable_id))
    }
}
