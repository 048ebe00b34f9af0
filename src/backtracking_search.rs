//! This module fills a grid with a depth-first backtracking search. Variables are picked with the
//! minimum-remaining-values heuristic (ties go to the variable with the most crossings, then the
//! lowest id), words are tried in least-constraining-value order, and every tentative choice is
//! followed by a round of inference: uniqueness pruning, AC-3 over the affected arcs, and automatic
//! assignment of any variable left with a single word.
//!
//! All mutations made below the root are recorded on a trail, so backtracking restores the domains
//! and the assignment exactly as they were before the failed choice.

use bit_set::BitSet;
use instant::{Duration, Instant};
use log::{debug, info, trace};
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::arc_consistency::{
    establish_arc_consistency, Arc, ArcConsistencyAdapter, ArcConsistencyFailure,
};
use crate::domain::Domains;
use crate::error::SolveFailure;
use crate::grid::{Grid, Overlap, Variable};
use crate::{VariableId, WordId, CHECK_INVARIANTS, MAX_SLOT_LENGTH};

/// Knobs for a single solve.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Give up after visiting this many search states. `None` means search until done.
    pub state_limit: Option<u64>,

    /// When ranking words by how many neighbor options they rule out, also count a neighbor option
    /// that is the same word (since uniqueness would rule it out too).
    pub count_duplicates_in_ordering: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            state_limit: None,
            count_duplicates_in_ordering: true,
        }
    }
}

/// A struct tracking statistics about the solving process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub inferred_assignments: u64,
    pub eliminations: u64,
    pub duration: Duration,
}

/// A struct recording a variable assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub variable_id: VariableId,
    pub word_id: WordId,
}

/// A complete, consistent assignment along with stats about how we found it.
#[derive(Debug)]
pub struct SolveSuccess {
    pub statistics: Statistics,

    /// One choice per variable, ordered by variable id.
    pub choices: Vec<Choice>,
}

impl SolveSuccess {
    /// Resolve the choices into a map from variable to word.
    pub fn words(&self, grid: &Grid) -> BTreeMap<Variable, String> {
        self.choices
            .iter()
            .map(|choice| {
                (
                    grid.variable(choice.variable_id).clone(),
                    grid.word(choice.word_id).string.clone(),
                )
            })
            .collect()
    }
}

/// A single reversible mutation made during search.
#[derive(Debug, Clone, Copy)]
enum TrailEntry {
    Elimination {
        variable_id: VariableId,
        word_id: WordId,
    },
    Assignment {
        variable_id: VariableId,
        inferred: bool,
    },
}

enum SearchOutcome {
    Solved,
    Exhausted,
    ExhaustedStateLimit,
}

/// The mutable side of a solve: domains, the partial assignment, and the trail that lets us roll
/// both back.
struct SearchState {
    domains: Domains,
    assignment: Vec<Option<WordId>>,
    used_words: BitSet,
    trail: Vec<TrailEntry>,
    eliminations: u64,
}

impl ArcConsistencyAdapter for SearchState {
    fn domain(&self, variable_id: VariableId) -> &BitSet {
        self.domains.set(variable_id)
    }

    fn eliminate(&mut self, variable_id: VariableId, word_id: WordId) {
        if self.domains.remove(variable_id, word_id) {
            self.trail.push(TrailEntry::Elimination {
                variable_id,
                word_id,
            });
            self.eliminations += 1;
        }
    }

    fn is_wiped_out(&self, variable_id: VariableId) -> bool {
        self.domains.is_empty(variable_id)
    }
}

impl SearchState {
    fn is_assigned(&self, variable_id: VariableId) -> bool {
        self.assignment[variable_id].is_some()
    }

    fn assign(&mut self, choice: Choice, inferred: bool) {
        if CHECK_INVARIANTS && self.is_assigned(choice.variable_id) {
            panic!("Assigning variable {} twice?", choice.variable_id);
        }

        self.assignment[choice.variable_id] = Some(choice.word_id);
        self.used_words.insert(choice.word_id);
        self.trail.push(TrailEntry::Assignment {
            variable_id: choice.variable_id,
            inferred,
        });
    }

    /// Pop and reverse every trail entry recorded after `mark`.
    fn undo_to(&mut self, mark: usize) {
        assert!(
            mark <= self.trail.len(),
            "Asked to undo to trail position {} but only {} entries were recorded",
            mark,
            self.trail.len(),
        );

        for entry in self.trail.drain(mark..).rev() {
            match entry {
                TrailEntry::Elimination {
                    variable_id,
                    word_id,
                } => {
                    self.domains.restore(variable_id, word_id);
                }
                TrailEntry::Assignment {
                    variable_id,
                    inferred,
                } => {
                    let word_id = self.assignment[variable_id].take().unwrap_or_else(|| {
                        panic!("Undoing an assignment for unassigned variable {}?", variable_id)
                    });
                    self.used_words.remove(word_id);
                    trace!(
                        "undid {} assignment of word {} to variable {}",
                        if inferred { "inferred" } else { "tentative" },
                        word_id,
                        variable_id,
                    );
                }
            }
        }
    }
}

/// A single solve attempt over a grid. The domain store lives as long as the solver, so it can be
/// inspected after `solve` returns.
pub struct CrosswordSolver<'a> {
    grid: &'a Grid,
    options: SolverOptions,
    state: SearchState,
    statistics: Statistics,
}

impl<'a> CrosswordSolver<'a> {
    pub fn new(grid: &'a Grid, options: &SolverOptions) -> CrosswordSolver<'a> {
        CrosswordSolver {
            grid,
            options: options.clone(),
            state: SearchState {
                domains: Domains::new(grid),
                assignment: vec![None; grid.variable_count()],
                used_words: BitSet::with_capacity(grid.word_count()),
                trail: vec![],
                eliminations: 0,
            },
            statistics: Statistics::default(),
        }
    }

    /// The current domain store. After a successful solve this reflects the pruning at the
    /// solution; after an unsatisfiable one it is back to the state following the pre-search
    /// passes.
    pub fn domains(&self) -> &Domains {
        &self.state.domains
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Enforce node consistency, then arc consistency, then search for a complete assignment.
    pub fn solve(&mut self) -> Result<SolveSuccess, SolveFailure> {
        let start = Instant::now();
        info!(
            "solving grid with {} variables and {} words",
            self.grid.variable_count(),
            self.grid.word_count(),
        );

        let outcome = if self.prune_before_search() {
            self.backtrack()
        } else {
            SearchOutcome::Exhausted
        };

        self.statistics.eliminations += self.state.eliminations;
        self.state.eliminations = 0;
        self.statistics.duration = start.elapsed();
        info!("search finished: {:?}", self.statistics);

        match outcome {
            SearchOutcome::Solved => {
                let choices: Vec<Choice> = self
                    .state
                    .assignment
                    .iter()
                    .enumerate()
                    .filter_map(|(variable_id, word_id)| {
                        word_id.map(|word_id| Choice {
                            variable_id,
                            word_id,
                        })
                    })
                    .collect();

                if CHECK_INVARIANTS && !choices_are_consistent(self.grid, &choices) {
                    panic!("Search produced an inconsistent assignment: {:?}", choices);
                }

                Ok(SolveSuccess {
                    statistics: self.statistics.clone(),
                    choices,
                })
            }
            SearchOutcome::Exhausted => Err(SolveFailure::Unsatisfiable),
            SearchOutcome::ExhaustedStateLimit => Err(SolveFailure::ExhaustedStateLimit(
                self.statistics.states,
            )),
        }
    }

    /// Run node consistency and a full AC-3 pass directly on the domain store. These eliminations
    /// hold regardless of any choice, so they stay off the trail. Returns false if the problem is
    /// already unsatisfiable.
    fn prune_before_search(&mut self) -> bool {
        let grid = self.grid;
        let total_size = |domains: &Domains| -> u64 {
            (0..grid.variable_count())
                .map(|variable_id| domains.size(variable_id) as u64)
                .sum()
        };

        let size_before = total_size(&self.state.domains);
        let node_consistent = self.state.domains.enforce_node_consistency(grid);
        self.statistics.eliminations += size_before - total_size(&self.state.domains);

        if !node_consistent {
            debug!("a variable has no words of the right length");
            return false;
        }

        match establish_arc_consistency(grid, &mut self.state.domains, None) {
            Ok(success) => {
                debug!(
                    "initial arc consistency removed {} words in {} revisions",
                    success.eliminations, success.revisions,
                );
                self.statistics.eliminations += success.eliminations as u64;
                true
            }
            Err(ArcConsistencyFailure {
                emptied_variable_id,
            }) => {
                debug!(
                    "initial arc consistency emptied variable {:?}",
                    grid.variable(emptied_variable_id),
                );
                false
            }
        }
    }

    /// Recursive step: pick a variable, try each word for it, and recurse.
    fn backtrack(&mut self) -> SearchOutcome {
        let Some(variable_id) = self.select_unassigned_variable() else {
            return SearchOutcome::Solved;
        };

        if let Some(state_limit) = self.options.state_limit {
            if self.statistics.states >= state_limit {
                return SearchOutcome::ExhaustedStateLimit;
            }
        }
        self.statistics.states += 1;

        trace!(
            "state {}: filling {:?} ({} options)",
            self.statistics.states,
            self.grid.variable(variable_id),
            self.state.domains.size(variable_id),
        );

        for word_id in self.order_domain_values(variable_id) {
            if !self.is_consistent(variable_id, word_id) {
                continue;
            }

            let mark = self.state.trail.len();
            let choice = Choice {
                variable_id,
                word_id,
            };
            self.state.assign(choice, false);

            if self.infer(choice) {
                match self.backtrack() {
                    SearchOutcome::Exhausted => {}
                    outcome => return outcome,
                }
            }

            self.state.undo_to(mark);
            self.statistics.backtracks += 1;
        }

        SearchOutcome::Exhausted
    }

    /// Choose the unassigned variable with the fewest remaining words, preferring more crossings
    /// and then lower ids on ties. Returns `None` once everything is assigned.
    fn select_unassigned_variable(&self) -> Option<VariableId> {
        (0..self.grid.variable_count())
            .filter(|&variable_id| !self.state.is_assigned(variable_id))
            .min_by_key(|&variable_id| {
                (
                    self.state.domains.size(variable_id),
                    Reverse(self.grid.neighbors(variable_id).len()),
                    variable_id,
                )
            })
    }

    /// List the variable's remaining words, ordered by how many options each would rule out among
    /// unassigned neighbors (fewest first, then by word id).
    fn order_domain_values(&self, variable_id: VariableId) -> Vec<WordId> {
        let domains = &self.state.domains;

        // For each unassigned neighbor, count how many of its options put each glyph in the shared
        // cell. An option is ruled out unless it matches our glyph there.
        let neighbors: SmallVec<[(VariableId, Overlap, HashMap<char, usize>); MAX_SLOT_LENGTH]> =
            self.grid
                .neighbors(variable_id)
                .iter()
                .filter(|&&neighbor_id| !self.state.is_assigned(neighbor_id))
                .filter_map(|&neighbor_id| {
                    let overlap = self.grid.overlap(variable_id, neighbor_id)?;
                    let mut glyph_counts: HashMap<char, usize> = HashMap::new();
                    for neighbor_word_id in domains.word_ids(neighbor_id) {
                        let glyph = self.grid.word(neighbor_word_id).glyphs[overlap.other_cell_idx];
                        *glyph_counts.entry(glyph).or_insert(0) += 1;
                    }
                    Some((neighbor_id, overlap, glyph_counts))
                })
                .collect();

        let mut ranked: Vec<(usize, WordId)> = domains
            .word_ids(variable_id)
            .map(|word_id| {
                let word = self.grid.word(word_id);

                let eliminations: usize = neighbors
                    .iter()
                    .map(|(neighbor_id, overlap, glyph_counts)| {
                        let glyph = word.glyphs[overlap.cell_idx];
                        let mismatched = domains.size(*neighbor_id)
                            - glyph_counts.get(&glyph).copied().unwrap_or(0);

                        // The same word in the neighbor is only counted here if the shared glyph
                        // didn't already rule it out.
                        let duplicate = self.options.count_duplicates_in_ordering
                            && domains.contains(*neighbor_id, word_id)
                            && word.glyphs[overlap.other_cell_idx] == glyph;

                        mismatched + usize::from(duplicate)
                    })
                    .sum();

                (eliminations, word_id)
            })
            .collect();

        ranked.sort_unstable();
        ranked.into_iter().map(|(_, word_id)| word_id).collect()
    }

    /// Would assigning this word keep the assignment consistent? Checks length, uniqueness against
    /// every assigned word, and agreement with every assigned neighbor.
    fn is_consistent(&self, variable_id: VariableId, word_id: WordId) -> bool {
        let word = self.grid.word(word_id);

        if word.len() != self.grid.variable(variable_id).length {
            return false;
        }

        if self.state.used_words.contains(word_id) {
            return false;
        }

        self.grid.neighbors(variable_id).iter().all(|&neighbor_id| {
            match (
                self.state.assignment[neighbor_id],
                self.grid.overlap(variable_id, neighbor_id),
            ) {
                (Some(neighbor_word_id), Some(overlap)) => {
                    word.glyphs[overlap.cell_idx]
                        == self.grid.word(neighbor_word_id).glyphs[overlap.other_cell_idx]
                }
                _ => true,
            }
        })
    }

    /// Propagate the consequences of a choice that was just assigned. Everything recorded here goes
    /// on the trail, so the caller can undo it along with the choice. Returns false if some
    /// variable is left without options.
    fn infer(&mut self, choice: Choice) -> bool {
        let grid = self.grid;
        let mut pending: Vec<Choice> = vec![choice];

        while let Some(Choice {
            variable_id,
            word_id,
        }) = pending.pop()
        {
            // The assigned variable's domain is just its word from here on.
            let others: Vec<WordId> = self
                .state
                .domains
                .word_ids(variable_id)
                .filter(|&other_word_id| other_word_id != word_id)
                .collect();
            for other_word_id in others {
                self.state.eliminate(variable_id, other_word_id);
            }

            let mut arcs: Vec<Arc> = grid
                .neighbors(variable_id)
                .iter()
                .filter(|&&neighbor_id| !self.state.is_assigned(neighbor_id))
                .map(|&neighbor_id| (neighbor_id, variable_id))
                .collect();

            // No other variable can use this word, and anything crossing a variable that just lost
            // it needs another look.
            for other_id in 0..grid.variable_count() {
                if self.state.is_assigned(other_id)
                    || !self.state.domains.contains(other_id, word_id)
                {
                    continue;
                }

                self.state.eliminate(other_id, word_id);
                if self.state.domains.is_empty(other_id) {
                    trace!("uniqueness emptied {:?}", grid.variable(other_id));
                    return false;
                }
                arcs.extend(grid.neighbors(other_id).iter().map(|&z| (z, other_id)));
            }

            if let Err(ArcConsistencyFailure {
                emptied_variable_id,
            }) = establish_arc_consistency(grid, &mut self.state, Some(arcs))
            {
                trace!(
                    "arc consistency emptied {:?}",
                    grid.variable(emptied_variable_id)
                );
                return false;
            }

            // Anything left with a single option gets it now.
            for other_id in 0..grid.variable_count() {
                if self.state.is_assigned(other_id) {
                    continue;
                }
                let Some(forced_word_id) = self.state.domains.single_word(other_id) else {
                    continue;
                };
                if !self.is_consistent(other_id, forced_word_id) {
                    return false;
                }

                let forced = Choice {
                    variable_id: other_id,
                    word_id: forced_word_id,
                };
                self.state.assign(forced, true);
                self.statistics.inferred_assignments += 1;
                pending.push(forced);
            }
        }

        true
    }
}

/// Check every constraint on a full set of choices: lengths, uniqueness, and crossings.
pub fn choices_are_consistent(grid: &Grid, choices: &[Choice]) -> bool {
    let mut words_by_variable: Vec<Option<WordId>> = vec![None; grid.variable_count()];
    let mut used_words = BitSet::with_capacity(grid.word_count());

    for choice in choices {
        if grid.word(choice.word_id).len() != grid.variable(choice.variable_id).length {
            return false;
        }
        if !used_words.insert(choice.word_id) {
            return false;
        }
        words_by_variable[choice.variable_id] = Some(choice.word_id);
    }

    grid.arcs().into_iter().all(|(a, b)| {
        match (words_by_variable[a], words_by_variable[b], grid.overlap(a, b)) {
            (Some(a_word_id), Some(b_word_id), Some(overlap)) => {
                grid.word(a_word_id).glyphs[overlap.cell_idx]
                    == grid.word(b_word_id).glyphs[overlap.other_cell_idx]
            }
            _ => true,
        }
    })
}

/// Search for a complete assignment for the given grid.
pub fn solve(grid: &Grid, options: &SolverOptions) -> Result<SolveSuccess, SolveFailure> {
    CrosswordSolver::new(grid, options).solve()
}

#[cfg(test)]
mod tests {
    use crate::backtracking_search::{
        choices_are_consistent, solve, Choice, CrosswordSolver, SolverOptions,
    };
    use crate::grid::Grid;
    use crate::SolveFailure;

    fn word_id(grid: &Grid, word: &str) -> usize {
        grid.words().iter().position(|w| w.string == word).unwrap()
    }

    fn word_strings(grid: &Grid, word_ids: &[usize]) -> Vec<String> {
        word_ids
            .iter()
            .map(|&word_id| grid.word(word_id).string.clone())
            .collect()
    }

    /// #...#
    /// .##.#
    /// .....
    /// .##.#
    fn lattice_grid(words: &[&str]) -> Grid {
        Grid::from_template(
            "
            #...#
            .##.#
            .....
            .##.#
            ",
            words,
        )
        .unwrap()
    }

    #[test]
    fn test_mrv_picks_smallest_domain() {
        let grid = lattice_grid(&["ACE", "ARE", "CAT", "CRATE", "ERAS", "RATS"]);
        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        solver.state.domains.enforce_node_consistency(&grid);

        // The lone 5-letter entry only has one option.
        assert_eq!(solver.select_unassigned_variable(), Some(3));
    }

    #[test]
    fn test_degree_breaks_mrv_ties() {
        // Two options for every length, so only the crossing counts differ.
        let grid = lattice_grid(&["ACE", "ARE", "ERAS", "RATS", "CRATE", "TRACE"]);
        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        solver.state.domains.enforce_node_consistency(&grid);

        // Variables 1 and 3 both cross two entries; the lower id wins.
        assert_eq!(solver.select_unassigned_variable(), Some(1));

        let choice = Choice {
            variable_id: 1,
            word_id: word_id(&grid, "RATS"),
        };
        solver.state.assign(choice, false);
        assert_eq!(solver.select_unassigned_variable(), Some(3));
    }

    #[test]
    fn test_least_constraining_value_order() {
        // The across entry's last cell is the down entry's first cell.
        let grid = Grid::from_template(
            "
            ...
            ##.
            ##.
            ",
            ["TAT", "TOE", "XAT"],
        )
        .unwrap();

        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        solver.state.domains.enforce_node_consistency(&grid);
        let ordered = solver.order_domain_values(0);
        assert_eq!(word_strings(&grid, &ordered), vec!["XAT", "TAT", "TOE"]);

        let options = SolverOptions {
            count_duplicates_in_ordering: false,
            ..SolverOptions::default()
        };
        let mut solver = CrosswordSolver::new(&grid, &options);
        solver.state.domains.enforce_node_consistency(&grid);
        let ordered = solver.order_domain_values(0);
        assert_eq!(word_strings(&grid, &ordered), vec!["TAT", "XAT", "TOE"]);
    }

    #[test]
    fn test_consistency_check() {
        let grid = Grid::from_template(
            "
            ...
            .##
            .##
            ",
            ["CAR", "CAT", "DOG", "CATS"],
        )
        .unwrap();
        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        let choice = Choice {
            variable_id: 0,
            word_id: word_id(&grid, "CAT"),
        };
        solver.state.assign(choice, false);

        assert!(solver.is_consistent(1, word_id(&grid, "CAR")));
        assert!(!solver.is_consistent(1, word_id(&grid, "CAT")), "duplicate word");
        assert!(!solver.is_consistent(1, word_id(&grid, "DOG")), "crossing mismatch");
        assert!(!solver.is_consistent(1, word_id(&grid, "CATS")), "wrong length");
    }

    #[test]
    fn test_inference_assigns_forced_words() {
        let grid = lattice_grid(&["ACE", "ARE", "EAR", "ERAS", "RATS", "CRATE", "TRACE"]);
        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        solver.state.domains.enforce_node_consistency(&grid);

        let choice = Choice {
            variable_id: 3,
            word_id: word_id(&grid, "CRATE"),
        };
        solver.state.assign(choice, false);
        assert!(solver.infer(choice));

        // CRATE pins the 4-letter down entry to RATS, which pins the top entry to EAR, and the
        // short down entry has to be ACE.
        let assigned: Vec<Option<String>> = solver
            .state
            .assignment
            .iter()
            .map(|word_id| word_id.map(|word_id| grid.word(word_id).string.clone()))
            .collect();
        assert_eq!(
            assigned,
            vec![
                Some("EAR".to_string()),
                Some("RATS".to_string()),
                Some("ACE".to_string()),
                Some("CRATE".to_string()),
            ]
        );
        assert_eq!(solver.statistics.inferred_assignments, 3);
    }

    #[test]
    fn test_inference_detects_dead_end() {
        let grid = Grid::from_template(
            "
            ...
            .##
            .##
            ",
            ["CAT", "DOG"],
        )
        .unwrap();
        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        solver.state.domains.enforce_node_consistency(&grid);

        let choice = Choice {
            variable_id: 0,
            word_id: word_id(&grid, "CAT"),
        };
        solver.state.assign(choice, false);
        assert!(!solver.infer(choice));
    }

    #[test]
    fn test_undo_restores_domains_and_assignment() {
        let grid = lattice_grid(&["ACE", "ARE", "EAR", "ETA", "EATS", "RATS", "CRATE", "TRACE"]);
        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        assert!(solver.prune_before_search());
        assert_eq!(solver.state.domains.size(0), 3);
        assert_eq!(solver.state.domains.size(1), 2);

        let before = solver.state.domains.clone();
        let mark = solver.state.trail.len();

        let choice = Choice {
            variable_id: 0,
            word_id: word_id(&grid, "EAR"),
        };
        solver.state.assign(choice, false);
        assert!(solver.infer(choice));
        assert!(solver.state.trail.len() > mark);

        solver.state.undo_to(mark);

        assert_eq!(solver.state.trail.len(), mark);
        assert!(solver.state.assignment.iter().all(Option::is_none));
        assert!(solver.state.used_words.is_empty());
        for variable_id in 0..grid.variable_count() {
            assert_eq!(solver.state.domains.set(variable_id), before.set(variable_id));
            assert_eq!(solver.state.domains.size(variable_id), before.size(variable_id));
        }
    }

    #[test]
    #[should_panic]
    fn test_undo_past_start_of_trail_panics() {
        let grid = Grid::from_template("...", ["CAT"]).unwrap();
        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        solver.state.undo_to(1);
    }

    #[test]
    fn test_search_prefers_least_constraining_word() {
        // After pruning, AAA and CAT are left for the across entry. AAA would knock itself out of
        // the down entry, so CAT goes first.
        let grid = Grid::from_template(
            "
            ...
            #.#
            #.#
            ",
            ["AAA", "AOA", "CAT", "COT"],
        )
        .unwrap();

        let result = solve(&grid, &SolverOptions::default()).unwrap();

        assert!(choices_are_consistent(&grid, &result.choices));
        let words = result.words(&grid);
        assert_eq!(words.values().collect::<Vec<_>>(), vec!["CAT", "AAA"]);
        assert_eq!(result.statistics.backtracks, 0);
    }

    #[test]
    fn test_search_exhausts_when_words_run_out() {
        // Three separate entries but only two words.
        let grid = Grid::from_template(
            "
            ...
            ###
            ...
            ###
            ...
            ",
            ["CAT", "DOG"],
        )
        .unwrap();

        let mut solver = CrosswordSolver::new(&grid, &SolverOptions::default());
        assert_eq!(solver.solve().unwrap_err(), SolveFailure::Unsatisfiable);
        assert_eq!(solver.statistics().states, 1);
        assert_eq!(solver.statistics().backtracks, 2);
        assert!(solver.state.trail.is_empty());
    }

    #[test]
    fn test_state_limit_is_reported_separately() {
        let grid = lattice_grid(&[
            "ACE", "ARE", "CAT", "EAR", "ERAS", "ETAS", "RATS", "CRATE", "TRACE",
        ]);
        let options = SolverOptions {
            state_limit: Some(0),
            ..SolverOptions::default()
        };

        let mut solver = CrosswordSolver::new(&grid, &options);
        assert_eq!(solver.solve().unwrap_err(), SolveFailure::ExhaustedStateLimit(0));
        assert_eq!(solver.statistics().states, 0);

        let options = SolverOptions {
            state_limit: Some(100),
            ..SolverOptions::default()
        };
        assert!(solve(&grid, &options).is_ok());
    }

    #[test]
    fn test_choices_are_consistent() {
        let grid = Grid::from_template(
            "
            ...
            .##
            .##
            ",
            ["CAR", "CAT", "DOG"],
        )
        .unwrap();
        let choice = |variable_id, word| Choice { variable_id, word_id: word_id(&grid, word) };

        assert!(choices_are_consistent(&grid, &[choice(0, "CAR"), choice(1, "CAT")]));
        assert!(!choices_are_consistent(&grid, &[choice(0, "CAT"), choice(1, "CAT")]));
        assert!(!choices_are_consistent(&grid, &[choice(0, "CAT"), choice(1, "DOG")]));
    }
}
