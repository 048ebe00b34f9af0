//! Fill a crossword grid from a word list by treating it as a constraint-satisfaction problem:
//! every slot is a variable, every word a candidate value, and crossing slots have to agree on
//! their shared letter. Solving runs node consistency, AC-3, and then a backtracking search that
//! maintains arc consistency as it goes.

pub mod arc_consistency;
pub mod backtracking_search;
pub mod domain;
pub mod error;
pub mod grid;

pub use backtracking_search::{
    solve, Choice, CrosswordSolver, SolveSuccess, SolverOptions, Statistics,
};
pub use domain::Domains;
pub use error::{GridError, SolveFailure};
pub use grid::{Direction, Grid, Overlap, Variable, Word};

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// Should we run extra checks on the search state and its results?
pub const CHECK_INVARIANTS: bool = cfg!(debug_assertions);

/// An identifier for a given slot, based on its index in the Grid's sorted `variables`.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the Grid's sorted, deduped `words`.
pub type WordId = usize;
