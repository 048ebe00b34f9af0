use thiserror::Error;

/// Problems with the cell mask handed to `Grid::new`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {row} has {found} cells but the grid is {expected} cells wide")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The two ways a solve can end without producing an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveFailure {
    /// Every branch of the search was exhausted (or pruning emptied a domain before search began).
    #[error("no assignment satisfies every constraint")]
    Unsatisfiable,

    /// The search visited the configured number of states without reaching an answer.
    #[error("search gave up after visiting {0} states")]
    ExhaustedStateLimit(u64),
}
