use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use crate::error::GridError;
use crate::{VariableId, WordId, MAX_SLOT_LENGTH};

/// Zero-indexed (row, column) coords for a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// A slot in the grid: a maximal run of open cells, at least two long, in one direction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    /// Generate the coords for each cell of this variable.
    pub fn cell_coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| match self.direction {
            Direction::Across => (self.row, self.col + cell_idx),
            Direction::Down => (self.row + cell_idx, self.col),
        })
    }
}

/// The shared cell between two crossing variables: `cell_idx` is the offset of that cell within
/// the first variable, `other_cell_idx` its offset within the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub cell_idx: usize,
    pub other_cell_idx: usize,
}

/// A candidate word, with its chars split out so that we can index them by cell.
#[derive(Debug, Clone)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let glyphs = string.chars().collect();
        Word { string, glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The static side of a crossword: cell mask, derived variables, the crossings between them, and
/// the vocabulary. Nothing in here changes once it's built.
pub struct Grid {
    pub width: usize,
    pub height: usize,
    variables: Vec<Variable>,
    words: Vec<Word>,

    /// Row-major `variables.len()` x `variables.len()` matrix of crossings.
    overlaps: Vec<Option<Overlap>>,

    /// For each variable, the ids of the variables crossing it, ascending.
    neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>>,
}

impl Debug for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("variables", &self.variables)
            .field("words", &format!("({} entries)", self.words.len()))
            .finish()
    }
}

impl Grid {
    /// Build a grid from a rectangular open/blocked mask (`true` means open) and a vocabulary.
    pub fn new<I, S>(cells: Vec<Vec<bool>>, words: I) -> Result<Grid, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let height = cells.len();
        let width = cells.first().map_or(0, |row| row.len());

        if let Some((row, found)) = cells
            .iter()
            .map(|cells_in_row| cells_in_row.len())
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridError::NonRectangular {
                row,
                expected: width,
                found,
            });
        }

        let variables = build_variables(&cells, width, height);
        let (overlaps, neighbors) = build_overlaps(&variables);

        Ok(Grid {
            width,
            height,
            variables,
            words: normalize_words(words),
            overlaps,
            neighbors,
        })
    }

    /// Build a grid from a string template, with `#` representing blocks and anything else
    /// representing an open cell. Blank lines and surrounding whitespace are ignored.
    pub fn from_template<I, S>(template: &str, words: I) -> Result<Grid, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<Vec<bool>> = template
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|cell| cell != '#').collect())
            .collect();

        Grid::new(cells, words)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Look up the id of a variable by value.
    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.variables.binary_search(variable).ok()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The crossing between `a` and `b`, expressed from `a`'s point of view.
    pub fn overlap(&self, a: VariableId, b: VariableId) -> Option<Overlap> {
        self.overlaps[a * self.variables.len() + b]
    }

    pub fn neighbors(&self, variable_id: VariableId) -> &[VariableId] {
        &self.neighbors[variable_id]
    }

    /// Every ordered pair of variables with a defined overlap.
    pub fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(x, neighbors)| neighbors.iter().map(move |&y| (x, y)))
            .collect()
    }
}

/// Scan rows and then columns for maximal runs of open cells, returning one variable per run of
/// length two or more, sorted.
fn build_variables(cells: &[Vec<bool>], width: usize, height: usize) -> Vec<Variable> {
    let mut variables = vec![];

    let mut push_runs = |direction: Direction, outer: usize, inner: usize| {
        for line in 0..outer {
            let mut run_start: Option<usize> = None;

            for pos in 0..=inner {
                let open = pos < inner
                    && match direction {
                        Direction::Across => cells[line][pos],
                        Direction::Down => cells[pos][line],
                    };

                match (open, run_start) {
                    (true, None) => run_start = Some(pos),
                    (false, Some(start)) => {
                        if pos - start > 1 {
                            let (row, col) = match direction {
                                Direction::Across => (line, start),
                                Direction::Down => (start, line),
                            };
                            variables.push(Variable {
                                row,
                                col,
                                direction,
                                length: pos - start,
                            });
                        }
                        run_start = None;
                    }
                    _ => {}
                }
            }
        }
    };

    push_runs(Direction::Across, height, width);
    push_runs(Direction::Down, width, height);

    variables.sort();
    variables
}

/// Work out which variables cross which by mapping each cell to the variables passing through it.
/// Across and down runs can share at most one cell, so each crossing cell has exactly two entries.
fn build_overlaps(
    variables: &[Variable],
) -> (
    Vec<Option<Overlap>>,
    Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>>,
) {
    let count = variables.len();

    // (variable id, cell index within variable)
    let mut entries_by_loc: HashMap<GridCoord, SmallVec<[(VariableId, usize); 2]>> =
        HashMap::new();

    for (variable_id, variable) in variables.iter().enumerate() {
        for (cell_idx, loc) in variable.cell_coords().enumerate() {
            entries_by_loc
                .entry(loc)
                .or_default()
                .push((variable_id, cell_idx));
        }
    }

    let mut overlaps: Vec<Option<Overlap>> = vec![None; count * count];
    let mut neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>> =
        (0..count).map(|_| SmallVec::new()).collect();

    for entries in entries_by_loc.values() {
        if let [(a, a_cell), (b, b_cell)] = entries[..] {
            overlaps[a * count + b] = Some(Overlap {
                cell_idx: a_cell,
                other_cell_idx: b_cell,
            });
            overlaps[b * count + a] = Some(Overlap {
                cell_idx: b_cell,
                other_cell_idx: a_cell,
            });
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
    }

    for variable_neighbors in &mut neighbors {
        variable_neighbors.sort_unstable();
    }

    (overlaps, neighbors)
}

/// Drop empty entries, then dedupe and sort the vocabulary so that word ids follow lexicographic
/// order. Words are otherwise kept exactly as given.
fn normalize_words<I, S>(words: I) -> Vec<Word>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut strings: Vec<String> = words
        .into_iter()
        .map(|word| word.as_ref().to_string())
        .filter(|word| !word.is_empty())
        .collect();

    strings.sort();
    strings.dedup();

    strings.into_iter().map(Word::new).collect()
}
