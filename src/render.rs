//! `render` — turns a solved puzzle into text.
//!
//! Kept outside the solver on purpose: the core returns a [`Solution`] and
//! exposes no formatting of its own.

use crate::puzzle::Puzzle;
use crate::solver::Solution;

/// Blocked cells render as a full block.
const BLOCKED_CELL: char = '█';

/// Lay the solution's words into a `height × width` character matrix.
/// Open cells not covered by any slot stay `None`.
pub fn letter_grid(puzzle: &Puzzle, solution: &Solution) -> Vec<Vec<Option<char>>> {
    let grid = puzzle.grid();
    let mut letters = vec![vec![None; grid.width()]; grid.height()];

    for (slot, word) in solution.iter() {
        for (k, ch) in word.chars().enumerate() {
            let (row, col) = slot.cell(k);
            debug_assert!(
                letters[row][col].is_none() || letters[row][col] == Some(ch),
                "conflicting letters at ({row}, {col})"
            );
            letters[row][col] = Some(ch);
        }
    }
    letters
}

/// Render the solved grid as terminal text: letters in filled cells, spaces
/// in uncovered open cells, `█` in blocked ones.
pub fn to_text(puzzle: &Puzzle, solution: &Solution) -> String {
    let grid = puzzle.grid();
    let letters = letter_grid(puzzle, solution);
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.is_open(row, col) {
                out.push(letters[row][col].unwrap_or(' '));
            } else {
                out.push(BLOCKED_CELL);
            }
        }
        out.push('\n');
    }
    out
}
