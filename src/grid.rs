//! `grid` — the rectangular cell matrix a puzzle is built from.
//!
//! A structure file describes the grid shape as plain text, one row per line:
//! `_` marks a fillable cell, any other character a blocked one. Rows may be
//! ragged; the grid width is the longest row and shorter rows are padded with
//! blocked cells. Parsing is deliberately forgiving — the only hard errors
//! are an empty file and a grid with no open cells at all.

use crate::errors::GridError;

/// Rectangular boolean matrix of fillable cells.
///
/// Immutable after construction; [`crate::puzzle::Puzzle`] derives slots and
/// overlaps from it and never mutates it.
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Vec<bool>>,
}

/// Character marking a fillable cell in structure text.
const OPEN_CELL: char = '_';

impl Grid {
    /// Build a grid directly from a cell matrix. Intended for callers that
    /// construct geometry programmatically (and for tests); rows must all
    /// have the same width.
    pub fn new(cells: Vec<Vec<bool>>) -> Result<Grid, GridError> {
        if cells.is_empty() {
            return Err(GridError::EmptyStructure);
        }
        let width = cells[0].len();
        debug_assert!(
            cells.iter().all(|row| row.len() == width),
            "cell matrix must be rectangular"
        );
        if !cells.iter().flatten().any(|&open| open) {
            return Err(GridError::NoOpenCells);
        }
        Ok(Grid { height: cells.len(), width, cells })
    }

    /// Parse structure text into a grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyStructure`] for input with no lines and
    /// [`GridError::NoOpenCells`] when no `_` appears anywhere.
    pub fn parse(contents: &str) -> Result<Grid, GridError> {
        let lines: Vec<&str> = contents.lines().collect();
        if lines.is_empty() {
            return Err(GridError::EmptyStructure);
        }

        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let cells: Vec<Vec<bool>> = lines
            .iter()
            .map(|line| {
                // Pad short rows with blocked cells so the matrix stays
                // rectangular.
                let mut row: Vec<bool> = line.chars().map(|c| c == OPEN_CELL).collect();
                row.resize(width, false);
                row
            })
            .collect();

        if !cells.iter().flatten().any(|&open| open) {
            return Err(GridError::NoOpenCells);
        }

        Ok(Grid { height: lines.len(), width, cells })
    }

    /// Native-only convenience: read structure text from a file and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] if the file cannot be read, or any parse
    /// error from [`Grid::parse`].
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Grid, GridError> {
        let path_ref = path.as_ref();
        let contents = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read structure from '{}': {}", path_ref.display(), e),
            )
        })?;
        Grid::parse(&contents)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(row, col)` is fillable.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let grid = Grid::parse("__#\n#__").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert!(grid.is_open(0, 0));
        assert!(grid.is_open(0, 1));
        assert!(!grid.is_open(0, 2));
        assert!(!grid.is_open(1, 0));
    }

    #[test]
    fn test_parse_pads_ragged_rows_with_blocked_cells() {
        let grid = Grid::parse("____\n__").unwrap();
        assert_eq!(grid.width(), 4);
        assert!(grid.is_open(1, 1));
        assert!(!grid.is_open(1, 2));
        assert!(!grid.is_open(1, 3));
    }

    #[test]
    fn test_parse_any_non_underscore_is_blocked() {
        let grid = Grid::parse("_x_\n_ _").unwrap();
        assert!(!grid.is_open(0, 1));
        assert!(!grid.is_open(1, 1));
        assert!(grid.is_open(1, 2));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(Grid::parse(""), Err(GridError::EmptyStructure)));
    }

    #[test]
    fn test_parse_no_open_cells() {
        assert!(matches!(Grid::parse("###\n###"), Err(GridError::NoOpenCells)));
    }

    #[test]
    fn test_new_rejects_empty_matrix() {
        assert!(matches!(Grid::new(vec![]), Err(GridError::EmptyStructure)));
    }

    #[test]
    fn test_new_accepts_single_open_cell() {
        let grid = Grid::new(vec![vec![false, true]]).unwrap();
        assert!(grid.is_open(0, 1));
    }
}
