//! Error types for grid and word-list loading, with error codes and help text.
//!
//! # Error Codes
//!
//! Each variant has a unique code for documentation lookup:
//!
//! - G001: `EmptyStructure` (Structure text has no rows)
//! - G002: `NoOpenCells` (Structure text has no fillable cells)
//! - G003: `Io` (Failed to read a structure or word-list file)
//!
//! Note that an unsolvable puzzle is *not* an error anywhere in this crate:
//! "no solution" is a normal outcome of [`crate::solver::Solver::solve`],
//! reported through [`crate::solver::SolveStatus`].

use std::io;

/// Errors raised while constructing a [`crate::grid::Grid`] from structure
/// text or a file.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The structure text contained no rows at all.
    #[error("structure text is empty")]
    EmptyStructure,

    /// The structure text had rows but not a single fillable (`_`) cell.
    #[error("structure text has no open cells")]
    NoOpenCells,

    /// Reading the structure file from disk failed.
    #[error("failed to read structure: {0}")]
    Io(#[from] io::Error),
}

impl GridError {
    /// Returns the error code for this variant.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GridError::EmptyStructure => "G001",
            GridError::NoOpenCells => "G002",
            GridError::Io(_) => "G003",
        }
    }

    /// Returns a helpful suggestion for this error, if any.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GridError::EmptyStructure | GridError::NoOpenCells => Some(
                "Structure files mark fillable cells with '_' and blocked cells \
                 with any other character, one row per line.",
            ),
            GridError::Io(_) => None,
        }
    }

    /// Formats the error with its code and optional help text.
    #[must_use]
    pub fn display_detailed(&self) -> String {
        let mut out = format!("[{}] {self}", self.code());
        if let Some(help) = self.help() {
            out.push_str("\n  help: ");
            out.push_str(help);
        }
        out
    }
}
