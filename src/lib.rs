//! crossfill — fills a crossword grid with words from a vocabulary so that
//! every slot's length constraint and every crossing-letter constraint hold.
//!
//! The pipeline is classic constraint satisfaction: node consistency (unary
//! length filter), AC-3 arc consistency over the crossing constraints, then
//! backtracking search with MRV/degree variable ordering and
//! least-constraining-value candidate ordering. See [`solver`] for the
//! entry point.

pub mod domains;
pub mod errors;
pub mod grid;
pub mod log;
pub mod propagate;
pub mod puzzle;
pub mod render;
pub mod slot;
pub mod solver;
pub mod word_list;
