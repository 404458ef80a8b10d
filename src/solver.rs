//! The main constraint-satisfaction solver: node consistency, AC-3, then
//! heuristic backtracking search.
//!
//! # Pipeline
//!
//! [`Solver::solve`] runs three phases over one owned [`Domains`] store:
//!
//! 1. **Node consistency** — unary length filter.
//! 2. **Arc consistency** — [`crate::propagate::ac3`]; if it proves the
//!    constraint graph unsatisfiable the solve short-circuits to
//!    [`SolveStatus::Unsatisfiable`] without searching.
//! 3. **Backtracking search** — depth-first trial-and-undo over a single
//!    shared [`Assignment`], with minimum-remaining-values variable ordering
//!    (degree tie-break) and least-constraining-value candidate ordering.
//!
//! The domain store is mutated only by the two propagation phases; search
//! holds it behind a shared reference, so "search never re-prunes" is
//! enforced by the borrow checker rather than by convention.
//!
//! # Examples
//!
//! ```
//! use crossfill::grid::Grid;
//! use crossfill::puzzle::Puzzle;
//! use crossfill::solver::{SolveStatus, Solver};
//! use crossfill::word_list::WordList;
//!
//! let puzzle = Puzzle::from_grid(Grid::parse("___\n#_#")?);
//! let words = WordList::parse_from_str("cat\nat");
//! let result = Solver::new(&puzzle, &words).solve();
//!
//! assert_eq!(result.status, SolveStatus::Solved);
//! # Ok::<(), crossfill::errors::GridError>(())
//! ```
//!
//! Absence of a solution is a normal outcome, never an error:
//!
//! ```
//! use crossfill::grid::Grid;
//! use crossfill::puzzle::Puzzle;
//! use crossfill::solver::{SolveStatus, Solver};
//! use crossfill::word_list::WordList;
//!
//! let puzzle = Puzzle::from_grid(Grid::parse("#_#\n___\n#_#")?);
//! let words = WordList::parse_from_str("cat\nowl");
//! let result = Solver::new(&puzzle, &words).solve();
//!
//! assert_eq!(result.status, SolveStatus::Unsatisfiable);
//! assert!(result.solution.is_none());
//! # Ok::<(), crossfill::errors::GridError>(())
//! ```

use std::cmp::Reverse;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use instant::Instant;
use log::{debug, info};

use crate::domains::Domains;
use crate::propagate;
use crate::puzzle::{Overlap, Puzzle};
use crate::slot::{Slot, SlotId};
use crate::word_list::WordList;

/// Status of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A complete, consistent assignment was found.
    Solved,

    /// The search space is exhausted (or propagation emptied a domain);
    /// no assignment satisfies all constraints.
    Unsatisfiable,

    /// The wall-clock budget expired before the search finished. Contains
    /// the elapsed time.
    TimedOut { elapsed: Duration },
}

/// Counters describing how much work a solve did.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveStats {
    /// Candidates removed by the unary length filter.
    pub pruned_by_length: usize,
    /// Candidates removed by AC-3.
    pub pruned_by_arcs: usize,
    /// Backtracking frames entered.
    pub nodes_expanded: usize,
}

/// Outcome of a solver run: the solution when one exists, plus status and
/// work counters.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub solution: Option<Solution>,
    pub status: SolveStatus,
    pub stats: SolveStats,
}

/// A complete slot → word assignment.
#[derive(Debug, Clone)]
pub struct Solution {
    entries: Vec<(Slot, Rc<str>)>,
}

impl Solution {
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &str)> {
        self.entries.iter().map(|(slot, word)| (slot, word.as_ref()))
    }

    /// The word filled into `slot`, if that slot belongs to this solution.
    pub fn get(&self, slot: &Slot) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, word)| word.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Wall-clock budget for the search phase. `None` means unlimited.
struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    fn new(limit: Option<Duration>) -> Self {
        Self { start: Instant::now(), limit }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }
}

/// Partial slot → word mapping, built and unwound by the search. One
/// instance is shared down the whole recursion; frames mutate and restore
/// it rather than copying per branch.
struct Assignment {
    words: Vec<Option<Rc<str>>>,
    assigned: usize,
}

impl Assignment {
    fn new(slot_count: usize) -> Self {
        Assignment { words: vec![None; slot_count], assigned: 0 }
    }

    fn is_complete(&self) -> bool {
        self.assigned == self.words.len()
    }

    fn get(&self, slot: SlotId) -> Option<&Rc<str>> {
        self.words[slot].as_ref()
    }

    fn set(&mut self, slot: SlotId, word: Rc<str>) {
        debug_assert!(self.words[slot].is_none(), "slot {slot} assigned twice");
        self.words[slot] = Some(word);
        self.assigned += 1;
    }

    fn clear(&mut self, slot: SlotId) {
        debug_assert!(self.words[slot].is_some(), "clearing unassigned slot {slot}");
        self.words[slot] = None;
        self.assigned -= 1;
    }

    fn iter_assigned(&self) -> impl Iterator<Item = (SlotId, &Rc<str>)> {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(id, word)| word.as_ref().map(|w| (id, w)))
    }
}

/// How a backtracking frame resolved.
enum Step {
    Solved,
    Exhausted,
    OutOfTime,
}

/// Context threaded through the recursion: read-only geometry and domains,
/// plus the budget and work counter.
struct SearchCtx<'a> {
    puzzle: &'a Puzzle,
    domains: &'a Domains,
    budget: TimeBudget,
    nodes_expanded: usize,
}

/// One-shot solver for a single puzzle + vocabulary.
pub struct Solver<'p> {
    puzzle: &'p Puzzle,
    domains: Domains,
}

impl<'p> Solver<'p> {
    /// Seed every slot's domain with the full vocabulary.
    pub fn new(puzzle: &'p Puzzle, words: &WordList) -> Solver<'p> {
        Solver { puzzle, domains: Domains::new(puzzle, words) }
    }

    /// Solve with no time limit.
    pub fn solve(&mut self) -> SolveResult {
        self.solve_with_budget(None)
    }

    /// Solve, giving up with [`SolveStatus::TimedOut`] once `limit` elapses.
    /// The budget is checked at every backtracking frame entry.
    pub fn solve_with_budget(&mut self, limit: Option<Duration>) -> SolveResult {
        let seeded = self.domains.total_size();
        self.domains.enforce_node_consistency(self.puzzle);
        let after_length = self.domains.total_size();

        let arc_ok = propagate::ac3(self.puzzle, &mut self.domains, None);
        let after_arcs = self.domains.total_size();

        let mut stats = SolveStats {
            pruned_by_length: seeded - after_length,
            pruned_by_arcs: after_length - after_arcs,
            nodes_expanded: 0,
        };
        debug!(
            "propagation: {} candidates pruned by length, {} by arcs, {} remain",
            stats.pruned_by_length, stats.pruned_by_arcs, after_arcs
        );

        if !arc_ok {
            info!("arc consistency proved the puzzle unsatisfiable");
            return SolveResult { solution: None, status: SolveStatus::Unsatisfiable, stats };
        }

        let mut ctx = SearchCtx {
            puzzle: self.puzzle,
            domains: &self.domains,
            budget: TimeBudget::new(limit),
            nodes_expanded: 0,
        };
        let mut assignment = Assignment::new(self.puzzle.slots().len());
        let step = backtrack(&mut ctx, &mut assignment);
        stats.nodes_expanded = ctx.nodes_expanded;

        match step {
            Step::Solved => {
                debug!("solved after {} frames", stats.nodes_expanded);
                let entries = assignment
                    .iter_assigned()
                    .map(|(id, word)| (*self.puzzle.slot(id), Rc::clone(word)))
                    .collect();
                SolveResult {
                    solution: Some(Solution { entries }),
                    status: SolveStatus::Solved,
                    stats,
                }
            }
            Step::Exhausted => {
                debug!("search space exhausted after {} frames", stats.nodes_expanded);
                SolveResult { solution: None, status: SolveStatus::Unsatisfiable, stats }
            }
            Step::OutOfTime => {
                let elapsed = ctx.budget.elapsed();
                info!("search timed out after {elapsed:?}");
                SolveResult { solution: None, status: SolveStatus::TimedOut { elapsed }, stats }
            }
        }
    }
}

/// Depth-first trial-and-undo search. On `Step::Solved` the assignment is
/// left complete for the caller to read; on `Step::Exhausted` every
/// tentative entry made by this frame has been removed again.
fn backtrack(ctx: &mut SearchCtx, assignment: &mut Assignment) -> Step {
    if ctx.budget.expired() {
        return Step::OutOfTime;
    }
    if assignment.is_complete() {
        return Step::Solved;
    }
    ctx.nodes_expanded += 1;

    let Some(slot) = select_unassigned(ctx, assignment) else {
        // Unreachable: completeness was checked above.
        return Step::Solved;
    };

    for word in order_values(ctx, slot, assignment) {
        assignment.set(slot, word);
        if is_consistent(ctx.puzzle, assignment) {
            match backtrack(ctx, assignment) {
                Step::Exhausted => {}
                done => return done,
            }
        }
        assignment.clear(slot);
    }
    Step::Exhausted
}

/// Variable ordering: minimum remaining values, ties broken by descending
/// neighbor count, remaining ties by slot id.
fn select_unassigned(ctx: &SearchCtx, assignment: &Assignment) -> Option<SlotId> {
    (0..ctx.domains.slot_count())
        .filter(|&slot| assignment.get(slot).is_none())
        .min_by_key(|&slot| (ctx.domains.size(slot), Reverse(ctx.puzzle.neighbors(slot).len())))
}

/// Value ordering: least-constraining first. Each candidate is scored by how
/// many words it would rule out across the domains of still-unassigned
/// neighbors; equal scores fall back to lexicographic order so the search is
/// deterministic.
fn order_values(ctx: &SearchCtx, slot: SlotId, assignment: &Assignment) -> Vec<Rc<str>> {
    let unassigned_neighbors: Vec<(SlotId, Overlap)> = ctx
        .puzzle
        .neighbors(slot)
        .iter()
        .filter(|&&y| assignment.get(y).is_none())
        .filter_map(|&y| ctx.puzzle.overlap(slot, y).map(|overlap| (y, overlap)))
        .collect();

    let mut scored: Vec<(Rc<str>, usize)> = ctx
        .domains
        .candidates(slot)
        .iter()
        .map(|word| (Rc::clone(word), rule_out_count(ctx, word, &unassigned_neighbors)))
        .collect();
    scored.sort_by(|(wa, ca), (wb, cb)| ca.cmp(cb).then_with(|| wa.cmp(wb)));
    scored.into_iter().map(|(word, _)| word).collect()
}

/// How many neighbor-domain words `word` conflicts with at the overlaps.
fn rule_out_count(ctx: &SearchCtx, word: &str, neighbors: &[(SlotId, Overlap)]) -> usize {
    neighbors
        .iter()
        .map(|&(y, overlap)| {
            let ch = word.as_bytes()[overlap.a];
            ctx.domains
                .candidates(y)
                .iter()
                .filter(|other| other.as_bytes()[overlap.b] != ch)
                .count()
        })
        .sum()
}

/// Global consistency check over the whole partial assignment: word lengths
/// match (defensive; node consistency already guarantees it), every assigned
/// neighbor pair agrees at its overlap, and no word is used twice anywhere.
fn is_consistent(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();

    for (x, word) in assignment.iter_assigned() {
        if word.len() != puzzle.slot(x).length {
            return false;
        }
        if !seen.insert(word.as_ref()) {
            return false;
        }
        for &y in puzzle.neighbors(x) {
            if let Some(other) = assignment.get(y) {
                // Neighbors always have a defined overlap by construction.
                let Some(overlap) = puzzle.overlap(x, y) else {
                    continue;
                };
                if word.as_bytes()[overlap.a] != other.as_bytes()[overlap.b] {
                    return false;
                }
            }
        }
    }
    true
}
