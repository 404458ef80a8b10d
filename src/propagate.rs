//! `propagate` — the AC-3 arc-consistency engine.
//!
//! Propagates every binary overlap constraint until each slot's domain holds
//! only words with at least one compatible partner in every neighbor's
//! current domain. Pruning here is permanent; the search phase never undoes
//! it.
//!
//! Callers must run [`Domains::enforce_node_consistency`] first: the overlap
//! offsets index into candidate words directly, which is only sound once
//! every candidate has its slot's exact length.

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use log::debug;

use crate::domains::Domains;
use crate::puzzle::{Overlap, Puzzle};
use crate::slot::SlotId;

/// Whether some word in `others` agrees with `word` at the overlap offsets.
fn has_support(word: &str, overlap: Overlap, others: &HashSet<Rc<str>>) -> bool {
    debug_assert!(overlap.a < word.len(), "overlap offset out of range for {word:?}");
    let ch = word.as_bytes()[overlap.a];
    others.iter().any(|other| other.as_bytes()[overlap.b] == ch)
}

/// Make `x` arc-consistent with `y`: remove from domain(x) every word with
/// no compatible partner in domain(y) at the crossing. Returns whether any
/// removal occurred; a non-crossing pair is a no-op.
///
/// Iterates a snapshot of domain(x) so removal from the live set is
/// well-defined.
pub fn revise(puzzle: &Puzzle, domains: &mut Domains, x: SlotId, y: SlotId) -> bool {
    let Some(overlap) = puzzle.overlap(x, y) else {
        return false;
    };

    let snapshot: Vec<Rc<str>> = domains.candidates(x).iter().cloned().collect();
    let mut revised = false;
    for word in snapshot {
        if !has_support(&word, overlap, domains.candidates(y)) {
            domains.remove(x, &word);
            revised = true;
        }
    }
    revised
}

/// Run AC-3 over the whole constraint graph.
///
/// The worklist starts as every ordered crossing pair, unless `initial`
/// supplies a specific arc set (the hook for maintaining consistency
/// incrementally). Whenever a revision shrinks domain(x), every arc
/// `(z, x)` for a neighbor `z != y` is re-enqueued.
///
/// Returns `false` as soon as any domain empties — the constraint graph is
/// unsatisfiable under the current domains — without draining the rest of
/// the queue. Returns `true` when the queue drains; all domains are then
/// arc-consistent, which is necessary but not sufficient for a solution.
pub fn ac3(puzzle: &Puzzle, domains: &mut Domains, initial: Option<Vec<(SlotId, SlotId)>>) -> bool {
    let mut queue: VecDeque<(SlotId, SlotId)> = match initial {
        Some(arcs) => arcs.into(),
        None => puzzle.arcs().collect(),
    };

    while let Some((x, y)) = queue.pop_front() {
        if revise(puzzle, domains, x, y) {
            if domains.is_empty(x) {
                debug!("arc consistency emptied the domain of slot {}", puzzle.slot(x));
                return false;
            }
            for &z in puzzle.neighbors(x) {
                if z != y {
                    queue.push_back((z, x));
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::slot::Direction;
    use crate::word_list::WordList;

    /// Across slot of length 3 at (0,0) and down slot of length 2 at (0,1),
    /// crossing at the across word's middle / the down word's first letter.
    fn tee() -> (Puzzle, SlotId, SlotId) {
        let puzzle = Puzzle::from_grid(Grid::parse("___\n#_#").unwrap());
        let across = puzzle
            .slots()
            .iter()
            .position(|s| s.direction == Direction::Across)
            .unwrap();
        let down = puzzle
            .slots()
            .iter()
            .position(|s| s.direction == Direction::Down)
            .unwrap();
        (puzzle, across, down)
    }

    fn node_consistent_domains(puzzle: &Puzzle, vocab: &str) -> Domains {
        let mut domains = Domains::new(puzzle, &WordList::parse_from_str(vocab));
        domains.enforce_node_consistency(puzzle);
        domains
    }

    #[test]
    fn test_revise_removes_unsupported_words() {
        let (puzzle, across, down) = tee();
        let mut domains = node_consistent_domains(&puzzle, "cat\ndog\ncog\nat\nto\non");

        // Down words must start with the across word's middle letter
        // ('a' or 'o'); "to" has no supporting across word.
        assert!(revise(&puzzle, &mut domains, down, across));
        assert!(!domains.candidates(down).contains("to"));
        assert!(domains.candidates(down).contains("at"));
        assert!(domains.candidates(down).contains("on"));
    }

    #[test]
    fn test_revise_reports_no_change_when_all_supported() {
        let (puzzle, across, down) = tee();
        let mut domains = node_consistent_domains(&puzzle, "cat\ndog\ncog\nat\nto\non");

        // Every across middle letter ('a', 'o', 'o') has a down partner.
        assert!(!revise(&puzzle, &mut domains, across, down));
        assert_eq!(domains.size(across), 3);
    }

    #[test]
    fn test_revise_is_noop_for_non_crossing_pair() {
        let puzzle = Puzzle::from_grid(Grid::parse("__#__").unwrap());
        let mut domains = node_consistent_domains(&puzzle, "at\nto");
        assert!(!revise(&puzzle, &mut domains, 0, 1));
        assert_eq!(domains.size(0), 2);
    }

    #[test]
    fn test_ac3_prunes_to_consistency() {
        let (puzzle, across, down) = tee();
        let mut domains = node_consistent_domains(&puzzle, "cat\ndog\ncog\nat\nto\non");

        assert!(ac3(&puzzle, &mut domains, None));

        // Convergence: every remaining word has a partner in every
        // neighboring domain.
        for (x, y) in puzzle.arcs() {
            let overlap = puzzle.overlap(x, y).unwrap();
            for word in domains.candidates(x) {
                assert!(
                    has_support(word, overlap, domains.candidates(y)),
                    "{word} in slot {x} has no support in slot {y}"
                );
            }
        }
        assert!(!domains.candidates(down).contains("to"));
    }

    #[test]
    fn test_ac3_is_idempotent() {
        let (puzzle, _, _) = tee();
        let mut domains = node_consistent_domains(&puzzle, "cat\ndog\ncog\nat\nto\non");

        assert!(ac3(&puzzle, &mut domains, None));
        let after_first = domains.total_size();
        assert!(ac3(&puzzle, &mut domains, None));
        assert_eq!(domains.total_size(), after_first);
    }

    #[test]
    fn test_ac3_returns_false_when_a_domain_empties() {
        let (puzzle, across, down) = tee();
        // No down word starts with 'a' (cat's middle), and no across middle
        // matches 'i': whichever arc is processed first empties a domain.
        let mut domains = node_consistent_domains(&puzzle, "cat\nit\nis");

        assert!(!ac3(&puzzle, &mut domains, None));
        assert!(domains.is_empty(across) || domains.is_empty(down));
    }

    #[test]
    fn test_ac3_with_empty_initial_queue_changes_nothing() {
        let (puzzle, _, down) = tee();
        let mut domains = node_consistent_domains(&puzzle, "cat\ndog\ncog\nat\nto\non");
        let before = domains.total_size();

        assert!(ac3(&puzzle, &mut domains, Some(Vec::new())));
        assert_eq!(domains.total_size(), before);
        assert!(domains.candidates(down).contains("to"));
    }

    #[test]
    fn test_ac3_with_single_initial_arc() {
        let (puzzle, across, down) = tee();
        let mut domains = node_consistent_domains(&puzzle, "cat\ndog\ncog\nat\nto\non");

        assert!(ac3(&puzzle, &mut domains, Some(vec![(down, across)])));
        assert!(!domains.candidates(down).contains("to"));
    }
}
