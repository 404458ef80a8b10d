//! `domains` — per-slot sets of still-possible words.
//!
//! The domain store is created once from the vocabulary, filtered once by
//! node consistency, pruned further by AC-3, and is read-only during search.
//! Words are shared `Rc<str>`s so that seeding every slot with the full
//! vocabulary costs one allocation per word, not one per (slot, word) pair.

use std::collections::HashSet;
use std::rc::Rc;

use crate::puzzle::Puzzle;
use crate::slot::SlotId;
use crate::word_list::WordList;

/// Mapping from slot id to its candidate word set.
#[derive(Debug, Clone)]
pub struct Domains {
    sets: Vec<HashSet<Rc<str>>>,
}

impl Domains {
    /// Seed every slot's domain with the full vocabulary.
    pub fn new(puzzle: &Puzzle, words: &WordList) -> Domains {
        let shared: Vec<Rc<str>> = words.words.iter().map(|w| Rc::from(w.as_str())).collect();
        let sets = puzzle
            .slots()
            .iter()
            .map(|_| shared.iter().cloned().collect())
            .collect();
        Domains { sets }
    }

    /// Unary length filter: drop every word whose length differs from its
    /// slot's required length. Never looks at other slots, never fails — a
    /// slot whose domain empties is simply left with an empty set.
    pub fn enforce_node_consistency(&mut self, puzzle: &Puzzle) {
        for (id, set) in self.sets.iter_mut().enumerate() {
            let required = puzzle.slot(id).length;
            set.retain(|word| word.len() == required);
        }
    }

    /// The candidate set for `slot`.
    pub fn candidates(&self, slot: SlotId) -> &HashSet<Rc<str>> {
        &self.sets[slot]
    }

    pub fn size(&self, slot: SlotId) -> usize {
        self.sets[slot].len()
    }

    pub fn is_empty(&self, slot: SlotId) -> bool {
        self.sets[slot].is_empty()
    }

    /// Remove one word from one slot's domain. Pruning is permanent; there
    /// is no way to add a word back.
    pub fn remove(&mut self, slot: SlotId, word: &str) -> bool {
        self.sets[slot].remove(word)
    }

    /// Total candidate count across all slots, for pruning diagnostics.
    pub fn total_size(&self) -> usize {
        self.sets.iter().map(HashSet::len).sum()
    }

    /// Number of slots tracked (equal to the puzzle's slot count).
    pub fn slot_count(&self) -> usize {
        self.sets.len()
    }
}
