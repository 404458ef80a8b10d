//! `puzzle` — the immutable geometry model: slots, overlaps, neighbors.
//!
//! Built once from a [`Grid`] and never mutated afterwards. Slot derivation
//! scans each row and each column for maximal runs of fillable cells of
//! length ≥ 2; a single open cell belongs to no slot. The overlap relation is
//! indexed by *ordered* slot id pairs — `overlap(x, y)` and `overlap(y, x)`
//! both resolve, with their offsets swapped.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::slot::{Direction, Slot, SlotId};

/// Crossing point of two slots, as intra-word character offsets.
///
/// For `overlap(x, y) == Some(Overlap { a, b })`, the `a`-th character of
/// x's word must equal the `b`-th character of y's word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub a: usize,
    pub b: usize,
}

/// The complete, immutable geometry of one puzzle.
#[derive(Debug, Clone)]
pub struct Puzzle {
    grid: Grid,
    slots: Vec<Slot>,
    /// Ordered-pair overlap index; both `(x, y)` and `(y, x)` are present
    /// for every crossing pair.
    overlaps: HashMap<(SlotId, SlotId), Overlap>,
    /// Per-slot neighbor lists, ascending by id.
    neighbors: Vec<Vec<SlotId>>,
}

impl Puzzle {
    /// Derive the slot set and overlap relation from a grid.
    ///
    /// A grid with zero slots is valid and yields empty derived data.
    pub fn from_grid(grid: Grid) -> Puzzle {
        let slots = derive_slots(&grid);

        // Cell -> (slot, offset) occupancy. An across slot and a down slot
        // cross at no more than one cell, and parallel slots never share a
        // cell (runs are maximal and disjoint), so per-cell pairing finds
        // every overlap exactly once.
        let mut occupancy: HashMap<(usize, usize), Vec<(SlotId, usize)>> = HashMap::new();
        for (id, slot) in slots.iter().enumerate() {
            for (k, cell) in slot.cells().enumerate() {
                occupancy.entry(cell).or_default().push((id, k));
            }
        }

        let mut overlaps = HashMap::new();
        let mut neighbors: Vec<Vec<SlotId>> = vec![Vec::new(); slots.len()];
        for occupants in occupancy.values() {
            debug_assert!(occupants.len() <= 2, "a cell belongs to at most one slot per direction");
            if let [(x, a), (y, b)] = occupants[..] {
                overlaps.insert((x, y), Overlap { a, b });
                overlaps.insert((y, x), Overlap { a: b, b: a });
                neighbors[x].push(y);
                neighbors[y].push(x);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Puzzle { grid, slots, overlaps, neighbors }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id]
    }

    /// The crossing offsets of `x` and `y`, or `None` when they share no
    /// cell (including `x == y`).
    pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// All slots that cross `x`, ascending by id.
    pub fn neighbors(&self, x: SlotId) -> &[SlotId] {
        &self.neighbors[x]
    }

    /// Every ordered pair of crossing slots — the initial AC-3 worklist.
    pub fn arcs(&self) -> impl Iterator<Item = (SlotId, SlotId)> + '_ {
        self.overlaps.keys().copied()
    }
}

/// Scan rows and columns for maximal fillable runs of length ≥ 2.
fn derive_slots(grid: &Grid) -> Vec<Slot> {
    let mut slots = Vec::new();

    for row in 0..grid.height() {
        let mut run_start: Option<usize> = None;
        for col in 0..=grid.width() {
            let open = col < grid.width() && grid.is_open(row, col);
            match (run_start, open) {
                (None, true) => run_start = Some(col),
                (Some(start), false) => {
                    if col - start >= 2 {
                        slots.push(Slot::new(row, start, Direction::Across, col - start));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    for col in 0..grid.width() {
        let mut run_start: Option<usize> = None;
        for row in 0..=grid.height() {
            let open = row < grid.height() && grid.is_open(row, col);
            match (run_start, open) {
                (None, true) => run_start = Some(row),
                (Some(start), false) => {
                    if row - start >= 2 {
                        slots.push(Slot::new(start, col, Direction::Down, row - start));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    slots
}
