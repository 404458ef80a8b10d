use std::fmt;

/// Reading direction of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// A maximal run of fillable cells in one orientation, requiring one word.
///
/// Two slots are equal iff all four fields match. Slots are immutable after
/// creation; the geometry model hands out ids (`SlotId`) for indexed storage,
/// but the `Slot` itself is the value callers see in solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Row of the first letter.
    pub row: usize,
    /// Column of the first letter.
    pub col: usize,
    pub direction: Direction,
    /// Required word length, always ≥ 2.
    pub length: usize,
}

/// Index of a slot within a [`crate::puzzle::Puzzle`]'s slot list.
pub type SlotId = usize;

impl Slot {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        debug_assert!(length >= 2, "slots shorter than 2 cells are not derived");
        Slot { row, col, direction, length }
    }

    /// Grid position of the `k`-th letter of this slot's word.
    pub fn cell(&self, k: usize) -> (usize, usize) {
        debug_assert!(k < self.length, "letter index {k} out of range for {self}");
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    /// All grid positions this slot occupies, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|k| self.cell(k))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} [{}]", self.row, self.col, dir, self.length)
    }
}
