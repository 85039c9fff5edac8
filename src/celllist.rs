//! Stack-allocated destination lists.
//!
//! The check-safety filter rebuilds a whole table of destinations for every candidate
//! move, so the per-origin lists live in fixed-size arrays instead of `Vec`s. A table
//! for the full board is about 9KB and is reused across recomputations.

use crate::types::{Cell, CELL_COUNT};

/// Maximum number of destinations of a single piece.
/// A chariot on a palace diagonal point reaches at most 21 cells; 32 leaves headroom.
pub const MAX_DESTINATIONS: usize = 32;

/// Ordered list of destination cells for one origin.
#[derive(Clone, Copy)]
pub struct CellList {
    cells: [Option<Cell>; MAX_DESTINATIONS],
    count: usize,
}

impl CellList {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            cells: [None; MAX_DESTINATIONS],
            count: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, cell: Cell) {
        debug_assert!(self.count < MAX_DESTINATIONS, "CellList overflow");
        self.cells[self.count] = Some(cell);
        self.count += 1;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Clear the list (reset count, no need to clear data).
    #[inline(always)]
    pub fn clear(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.iter().any(|c| c == cell)
    }

    /// In-place filter that keeps the original order.
    #[inline]
    pub fn retain<F: FnMut(Cell) -> bool>(&mut self, mut f: F) {
        let mut write_idx = 0;
        for read_idx in 0..self.count {
            let cell = self.cells[read_idx];
            if cell.is_some_and(&mut f) {
                self.cells[write_idx] = cell;
                write_idx += 1;
            }
        }
        self.count = write_idx;
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells[..self.count].iter().flatten().copied()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().collect()
    }
}

impl Default for CellList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CellList {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl Eq for CellList {}

impl std::fmt::Debug for CellList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|c| c.to_algebraic()))
            .finish()
    }
}

/// One destination list per origin cell.
#[derive(Clone, PartialEq, Eq)]
pub struct MoveTable {
    lists: [CellList; CELL_COUNT],
}

impl MoveTable {
    pub const fn new() -> Self {
        Self {
            lists: [CellList::new(); CELL_COUNT],
        }
    }

    pub fn clear(&mut self) {
        for list in self.lists.iter_mut() {
            list.clear();
        }
    }

    #[inline(always)]
    pub fn get(&self, origin: Cell) -> &CellList {
        &self.lists[origin.index()]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, origin: Cell) -> &mut CellList {
        &mut self.lists[origin.index()]
    }

    #[inline(always)]
    pub fn push(&mut self, origin: Cell, destination: Cell) {
        self.lists[origin.index()].push(destination);
    }

    /// Total number of (origin, destination) pairs.
    pub fn len(&self) -> usize {
        self.lists.iter().map(CellList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(CellList::is_empty)
    }

    /// Every (origin, destination) pair, origins in cell order.
    pub fn pairs(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        Cell::values().flat_map(move |origin| self.get(origin).iter().map(move |to| (origin, to)))
    }
}

impl Default for MoveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                Cell::values()
                    .filter(|c| !self.get(*c).is_empty())
                    .map(|c| (c.to_algebraic(), *self.get(c))),
            )
            .finish()
    }
}
