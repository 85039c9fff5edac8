//! Set of board cells packed into a single integer.
//!
//! Bit `n` stands for the cell whose [`Cell::index`] is `n`: row 1 occupies bits 0..9,
//! row 2 bits 9..18 and so on, so the 90 cells fit in a `u128`.

use crate::types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellSet(u128);

impl CellSet {
    pub const EMPTY: CellSet = CellSet(0);

    #[inline(always)]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[inline(always)]
    const fn bit(cell: Cell) -> u128 {
        1u128 << cell.index()
    }

    #[inline(always)]
    pub fn insert(&mut self, cell: Cell) {
        self.0 |= Self::bit(cell);
    }

    #[inline(always)]
    pub fn remove(&mut self, cell: Cell) {
        self.0 &= !Self::bit(cell);
    }

    #[inline(always)]
    pub const fn contains(&self, cell: Cell) -> bool {
        self.0 & Self::bit(cell) != 0
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn union(&self, other: &CellSet) -> CellSet {
        CellSet(self.0 | other.0)
    }

    /// Cells in index order.
    pub fn iter(&self) -> CellSetIter {
        CellSetIter(self.0)
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Cell> for CellSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CellSetIter(self.0)
    }
}

/// Iterate over the cells of a set, lowest index first.
pub struct CellSetIter(u128);

impl Iterator for CellSetIter {
    type Item = Cell;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let idx = self.0.trailing_zeros() as usize;
            self.0 &= self.0 - 1; // Clear the lowest set bit
            Cell::from_index(idx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_contains_remove() {
        let a = Cell::new(1, 1).unwrap();
        let b = Cell::new(10, 9).unwrap();
        let mut set = CellSet::new();
        assert!(set.is_empty());

        set.insert(a);
        set.insert(b);
        set.insert(b);
        assert_eq!(set.len(), 2);
        assert!(set.contains(a));
        assert!(set.contains(b));
        assert!(!set.contains(Cell::new(5, 5).unwrap()));

        set.remove(a);
        assert!(!set.contains(a));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_in_index_order() {
        let cells = [
            Cell::new(10, 9).unwrap(),
            Cell::new(1, 1).unwrap(),
            Cell::new(5, 3).unwrap(),
        ];
        let set: CellSet = cells.into_iter().collect();
        let listed: Vec<Cell> = set.iter().collect();
        assert_eq!(
            listed,
            vec![cells[1], cells[2], cells[0]]
        );
    }

    #[test]
    fn test_full_board_fits() {
        let set: CellSet = Cell::values().collect();
        assert_eq!(set.len(), 90);
        assert_eq!(set.iter().count(), 90);
    }

    #[test]
    fn test_union() {
        let a: CellSet = [Cell::new(2, 2).unwrap()].into_iter().collect();
        let b: CellSet = [Cell::new(3, 3).unwrap(), Cell::new(2, 2).unwrap()]
            .into_iter()
            .collect();
        assert_eq!(a.union(&b).len(), 2);
    }
}
