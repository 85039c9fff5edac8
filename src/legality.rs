//! Questions the move generator asks about a single candidate cell.

use crate::board::Board;
use crate::rules::{in_palace, is_backward, is_palace_diagonal_point};
use crate::types::Cell;

/// Read-only view of one board answering pass/land/jump questions.
#[derive(Clone, Copy)]
pub struct PathLegality<'a> {
    board: &'a Board,
}

impl<'a> PathLegality<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// A walker may continue through `cell` only if it is on the board and empty.
    #[inline]
    pub fn passable(&self, cell: Option<Cell>) -> bool {
        cell.is_some_and(|c| self.board.is_empty_at(c))
    }

    /// `cell` holds a piece a screen jumper may use as its screen, i.e. anything but another
    /// screen jumper.
    #[inline]
    pub fn crossable(&self, cell: Option<Cell>) -> bool {
        cell.and_then(|c| self.board.piece_at(c))
            .is_some_and(|piece| !piece.kind.is_screen_jumper())
    }

    /// Whether the piece on `origin` may finish a step on `destination`.
    ///
    /// All of the following must hold:
    /// 1. `destination` does not hold a piece of the mover's side;
    /// 2. a piece that cannot retreat does not move towards its own back row;
    /// 3. a diagonal move starts and ends on palace diagonal points;
    /// 4. a screen jumper does not land on another screen jumper;
    /// 5. a palace-confined piece stays in its own palace.
    pub fn replaceable(&self, origin: Cell, destination: Cell) -> bool {
        let Some(mover) = self.board.piece_at(origin) else {
            return false;
        };
        let rules = mover.kind.rules();
        let target = self.board.piece_at(destination);

        if target.is_some_and(|p| p.side == mover.side) {
            return false;
        }
        if !rules.can_move_backward && is_backward(mover.side, origin, destination) {
            return false;
        }
        if origin.is_diagonal_to(&destination)
            && !(is_palace_diagonal_point(origin) && is_palace_diagonal_point(destination))
        {
            return false;
        }
        if rules.screen_jumper && target.is_some_and(|p| p.kind.is_screen_jumper()) {
            return false;
        }
        if rules.palace_confined && !in_palace(destination, mover.side) {
            return false;
        }
        true
    }
}
