//! Finds the raw moves that would leave the mover's own general capturable.

use log::trace;

use crate::board::Board;
use crate::celllist::{CellList, MoveTable};
use crate::movegen::MoveGenerator;
use crate::types::Cell;

/// Replays every raw move on a private scratch board and regenerates the opponent's
/// replies there. Moves after which a reply lands on the mover's general are warnings.
///
/// The scratch board and generator belong to this filter alone; evaluating positions
/// concurrently needs one filter per thread.
#[derive(Clone, Debug, Default)]
pub struct CheckSafetyFilter {
    scratch: Board,
    generator: MoveGenerator,
    warnings: MoveTable,
}

impl CheckSafetyFilter {
    pub fn new() -> Self {
        Self {
            scratch: Board::empty(),
            generator: MoveGenerator::new(),
            warnings: MoveTable::new(),
        }
    }

    /// Rebuild the warning table for `board`, whose raw moves are `raw`.
    pub fn recompute(&mut self, board: &Board, raw: &MoveTable) {
        self.warnings.clear();
        for (origin, destination) in raw.pairs() {
            if self.exposes_general(board, origin, destination) {
                trace!("{origin}-{destination} would expose the general");
                self.warnings.push(origin, destination);
            }
        }
    }

    pub fn warnings(&self) -> &MoveTable {
        &self.warnings
    }

    pub fn warnings_from(&self, origin: Cell) -> &CellList {
        self.warnings.get(origin)
    }

    /// A board without the mover's general can never be in check.
    fn exposes_general(
        &mut self,
        board: &Board,
        origin: Cell,
        destination: Cell,
    ) -> bool {
        let Some(mover) = board.piece_at(origin) else {
            return false;
        };
        self.scratch.copy_from(board);
        self.scratch.relocate(origin, destination);

        let opponent = mover.side.other_side();
        self.generator.recompute_side(&self.scratch, opponent);

        match self.scratch.find_general(mover.side) {
            Some(general) => self.generator.reaches(&self.scratch, opponent, general),
            None => false,
        }
    }
}
