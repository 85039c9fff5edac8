use crate::board::Board;
use crate::celllist::{CellList, MoveTable};
use crate::cellset::CellSet;
use crate::legality::PathLegality;
use crate::types::*;

/// Raw destination table for every piece on a board, before self-check filtering.
///
/// The generator owns only its table; the board is passed to each recomputation, so a
/// caller can point the same generator at a scratch board.
#[derive(Clone, Debug, Default)]
pub struct MoveGenerator {
    table: MoveTable,
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self {
            table: MoveTable::new(),
        }
    }

    /// Rebuild the table for every piece on `board`.
    pub fn recompute(&mut self, board: &Board) {
        self.table.clear();
        for (origin, _) in board.pieces() {
            destinations_from(board, origin, self.table.get_mut(origin));
        }
    }

    /// Rebuild the table for the pieces of `side` only. Origins of the other side are
    /// left empty.
    pub fn recompute_side(&mut self, board: &Board, side: Side) {
        self.table.clear();
        for (origin, piece) in board.pieces() {
            if piece.side == side {
                destinations_from(board, origin, self.table.get_mut(origin));
            }
        }
    }

    #[inline]
    pub fn destinations(&self, origin: Cell) -> &CellList {
        self.table.get(origin)
    }

    pub fn table(&self) -> &MoveTable {
        &self.table
    }

    /// Union of the destinations of every piece `side` has on `board`.
    ///
    /// `board` must be the board the table was last computed from.
    pub fn all_destinations(&self, board: &Board, side: Side) -> CellSet {
        board
            .pieces()
            .filter(|(_, piece)| piece.side == side)
            .flat_map(|(origin, _)| self.table.get(origin).iter())
            .collect()
    }

    /// True if some piece of `side` can move onto `target`.
    pub fn reaches(&self, board: &Board, side: Side, target: Cell) -> bool {
        board
            .pieces()
            .filter(|(_, piece)| piece.side == side)
            .any(|(origin, _)| self.table.get(origin).contains(target))
    }
}

/// Fill `out` with the raw destinations of the piece on `origin`, walking the eight
/// directions in [`ALL_DIRECTIONS`] order. Leaves `out` empty for an empty cell.
pub fn destinations_from(board: &Board, origin: Cell, out: &mut CellList) {
    out.clear();
    let Some(piece) = board.piece_at(origin) else {
        return;
    };
    let rules = piece.kind.rules();
    let legality = PathLegality::new(board);

    for direction in ALL_DIRECTIONS {
        let Some(start) = start_cell(&legality, piece, origin, direction) else {
            continue;
        };
        if rules.target_seeking {
            add_targets(&legality, origin, start, direction, rules.diagonal_range, out);
        } else {
            add_straight(&legality, origin, start, direction, rules.straight_range, out);
        }
    }
}

/// First cell a piece may consider in `direction`.
///
/// Screen jumpers skip empty cells up to the first piece and start just past it; a cannon
/// cannot serve as that piece. Target-seeking pieces start on their leg, which must be
/// empty. Everyone else starts on the neighbour.
fn start_cell(
    legality: &PathLegality,
    piece: Piece,
    origin: Cell,
    direction: Direction,
) -> Option<Cell> {
    let rules = piece.kind.rules();
    if rules.screen_jumper {
        let mut cell = origin.step(direction);
        while legality.passable(cell) {
            cell = cell.and_then(|c| c.step(direction));
        }
        if !legality.crossable(cell) {
            return None;
        }
        return cell.and_then(|screen| screen.step(direction));
    }

    let cell = origin.step(direction);
    if rules.target_seeking && !legality.passable(cell) {
        return None;
    }
    cell
}

/// Horse and elephant landings from `leg`, turning into the two diagonals that flank
/// `direction`. Every diagonal cell short of the landing must be empty.
fn add_targets(
    legality: &PathLegality,
    origin: Cell,
    leg: Cell,
    direction: Direction,
    diagonal_range: usize,
    out: &mut CellList,
) {
    let Some(flanks) = direction.flanks() else {
        return;
    };
    for flank in flanks {
        let mut cell = Some(leg);
        let mut blocked = false;
        for step in 1..=diagonal_range {
            cell = cell.and_then(|c| c.step(flank));
            if step < diagonal_range && !legality.passable(cell) {
                blocked = true;
                break;
            }
        }
        if blocked {
            continue;
        }
        if let Some(landing) = cell {
            if legality.replaceable(origin, landing) {
                out.push(landing);
            }
        }
    }
}

/// Ray walk from `start`. A cell that cannot be landed on ends the ray before it; an
/// occupied cell that can be landed on (a capture) ends the ray after it.
fn add_straight(
    legality: &PathLegality,
    origin: Cell,
    start: Cell,
    direction: Direction,
    range: usize,
    out: &mut CellList,
) {
    let mut cell = Some(start);
    for _ in 0..range {
        let Some(current) = cell else {
            break;
        };
        if !legality.replaceable(origin, current) {
            break;
        }
        out.push(current);
        if !legality.passable(Some(current)) {
            break;
        }
        cell = current.step(direction);
    }
}
