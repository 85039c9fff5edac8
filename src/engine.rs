//! Rules engine facade
//!
//! `Engine` ties the movement generator and the check-safety filter together and
//! answers every question the turn controller asks about a position. Call
//! [`Engine::recompute_all`] after each accepted move and before any query.

use log::debug;

use crate::board::Board;
use crate::celllist::{CellList, MoveTable};
use crate::cellset::CellSet;
use crate::movegen::MoveGenerator;
use crate::safety::CheckSafetyFilter;
use crate::types::{Cell, Move, Side, Status};

#[derive(Clone, Debug, Default)]
pub struct Engine {
    generator: MoveGenerator,
    filter: CheckSafetyFilter,
    legal: MoveTable,
    /// Copy of the board the tables were computed from.
    position: Board,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            generator: MoveGenerator::new(),
            filter: CheckSafetyFilter::new(),
            legal: MoveTable::new(),
            position: Board::empty(),
        }
    }

    /// Rebuild the raw, warning and legal tables for `board`.
    pub fn recompute_all(&mut self, board: &Board) {
        self.position.copy_from(board);
        self.generator.recompute(board);
        self.filter.recompute(board, self.generator.table());

        self.legal.clone_from(self.generator.table());
        for (origin, _) in board.pieces() {
            let warnings = self.filter.warnings_from(origin);
            if !warnings.is_empty() {
                self.legal.get_mut(origin).retain(|c| !warnings.contains(c));
            }
        }

        debug!(
            "recomputed: {} raw, {} warning, {} legal",
            self.generator.table().len(),
            self.filter.warnings().len(),
            self.legal.len()
        );
    }

    /// The board the tables describe.
    pub fn position(&self) -> &Board {
        &self.position
    }

    /// Destinations of the piece on `origin` that keep its general safe. Empty for an
    /// empty cell.
    pub fn legal_moves(&self, origin: Cell) -> &CellList {
        self.legal.get(origin)
    }

    /// Destinations of the piece on `origin` that would expose its general.
    pub fn warning_moves(&self, origin: Cell) -> &CellList {
        self.filter.warnings_from(origin)
    }

    pub fn raw_moves(&self, origin: Cell) -> &CellList {
        self.generator.destinations(origin)
    }

    pub fn all_legal_destinations(&self, side: Side) -> CellSet {
        self.side_origins(side)
            .flat_map(|origin| self.legal.get(origin).iter())
            .collect()
    }

    pub fn all_raw_destinations(&self, side: Side) -> CellSet {
        self.generator.all_destinations(&self.position, side)
    }

    /// Number of legal (origin, destination) pairs for `side`.
    pub fn legal_move_count(&self, side: Side) -> usize {
        self.side_origins(side)
            .map(|origin| self.legal.get(origin).len())
            .sum()
    }

    /// Every legal move of `side`, origins in cell order.
    pub fn legal_move_list(&self, side: Side) -> Vec<Move> {
        self.side_origins(side)
            .flat_map(|origin| self.legal.get(origin).iter().map(move |to| Move::new(origin, to)))
            .collect()
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal.get(mv.from).contains(mv.to)
    }

    /// True if the other side's raw moves reach `side`'s general. A side without a
    /// general is never in check.
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.position.find_general(side) {
            Some(general) => self.all_raw_destinations(side.other_side()).contains(general),
            None => false,
        }
    }

    /// Terminal state for `side_to_move`, or `None` while it still has a legal move.
    pub fn status(&self, side_to_move: Side) -> Option<Status> {
        if self.legal_move_count(side_to_move) > 0 {
            return None;
        }
        if self.is_in_check(side_to_move) {
            Some(Status::Checkmate(side_to_move))
        } else {
            Some(Status::Stalemate(side_to_move))
        }
    }

    fn side_origins(&self, side: Side) -> impl Iterator<Item = Cell> + '_ {
        self.position
            .pieces()
            .filter(move |(_, piece)| piece.side == side)
            .map(|(origin, _)| origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Occupant, PieceKind};
    use pretty_assertions::assert_eq;

    fn cell(row: u8, col: u8) -> Cell {
        Cell::new(row, col).unwrap()
    }

    fn board_with(pieces: &[(u8, u8, PieceKind, Side)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, kind, side) in pieces {
            board.set_occupant(cell(row, col), Occupant::new(kind, side));
        }
        board
    }

    #[test]
    fn test_start_position() {
        let mut engine = Engine::new();
        engine.recompute_all(&Board::new());
        assert_eq!(engine.legal_move_count(Side::Home), 31);
        assert_eq!(engine.legal_move_count(Side::Away), 31);
        assert_eq!(engine.legal_move_list(Side::Home).len(), 31);
        assert!(!engine.is_in_check(Side::Home));
        assert!(!engine.is_in_check(Side::Away));
        assert_eq!(engine.status(Side::Home), None);
        assert_eq!(
            engine.legal_moves(cell(10, 1)).to_vec(),
            vec![cell(9, 1), cell(8, 1)]
        );
        assert!(engine.warning_moves(cell(10, 1)).is_empty());
    }

    #[test]
    fn test_legal_is_raw_minus_warnings() {
        let board = board_with(&[
            (2, 5, PieceKind::General, Side::Away),
            (4, 5, PieceKind::Chariot, Side::Away),
            (7, 5, PieceKind::Chariot, Side::Home),
            (10, 4, PieceKind::General, Side::Home),
        ]);
        let mut engine = Engine::new();
        engine.recompute_all(&board);

        let origin = cell(4, 5);
        assert_eq!(
            engine.legal_moves(origin).to_vec(),
            vec![cell(3, 5), cell(5, 5), cell(6, 5), cell(7, 5)]
        );
        assert_eq!(engine.warning_moves(origin).len(), 8);
        assert_eq!(engine.raw_moves(origin).len(), 12);
        assert!(engine.is_legal(&Move::new(origin, cell(7, 5))));
        assert!(!engine.is_legal(&Move::new(origin, cell(4, 4))));
    }

    #[test]
    fn test_checkmate() {
        let board = board_with(&[
            (1, 4, PieceKind::General, Side::Away),
            (1, 9, PieceKind::Chariot, Side::Home),
            (2, 9, PieceKind::Chariot, Side::Home),
            (9, 5, PieceKind::General, Side::Home),
        ]);
        let mut engine = Engine::new();
        engine.recompute_all(&board);

        assert!(engine.is_in_check(Side::Away));
        assert!(engine.all_legal_destinations(Side::Away).is_empty());
        assert_eq!(engine.status(Side::Away), Some(Status::Checkmate(Side::Away)));
        assert_eq!(engine.status(Side::Home), None);
    }

    #[test]
    fn test_stalemate() {
        let board = board_with(&[
            (1, 4, PieceKind::General, Side::Away),
            (2, 9, PieceKind::Chariot, Side::Home),
            (5, 5, PieceKind::Chariot, Side::Home),
            (9, 5, PieceKind::General, Side::Home),
        ]);
        let mut engine = Engine::new();
        engine.recompute_all(&board);

        assert!(!engine.is_in_check(Side::Away));
        assert_eq!(engine.legal_move_count(Side::Away), 0);
        assert_eq!(engine.status(Side::Away), Some(Status::Stalemate(Side::Away)));
    }

    #[test]
    fn test_missing_general_is_never_in_check() {
        let board = board_with(&[(5, 5, PieceKind::Chariot, Side::Home)]);
        let mut engine = Engine::new();
        engine.recompute_all(&board);
        assert!(!engine.is_in_check(Side::Away));
        assert_eq!(engine.status(Side::Away), Some(Status::Stalemate(Side::Away)));
        assert_eq!(engine.legal_move_count(Side::Home), 17);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let board = Board::new();
        let mut a = Engine::new();
        let mut b = Engine::new();
        a.recompute_all(&board);
        b.recompute_all(&board);
        a.recompute_all(&board);
        assert_eq!(a.legal, b.legal);
        assert_eq!(a.position(), b.position());
    }
}
