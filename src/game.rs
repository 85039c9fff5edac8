use color_eyre::eyre::{ensure, Result};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::engine::Engine;
use crate::types::*;

/// Turn controller: owns the authoritative board and is the only thing that mutates it.
pub struct Game {
    board: Board,
    engine: Engine,
    side_to_move: Side,
    moves: Vec<Move>,
}

impl Game {
    /// Standard opening, HOME to move.
    pub fn new() -> Self {
        Game::from_board(Board::new(), Side::Home)
    }

    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        let mut engine = Engine::new();
        engine.recompute_all(&board);
        Self {
            board,
            engine,
            side_to_move,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Moves accepted so far, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn status(&self) -> Option<Status> {
        self.engine.status(self.side_to_move)
    }

    /// Apply `mv` for the side to move, recompute, and hand the turn over.
    /// Returns the terminal state the new side to move is in, if any.
    pub fn play(&mut self, mv: Move) -> Result<Option<Status>> {
        ensure!(self.status().is_none(), "the game is already over");
        let piece = self.board.piece_at(mv.from);
        ensure!(
            piece.is_some_and(|p| p.side == self.side_to_move),
            "{} has no piece on {}",
            self.side_to_move.to_human(),
            mv.from
        );
        ensure!(
            self.engine.is_legal(&mv),
            "{} is not a legal move",
            mv.to_human()
        );

        self.board.relocate(mv.from, mv.to);
        self.moves.push(mv);
        self.side_to_move = self.side_to_move.other_side();
        self.engine.recompute_all(&self.board);

        let status = self.status();
        info!(
            "move {}: {} ({} to move{})",
            self.moves.len(),
            mv.to_human(),
            self.side_to_move.to_human(),
            if self.engine.is_in_check(self.side_to_move) {
                ", in check"
            } else {
                ""
            }
        );
        if let Some(status) = status {
            info!("{}", status.to_human());
        }
        Ok(status)
    }

    /// Play up to `max_plies` uniformly random legal moves. Stops early when the side to
    /// move has no legal move and returns that terminal state.
    pub fn playout<R: Rng + ?Sized>(&mut self, max_plies: usize, rng: &mut R) -> Option<Status> {
        for _ in 0..max_plies {
            if let Some(status) = self.status() {
                return Some(status);
            }
            let candidates = self.engine.legal_move_list(self.side_to_move);
            let mv = *candidates.choose(rng)?;
            if let Ok(Some(status)) = self.play(mv) {
                return Some(status);
            }
        }
        self.status()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
