use rayon::prelude::*;

use crate::board::Board;
use crate::engine::Engine;
use crate::types::Side;

/// Number of legal move sequences of length `depth` starting with `side` to move.
pub fn perft(board: &Board, side: Side, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut engine = Engine::new();
    engine.recompute_all(board);
    let moves = engine.legal_move_list(side);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for m in moves {
        let mut next = *board;
        next.relocate(m.from, m.to);
        nodes += perft(&next, side.other_side(), depth - 1);
    }
    nodes
}

/// Same count as [`perft`], with the first ply split across the rayon pool. Every worker
/// builds its own engines, so no scratch board is shared between threads.
pub fn perft_parallel(board: &Board, side: Side, depth: u8) -> u64 {
    if depth <= 1 {
        return perft(board, side, depth);
    }

    let mut engine = Engine::new();
    engine.recompute_all(board);
    engine
        .legal_move_list(side)
        .into_par_iter()
        .map(|m| {
            let mut next = *board;
            next.relocate(m.from, m.to);
            perft(&next, side.other_side(), depth - 1)
        })
        .sum()
}
