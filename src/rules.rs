//! Movement classes of each piece kind, and the palace geometry they refer to.

use crate::types::{Cell, PieceKind, Side, MAX_COL, MAX_ROW};

/// Number of steps that covers any straight line on the board.
pub const UNBOUNDED_RANGE: usize = MAX_ROW as usize;

/// How a piece kind moves. Every field is consulted by the move generator or the
/// legality predicate; none of them depend on where the piece stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRules {
    /// Must leap exactly one non-cannon screen, and may not land on another screen jumper.
    pub screen_jumper: bool,
    pub can_move_backward: bool,
    pub palace_confined: bool,
    /// Maximum number of steps along a ray.
    pub straight_range: usize,
    /// Diagonal steps taken after the leg by target-seeking pieces; 0 for everyone else.
    pub diagonal_range: usize,
    /// Jumps to a fixed offset instead of walking a ray.
    pub target_seeking: bool,
}

impl PieceKind {
    pub const fn rules(&self) -> PieceRules {
        match self {
            PieceKind::General | PieceKind::Advisor => PieceRules {
                screen_jumper: false,
                can_move_backward: true,
                palace_confined: true,
                straight_range: 1,
                diagonal_range: 0,
                target_seeking: false,
            },
            PieceKind::Elephant => PieceRules {
                screen_jumper: false,
                can_move_backward: true,
                palace_confined: false,
                straight_range: 1,
                diagonal_range: 2,
                target_seeking: true,
            },
            PieceKind::Horse => PieceRules {
                screen_jumper: false,
                can_move_backward: true,
                palace_confined: false,
                straight_range: 1,
                diagonal_range: 1,
                target_seeking: true,
            },
            PieceKind::Chariot => PieceRules {
                screen_jumper: false,
                can_move_backward: true,
                palace_confined: false,
                straight_range: UNBOUNDED_RANGE,
                diagonal_range: 0,
                target_seeking: false,
            },
            PieceKind::Cannon => PieceRules {
                screen_jumper: true,
                can_move_backward: true,
                palace_confined: false,
                straight_range: UNBOUNDED_RANGE,
                diagonal_range: 0,
                target_seeking: false,
            },
            PieceKind::Soldier => PieceRules {
                screen_jumper: false,
                can_move_backward: false,
                palace_confined: false,
                straight_range: 1,
                diagonal_range: 0,
                target_seeking: false,
            },
        }
    }

    pub const fn is_screen_jumper(&self) -> bool {
        self.rules().screen_jumper
    }
}

const PALACE_MIN_COL: u8 = MAX_COL / 2;
const PALACE_MAX_COL: u8 = MAX_COL / 2 + 2;

/// Rows of the 3x3 palace belonging to `side`.
pub const fn palace_rows(side: Side) -> (u8, u8) {
    match side {
        Side::Away => (1, 3),
        Side::Home => (MAX_ROW - 2, MAX_ROW),
    }
}

pub fn in_palace(cell: Cell, side: Side) -> bool {
    let (min_row, max_row) = palace_rows(side);
    (min_row..=max_row).contains(&cell.row())
        && (PALACE_MIN_COL..=PALACE_MAX_COL).contains(&cell.col())
}

/// Corners and centre of the HOME palace. The AWAY points are their mirror images.
const PALACE_DIAGONAL_POINTS: [(u8, u8); 5] = [
    (MAX_ROW, PALACE_MIN_COL),
    (MAX_ROW, PALACE_MAX_COL),
    (MAX_ROW - 1, PALACE_MIN_COL + 1),
    (MAX_ROW - 2, PALACE_MIN_COL),
    (MAX_ROW - 2, PALACE_MAX_COL),
];

/// True for the ten cells joined by the palace diagonals.
pub fn is_palace_diagonal_point(cell: Cell) -> bool {
    let mirrored = cell.mirror();
    PALACE_DIAGONAL_POINTS.iter().any(|&(row, col)| {
        (cell.row() == row && cell.col() == col) || (mirrored.row() == row && mirrored.col() == col)
    })
}

/// True if moving from `from` to `to` goes towards the mover's own back row.
pub fn is_backward(side: Side, from: Cell, to: Cell) -> bool {
    let rows_advanced = to.row() as i8 - from.row() as i8;
    rows_advanced * side.forward() < 0
}
