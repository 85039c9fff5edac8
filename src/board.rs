use color_eyre::eyre::{bail, ensure, Result};
use itertools::Itertools;

use crate::types::*;

/// Opening arrangement, row 1 first. Uppercase is HOME, lowercase is AWAY.
pub const STARTING_LAYOUT: &str = "\
rhea.aehr
....g....
.c.....c.
s.s.s.s.s
.........
.........
S.S.S.S.S
.C.....C.
....G....
RHEA.AEHR";

/// Occupant of every cell of the 10x9 board.
///
/// Every cell always holds a value; emptiness is [`Occupant::Empty`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Occupant; CELL_COUNT],
}

impl Board {
    /// The standard opening position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for (row, line) in (MIN_ROW..=MAX_ROW).zip(STARTING_LAYOUT.lines()) {
            for (col, c) in (MIN_COL..=MAX_COL).zip(line.chars()) {
                if let (Some(cell), Some(piece)) = (Cell::new(row, col), Piece::from_char(c)) {
                    board.set_occupant(cell, Occupant::Piece(piece));
                }
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            cells: [Occupant::Empty; CELL_COUNT],
        }
    }

    /// Parses a layout of 10 lines (row 1 first) of 9 characters each.
    ///
    /// `.` is an empty cell; `G A E H R C S` are general, advisor, elephant, horse,
    /// chariot, cannon and soldier, uppercase for HOME and lowercase for AWAY.
    /// Whitespace inside a line and blank lines are ignored.
    pub fn from_layout(layout: &str) -> Result<Board> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        ensure!(
            lines.len() == MAX_ROW as usize,
            "layout must have {} rows, found {}",
            MAX_ROW,
            lines.len()
        );

        let mut board = Board::empty();
        for (row, line) in (MIN_ROW..=MAX_ROW).zip(lines) {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            ensure!(
                symbols.len() == MAX_COL as usize,
                "row {row} must have {} cells, found {}",
                MAX_COL,
                symbols.len()
            );
            for (col, symbol) in (MIN_COL..=MAX_COL).zip(symbols) {
                let occupant = match symbol {
                    '.' => Occupant::Empty,
                    c => match Piece::from_char(c) {
                        Some(piece) => Occupant::Piece(piece),
                        None => bail!("unexpected char `{c}` in row {row}"),
                    },
                };
                if let Some(cell) = Cell::new(row, col) {
                    board.set_occupant(cell, occupant);
                }
            }
        }
        Ok(board)
    }

    /// Inverse of [`Board::from_layout`].
    pub fn to_layout(&self) -> String {
        (MIN_ROW..=MAX_ROW)
            .map(|row| {
                (MIN_COL..=MAX_COL)
                    .filter_map(|col| Cell::new(row, col))
                    .map(|cell| self.occupant_at(cell).to_char())
                    .collect::<String>()
            })
            .join("\n")
    }

    #[inline(always)]
    pub fn occupant_at(&self, cell: Cell) -> Occupant {
        self.cells[cell.index()]
    }

    #[inline(always)]
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.occupant_at(cell).piece()
    }

    #[inline(always)]
    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.occupant_at(cell).is_empty()
    }

    #[inline(always)]
    pub fn set_occupant(&mut self, cell: Cell, occupant: Occupant) {
        self.cells[cell.index()] = occupant;
    }

    /// Moves whatever stands on `from` to `to`, leaving `from` empty.
    /// A piece on `to` is overwritten; captures are not tracked.
    pub fn relocate(&mut self, from: Cell, to: Cell) {
        let moving = self.occupant_at(from);
        self.set_occupant(to, moving);
        self.set_occupant(from, Occupant::Empty);
    }

    pub fn copy_from(&mut self, other: &Board) {
        self.cells = other.cells;
    }

    /// Occupied cells in cell order.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::values().filter_map(move |cell| self.piece_at(cell).map(|piece| (cell, piece)))
    }

    /// Location of `side`'s general, or `None` if the board has none.
    pub fn find_general(&self, side: Side) -> Option<Cell> {
        let general = Piece::new(PieceKind::General, side);
        self.pieces()
            .find(|(_, piece)| *piece == general)
            .map(|(cell, _)| cell)
    }

    /// The board rotated 180 degrees with every piece changing side.
    pub fn mirrored(&self) -> Board {
        let mut board = Board::empty();
        for (cell, piece) in self.pieces() {
            board.set_occupant(
                cell.mirror(),
                Occupant::new(piece.kind, piece.side.other_side()),
            );
        }
        board
    }

    pub fn draw_board(&self) -> String {
        let mut res = String::new();
        res.push_str("    a b c d e f g h i\n");
        for row in MIN_ROW..=MAX_ROW {
            let line = (MIN_COL..=MAX_COL)
                .filter_map(|col| Cell::new(row, col))
                .map(|cell| self.occupant_at(cell).to_char())
                .join(" ");
            res.push_str(&format!("{row:>2}  {line}\n"));
        }
        res
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.draw_board())
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board(\n{}\n)", self.to_layout())
    }
}
