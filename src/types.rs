use color_eyre::eyre::{ensure, eyre, Result};
use itertools::iproduct;

pub const MIN_ROW: u8 = 1;
pub const MAX_ROW: u8 = 10;
pub const MIN_COL: u8 = 1;
pub const MAX_COL: u8 = 9;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (MAX_ROW as usize) * (MAX_COL as usize);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn from_case(c: char) -> Option<Side> {
        if c.is_uppercase() {
            Some(Side::Home)
        } else if c.is_lowercase() {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn other_side(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Row delta of a forward step. AWAY starts on the low rows and advances by increasing row.
    pub fn forward(&self) -> i8 {
        match self {
            Side::Home => -1,
            Side::Away => 1,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

pub const ALL_PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
    PieceKind::Cannon,
    PieceKind::Soldier,
];

impl PieceKind {
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'g' => Some(PieceKind::General),
            'a' => Some(PieceKind::Advisor),
            'e' => Some(PieceKind::Elephant),
            'h' => Some(PieceKind::Horse),
            'r' => Some(PieceKind::Chariot),
            'c' => Some(PieceKind::Cannon),
            's' => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::General => 'G',
            Self::Advisor => 'A',
            Self::Elephant => 'E',
            Self::Horse => 'H',
            Self::Chariot => 'R',
            Self::Cannon => 'C',
            Self::Soldier => 'S',
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::General => "general",
            Self::Advisor => "advisor",
            Self::Elephant => "elephant",
            Self::Horse => "horse",
            Self::Chariot => "chariot",
            Self::Cannon => "cannon",
            Self::Soldier => "soldier",
        }
    }
}

/// A piece without a location: what stands on an occupied cell.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Uppercase letter for HOME, lowercase for AWAY.
    pub fn from_char(c: char) -> Option<Piece> {
        Some(Piece {
            kind: PieceKind::from_char(c)?,
            side: Side::from_case(c)?,
        })
    }

    pub fn to_char(&self) -> char {
        let c = self.kind.to_char();
        match self.side {
            Side::Home => c,
            Side::Away => c.to_ascii_lowercase(),
        }
    }
}

/// Content of one board cell.
///
/// `Empty` carries no side, so it never compares equal to the side of a piece.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Piece(Piece),
}

impl Occupant {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Occupant::Piece(Piece::new(kind, side))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    pub fn piece(&self) -> Option<Piece> {
        match self {
            Occupant::Empty => None,
            Occupant::Piece(p) => Some(*p),
        }
    }

    pub fn side(&self) -> Option<Side> {
        self.piece().map(|p| p.side)
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.piece().map(|p| p.kind)
    }

    pub fn to_char(&self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::Piece(p) => p.to_char(),
        }
    }
}

impl From<Piece> for Occupant {
    fn from(piece: Piece) -> Self {
        Occupant::Piece(piece)
    }
}

/// One of the eight compass directions. North is towards row 1.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// Every direction, in the order the move generator walks them.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
    Direction::NorthWest,
    Direction::NorthEast,
    Direction::SouthWest,
    Direction::SouthEast,
];

impl Direction {
    /// (row delta, column delta)
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    pub const fn is_diagonal(&self) -> bool {
        let (dr, dc) = self.delta();
        dr != 0 && dc != 0
    }

    /// The two diagonals a horse or elephant may turn into after stepping along `self`.
    ///
    /// Diagonal directions have no flanks.
    pub fn flanks(&self) -> Option<[Direction; 2]> {
        match self {
            Direction::North => Some([Direction::NorthWest, Direction::NorthEast]),
            Direction::South => Some([Direction::SouthWest, Direction::SouthEast]),
            Direction::West => Some([Direction::SouthWest, Direction::NorthWest]),
            Direction::East => Some([Direction::NorthEast, Direction::SouthEast]),
            _ => None,
        }
    }
}

/// A cell of the 10x9 board. Rows and columns are 1-based.
///
/// A `Cell` can only be built through [`Cell::new`] or by stepping from another cell,
/// so every value in existence is on the board.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Cell {
    row: u8, // 1 is the AWAY back row
    col: u8, // 1 is the leftmost column as seen from HOME
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Option<Cell> {
        if row < MIN_ROW || row > MAX_ROW || col < MIN_COL || col > MAX_COL {
            None
        } else {
            Some(Cell { row, col })
        }
    }

    pub const fn row(&self) -> u8 {
        self.row
    }

    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Dense index in `0..CELL_COUNT`, row-major starting at row 1.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        (self.row - 1) as usize * MAX_COL as usize + (self.col - 1) as usize
    }

    #[inline(always)]
    pub fn from_index(idx: usize) -> Option<Cell> {
        if idx >= CELL_COUNT {
            return None;
        }
        let row = (idx / MAX_COL as usize) as u8 + 1;
        let col = (idx % MAX_COL as usize) as u8 + 1;
        Some(Cell { row, col })
    }

    /// All 90 cells, row by row.
    pub fn values() -> impl Iterator<Item = Cell> {
        iproduct!(MIN_ROW..=MAX_ROW, MIN_COL..=MAX_COL).map(|(row, col)| Cell { row, col })
    }

    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Cell> {
        let row = self.row as i8 + row_delta;
        let col = self.col as i8 + col_delta;
        if row < 0 || col < 0 {
            return None;
        }
        Cell::new(row as u8, col as u8)
    }

    /// The adjacent cell in `direction`, or `None` past the edge.
    #[inline]
    pub fn step(&self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        self.offset(dr, dc)
    }

    /// The cell reached by rotating the board 180 degrees.
    pub const fn mirror(&self) -> Cell {
        Cell {
            row: MAX_ROW + 1 - self.row,
            col: MAX_COL + 1 - self.col,
        }
    }

    /// True if the straight line from `self` to `other` runs along a diagonal.
    pub fn is_diagonal_to(&self, other: &Cell) -> bool {
        let dr = self.row as i8 - other.row as i8;
        let dc = self.col as i8 - other.col as i8;
        dr != 0 && dr.abs() == dc.abs()
    }

    /// Parses `<column a..i><row 1..10>`, e.g. `e9`.
    pub fn from_algebraic(s: &str) -> Result<Cell> {
        let s = s.trim();
        let mut chars = s.chars();
        let col_char = chars
            .next()
            .ok_or_else(|| eyre!("empty cell name"))?
            .to_ascii_lowercase();
        ensure!(
            ('a'..='i').contains(&col_char),
            "column of `{s}` must be a letter between a and i"
        );
        let row: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| eyre!("row of `{s}` must be a number between 1 and 10"))?;
        let col = col_char as u8 - b'a' + 1;
        Cell::new(row, col).ok_or_else(|| eyre!("`{s}` is not on the board"))
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", (self.col - 1 + b'a') as char, self.row)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
}

impl Move {
    pub fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }

    pub fn to_human(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// Terminal state of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The contained side is to move, in check, and has no legal move.
    Checkmate(Side),
    /// The contained side is to move, not in check, and has no legal move.
    Stalemate(Side),
}

impl Status {
    pub fn to_human(&self) -> String {
        match self {
            Status::Checkmate(side) => format!("{} is checkmated", side.to_human()),
            Status::Stalemate(side) => format!("{} has no legal move", side.to_human()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(1, 1).is_some());
        assert!(Cell::new(10, 9).is_some());
        assert_eq!(Cell::new(0, 5), None);
        assert_eq!(Cell::new(11, 5), None);
        assert_eq!(Cell::new(5, 0), None);
        assert_eq!(Cell::new(5, 10), None);
    }

    #[test]
    fn test_values_enumerates_every_cell_once() {
        let cells: Vec<Cell> = Cell::values().collect();
        assert_eq!(cells.len(), CELL_COUNT);
        for (idx, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index(), idx);
            assert_eq!(Cell::from_index(idx), Some(*cell));
        }
        assert_eq!(Cell::from_index(CELL_COUNT), None);
    }

    #[test]
    fn test_step_off_board_is_none() {
        let corner = Cell::new(1, 1).unwrap();
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::NorthEast), None);
        assert_eq!(corner.step(Direction::SouthEast), Cell::new(2, 2));

        let far = Cell::new(10, 9).unwrap();
        assert_eq!(far.step(Direction::South), None);
        assert_eq!(far.step(Direction::East), None);
        assert_eq!(far.step(Direction::NorthWest), Cell::new(9, 8));
    }

    #[test]
    fn test_mirror() {
        let cell = Cell::new(1, 4).unwrap();
        assert_eq!(cell.mirror(), Cell::new(10, 6).unwrap());
        assert_eq!(cell.mirror().mirror(), cell);

        let centre = Cell::new(2, 5).unwrap();
        assert_eq!(centre.mirror(), Cell::new(9, 5).unwrap());
    }

    #[test]
    fn test_is_diagonal_to() {
        let a = Cell::new(8, 4).unwrap();
        assert!(a.is_diagonal_to(&Cell::new(10, 6).unwrap()));
        assert!(a.is_diagonal_to(&Cell::new(9, 3).unwrap()));
        assert!(!a.is_diagonal_to(&Cell::new(8, 9).unwrap()));
        assert!(!a.is_diagonal_to(&Cell::new(10, 5).unwrap()));
        assert!(!a.is_diagonal_to(&a));
    }

    #[test]
    fn test_flanks() {
        assert_eq!(
            Direction::North.flanks(),
            Some([Direction::NorthWest, Direction::NorthEast])
        );
        assert_eq!(
            Direction::West.flanks(),
            Some([Direction::SouthWest, Direction::NorthWest])
        );
        for direction in ALL_DIRECTIONS {
            assert_eq!(direction.flanks().is_none(), direction.is_diagonal());
        }
    }

    #[test]
    fn test_cell_algebraic() {
        assert_eq!(Cell::from_algebraic("a1").unwrap(), Cell::new(1, 1).unwrap());
        assert_eq!(Cell::from_algebraic("e9").unwrap(), Cell::new(9, 5).unwrap());
        assert_eq!(Cell::from_algebraic("i10").unwrap(), Cell::new(10, 9).unwrap());
        assert_eq!(Cell::new(10, 9).unwrap().to_algebraic(), "i10");
        assert!(Cell::from_algebraic("j1").is_err());
        assert!(Cell::from_algebraic("a11").is_err());
        assert!(Cell::from_algebraic("a0").is_err());
        assert!(Cell::from_algebraic("").is_err());
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(
            Piece::from_char('R'),
            Some(Piece::new(PieceKind::Chariot, Side::Home))
        );
        assert_eq!(
            Piece::from_char('c'),
            Some(Piece::new(PieceKind::Cannon, Side::Away))
        );
        assert_eq!(Piece::from_char('x'), None);
        for kind in ALL_PIECE_KINDS {
            for side in [Side::Home, Side::Away] {
                let piece = Piece::new(kind, side);
                assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            }
        }
    }

    #[test]
    fn test_empty_has_no_side() {
        assert_eq!(Occupant::Empty.side(), None);
        assert_ne!(
            Occupant::Empty.side(),
            Occupant::new(PieceKind::General, Side::Home).side()
        );
    }

    #[test]
    fn test_other_side() {
        assert_eq!(Side::Home, Side::Away.other_side());
        assert_eq!(Side::Away, Side::Home.other_side());
    }
}
