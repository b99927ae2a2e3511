//! Board state for flip-gomoku.
//!
//! A `cols x rows` grid stored as a flat vector indexed `row * cols + col`.
//! Placing a piece flips every run of opponent pieces it encloses against
//! another of the mover's pieces (in any of the 8 directions), then checks
//! the lines through the placed piece for five in a row.
//!
//! The board does no logging and no locking. Callers that share it across
//! threads wrap it, see [`crate::session::SharedBoard`].

use std::fmt;

use crate::constants::{AXES, DIRECTIONS, EMPTY_GLYPH, MAX_DIMENSION, WIN_LENGTH};
use crate::error::{BoardError, PlacementError};

/// One of the two players. Wire ids are `1` and `2`; `0` is never a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Parse a wire id.
    pub fn from_id(id: u8) -> Result<Self, PlacementError> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(PlacementError::InvalidPlayer(id)),
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn glyph(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Result of probing a coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Occupied(Player),
    OutOfBounds,
}

/// How long a line has to be to end the game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WinRule {
    /// Five or more in a row wins; overlines count.
    #[default]
    Freestyle,
    /// Only a line of exactly five wins.
    ExactFive,
}

impl WinRule {
    fn is_win(self, axis_lengths: &[usize; 4]) -> bool {
        match self {
            WinRule::Freestyle => axis_lengths.iter().any(|&n| n >= WIN_LENGTH),
            WinRule::ExactFive => axis_lengths.iter().any(|&n| n == WIN_LENGTH),
        }
    }
}

/// A `(col, row)` coordinate.
pub type Point = (usize, usize);

/// The most recent successful placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub player: Player,
    pub col: usize,
    pub row: usize,
}

/// What a successful [`Board::place`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub player: Player,
    pub col: usize,
    pub row: usize,
    /// Cells flipped by the move, in scan order.
    pub flipped: Vec<Point>,
    /// Longest same-player line through the placed piece, after flipping.
    pub line_length: usize,
    /// Whether this move ended the game.
    pub wins: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    cells: Vec<Option<Player>>,
    last_move: Option<Move>,
    /// Set once by the winning move, never cleared.
    winner: Option<Player>,
    rule: WinRule,
}

impl Board {
    /// Create an empty freestyle board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or above [`MAX_DIMENSION`]. Use
    /// [`Board::try_new`] for untrusted input.
    pub fn new(cols: usize, rows: usize) -> Self {
        match Self::try_new(cols, rows) {
            Ok(board) => board,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(cols: usize, rows: usize) -> Result<Self, BoardError> {
        Self::with_rule(cols, rows, WinRule::default())
    }

    pub fn with_rule(cols: usize, rows: usize, rule: WinRule) -> Result<Self, BoardError> {
        if cols == 0 || rows == 0 {
            return Err(BoardError::InvalidDimensions { cols, rows });
        }
        let too_large = BoardError::TooLarge {
            cols,
            rows,
            max: MAX_DIMENSION,
        };
        if cols > MAX_DIMENSION || rows > MAX_DIMENSION {
            return Err(too_large);
        }
        let len = cols.checked_mul(rows).ok_or(too_large)?;
        Ok(Self::empty(cols, rows, len, rule))
    }

    fn empty(cols: usize, rows: usize, len: usize, rule: WinRule) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; len],
            last_move: None,
            winner: None,
            rule,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn rule(&self) -> WinRule {
        self.rule
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    fn idx(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Index of a signed coordinate, or `None` off the board.
    #[inline]
    fn locate(&self, col: i64, row: i64) -> Option<usize> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        (col < self.cols && row < self.rows).then(|| self.idx(col, row))
    }

    #[inline]
    fn in_bounds(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    /// Owner of a cell. Negative or too-large coordinates give `OutOfBounds`.
    pub fn cell_owner(&self, col: i64, row: i64) -> CellState {
        match self.locate(col, row) {
            None => CellState::OutOfBounds,
            Some(i) => match self.cells[i] {
                None => CellState::Empty,
                Some(p) => CellState::Occupied(p),
            },
        }
    }

    /// Owner of an in-bounds cell; `None` for empty or off-board.
    pub fn get(&self, col: usize, row: usize) -> Option<Player> {
        if !self.in_bounds(col, row) {
            return None;
        }
        self.cells[self.idx(col, row)]
    }

    /// Owned copy of the grid, row-major.
    pub fn snapshot(&self) -> Vec<Option<Player>> {
        self.cells.clone()
    }

    pub fn stone_count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    /// A full board with no winner is simply not over; there is no draw.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Place a piece given a raw player id (`1` or `2`).
    ///
    /// Bounds are checked before the id, then the rest as in [`Board::place`].
    pub fn place_id(&mut self, id: u8, col: usize, row: usize) -> Result<Placement, PlacementError> {
        if !self.in_bounds(col, row) {
            return Err(PlacementError::OutOfBounds { col, row });
        }
        let player = Player::from_id(id)?;
        self.place(player, col, row)
    }

    /// Place `player` at `(col, row)`, flip enclosed opponent runs and check
    /// for a win.
    ///
    /// Nothing is written unless every check passes, so a rejected call leaves
    /// the board exactly as it was.
    pub fn place(&mut self, player: Player, col: usize, row: usize) -> Result<Placement, PlacementError> {
        if !self.in_bounds(col, row) {
            return Err(PlacementError::OutOfBounds { col, row });
        }
        if let Some(winner) = self.winner {
            return Err(PlacementError::GameAlreadyOver { winner });
        }
        let i = self.idx(col, row);
        if self.cells[i].is_some() {
            return Err(PlacementError::CellOccupied { col, row });
        }

        self.cells[i] = Some(player);
        let flipped = self.flip_pass(player, col, row);
        self.last_move = Some(Move { player, col, row });

        let axis_lengths = self.axis_lengths(player, col, row);
        let line_length = axis_lengths.iter().copied().max().unwrap_or(1);
        let wins = self.rule.is_win(&axis_lengths);
        if wins {
            self.winner = Some(player);
        }

        Ok(Placement {
            player,
            col,
            row,
            flipped,
            line_length,
            wins,
        })
    }

    /// Flip every enclosed opponent run around a freshly placed piece.
    fn flip_pass(&mut self, player: Player, col: usize, row: usize) -> Vec<Point> {
        let mut flipped = Vec::new();
        for &(dcol, drow) in &DIRECTIONS {
            self.flip_direction(player, col, row, dcol, drow, &mut flipped);
        }
        flipped
    }

    fn flip_direction(
        &mut self,
        player: Player,
        col: usize,
        row: usize,
        dcol: i64,
        drow: i64,
        flipped: &mut Vec<Point>,
    ) {
        let (col, row) = (col as i64, row as i64);

        // Walk out to the terminator; the wall or an empty cell means no flip.
        let mut span = 0;
        loop {
            let step = span + 1;
            match self.cell_owner(col + dcol * step, row + drow * step) {
                CellState::OutOfBounds | CellState::Empty => return,
                CellState::Occupied(p) if p == player => break,
                CellState::Occupied(_) => span = step,
            }
        }

        for step in 1..=span {
            let (c, r) = (col + dcol * step, row + drow * step);
            if let Some(i) = self.locate(c, r) {
                self.cells[i] = self.cells[i].map(Player::opponent);
                flipped.push((c as usize, r as usize));
            }
        }
    }

    /// Contiguous `player` pieces walking away from `(col, row)`, exclusive.
    fn run_length(&self, player: Player, col: usize, row: usize, dcol: i64, drow: i64) -> usize {
        let (col, row) = (col as i64, row as i64);
        let mut count = 0;
        let mut step = 1;
        while self.cell_owner(col + dcol * step, row + drow * step) == CellState::Occupied(player) {
            count += 1;
            step += 1;
        }
        count
    }

    fn axis_lengths(&self, player: Player, col: usize, row: usize) -> [usize; 4] {
        AXES.map(|(dcol, drow)| {
            1 + self.run_length(player, col, row, dcol, drow)
                + self.run_length(player, col, row, -dcol, -drow)
        })
    }

    /// Longest line through `(col, row)` for whoever owns it; `0` when the
    /// cell is empty or off the board.
    pub fn line_length(&self, col: usize, row: usize) -> usize {
        match self.get(col, row) {
            Some(player) => self.axis_lengths(player, col, row).into_iter().max().unwrap_or(1),
            None => 0,
        }
    }

    /// `(over, last mover)`. The last mover is the winner when `over` is set,
    /// and `None` before the first move.
    pub fn is_game_over(&self) -> (bool, Option<Player>) {
        match self.winner {
            Some(winner) => (true, Some(winner)),
            None => (false, self.last_move.map(|m| m.player)),
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Diagnostic text dump, see the `Display` impl.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Column header in hex, a rule line, one framed row per board row, and a
/// closing rule. Indices wider than one hex digit are not realigned.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.cols {
            write!(f, " {col:X} ")?;
        }
        writeln!(f, "  ")?;
        writeln!(f, "    {}", "_".repeat(3 * self.cols))?;
        for row in 0..self.rows {
            write!(f, "{row:X}  │")?;
            for col in 0..self.cols {
                let ch = self.get(col, row).map_or(EMPTY_GLYPH, Player::glyph);
                write!(f, " {ch} ")?;
            }
            writeln!(f, "│")?;
        }
        write!(f, "    {}", "‾".repeat(3 * self.cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_ids() {
        assert_eq!(Player::from_id(1), Ok(Player::One));
        assert_eq!(Player::from_id(2), Ok(Player::Two));
        assert_eq!(Player::from_id(0), Err(PlacementError::InvalidPlayer(0)));
        assert_eq!(Player::from_id(3), Err(PlacementError::InvalidPlayer(3)));
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.to_string(), "2");
    }

    #[test]
    fn test_locate_rejects_negative() {
        let board = Board::new(3, 3);
        assert_eq!(board.locate(-1, 0), None);
        assert_eq!(board.locate(0, 3), None);
        assert_eq!(board.locate(2, 1), Some(5));
    }

    #[test]
    fn test_try_new_zero_dimension() {
        assert_eq!(
            Board::try_new(0, 4),
            Err(BoardError::InvalidDimensions { cols: 0, rows: 4 })
        );
        assert!(Board::try_new(1, 1).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_new_zero_dimension_panics() {
        let _ = Board::new(4, 0);
    }

    #[test]
    fn test_try_new_rejects_oversized() {
        assert_eq!(
            Board::try_new(usize::MAX, 2),
            Err(BoardError::TooLarge {
                cols: usize::MAX,
                rows: 2,
                max: MAX_DIMENSION
            })
        );
        assert!(matches!(
            Board::try_new(3, MAX_DIMENSION + 1),
            Err(BoardError::TooLarge { .. })
        ));
        assert!(matches!(
            Board::with_rule(100_000, 100_000, WinRule::ExactFive),
            Err(BoardError::TooLarge { .. })
        ));

        let board = Board::try_new(MAX_DIMENSION, 1).unwrap();
        assert_eq!(board.snapshot().len(), MAX_DIMENSION);
    }

    #[test]
    fn test_run_length_stops_at_edge() {
        let mut board = Board::new(5, 1);
        for col in 0..3 {
            board.place(Player::One, col, 0).unwrap();
        }
        assert_eq!(board.run_length(Player::One, 0, 0, 1, 0), 2);
        assert_eq!(board.run_length(Player::One, 0, 0, -1, 0), 0);
        assert_eq!(board.line_length(1, 0), 3);
        assert_eq!(board.line_length(4, 0), 0);
    }

    #[test]
    fn test_flip_direction_stops_at_empty() {
        // 1 2 2 . : the walk right from col 0 reaches an empty cell
        let mut board = Board::new(4, 1);
        board.place(Player::Two, 1, 0).unwrap();
        board.place(Player::Two, 2, 0).unwrap();
        board.place(Player::One, 0, 0).unwrap();
        assert_eq!(board.get(1, 0), Some(Player::Two));
        assert_eq!(board.get(2, 0), Some(Player::Two));
    }

    #[test]
    fn test_flip_multiple_directions() {
        //  . 2 1
        //  2 2 .
        //  1 . 1
        // Player One at (0, 0) encloses (1, 0) against (2, 0),
        // (1, 1) against (2, 2) and (0, 1) against (0, 2).
        let mut board = Board::new(3, 3);
        board.place(Player::One, 2, 0).unwrap();
        board.place(Player::One, 2, 2).unwrap();
        board.place(Player::One, 0, 2).unwrap();
        board.place(Player::Two, 1, 0).unwrap();
        board.place(Player::Two, 1, 1).unwrap();
        board.place(Player::Two, 0, 1).unwrap();

        let placement = board.place(Player::One, 0, 0).unwrap();
        assert_eq!(placement.flipped.len(), 3);
        assert!(placement.flipped.contains(&(1, 0)));
        assert!(placement.flipped.contains(&(1, 1)));
        assert!(placement.flipped.contains(&(0, 1)));
        assert_eq!(board.stone_count(Player::Two), 0);
        assert_eq!(board.stone_count(Player::One), 7);
    }

    #[test]
    fn test_exact_five_rule_rejects_overline() {
        let mut board = Board::with_rule(7, 2, WinRule::ExactFive).unwrap();
        // 1 1 1 . 1 1 1  -> filling col 3 makes seven
        for col in [0, 1, 2, 4, 5, 6] {
            board.place(Player::One, col, 0).unwrap();
        }
        let placement = board.place(Player::One, 3, 0).unwrap();
        assert_eq!(placement.line_length, 7);
        assert!(!placement.wins);
        assert_eq!(board.is_game_over(), (false, Some(Player::One)));
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new(2, 1);
        assert!(!board.is_full());
        board.place(Player::One, 0, 0).unwrap();
        board.place(Player::Two, 1, 0).unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
    }
}
