//! Error types for board construction and piece placement.

use thiserror::Error;

use crate::board::Player;

/// Reasons a placement is rejected. The board is left untouched in every case.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("coordinates ({col}, {row}) are outside the board")]
    OutOfBounds { col: usize, row: usize },

    #[error("invalid player id {0}, expected 1 or 2")]
    InvalidPlayer(u8),

    #[error("cell ({col}, {row}) is already occupied")]
    CellOccupied { col: usize, row: usize },

    #[error("game is already over, player {winner} won")]
    GameAlreadyOver { winner: Player },
}

/// Errors raised while building a board.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {cols}x{rows}")]
    InvalidDimensions { cols: usize, rows: usize },

    #[error("board {cols}x{rows} is too large, each side is limited to {max}")]
    TooLarge { cols: usize, rows: usize, max: usize },
}
