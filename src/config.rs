//! Game configuration: board dimensions and win rule.

use crate::board::{Board, WinRule};
use crate::constants::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::error::BoardError;

/// Settings a fresh board is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub cols: usize,
    pub rows: usize,
    pub win_rule: WinRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            win_rule: WinRule::Freestyle,
        }
    }
}

impl GameConfig {
    pub fn build_board(&self) -> Result<Board, BoardError> {
        Board::with_rule(self.cols, self.rows, self.win_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fifteen_square_freestyle() {
        let board = GameConfig::default().build_board().unwrap();
        assert_eq!(board.cols(), 15);
        assert_eq!(board.rows(), 15);
        assert_eq!(board.rule(), WinRule::Freestyle);
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = GameConfig {
            cols: 0,
            rows: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.build_board(),
            Err(BoardError::InvalidDimensions { cols: 0, rows: 0 })
        ));
    }

    #[test]
    fn test_oversized_rejected() {
        let config = GameConfig {
            cols: 20_000,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.build_board(),
            Err(BoardError::TooLarge { cols: 20_000, rows: 15, .. })
        ));
    }
}
