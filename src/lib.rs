//! Flip-Gomoku: five-in-a-row with Reversi-style flipping.
//!
//! Placing a piece flips every straight run of opponent pieces it encloses
//! against another of the mover's pieces. The game ends when the move just
//! played completes a line of five or more through the placed piece.
//!
//! ## Modules
//!
//! - [`constants`] - Default dimensions, win length and scan directions
//! - [`board`] - Grid state, placement, flip pass, win scan and text dump
//! - [`error`] - Placement and construction errors
//! - [`config`] - Board dimensions and win rule
//! - [`session`] - Mutex-guarded board handle and random turns
//! - [`protocol`] - Line-based text protocol driving a board
//!
//! ## Example
//!
//! ```
//! use flip_gomoku::board::{Board, CellState, Player};
//!
//! let mut board = Board::new(4, 1);
//! board.place(Player::Two, 1, 0).unwrap();
//! board.place(Player::Two, 2, 0).unwrap();
//! board.place(Player::One, 3, 0).unwrap();
//!
//! // Player One encloses both Player Two pieces.
//! let placement = board.place(Player::One, 0, 0).unwrap();
//! assert_eq!(placement.flipped.len(), 2);
//! assert_eq!(board.cell_owner(1, 0), CellState::Occupied(Player::One));
//! println!("{board}");
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod protocol;
pub mod session;

pub use board::{Board, CellState, Placement, Player, WinRule};
pub use error::{BoardError, PlacementError};
