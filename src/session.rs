//! Shared board handle and random turns.
//!
//! A server owns exactly one [`SharedBoard`] per game and hands clones of it
//! to whatever handles requests. Every access goes through the mutex, so a
//! `place` is never observed half done.
//!
//! [`random_placement`] is the move the demo server plays for each message it
//! receives: a random player on a random cell, with no turn order.
//! [`WALKTHROUGH`] is a fixed opening that exercises both kinds of flip and
//! ends in a win.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::board::{Board, Placement, Player};
use crate::error::PlacementError;

#[derive(Debug, Clone)]
pub struct SharedBoard {
    inner: Arc<Mutex<Board>>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(Mutex::new(board)),
        }
    }

    /// Lock the board. A poisoned lock is recovered: `place` validates before
    /// writing, so a panicking holder cannot leave a partial move behind.
    pub fn lock(&self) -> MutexGuard<'_, Board> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn place(&self, player: Player, col: usize, row: usize) -> Result<Placement, PlacementError> {
        let result = self.lock().place(player, col, row);
        log_result(&result);
        result
    }

    pub fn is_game_over(&self) -> (bool, Option<Player>) {
        self.lock().is_game_over()
    }

    pub fn render(&self) -> String {
        self.lock().render()
    }

    /// Play one random move and return the reply a client would see.
    pub fn random_turn(&self, rng: &mut fastrand::Rng) -> String {
        let mut board = self.lock();
        let result = random_placement(&mut board, rng);
        log_result(&result);
        turn_message(&board)
    }
}

/// Scripted game: a single flip on move 3, a double flip on move 6, then
/// Player Two completes row 2 on the eighth move.
pub const WALKTHROUGH: &[(Player, usize, usize)] = &[
    (Player::One, 1, 1),
    (Player::Two, 1, 2),
    (Player::One, 1, 3),
    (Player::Two, 0, 2),
    (Player::Two, 0, 0),
    (Player::Two, 2, 2),
    (Player::Two, 4, 2),
    (Player::Two, 3, 2),
];

/// Random player on a random cell. Occupied cells are not avoided, so the
/// move can be rejected like any other.
pub fn random_placement(board: &mut Board, rng: &mut fastrand::Rng) -> Result<Placement, PlacementError> {
    let player = if rng.bool() { Player::One } else { Player::Two };
    let col = rng.usize(..board.cols());
    let row = rng.usize(..board.rows());
    board.place(player, col, row)
}

/// `Game over, Player N won!` once someone has won, otherwise the grid.
pub fn turn_message(board: &Board) -> String {
    match board.is_game_over() {
        (true, Some(winner)) => format!("Game over, Player {winner} won!"),
        _ => board.render(),
    }
}

/// Trace a placement outcome. The board itself never logs.
pub fn log_result(result: &Result<Placement, PlacementError>) {
    match result {
        Ok(placement) => {
            debug!(
                player = placement.player.id(),
                col = placement.col,
                row = placement.row,
                flipped = placement.flipped.len(),
                line_length = placement.line_length,
                "placed piece"
            );
            if placement.wins {
                info!(winner = placement.player.id(), "game over");
            }
        }
        Err(e) => warn!(error = %e, "placement rejected"),
    }
}
