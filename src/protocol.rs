//! Line-based text protocol for driving a board.
//!
//! One command per line, with an optional numeric id in front. Replies are
//! `=[id] <payload>` on success and `?[id] <message>` on failure, each
//! followed by a blank line. Empty lines and `#` comments are skipped.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <cols> [rows]` - Start over on a board of that size
//! - `clear_board` - Start over on the same size
//! - `play <player> <col> <row>` - Place a piece for player `1` or `2`
//! - `cell <col> <row>` - `.`, `1`, `2` or `out_of_bounds`
//! - `line <col> <row>` - Longest line through an occupied cell
//! - `status` - `ongoing` or `over <winner>`
//! - `showboard` - Text dump of the grid
//! - `random` - Random move, as the demo server plays per message

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::board::{Board, CellState};
use crate::config::GameConfig;
use crate::error::BoardError;
use crate::session::{log_result, random_placement, turn_message};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "cell",
    "clear_board",
    "known_command",
    "line",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "random",
    "showboard",
    "status",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    config: GameConfig,
    board: Board,
    rng: fastrand::Rng,
}

impl ProtocolEngine {
    /// Create an engine with a fresh board built from `config`.
    pub fn new(config: GameConfig, rng: fastrand::Rng) -> Result<Self, BoardError> {
        let board = config.build_board()?;
        Ok(Self { config, board, rng })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!(%command, ?args, "command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id from the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn reset(&mut self) -> (bool, String) {
        match self.config.build_board() {
            Ok(board) => {
                self.board = board;
                info!(cols = self.config.cols, rows = self.config.rows, "new game");
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(cols) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let rows = args.get(1).unwrap_or(cols);
                match (cols.parse::<usize>(), rows.parse::<usize>()) {
                    (Ok(cols), Ok(rows)) => {
                        let previous = self.config;
                        self.config.cols = cols;
                        self.config.rows = rows;
                        let reply = self.reset();
                        if !reply.0 {
                            self.config = previous;
                        }
                        reply
                    }
                    _ => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => self.reset(),

            "play" => {
                let [player, col, row] = args else {
                    return (false, "expected: play <player> <col> <row>".to_string());
                };
                let Ok(player) = player.parse::<u8>() else {
                    return (false, format!("invalid player: {player}"));
                };
                let (Ok(col), Ok(row)) = (col.parse::<usize>(), row.parse::<usize>()) else {
                    return (false, "invalid coordinates".to_string());
                };
                let result = self.board.place_id(player, col, row);
                log_result(&result);
                match result {
                    Ok(placement) => (true, format!("flipped {}", placement.flipped.len())),
                    Err(e) => (false, e.to_string()),
                }
            }

            "cell" => {
                let [col, row] = args else {
                    return (false, "expected: cell <col> <row>".to_string());
                };
                let (Ok(col), Ok(row)) = (col.parse::<i64>(), row.parse::<i64>()) else {
                    return (false, "invalid coordinates".to_string());
                };
                let reply = match self.board.cell_owner(col, row) {
                    CellState::Empty => ".".to_string(),
                    CellState::Occupied(p) => p.to_string(),
                    CellState::OutOfBounds => "out_of_bounds".to_string(),
                };
                (true, reply)
            }

            "line" => {
                let [col, row] = args else {
                    return (false, "expected: line <col> <row>".to_string());
                };
                let (Ok(col), Ok(row)) = (col.parse::<usize>(), row.parse::<usize>()) else {
                    return (false, "invalid coordinates".to_string());
                };
                match self.board.line_length(col, row) {
                    0 => (false, "no piece at that cell".to_string()),
                    n => (true, n.to_string()),
                }
            }

            "status" => match self.board.is_game_over() {
                (true, Some(winner)) => (true, format!("over {winner}")),
                _ => (true, "ongoing".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.board.render())),

            "random" => {
                let result = random_placement(&mut self.board, &mut self.rng);
                log_result(&result);
                (true, turn_message(&self.board))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    fn engine() -> ProtocolEngine {
        let config = GameConfig {
            cols: 6,
            rows: 6,
            ..GameConfig::default()
        };
        ProtocolEngine::new(config, fastrand::Rng::with_seed(3)).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ProtocolEngine::parse_id("123 status");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "status");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ProtocolEngine::parse_id("status");
        assert_eq!(id, None);
        assert_eq!(cmd, "status");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["play"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_and_cell() {
        let mut engine = engine();

        let (success, response) = engine.execute("play", &["1", "2", "3"]);
        assert!(success);
        assert_eq!(response, "flipped 0");

        assert_eq!(engine.execute("cell", &["2", "3"]), (true, "1".to_string()));
        assert_eq!(engine.execute("cell", &["0", "0"]), (true, ".".to_string()));
        assert_eq!(
            engine.execute("cell", &["-1", "0"]),
            (true, "out_of_bounds".to_string())
        );
    }

    #[test]
    fn test_play_errors() {
        let mut engine = engine();

        let (success, response) = engine.execute("play", &["0", "1", "1"]);
        assert!(!success);
        assert!(response.contains("invalid player id 0"));

        let (success, response) = engine.execute("play", &["3", "9", "9"]);
        assert!(!success);
        assert!(response.contains("outside the board"));

        engine.execute("play", &["1", "1", "1"]);
        let (success, response) = engine.execute("play", &["2", "1", "1"]);
        assert!(!success);
        assert!(response.contains("occupied"));

        let (success, _) = engine.execute("play", &["1", "1"]);
        assert!(!success);
    }

    #[test]
    fn test_status_after_win() {
        let mut engine = engine();
        for col in 0..5 {
            let col = col.to_string();
            engine.execute("play", &["2", col.as_str(), "0"]);
        }
        assert_eq!(engine.execute("status", &[]), (true, "over 2".to_string()));

        let (success, response) = engine.execute("play", &["1", "5", "5"]);
        assert!(!success);
        assert!(response.contains("already over"));

        let (_, response) = engine.execute("random", &[]);
        assert_eq!(response, "Game over, Player 2 won!");
    }

    #[test]
    fn test_boardsize_and_clear() {
        let mut engine = engine();
        engine.execute("play", &["1", "0", "0"]);

        let (success, _) = engine.execute("boardsize", &["9", "4"]);
        assert!(success);
        assert_eq!(engine.board().cols(), 9);
        assert_eq!(engine.board().rows(), 4);
        assert_eq!(engine.board().stone_count(Player::One), 0);

        let (success, _) = engine.execute("boardsize", &["0"]);
        assert!(!success);
        assert_eq!(engine.board().cols(), 9);

        engine.execute("play", &["1", "0", "0"]);
        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.board().cols(), 9);
        assert_eq!(engine.board().last_move(), None);
    }

    #[test]
    fn test_line_command() {
        let mut engine = engine();
        engine.execute("play", &["1", "0", "0"]);
        engine.execute("play", &["1", "1", "1"]);
        engine.execute("play", &["1", "2", "2"]);

        assert_eq!(engine.execute("line", &["1", "1"]), (true, "3".to_string()));
        let (success, _) = engine.execute("line", &["5", "0"]);
        assert!(!success);
        let (success, _) = engine.execute("line", &["9", "9"]);
        assert!(!success);
    }

    #[test]
    fn test_oversized_boardsize_rejected() {
        let mut engine = engine();
        engine.execute("play", &["2", "3", "3"]);

        let (success, response) = engine.execute("boardsize", &["4294967296", "4294967296"]);
        assert!(!success);
        assert!(response.contains("too large"));

        let (success, _) = engine.execute("boardsize", &["100000"]);
        assert!(!success);

        assert_eq!(engine.board().cols(), 6);
        assert_eq!(engine.board().get(3, 3), Some(Player::Two));

        let input = b"boardsize 4294967296 4294967296\nstatus\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("? board 4294967296x4294967296 is too large"));
        assert!(text.ends_with("= ongoing\n\n"));
    }

    #[test]
    fn test_run_loop() {
        let mut engine = engine();
        let input = b"# comment\n\n1 play 1 0 0\n2 cell 0 0\nbogus\nquit\nstatus\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 flipped 0\n\n=2 1\n\n? unknown command: bogus\n\n= \n\n"
        );
    }
}
