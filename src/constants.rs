//! Board geometry and rule constants.
//!
//! The board size is chosen at runtime (see [`crate::config::GameConfig`]);
//! the values here are the defaults and the fixed parts of the rules.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default number of columns. Matches the 15x15 board of the demo server.
pub const DEFAULT_COLS: usize = 15;

/// Default number of rows.
pub const DEFAULT_ROWS: usize = 15;

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 1024;

// =============================================================================
// Rules
// =============================================================================

/// Number of pieces in a row needed to win.
pub const WIN_LENGTH: usize = 5;

/// The 8 compass directions as `(dcol, drow)`, scanned by the flip pass.
pub const DIRECTIONS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
];

/// The 4 undirected axes scanned for a winning line. Each is walked in both
/// its direction and the opposite one.
pub const AXES: [(i64, i64); 4] = [
    (-1, -1), // upper-left / lower-right
    (-1, 1),  // lower-left / upper-right
    (0, 1),   // vertical
    (1, 0),   // horizontal
];

// =============================================================================
// Rendering
// =============================================================================

/// Glyph for an empty cell in the text dump.
pub const EMPTY_GLYPH: char = '.';
