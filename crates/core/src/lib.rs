//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has
//! **zero dependencies** on rendering, timers, storage, or I/O:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Clock-free**: Time-dependent operations take the caller's `now_ms`
//! - **Allocation-free**: Board scans and row lists use fixed-capacity storage
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, full-row detection and row removal
//! - [`piece`]: A piece instance, collision checks, moves and rotation
//! - [`pieces`]: Static shape table and colors for the seven kinds
//! - [`game_state`]: The engine: spawn, hold, lock-in, delayed line clear, lifecycle
//! - [`rng`]: Seeded uniform piece randomizer
//! - [`scoring`]: Line-clear points, levels and drop interval
//! - [`snapshot`]: Read-only copy of the state for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//!
//! let mut game = GameState::new(12345);
//! game.start_game();
//!
//! game.move_current_piece(1, 0);
//! game.rotate_current_piece();
//! game.hard_drop(0);
//!
//! assert!(game.running());
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowList};
pub use game_state::{GameState, LineClear, PendingClear, Phase};
pub use piece::{is_valid_position, Piece};
pub use pieces::{color, get_shape, rotation_count, Shape};
pub use rng::{PieceRandomizer, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
pub use snapshot::{BoardGrid, GameSnapshot};
