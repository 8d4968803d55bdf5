//! Core Mancala game logic: the 14-slot board, player ownership, and the
//! move-resolution state machine with single-level undo and observer
//! broadcast.

mod board;
mod player;
mod state;

pub use board::{is_store, Board, SLOTS};
pub use player::{Player, PITS_PER_SIDE};
pub use state::{GameOutcome, GameState, MoveError, StateSnapshot, UndoError, MAX_UNDOS};
