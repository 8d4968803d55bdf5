//! # Mancala
//!
//! A two-player Mancala game with a terminal UI built with Ratatui.
//! Each side owns six pits and a store; players sow stones
//! counter-clockwise, capture across the board by landing in an empty own
//! pit, and earn a free turn by landing in their own store. Each player may
//! undo up to three times before forfeiting the turn.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, move-resolution state machine
//! - [`ui`] — Terminal UI: game view, board renderer, themes
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
