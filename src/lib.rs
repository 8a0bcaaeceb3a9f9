//! RetroDeck - a retro terminal desktop with two widgets
//!
//! This library provides:
//! - Snake grid simulator (game module)
//! - Music player with playlist, playback delegation and composing (player module)
//! - High-score key-value store (store module)
//! - TUI rendering and key mapping (render, input modules)
//! - The desk event loop tying the widgets together (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod player;
pub mod render;
pub mod store;
