//! Alien Invasion for the terminal.
//!
//! The library holds every piece of game logic; the binary only owns the
//! terminal (rendering, input, pacing).

pub mod assets;
pub mod audio;
pub mod compute;
pub mod entities;
pub mod error;
pub mod group;
pub mod input;
pub mod rect;
pub mod scoreboard;
pub mod settings;
pub mod stats;
