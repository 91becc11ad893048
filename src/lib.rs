//! This crate contains the turn engine and the terminal front end for Hunt the Wampus.
//!
//! The engine lives in [`grid`] and [`game`]: a square grid of rooms holding a player, a wumpus,
//! pits, bats and arrows, and the rules that resolve one turn after every player action. Randomness
//! comes from a [`random::RandomSource`], so a game can be replayed from a seed or scripted in tests.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod events;
mod types;
mod ui;

pub mod config;
pub mod direction;
pub mod entity;
pub mod game;
pub mod grid;
pub mod logging;
pub mod random;

pub use app::App;
