//! Alien Invasion: a single-screen arcade shooter.
//!
//! The library holds the simulation (entities, collisions, the state
//! machine and the fixed-rate loop) behind small traits for input,
//! rendering and persistence. The binary plugs a crossterm terminal into
//! those traits.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod high_score;
pub mod input;
pub mod player;
pub mod projectiles;
pub mod viewport;
