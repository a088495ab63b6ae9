//! Worlds the harness can load from text.

pub mod graph;
pub mod parking;
pub mod tree_game;
