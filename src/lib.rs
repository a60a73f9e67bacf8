//! Xiangqi rules, turn handling and a random automated opponent.

pub mod board;
pub mod check;
pub mod display_format;
pub mod error;
pub mod event;
pub mod game;
pub mod location;
pub mod narration;
pub mod piece;
pub mod rules;
pub mod selector;
pub mod session;

pub use error::{Error, Result};
