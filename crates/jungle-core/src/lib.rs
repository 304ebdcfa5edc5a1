//! Core types for Jungle (Dou Shou Qi).
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Player`] and [`Facing`] for the two sides
//! - [`Rank`], [`Strength`], and [`Capabilities`] for animals and their rules
//! - [`CellId`] and [`Direction`] for board coordinates
//! - [`StartLayout`] and its placement notation

mod cell;
mod layout;
mod player;
mod rank;

pub use cell::{CellId, Direction, InvalidCell, CELL_COUNT, COLUMNS, ROWS};
pub use layout::{LayoutError, Placement, StartLayout};
pub use player::{Facing, Player};
pub use rank::{Capabilities, Rank, Strength};
