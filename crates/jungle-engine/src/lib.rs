//! Move-legality and game-state engine for Jungle (Dou Shou Qi).
//!
//! This crate provides:
//! - [`Topology`] - board geometry: terrain and neighbor overrides
//! - [`PieceRegistry`] - pieces, their cells, capture and reset
//! - [`MoveResolver`] - legal destination generation
//! - [`TurnEngine`] - move application, trap and den effects, turn order
//! - [`GameSession`] - the API a presentation layer drives
//! - [`EngineConfig`] - TOML configuration
//!
//! # Architecture
//!
//! The board has 63 cells, so cell sets are single `u64` masks
//! ([`CellSet`]). Legal destinations come back as a `CellSet` for the caller
//! to highlight; the chosen cell is then applied by the turn engine.
//!
//! # Example
//!
//! ```
//! use jungle_engine::{GameSession, TurnState};
//! use jungle_core::Player;
//!
//! let mut game = GameSession::standard().unwrap();
//!
//! // South's Cat starts on cell 10.
//! let destinations = game.select_piece_at(10).unwrap();
//! assert_eq!(destinations.to_indices(), vec![1, 9, 11, 19]);
//!
//! let outcome = game.select_cell(11).unwrap();
//! assert!(outcome.moved);
//! assert_eq!(game.active_player(), Player::North);
//! assert_eq!(game.state(), &TurnState::AwaitingSelection);
//! ```

mod cell_set;
mod config;
mod error;
mod registry;
mod resolver;
mod session;
mod topology;
mod turn;

pub use cell_set::{CellSet, CellSetIter};
pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use registry::{Piece, PieceId, PieceRegistry, PieceStatus};
pub use resolver::{CapabilitySource, MoveResolver};
pub use session::GameSession;
pub use topology::{BoardSpec, Neighbors, OverrideSpec, Terrain, Topology, TopologyError};
pub use turn::{MoveOutcome, TurnEngine, TurnState};
