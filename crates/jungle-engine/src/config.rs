//! Engine configuration loaded from TOML.
//!
//! Every field is optional; an empty file (or no file) yields the canonical
//! game.

use crate::{BoardSpec, CapabilitySource, EngineError, MoveResolver, Topology, TopologyError};
use jungle_core::{LayoutError, Player, StartLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a configuration or building a game
/// from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid board: {0}")]
    Board(#[from] TopologyError),
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    /// The layout did not fit on the board.
    #[error("cannot set up game: {0}")]
    Setup(#[from] EngineError),
}

/// Settings for a [`GameSession`](crate::GameSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Player who moves first.
    pub first_player: Player,
    /// Whether a Rat/Dog keeps swimming and a Lion/Tiger keeps leaping while
    /// neutralized on a trap.
    pub trapped_pieces_keep_abilities: bool,
    /// Starting layout in placement notation; canonical if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    pub board: BoardSpec,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            first_player: Player::South,
            trapped_pieces_keep_abilities: true,
            layout: None,
            board: BoardSpec::standard(),
        }
    }
}

impl EngineConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it is not valid TOML for this type.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Like [`Self::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn capability_source(&self) -> CapabilitySource {
        if self.trapped_pieces_keep_abilities {
            CapabilitySource::BaseRank
        } else {
            CapabilitySource::CurrentRank
        }
    }

    pub fn resolver(&self) -> MoveResolver {
        MoveResolver::new(self.capability_source())
    }

    /// Validates and builds the board.
    pub fn topology(&self) -> Result<Topology, TopologyError> {
        Topology::new(&self.board)
    }

    /// Parses the configured layout, or returns the canonical one.
    pub fn start_layout(&self) -> Result<StartLayout, LayoutError> {
        match &self.layout {
            Some(notation) => StartLayout::parse(notation),
            None => Ok(StartLayout::standard()),
        }
    }
}
