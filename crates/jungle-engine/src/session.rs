//! The public game API.
//!
//! [`GameSession`] owns all game state and is what a presentation layer
//! talks to: it forwards selections to the [`TurnEngine`], keeps the
//! registry and topology together, and handles game start and reset.

use crate::config::{ConfigError, EngineConfig};
use crate::{
    CellSet, EngineError, MoveOutcome, MoveResolver, Piece, PieceId, PieceRegistry, Topology,
    TurnEngine, TurnState,
};
use jungle_core::{CellId, Facing, Player, Rank, StartLayout};
use tracing::{debug, info};

/// A single game of Jungle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    topology: Topology,
    registry: PieceRegistry,
    resolver: MoveResolver,
    turn: TurnEngine,
}

impl GameSession {
    /// Creates a session with no pieces.
    pub fn new(topology: Topology, resolver: MoveResolver, first_player: Player) -> Self {
        GameSession {
            topology,
            registry: PieceRegistry::new(),
            resolver,
            turn: TurnEngine::new(first_player),
        }
    }

    /// The canonical board and layout, South to move.
    pub fn standard() -> Result<Self, EngineError> {
        let mut session = Self::new(Topology::standard(), MoveResolver::default(), Player::South);
        session.begin_game(&StartLayout::standard())?;
        Ok(session)
    }

    /// Builds the board and layout described by `config` and starts a game.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let topology = config.topology()?;
        let layout = config.start_layout()?;
        let mut session = Self::new(topology, config.resolver(), config.first_player);
        session.begin_game(&layout)?;
        Ok(session)
    }

    /// Replaces every piece with `layout` and starts from the first player.
    ///
    /// On error the session is left as it was.
    pub fn begin_game(&mut self, layout: &StartLayout) -> Result<(), EngineError> {
        let mut registry = PieceRegistry::new();
        for placement in layout {
            registry.spawn(
                placement.rank,
                placement.cell,
                placement.player.facing(),
                placement.player,
            )?;
        }
        registry.apply_traps(&self.topology);
        self.registry = registry;
        self.turn.reset();
        info!(
            pieces = self.registry.len(),
            first = %self.turn.active_player(),
            "game started"
        );
        Ok(())
    }

    /// Adds a single piece on the raw cell id `cell`.
    pub fn spawn_piece(
        &mut self,
        rank: Rank,
        cell: u8,
        facing: Facing,
        player: Player,
    ) -> Result<PieceId, EngineError> {
        let cell = CellId::try_from(cell)?;
        let id = self.registry.spawn(rank, cell, facing, player)?;
        self.registry.apply_traps(&self.topology);
        debug!(piece = %id, %rank, %player, %cell, "piece spawned");
        Ok(id)
    }

    /// Selects a piece of the active player; returns its legal destinations.
    pub fn select_piece(&mut self, piece: PieceId) -> Result<CellSet, EngineError> {
        self.turn
            .select(&self.topology, &self.registry, &self.resolver, piece)
    }

    /// Selects whatever piece stands on the raw cell id `cell`.
    pub fn select_piece_at(&mut self, cell: u8) -> Result<CellSet, EngineError> {
        if self.turn.is_game_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        let cell = CellId::try_from(cell)?;
        let id = self
            .registry
            .piece_at(cell)
            .map(Piece::id)
            .ok_or(EngineError::EmptyCell(cell))?;
        self.select_piece(id)
    }

    /// Moves the selected piece to the raw cell id `cell`.
    pub fn select_cell(&mut self, cell: u8) -> Result<MoveOutcome, EngineError> {
        if self.turn.is_game_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        let cell = CellId::try_from(cell)?;
        self.turn
            .choose(&self.topology, &mut self.registry, &self.resolver, cell)
    }

    /// Puts every piece back where it was spawned and hands the move to the
    /// first player.
    pub fn reset_game(&mut self) {
        self.registry.reset_all();
        self.registry.apply_traps(&self.topology);
        self.turn.reset();
        info!("game reset");
    }

    pub fn active_player(&self) -> Player {
        self.turn.active_player()
    }

    pub fn state(&self) -> &TurnState {
        self.turn.state()
    }

    /// Returns a live piece.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.registry.piece(id)
    }

    pub fn piece_at(&self, cell: CellId) -> Option<&Piece> {
        self.registry.piece_at(cell)
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.turn.selected()
    }

    pub fn winner(&self) -> Option<Player> {
        self.turn.winner()
    }

    pub fn is_game_over(&self) -> bool {
        self.turn.is_game_over()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &MoveResolver {
        &self.resolver
    }
}
