//! Piece storage and occupancy.

use crate::{CellSet, EngineError, Topology};
use jungle_core::{Capabilities, CellId, Facing, Player, Rank, Strength, CELL_COUNT};
use serde::Serialize;
use std::fmt;

/// Stable handle of a spawned piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceId(usize);

impl PieceId {
    /// Returns the spawn-order index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a piece is still on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceStatus {
    Alive,
    Captured,
}

/// A piece and its mutable game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    id: PieceId,
    owner: Player,
    base_rank: Rank,
    strength: Strength,
    cell: Option<CellId>,
    spawn_cell: CellId,
    status: PieceStatus,
    facing: Facing,
}

impl Piece {
    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn owner(&self) -> Player {
        self.owner
    }

    /// Rank fixed at spawn.
    #[inline]
    pub fn base_rank(&self) -> Rank {
        self.base_rank
    }

    /// Rank used for capture comparisons; neutral on an opponent's trap.
    #[inline]
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Current cell, `None` once captured.
    #[inline]
    pub fn cell(&self) -> Option<CellId> {
        self.cell
    }

    #[inline]
    pub fn spawn_cell(&self) -> CellId {
        self.spawn_cell
    }

    #[inline]
    pub fn status(&self) -> PieceStatus {
        self.status
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == PieceStatus::Alive
    }

    #[inline]
    pub fn is_neutralized(&self) -> bool {
        self.strength.is_neutral()
    }

    /// Movement exceptions of the base rank.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.base_rank.capabilities()
    }

    /// Returns true if this piece may capture `defender` as things stand.
    #[inline]
    pub fn defeats(&self, defender: &Piece) -> bool {
        self.strength.defeats(defender.strength)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.owner, self.base_rank, self.id)
    }
}

/// Every piece spawned for a game, live or captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceRegistry {
    pieces: Vec<Piece>,
    board: [Option<PieceId>; CELL_COUNT],
    captured: Vec<PieceId>,
}

impl Default for PieceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        PieceRegistry {
            pieces: Vec::new(),
            board: [None; CELL_COUNT],
            captured: Vec::new(),
        }
    }

    /// Creates a piece on `cell`.
    ///
    /// A cell that is some other piece's spawn cell counts as occupied even
    /// after that piece has moved away, since [`Self::reset_all`] returns
    /// every piece there.
    pub fn spawn(
        &mut self,
        rank: Rank,
        cell: CellId,
        facing: Facing,
        owner: Player,
    ) -> Result<PieceId, EngineError> {
        if self.board[cell.index() as usize].is_some()
            || self.pieces.iter().any(|p| p.spawn_cell == cell)
        {
            return Err(EngineError::CellOccupied(cell));
        }

        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece {
            id,
            owner,
            base_rank: rank,
            strength: Strength::Ranked(rank),
            cell: Some(cell),
            spawn_cell: cell,
            status: PieceStatus::Alive,
            facing,
        });
        self.board[cell.index() as usize] = Some(id);
        Ok(id)
    }

    /// Returns the piece with `id`, live or captured.
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    /// Returns the piece with `id` if it is still in play.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.get(id).filter(|p| p.is_alive())
    }

    /// Returns the live piece on `cell`.
    pub fn piece_at(&self, cell: CellId) -> Option<&Piece> {
        self.board[cell.index() as usize].and_then(|id| self.pieces.get(id.0))
    }

    /// Returns every live piece in spawn order.
    pub fn live_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.is_alive())
    }

    /// Returns the live pieces owned by `player`.
    pub fn live_pieces_of(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.live_pieces().filter(move |p| p.owner == player)
    }

    /// Returns captured pieces in capture order.
    pub fn captured(&self) -> &[PieceId] {
        &self.captured
    }

    /// Returns the cells holding a live piece.
    pub fn occupied(&self) -> CellSet {
        self.live_pieces().filter_map(Piece::cell).collect()
    }

    /// Returns the cells holding a live piece of `player`.
    pub fn occupied_by(&self, player: Player) -> CellSet {
        self.live_pieces_of(player).filter_map(Piece::cell).collect()
    }

    /// Number of spawned pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Takes a live piece off the board.
    pub fn capture(&mut self, id: PieceId) -> Result<(), EngineError> {
        let piece = self
            .pieces
            .get_mut(id.0)
            .filter(|p| p.status == PieceStatus::Alive)
            .ok_or(EngineError::PieceNotFound(id))?;

        if let Some(cell) = piece.cell.take() {
            self.board[cell.index() as usize] = None;
        }
        piece.status = PieceStatus::Captured;
        self.captured.push(id);
        Ok(())
    }

    /// Moves a live piece to an empty cell.
    pub(crate) fn relocate(&mut self, id: PieceId, to: CellId) {
        debug_assert!(self.board[to.index() as usize].is_none());
        if let Some(piece) = self.pieces.get_mut(id.0) {
            if let Some(from) = piece.cell.replace(to) {
                self.board[from.index() as usize] = None;
            }
            self.board[to.index() as usize] = Some(id);
        }
    }

    /// Drops a piece's strength to neutral.
    pub(crate) fn neutralize(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.get_mut(id.0) {
            piece.strength = Strength::Neutral;
        }
    }

    /// Restores a piece's strength to its base rank.
    pub(crate) fn restore_rank(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.get_mut(id.0) {
            piece.strength = Strength::Ranked(piece.base_rank);
        }
    }

    /// Sets each live piece's strength from the cell it stands on: neutral on
    /// an opponent trap, base rank anywhere else.
    pub(crate) fn apply_traps(&mut self, topology: &Topology) {
        for piece in &mut self.pieces {
            let Some(cell) = piece.cell else {
                continue;
            };
            piece.strength = if topology.trap_owner(cell) == Some(piece.owner.opposite()) {
                Strength::Neutral
            } else {
                Strength::Ranked(piece.base_rank)
            };
        }
    }

    /// Puts every piece back on its spawn cell, alive and at full rank.
    pub fn reset_all(&mut self) {
        self.board = [None; CELL_COUNT];
        self.captured.clear();
        for piece in &mut self.pieces {
            piece.status = PieceStatus::Alive;
            piece.strength = Strength::Ranked(piece.base_rank);
            piece.cell = Some(piece.spawn_cell);
            self.board[piece.spawn_cell.index() as usize] = Some(piece.id);
        }
    }

    /// Removes every piece.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
