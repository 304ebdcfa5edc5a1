//! Errors reported to the presentation layer.

use crate::PieceId;
use jungle_core::{CellId, InvalidCell, Player};
use thiserror::Error;

/// Error type for engine operations.
///
/// Every variant is recoverable: the call that returned it left the game
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A raw cell index did not name a board cell.
    #[error(transparent)]
    InvalidCellId(#[from] InvalidCell),

    /// Spawn target already holds a piece.
    #[error("cell {0} is already occupied")]
    CellOccupied(CellId),

    /// No live piece on the given cell.
    #[error("no piece on cell {0}")]
    EmptyCell(CellId),

    /// The piece does not exist or has been captured.
    #[error("piece {0} is not in play")]
    PieceNotFound(PieceId),

    /// The piece belongs to the player who is not on move.
    #[error("piece {piece} cannot move: it is {active}'s turn")]
    NotYourTurn { piece: PieceId, active: Player },

    /// The attacker is not strong enough to take the defender.
    #[error("piece {attacker} cannot capture piece {defender}")]
    IllegalCapture { attacker: PieceId, defender: PieceId },

    /// A destination was chosen before any piece was selected.
    #[error("no piece selected")]
    NoSelection,

    /// The chosen cell is not a legal destination of the selected piece.
    #[error("cell {0} is not reachable from the selected piece")]
    UnreachableCell(CellId),

    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
}
