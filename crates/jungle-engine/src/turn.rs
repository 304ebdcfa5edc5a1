//! Turn state machine and move application.

use crate::{CellSet, EngineError, MoveResolver, PieceId, PieceRegistry, Topology};
use jungle_core::{CellId, Player};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Where the game is in the select/move cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TurnState {
    AwaitingSelection,
    PieceSelected {
        piece: PieceId,
        destinations: CellSet,
    },
    GameOver {
        winner: Player,
    },
}

/// Result of choosing a destination cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// False when the chosen cell held one of the mover's own pieces.
    pub moved: bool,
    pub piece: PieceId,
    pub from: CellId,
    pub to: CellId,
    pub captured: Option<PieceId>,
    /// The mover stepped onto an opponent trap and was neutralized.
    pub entered_trap: bool,
    /// The mover stepped off an opponent trap and got its rank back.
    pub left_trap: bool,
    pub game_over: bool,
    pub winner: Option<Player>,
}

impl MoveOutcome {
    fn unmoved(piece: PieceId, from: CellId, to: CellId) -> Self {
        MoveOutcome {
            moved: false,
            piece,
            from,
            to,
            captured: None,
            entered_trap: false,
            left_trap: false,
            game_over: false,
            winner: None,
        }
    }
}

/// Tracks the active player and selection, and applies moves.
///
/// The engine owns no board state of its own; callers pass the topology and
/// registry in, so it can be driven by anything that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEngine {
    first_player: Player,
    active: Player,
    state: TurnState,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new(Player::South)
    }
}

impl TurnEngine {
    pub fn new(first_player: Player) -> Self {
        TurnEngine {
            first_player,
            active: first_player,
            state: TurnState::AwaitingSelection,
        }
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Returns the player on move.
    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Returns the selected piece, if any.
    pub fn selected(&self) -> Option<PieceId> {
        match self.state {
            TurnState::PieceSelected { piece, .. } => Some(piece),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self.state {
            TurnState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Back to the first player with nothing selected.
    pub fn reset(&mut self) {
        self.active = self.first_player;
        self.state = TurnState::AwaitingSelection;
    }

    /// Selects one of the active player's pieces and returns where it can go.
    ///
    /// Selecting a different piece while one is already selected replaces
    /// the selection. On error the state is untouched.
    pub fn select(
        &mut self,
        topology: &Topology,
        registry: &PieceRegistry,
        resolver: &MoveResolver,
        id: PieceId,
    ) -> Result<CellSet, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameAlreadyOver);
        }

        let piece = registry.piece(id).ok_or(EngineError::PieceNotFound(id))?;
        if piece.owner() != self.active {
            warn!(piece = %id, active = %self.active, "selection out of turn");
            return Err(EngineError::NotYourTurn {
                piece: id,
                active: self.active,
            });
        }

        let destinations = resolver.legal_destinations(topology, piece);
        debug!(
            piece = %piece,
            cell = ?piece.cell(),
            destinations = ?destinations.to_indices(),
            "piece selected"
        );
        self.state = TurnState::PieceSelected {
            piece: id,
            destinations,
        };
        Ok(destinations)
    }

    /// Moves the selected piece to `to`.
    ///
    /// Destinations are recomputed from the registry as it is now, not taken
    /// from the selection. Order of effects: capture check against current strengths, capture,
    /// trap exit, trap entry, relocation, then either game over or the turn
    /// passes.
    pub fn choose(
        &mut self,
        topology: &Topology,
        registry: &mut PieceRegistry,
        resolver: &MoveResolver,
        to: CellId,
    ) -> Result<MoveOutcome, EngineError> {
        let id = match self.state {
            TurnState::GameOver { .. } => return Err(EngineError::GameAlreadyOver),
            TurnState::AwaitingSelection => return Err(EngineError::NoSelection),
            TurnState::PieceSelected { piece, .. } => piece,
        };

        let mover = registry.piece(id).ok_or(EngineError::PieceNotFound(id))?;
        let from = mover.cell().ok_or(EngineError::PieceNotFound(id))?;
        let owner = mover.owner();
        let opponent = owner.opposite();

        let defender = match registry.piece_at(to) {
            Some(other) if other.owner() == owner => {
                debug!(cell = %to, "destination holds own piece, ignoring");
                return Ok(MoveOutcome::unmoved(id, from, to));
            }
            other => other,
        };

        if !resolver.legal_destinations(topology, mover).contains(to) {
            warn!(piece = %id, cell = %to, "destination not reachable");
            return Err(EngineError::UnreachableCell(to));
        }

        let captured = match defender {
            Some(defender) if !mover.defeats(defender) => {
                warn!(attacker = %mover, defender = %defender, "capture rejected");
                return Err(EngineError::IllegalCapture {
                    attacker: id,
                    defender: defender.id(),
                });
            }
            Some(defender) => Some(defender.id()),
            None => None,
        };

        if let Some(victim) = captured {
            registry.capture(victim)?;
            debug!(attacker = %id, victim = %victim, cell = %to, "piece captured");
        }

        let left_trap = topology.trap_owner(from) == Some(opponent);
        if left_trap {
            registry.restore_rank(id);
            debug!(piece = %id, cell = %from, "left trap, rank restored");
        }

        let entered_trap = topology.trap_owner(to) == Some(opponent);
        if entered_trap {
            registry.neutralize(id);
            debug!(piece = %id, cell = %to, "entered trap, neutralized");
        }

        registry.relocate(id, to);
        debug!(piece = %id, from = %from, to = %to, "piece moved");

        let winner = (topology.den_owner(to) == Some(opponent)).then_some(owner);
        match winner {
            Some(winner) => {
                info!(winner = %winner, den = %to, "game over");
                self.state = TurnState::GameOver { winner };
            }
            None => {
                self.active = opponent;
                self.state = TurnState::AwaitingSelection;
            }
        }

        Ok(MoveOutcome {
            moved: true,
            piece: id,
            from,
            to,
            captured,
            entered_trap,
            left_trap,
            game_over: winner.is_some(),
            winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jungle_core::{Rank, Strength};

    fn cell(index: u8) -> CellId {
        CellId::from_index(index).unwrap()
    }

    struct Board {
        topology: Topology,
        registry: PieceRegistry,
        resolver: MoveResolver,
        turn: TurnEngine,
    }

    impl Board {
        fn new() -> Self {
            Board {
                topology: Topology::standard(),
                registry: PieceRegistry::new(),
                resolver: MoveResolver::default(),
                turn: TurnEngine::new(Player::South),
            }
        }

        fn spawn(&mut self, rank: Rank, at: u8, owner: Player) -> PieceId {
            self.registry
                .spawn(rank, cell(at), owner.facing(), owner)
                .unwrap()
        }

        fn select(&mut self, id: PieceId) -> Result<CellSet, EngineError> {
            self.turn
                .select(&self.topology, &self.registry, &self.resolver, id)
        }

        fn choose(&mut self, at: u8) -> Result<MoveOutcome, EngineError> {
            self.turn
                .choose(&self.topology, &mut self.registry, &self.resolver, cell(at))
        }

        fn play(&mut self, id: PieceId, at: u8) -> MoveOutcome {
            self.select(id).unwrap();
            self.choose(at).unwrap()
        }
    }

    #[test]
    fn starts_awaiting_first_player() {
        let turn = TurnEngine::new(Player::North);
        assert_eq!(turn.active_player(), Player::North);
        assert_eq!(turn.state(), &TurnState::AwaitingSelection);
        assert_eq!(turn.selected(), None);
        assert!(!turn.is_game_over());
    }

    #[test]
    fn selecting_opponent_piece_is_rejected() {
        let mut board = Board::new();
        let rat = board.spawn(Rank::Rat, 6, Player::North);
        assert_eq!(
            board.select(rat),
            Err(EngineError::NotYourTurn {
                piece: rat,
                active: Player::South
            })
        );
        assert_eq!(board.turn.state(), &TurnState::AwaitingSelection);
    }

    #[test]
    fn selecting_replaces_previous_selection() {
        let mut board = Board::new();
        let cat = board.spawn(Rank::Cat, 10, Player::South);
        let wolf = board.spawn(Rank::Wolf, 20, Player::South);
        assert_eq!(board.select(cat).unwrap().to_indices(), vec![1, 9, 11, 19]);
        board.select(wolf).unwrap();
        assert_eq!(board.turn.selected(), Some(wolf));
    }

    #[test]
    fn move_passes_the_turn() {
        let mut board = Board::new();
        let cat = board.spawn(Rank::Cat, 10, Player::South);
        let outcome = board.play(cat, 11);
        assert!(outcome.moved);
        assert_eq!(outcome.from, cell(10));
        assert_eq!(outcome.to, cell(11));
        assert_eq!(outcome.captured, None);
        assert!(!outcome.game_over);
        assert_eq!(board.turn.active_player(), Player::North);
        assert_eq!(board.turn.state(), &TurnState::AwaitingSelection);
        assert_eq!(board.registry.piece_at(cell(11)).map(|p| p.id()), Some(cat));
    }

    #[test]
    fn choosing_without_selection_fails() {
        let mut board = Board::new();
        board.spawn(Rank::Cat, 10, Player::South);
        assert_eq!(board.choose(11), Err(EngineError::NoSelection));
    }

    #[test]
    fn unreachable_cell_keeps_selection() {
        let mut board = Board::new();
        let cat = board.spawn(Rank::Cat, 10, Player::South);
        board.select(cat).unwrap();
        assert_eq!(board.choose(30), Err(EngineError::UnreachableCell(cell(30))));
        assert_eq!(board.turn.selected(), Some(cat));
        assert_eq!(board.turn.active_player(), Player::South);
    }

    #[test]
    fn destinations_follow_the_current_board() {
        let mut board = Board::new();
        let cat = board.spawn(Rank::Cat, 10, Player::South);
        assert!(board.select(cat).unwrap().contains(cell(1)));

        board.registry.relocate(cat, cell(11));
        assert_eq!(board.choose(1), Err(EngineError::UnreachableCell(cell(1))));

        let outcome = board.choose(2).unwrap();
        assert_eq!(outcome.from, cell(11));
        assert_eq!(outcome.to, cell(2));
    }

    #[test]
    fn own_piece_destination_is_a_no_op() {
        let mut board = Board::new();
        let cat = board.spawn(Rank::Cat, 10, Player::South);
        board.spawn(Rank::Dog, 11, Player::South);
        board.select(cat).unwrap();
        let outcome = board.choose(11).unwrap();
        assert!(!outcome.moved);
        assert_eq!(board.turn.selected(), Some(cat));
        assert_eq!(board.turn.active_player(), Player::South);
        assert_eq!(board.registry.piece_at(cell(10)).map(|p| p.id()), Some(cat));
    }

    #[test]
    fn weaker_attacker_cannot_capture() {
        let mut board = Board::new();
        let cat = board.spawn(Rank::Cat, 10, Player::South);
        let dog = board.spawn(Rank::Dog, 11, Player::North);
        let before = board.registry.clone();
        board.select(cat).unwrap();
        assert_eq!(
            board.choose(11),
            Err(EngineError::IllegalCapture {
                attacker: cat,
                defender: dog
            })
        );
        assert_eq!(board.registry, before);
        assert_eq!(board.turn.selected(), Some(cat));
    }

    #[test]
    fn stronger_attacker_captures() {
        let mut board = Board::new();
        let dog = board.spawn(Rank::Dog, 10, Player::South);
        let cat = board.spawn(Rank::Cat, 11, Player::North);
        let outcome = board.play(dog, 11);
        assert_eq!(outcome.captured, Some(cat));
        assert!(board.registry.piece(cat).is_none());
        assert_eq!(board.registry.captured(), &[cat]);
    }

    #[test]
    fn trap_neutralizes_and_exit_restores() {
        let mut board = Board::new();
        let wolf = board.spawn(Rank::Wolf, 25, Player::South);
        let rat = board.spawn(Rank::Rat, 6, Player::North);

        let entered = board.play(wolf, 26);
        assert!(entered.entered_trap);
        assert!(!entered.left_trap);
        assert_eq!(board.registry.piece(wolf).map(|p| p.strength()), Some(Strength::Neutral));

        board.play(rat, 7);

        let left = board.play(wolf, 17);
        assert!(left.left_trap);
        assert!(!left.entered_trap);
        assert_eq!(
            board.registry.piece(wolf).map(|p| p.strength()),
            Some(Strength::Ranked(Rank::Wolf))
        );
    }

    #[test]
    fn own_trap_has_no_effect() {
        let mut board = Board::new();
        let wolf = board.spawn(Rank::Wolf, 19, Player::South);
        let outcome = board.play(wolf, 18);
        assert!(!outcome.entered_trap);
        assert!(!board.registry.piece(wolf).unwrap().is_neutralized());
    }

    #[test]
    fn entering_opponent_den_ends_game() {
        let mut board = Board::new();
        let wolf = board.spawn(Rank::Wolf, 34, Player::South);
        let rat = board.spawn(Rank::Rat, 6, Player::North);
        let outcome = board.play(wolf, 35);
        assert!(outcome.game_over);
        assert_eq!(outcome.winner, Some(Player::South));
        assert_eq!(board.turn.state(), &TurnState::GameOver { winner: Player::South });
        assert_eq!(board.turn.active_player(), Player::South);

        assert_eq!(board.select(rat), Err(EngineError::GameAlreadyOver));
        assert_eq!(board.choose(7), Err(EngineError::GameAlreadyOver));
    }

    #[test]
    fn reset_returns_to_first_player() {
        let mut board = Board::new();
        let cat = board.spawn(Rank::Cat, 10, Player::South);
        board.play(cat, 11);
        board.turn.reset();
        assert_eq!(board.turn, TurnEngine::new(Player::South));
    }
}
