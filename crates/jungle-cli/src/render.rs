//! Text rendering of the board and move outcomes.

use jungle_core::{CellId, COLUMNS, ROWS};
use jungle_engine::{CellSet, GameSession, MoveOutcome, PieceId, Terrain, TurnState};
use std::fmt;

/// The board as a grid, North at the top.
pub struct BoardView<'a> {
    game: &'a GameSession,
    highlights: CellSet,
}

impl<'a> BoardView<'a> {
    /// Highlights the current selection's destinations, if any.
    pub fn new(game: &'a GameSession) -> Self {
        let highlights = match game.state() {
            TurnState::PieceSelected { destinations, .. } => *destinations,
            _ => CellSet::EMPTY,
        };
        BoardView { game, highlights }
    }

    fn glyph(&self, cell: CellId) -> char {
        if let Some(piece) = self.game.piece_at(cell) {
            return piece.base_rank().to_layout_char(piece.owner());
        }
        match self.game.topology().terrain(cell) {
            Terrain::Normal => '.',
            Terrain::River => '~',
            Terrain::Trap(_) => '#',
            Terrain::Den(_) => '@',
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            write!(f, "{} ", row)?;
            for column in 0..COLUMNS {
                let Some(cell) = CellId::new(column, row) else {
                    continue;
                };
                let glyph = self.glyph(cell);
                if self.highlights.contains(cell) {
                    write!(f, "[{}]", glyph)?;
                } else {
                    write!(f, " {} ", glyph)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for column in 0..COLUMNS {
            write!(f, "  {}", column)?;
        }
        writeln!(f)
    }
}

/// One-line summary of a move.
pub fn describe(game: &GameSession, outcome: &MoveOutcome) -> String {
    let name = |id: PieceId| {
        game.registry()
            .get(id)
            .map(|p| p.to_string())
            .unwrap_or_else(|| id.to_string())
    };

    if !outcome.moved {
        return format!("{} stays on {}", name(outcome.piece), outcome.from);
    }

    let mut text = format!("{} {} -> {}", name(outcome.piece), outcome.from, outcome.to);
    if let Some(victim) = outcome.captured {
        text.push_str(&format!(", captures {}", name(victim)));
    }
    if outcome.left_trap {
        text.push_str(", leaves trap");
    }
    if outcome.entered_trap {
        text.push_str(", trapped");
    }
    if let Some(winner) = outcome.winner {
        text.push_str(&format!(", {} wins", winner));
    }
    text
}
