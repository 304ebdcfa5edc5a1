//! Player and facing representation.

use serde::{Deserialize, Serialize};

/// The two sides of a Jungle board.
///
/// South owns the den at the bottom of the board (row 0) and North owns the
/// den at the top (row 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Player {
    South = 0,
    North = 1,
}

impl Player {
    /// Both players, South first.
    pub const ALL: [Player; 2] = [Player::South, Player::North];

    /// Returns the other player.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::South => Player::North,
            Player::North => Player::South,
        }
    }

    /// Returns the index (0 for South, 1 for North).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the way this player's pieces face when spawned.
    #[inline]
    pub const fn facing(self) -> Facing {
        match self {
            Player::South => Facing::South,
            Player::North => Facing::North,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::South => write!(f, "South"),
            Player::North => write!(f, "North"),
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "south" | "s" => Ok(Player::South),
            "north" | "n" => Ok(Player::North),
            other => Err(format!("unknown player '{}'", other)),
        }
    }
}

/// Cosmetic facing of a piece. Carries no rules meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    North,
    South,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_player() {
        assert_eq!(Player::South.opposite(), Player::North);
        assert_eq!(Player::North.opposite(), Player::South);
    }

    #[test]
    fn player_index() {
        assert_eq!(Player::South.index(), 0);
        assert_eq!(Player::North.index(), 1);
    }

    #[test]
    fn facing_follows_player() {
        assert_eq!(Player::South.facing(), Facing::South);
        assert_eq!(Player::North.facing(), Facing::North);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("north".parse::<Player>(), Ok(Player::North));
        assert_eq!("S".parse::<Player>(), Ok(Player::South));
        assert!("east".parse::<Player>().is_err());
        assert_eq!(format!("{}", Player::South), "South");
    }
}
