//! Animal ranks, capture strength, and movement capabilities.

use crate::Player;
use serde::{Deserialize, Serialize};

/// The eight animal ranks, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Rank {
    Rat = 1,
    Cat = 2,
    Dog = 3,
    Wolf = 4,
    Leopard = 5,
    Tiger = 6,
    Lion = 7,
    Elephant = 8,
}

/// Movement exceptions granted by a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// May enter and cross river cells.
    pub swims: bool,
    /// May jump over a river strip from a bank cell.
    pub leaps: bool,
}

impl Capabilities {
    /// No movement exceptions.
    pub const NONE: Capabilities = Capabilities {
        swims: false,
        leaps: false,
    };
}

const LAND: Capabilities = Capabilities::NONE;
const SWIM: Capabilities = Capabilities {
    swims: true,
    leaps: false,
};
const LEAP: Capabilities = Capabilities {
    swims: false,
    leaps: true,
};

/// Capability table indexed by `Rank::index()`.
const CAPABILITIES: [Capabilities; 8] = [
    SWIM, // Rat
    LAND, // Cat
    SWIM, // Dog
    LAND, // Wolf
    LAND, // Leopard
    LEAP, // Tiger
    LEAP, // Lion
    LAND, // Elephant
];

impl Rank {
    /// All ranks in order, weakest first.
    pub const ALL: [Rank; 8] = [
        Rank::Rat,
        Rank::Cat,
        Rank::Dog,
        Rank::Wolf,
        Rank::Leopard,
        Rank::Tiger,
        Rank::Lion,
        Rank::Elephant,
    ];

    /// Returns the numeric rank (1-8).
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns a zero-based index (0-7).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Returns the layout character for this rank owned by `player`.
    ///
    /// South pieces are uppercase, North pieces lowercase.
    pub const fn to_layout_char(self, player: Player) -> char {
        let c = match self {
            Rank::Rat => 'r',
            Rank::Cat => 'c',
            Rank::Dog => 'd',
            Rank::Wolf => 'w',
            Rank::Leopard => 'p',
            Rank::Tiger => 't',
            Rank::Lion => 'l',
            Rank::Elephant => 'e',
        };
        match player {
            Player::South => c.to_ascii_uppercase(),
            Player::North => c,
        }
    }

    /// Parses a layout character into a rank and owner.
    pub const fn from_layout_char(c: char) -> Option<(Rank, Player)> {
        let player = if c.is_ascii_uppercase() {
            Player::South
        } else {
            Player::North
        };
        let rank = match c.to_ascii_lowercase() {
            'r' => Rank::Rat,
            'c' => Rank::Cat,
            'd' => Rank::Dog,
            'w' => Rank::Wolf,
            'p' => Rank::Leopard,
            't' => Rank::Tiger,
            'l' => Rank::Lion,
            'e' => Rank::Elephant,
            _ => return None,
        };
        Some((rank, player))
    }

    /// Returns the movement exceptions of this rank.
    #[inline]
    pub const fn capabilities(self) -> Capabilities {
        CAPABILITIES[self.index()]
    }

    /// Returns true if this rank may enter river cells.
    #[inline]
    pub const fn swims(self) -> bool {
        self.capabilities().swims
    }

    /// Returns true if this rank may leap over the river.
    #[inline]
    pub const fn leaps(self) -> bool {
        self.capabilities().leaps
    }

    /// Returns true if a piece of this rank captures a piece of rank `other`.
    #[inline]
    pub fn defeats(self, other: Rank) -> bool {
        Strength::Ranked(self).defeats(Strength::Ranked(other))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rank::Rat => "Rat",
            Rank::Cat => "Cat",
            Rank::Dog => "Dog",
            Rank::Wolf => "Wolf",
            Rank::Leopard => "Leopard",
            Rank::Tiger => "Tiger",
            Rank::Lion => "Lion",
            Rank::Elephant => "Elephant",
        };
        write!(f, "{}", name)
    }
}

/// The rank a piece currently fights with.
///
/// A piece standing on an opponent's trap is `Neutral`, which orders below
/// every real rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Neutral,
    Ranked(Rank),
}

impl Strength {
    /// Returns the underlying rank, or `None` while neutralized.
    #[inline]
    pub const fn rank(self) -> Option<Rank> {
        match self {
            Strength::Neutral => None,
            Strength::Ranked(rank) => Some(rank),
        }
    }

    /// Returns true while neutralized by a trap.
    #[inline]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Strength::Neutral)
    }

    /// Movement exceptions of this strength. Neutral has none.
    #[inline]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Strength::Neutral => Capabilities::NONE,
            Strength::Ranked(rank) => rank.capabilities(),
        }
    }

    /// Returns true if an attacker of this strength captures `defender`.
    ///
    /// Higher strength wins and ties never capture. The Rat always beats the
    /// Elephant and the Elephant never beats the Rat.
    pub fn defeats(self, defender: Strength) -> bool {
        match (self, defender) {
            (Strength::Ranked(Rank::Rat), Strength::Ranked(Rank::Elephant)) => true,
            (Strength::Ranked(Rank::Elephant), Strength::Ranked(Rank::Rat)) => false,
            _ => self > defender,
        }
    }
}

impl From<Rank> for Strength {
    fn from(rank: Rank) -> Self {
        Strength::Ranked(rank)
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Neutral => write!(f, "Neutral"),
            Strength::Ranked(rank) => write!(f, "{}", rank),
        }
    }
}
