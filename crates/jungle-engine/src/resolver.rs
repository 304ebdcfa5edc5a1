//! Legal destination generation.
//!
//! The resolver only answers "where can this piece step". Whether a step onto
//! an occupied cell is a legal capture is decided when the move is applied.

use crate::{CellSet, Piece, Topology};
use jungle_core::Capabilities;
use serde::{Deserialize, Serialize};

/// Which rank the swim/leap capability lookup reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilitySource {
    /// Capabilities follow the rank fixed at spawn; a trapped Rat still swims.
    #[default]
    BaseRank,
    /// Capabilities follow the current strength; a trapped piece loses them.
    CurrentRank,
}

/// Computes the cells a piece may move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResolver {
    source: CapabilitySource,
}

impl MoveResolver {
    pub const fn new(source: CapabilitySource) -> Self {
        MoveResolver { source }
    }

    pub const fn source(&self) -> CapabilitySource {
        self.source
    }

    /// Movement exceptions this resolver grants `piece`.
    pub fn capabilities(&self, piece: &Piece) -> Capabilities {
        match self.source {
            CapabilitySource::BaseRank => piece.base_rank().capabilities(),
            CapabilitySource::CurrentRank => piece.strength().capabilities(),
        }
    }

    /// Returns every cell `piece` can step to, ignoring who stands there.
    ///
    /// Rules, first match wins:
    /// 1. on a corner: the corner override, nothing else applies
    /// 2. swimmers: all grid neighbors, river included
    /// 3. leapers on a river bank: the leap override
    /// 4. everyone else: grid neighbors that are not river
    ///
    /// A piece never gets its own den.
    pub fn legal_destinations(&self, topology: &Topology, piece: &Piece) -> CellSet {
        let Some(from) = piece.cell() else {
            return CellSet::EMPTY;
        };

        let reachable = if let Some(corner) = topology.corner_neighbors(from) {
            corner.cells()
        } else {
            let caps = self.capabilities(piece);
            let raw = topology.adjacent(from).cells();
            match topology.leap_targets(from) {
                _ if caps.swims => raw,
                Some(leap) if caps.leaps => leap.cells(),
                _ => raw - topology.river(),
            }
        };

        reachable.without(topology.den_of(piece.owner()))
    }
}
