//! Incremental connectivity analysis.
//!
//! Every stone carries a chain id. Stones of one color that touch share an id,
//! and the id-to-members map lets a whole chain be enumerated. Merges eagerly
//! relabel every stone of the absorbed chains; removals throw the chain away
//! and flood-fill the remnants with fresh ids.
//!
//! Each goal edge is a virtual node with a fixed negative id:
//!
//! ```text
//!            side 3: White top (-4)
//!          +-----------------------+
//!   side 0 |                       | side 2
//!   Black  |                       | Black
//!   left   |                       | right
//!   (-1)   |                       | (-3)
//!          +-----------------------+
//!            side 1: White bottom (-2)
//! ```
//!
//! A stone on its own color's goal edge takes that edge's id straight away, so
//! all of a color's stones on one edge form a single chain even when they do not
//! touch. Edge ids are smaller than every ordinary id, so when chains merge the
//! edge id survives. A stone that would join two different edge ids has
//! connected its color's goal edges: that is a win.

use crate::board::Grid;
use crate::coord::Coordinate;
use crate::error::HexError;
use crate::player::{PlayerColor, Side};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

/// Identifier of a chain of connected same-colored stones.
///
/// Positive ids are handed out by a counter; the four negative ids stand for
/// the board edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(i32);

impl ChainId {
    /// The virtual node for a goal edge
    pub const fn edge(side: Side) -> Self {
        ChainId(-(side as i32) - 1)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_edge(&self) -> bool {
        self.0 < 0
    }

    /// The edge this id stands for, if it is an edge id
    pub fn side(&self) -> Option<Side> {
        if self.is_edge() {
            Side::from_index((-self.0 - 1) as usize)
        } else {
            None
        }
    }
}

/// What a placement did to the chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoneOutcome {
    /// The stone now belongs to this chain
    Grouped(ChainId),
    /// The stone joined two goal edges. Chain bookkeeping stops here: the
    /// winning stone has no id and the chains it touches are left unmerged.
    Won,
}

/// Chain ids for every cell and the members of every chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    size: usize,
    /// Row-major, `None` for empty cells
    ids: Vec<Option<ChainId>>,
    chains: HashMap<ChainId, Vec<Coordinate>>,
    /// Last ordinary id handed out
    last_id: i32,
}

impl Analysis {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ids: vec![None; size * size],
            chains: HashMap::new(),
            last_id: 0,
        }
    }

    /// Forget every chain and restart the id counter
    pub(crate) fn clear(&mut self) {
        self.ids.fill(None);
        self.chains.clear();
        self.last_id = 0;
    }

    // ==================== Queries ====================

    /// Chain id of the stone at `loc`
    pub fn id_at(&self, loc: Coordinate) -> Option<ChainId> {
        if loc.is_valid(self.size) {
            self.ids[loc.index(self.size)]
        } else {
            None
        }
    }

    /// Members of a chain, in no particular order
    pub fn group_members(&self, id: ChainId) -> Option<&[Coordinate]> {
        self.chains.get(&id).map(Vec::as_slice)
    }

    /// Iterate over all chains
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &[Coordinate])> {
        self.chains.iter().map(|(id, members)| (*id, members.as_slice()))
    }

    /// Number of chains whose stones are `color`; all chains for `Unoccupied`
    pub fn chain_count(&self, grid: &Grid, color: PlayerColor) -> usize {
        if !color.is_stone() {
            return self.chains.len();
        }
        self.chains
            .values()
            .filter(|members| members.first().is_some_and(|first| grid.get(*first) == color))
            .count()
    }

    // ==================== Updates ====================

    /// Bring the chains up to date after `color` was placed at `loc`.
    ///
    /// `grid` must already hold the new stone.
    pub(crate) fn place_stone(
        &mut self,
        grid: &Grid,
        loc: Coordinate,
        color: PlayerColor,
    ) -> Result<StoneOutcome, HexError> {
        if !color.is_stone() {
            return Err(HexError::UnoccupiedColor(loc));
        }

        let own_edge = color.goal_side_at(loc, self.size).map(ChainId::edge);
        let neighbor_ids: Vec<ChainId> = grid
            .adjacent(loc)
            .filter(|n| grid.get(*n) == color)
            .filter_map(|n| self.id_at(n))
            .collect();

        // Edge ids belong to exactly one color and side, so two different ones
        // can only be this color's opposite goal edges.
        let mut edge_seen = own_edge;
        for id in neighbor_ids.iter().filter(|id| id.is_edge()) {
            match edge_seen {
                Some(seen) if seen != *id => return Ok(StoneOutcome::Won),
                _ => edge_seen = Some(*id),
            }
        }

        let chosen = match own_edge.into_iter().chain(neighbor_ids.iter().copied()).min() {
            Some(id) => id,
            None => self.next_id(),
        };
        self.set_id(loc, chosen);

        let mut absorbed: Vec<ChainId> = neighbor_ids.into_iter().filter(|id| *id != chosen).collect();
        absorbed.sort_unstable();
        absorbed.dedup();

        let mut members = self.chains.remove(&chosen).unwrap_or_default();
        members.push(loc);
        for id in absorbed {
            if let Some(moved) = self.chains.remove(&id) {
                debug!(from = id.value(), into = chosen.value(), stones = moved.len(), "merging chains");
                for member in &moved {
                    self.set_id(*member, chosen);
                }
                members.extend(moved);
            }
        }
        self.chains.insert(chosen, members);

        Ok(StoneOutcome::Grouped(chosen))
    }

    /// Bring the chains up to date after a `color` stone left `loc`.
    ///
    /// `grid` must already show `loc` as empty. The removed stone's chain is
    /// dropped and whatever is left of it is split into freshly numbered chains,
    /// upgraded to an edge id wherever a remnant still touches a goal edge.
    pub(crate) fn remove_stone(
        &mut self,
        grid: &Grid,
        loc: Coordinate,
        color: PlayerColor,
    ) -> Result<(), HexError> {
        if !color.is_stone() {
            return Err(HexError::UnoccupiedColor(loc));
        }

        // A winning stone was never given an id
        let Some(stale) = self.take_id(loc) else {
            return Ok(());
        };
        let former = self.chains.remove(&stale).unwrap_or_default();
        debug!(id = stale.value(), stones = former.len(), %loc, "splitting chain");

        // Stones still carrying the stale id. A remnant may end up with the
        // same edge id as before, so membership here is what marks "not yet
        // relabelled", not the id itself.
        let mut pending: HashSet<Coordinate> = former
            .iter()
            .copied()
            .filter(|member| grid.get(*member) == color)
            .collect();

        for seed in former {
            if pending.remove(&seed) {
                self.relabel_remnant(grid, seed, color, &mut pending);
            }
        }
        Ok(())
    }

    /// Flood-fill the pending stones reachable from `seed`, giving them one new id.
    fn relabel_remnant(
        &mut self,
        grid: &Grid,
        seed: Coordinate,
        color: PlayerColor,
        pending: &mut HashSet<Coordinate>,
    ) {
        let mut id = match color.goal_side_at(seed, self.size) {
            Some(side) => ChainId::edge(side),
            None => self.next_id(),
        };
        self.set_id(seed, id);

        let mut members = vec![seed];
        let mut queue = VecDeque::from([seed]);
        while let Some(current) = queue.pop_front() {
            for next in grid.adjacent(current) {
                if !pending.remove(&next) {
                    continue;
                }

                // Reaching a goal edge means the remnant was an edge chain all along
                if !id.is_edge() {
                    if let Some(side) = color.goal_side_at(next, self.size) {
                        id = ChainId::edge(side);
                        debug!(id = id.value(), stones = members.len(), "remnant reaches edge");
                        for member in &members {
                            self.set_id(*member, id);
                        }
                    }
                }

                self.set_id(next, id);
                members.push(next);
                queue.push_back(next);
            }
        }

        // Remnants on the same edge are fused through the edge id
        self.chains.entry(id).or_default().extend(members);
    }

    fn next_id(&mut self) -> ChainId {
        self.last_id += 1;
        ChainId(self.last_id)
    }

    fn set_id(&mut self, loc: Coordinate, id: ChainId) {
        trace!(%loc, id = id.value(), "chain id set");
        let index = loc.index(self.size);
        self.ids[index] = Some(id);
    }

    fn take_id(&mut self, loc: Coordinate) -> Option<ChainId> {
        let index = loc.index(self.size);
        self.ids[index].take()
    }
}
