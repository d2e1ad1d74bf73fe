//! Nodes and edges of the shared search tree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;
use crate::rules::Move;

/// Index into the tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node": an unexpanded edge's child, the root's
    /// parent.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// One move out of a node, with the statistics backing its evaluation.
///
/// Rewards are a single shared score, not per-player values: everyone at
/// the table wants the same fireworks finished.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub mv: Move,

    /// Child node, NONE until the edge is expanded.
    pub child: NodeId,

    pub visits: u32,

    /// Sum of terminal scores backed up through this edge.
    pub total_reward: f64,
}

impl Edge {
    pub fn new(mv: Move) -> Self {
        Self {
            mv,
            child: NodeId::NONE,
            visits: 0,
            total_reward: 0.0,
        }
    }

    /// Average backed-up score, zero before the first visit.
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / f64::from(self.visits)
        }
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A position in the shared tree.
///
/// The same node serves every determinized world, so `edges` holds the
/// union of moves found legal in any of them; selection re-filters that
/// union against the world it is currently simulating. The player to
/// move is world-independent, since turn order depends only on how many
/// moves led here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    /// NONE for the root.
    pub parent: NodeId,

    pub to_move: PlayerId,

    /// Moves from the root, 0 at the root itself.
    pub depth: u16,

    pub visits: u32,

    /// Inline up to 16 edges, which covers typical positions without
    /// heap traffic.
    pub edges: SmallVec<[Edge; 16]>,
}

impl MCTSNode {
    pub fn new(parent: NodeId, to_move: PlayerId, depth: u16) -> Self {
        Self {
            parent,
            to_move,
            depth,
            visits: 0,
            edges: SmallVec::new(),
        }
    }

    pub fn root(to_move: PlayerId) -> Self {
        Self::new(NodeId::NONE, to_move, 0)
    }

    /// Position of the edge carrying `mv`, if this node has seen it.
    #[must_use]
    pub fn edge_index(&self, mv: Move) -> Option<usize> {
        self.edges.iter().position(|e| e.mv == mv)
    }

    /// Position of the edge carrying `mv`, adding one if needed.
    pub fn ensure_edge(&mut self, mv: Move) -> usize {
        match self.edge_index(mv) {
            Some(idx) => idx,
            None => {
                self.edges.push(Edge::new(mv));
                self.edges.len() - 1
            }
        }
    }

    /// The most-visited edge, ignoring edges never visited.
    #[must_use]
    pub fn best_edge_by_visits(&self) -> Option<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.visits > 0)
            .max_by_key(|e| e.visits)
    }

    /// The visited edge with the highest mean reward; equal means fall
    /// back to the better-sampled edge.
    #[must_use]
    pub fn best_edge_by_mean(&self) -> Option<&Edge> {
        self.edges.iter().filter(|e| e.visits > 0).max_by(|a, b| {
            a.mean_reward()
                .partial_cmp(&b.mean_reward())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.visits.cmp(&b.visits))
        })
    }
}
