//! Whose move it is, and when a node stops being expanded
//!
//! Turns go round-robin over agent indices: the maximizer (index 0) first, then each adversary in
//! index order. Once the last adversary has moved the depth goes up by one and control returns to
//! the maximizer.

use crate::game::{AdversarialGame, AgentIndex, MAXIMIZER};

/// The depth of the root node. Depth is one-indexed so that a cutoff happens once
/// `depth > max_depth`
pub const FIRST_PLY: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The agent to move at a node
pub enum Turn {
    /// The maximizing agent, index 0
    Maximizer,
    /// The adversary with the given index, which is always at least 1
    Adversary(AgentIndex),
}

impl Turn {
    /// The agent index for this turn
    pub fn agent_index(&self) -> AgentIndex {
        match self {
            Turn::Maximizer => MAXIMIZER,
            Turn::Adversary(index) => *index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The depth limited turn sequencing shared by every search strategy
pub struct TurnModel {
    max_depth: usize,
}

impl TurnModel {
    /// Create a turn model that cuts off once more than `max_depth` plies have been played
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Is this node a leaf that should be scored by the evaluation function
    ///
    /// Won and lost games are always leaves, no matter how much depth is left.
    pub fn is_cutoff<GameType: AdversarialGame>(&self, game: &GameType, depth: usize) -> bool {
        game.is_win() || game.is_lose() || depth > self.max_depth
    }

    /// The turn and depth of the child nodes of a node where `turn` is to move
    pub fn next(&self, turn: Turn, depth: usize, adversary_count: usize) -> (Turn, usize) {
        let next_index = turn.agent_index() + 1;

        if next_index > adversary_count {
            (Turn::Maximizer, depth + 1)
        } else {
            (Turn::Adversary(next_index), depth)
        }
    }
}
