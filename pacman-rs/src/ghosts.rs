use multiagent_search::game::{AgentIndex, LegalActionsGame};
use rand::{seq::SliceRandom, Rng};

use crate::{direction::Direction, game_state::GameState};

/// A ghost that picks uniformly at random among its legal actions
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGhost;

impl RandomGhost {
    /// Returns `None` when the ghost has nowhere to go
    pub fn choose<R: Rng + ?Sized>(
        &self,
        game: &GameState,
        agent: AgentIndex,
        rng: &mut R,
    ) -> Option<Direction> {
        game.legal_actions(agent).choose(rng).copied()
    }
}
