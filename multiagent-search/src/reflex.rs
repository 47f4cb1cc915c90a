//! A one step lookahead agent
//!
//! The reflex agent scores the state right after each of its own legal actions and ignores the
//! adversaries entirely. When several actions share the best score it picks one of them at random.

use derivative::Derivative;
use itertools::Itertools;
use rand::{seq::SliceRandom, thread_rng, Rng};
use tracing::debug;

use crate::{
    game::{AdversarialGame, LegalActionsGame, SimulableGame, MAXIMIZER},
    Scorable, Score, SearchAgent,
};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Picks the action whose immediate successor scores best
pub struct ReflexAgent<ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
}

impl<ScorableType> ReflexAgent<ScorableType> {
    /// Construct a new `ReflexAgent`
    pub fn new(score_function: ScorableType) -> Self {
        Self { score_function }
    }

    /// Every legal maximizer action with the score of the state it leads to
    pub fn scored_actions<GameType>(&self, game: &GameType) -> Vec<(GameType::Action, Score)>
    where
        GameType: LegalActionsGame + SimulableGame,
        ScorableType: Scorable<GameType>,
    {
        game.legal_actions(MAXIMIZER)
            .into_iter()
            .map(|action| {
                let next = game.next_state(MAXIMIZER, action);
                (action, self.score_function.score(&next))
            })
            .collect()
    }

    /// Pick uniformly at random among the best scoring actions, using the given source of
    /// randomness
    pub fn choose_with_rng<GameType, RngType>(
        &self,
        game: &GameType,
        rng: &mut RngType,
    ) -> Option<GameType::Action>
    where
        GameType: LegalActionsGame + SimulableGame,
        ScorableType: Scorable<GameType>,
        RngType: Rng + ?Sized,
    {
        let scored = self.scored_actions(game);
        let best_score = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(Score::NEG_INFINITY, Score::max);
        let best_actions = scored
            .into_iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(action, _)| action)
            .collect_vec();

        debug!(best_score, ties = best_actions.len(), "scored reflex actions");

        best_actions.choose(rng).copied()
    }
}

impl<GameType, ScorableType> SearchAgent<GameType> for ReflexAgent<ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    fn name(&self) -> &'static str {
        "reflex"
    }

    fn decide_action(&self, game: &GameType) -> Option<GameType::Action> {
        self.choose_with_rng(game, &mut thread_rng())
    }
}
