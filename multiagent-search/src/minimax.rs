//! Exhaustive worst case search
//!
//! This variant assumes every adversary is working to minimize the maximizer's score.
//! When propagating scores up the tree, it chooses the highest score when it is the maximizer's
//! turn and the lowest score when it is an adversary's turn.

use derivative::Derivative;
use tracing::info_span;

use crate::{
    game::AdversarialGame,
    node::{leaf, record, BestAction, NodeValue, RootOptions},
    turn::{Turn, TurnModel, FIRST_PLY},
    Instruments, Scorable, Score, SearchAgent, SearchInstruments, SearchOptions, SearchResult,
};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a scoring function and can be used to run minimax
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxAgent<ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearchOptions,
}

impl<ScorableType> MinimaxAgent<ScorableType> {
    /// Construct a new `MinimaxAgent`
    pub fn new(score_function: ScorableType, options: SearchOptions) -> Self {
        Self {
            score_function,
            options,
        }
    }

    /// Run minimax from the given state to the configured depth
    pub fn search<GameType>(&self, game: &GameType) -> SearchResult<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        self.search_with_instruments(game, &Instruments {})
    }

    /// Run minimax, reporting every expansion and evaluation to `instruments`
    pub fn search_with_instruments<GameType, InstrumentsType>(
        &self,
        game: &GameType,
        instruments: &InstrumentsType,
    ) -> SearchResult<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
        InstrumentsType: SearchInstruments,
    {
        info_span!(
            "minimax",
            depth = self.options.depth,
            adversaries = game.adversary_count(),
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let search = Minimax {
                score_function: &self.score_function,
                turns: TurnModel::new(self.options.depth),
                instruments,
            };

            let mut options = vec![];
            let value = search.value(game, Turn::Maximizer, FIRST_PLY, Some(&mut options));

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", value.score);
            current_span.record("chosen_action", format!("{:?}", value.action).as_str());

            value.into_result(options)
        })
    }
}

impl<GameType, ScorableType> SearchAgent<GameType> for MinimaxAgent<ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn decide_action(&self, game: &GameType) -> Option<GameType::Action> {
        self.search(game).action
    }
}

/// The state of one top-level search
struct Minimax<'a, ScorableType, InstrumentsType> {
    score_function: &'a ScorableType,
    turns: TurnModel,
    instruments: &'a InstrumentsType,
}

impl<'a, ScorableType, InstrumentsType> Minimax<'a, ScorableType, InstrumentsType>
where
    InstrumentsType: SearchInstruments,
{
    fn value<GameType>(
        &self,
        node: &GameType,
        turn: Turn,
        depth: usize,
        mut root_options: RootOptions<'_, GameType::Action>,
    ) -> NodeValue<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        if self.turns.is_cutoff(node, depth) {
            return leaf(node, self.score_function, self.instruments);
        }

        let agent = turn.agent_index();
        let actions = node.legal_actions(agent);
        if actions.is_empty() {
            return leaf(node, self.score_function, self.instruments);
        }

        self.instruments.observe_expansion(turn);
        let (next_turn, next_depth) = self.turns.next(turn, depth, node.adversary_count());

        match turn {
            Turn::Maximizer => {
                let mut best = BestAction::new();
                for action in actions {
                    let child = node.next_state(agent, action);
                    let score = self.value(&child, next_turn, next_depth, None).score;

                    record(&mut root_options, action, score);
                    best.offer(action, score);
                }
                best.into_value()
            }
            Turn::Adversary(_) => {
                let mut lowest = Score::INFINITY;
                for action in actions {
                    let child = node.next_state(agent, action);
                    let score = self.value(&child, next_turn, next_depth, None).score;

                    lowest = lowest.min(score);
                }
                NodeValue::scored(lowest)
            }
        }
    }
}
