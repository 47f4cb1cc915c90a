//! Expectimax models adversaries that are not trying to beat you
//!
//! Every adversary is assumed to pick uniformly at random from its legal actions, so an adversary
//! node is worth the average of its children rather than the minimum. The maximizer still picks the
//! action with the best expected value.

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
/// This is the struct that wraps a scoring function and can be used to run expectimax
///
/// It also outputs traces using the [tracing] crate.
pub struct ExpectimaxAgent<ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearchOptions,
}

impl<ScorableType> ExpectimaxAgent<ScorableType> {
    /// Construct a new `ExpectimaxAgent`
    pub fn new(score_function: ScorableType, options: SearchOptions) -> Self {
        Self {
            score_function,
            options,
        }
    }

    /// Run expectimax from the given state to the configured depth
    pub fn search<GameType>(&self, game: &GameType) -> SearchResult<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        self.search_with_instruments(game, &Instruments {})
    }

    /// Run expectimax, reporting every expansion and evaluation to `instruments`
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
            "expectimax",
            depth = self.options.depth,
            adversaries = game.adversary_count(),
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let search = Expectimax {
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

impl<GameType, ScorableType> SearchAgent<GameType> for ExpectimaxAgent<ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    fn name(&self) -> &'static str {
        "expectimax"
    }

    fn decide_action(&self, game: &GameType) -> Option<GameType::Action> {
        self.search(game).action
    }
}

struct Expectimax<'a, ScorableType, InstrumentsType> {
    score_function: &'a ScorableType,
    turns: TurnModel,
    instruments: &'a InstrumentsType,
}

impl<'a, ScorableType, InstrumentsType> Expectimax<'a, ScorableType, InstrumentsType>
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
                let probability = 1.0 / actions.len() as Score;
                let expected = actions
                    .into_iter()
                    .map(|action| {
                        let child = node.next_state(agent, action);
                        probability * self.value(&child, next_turn, next_depth, None).score
                    })
                    .sum();
                NodeValue::scored(expected)
            }
        }
    }
}
