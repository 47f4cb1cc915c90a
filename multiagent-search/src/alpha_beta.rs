//! Minimax with Alpha-Beta pruning
//!
//! Alpha is the best value the maximizer can already guarantee, beta is the best value the
//! adversaries can already guarantee. Both bounds are passed down by value, each call owns its own
//! copies and tightens them as its children report back.
//!
//! A maximizer node stops looking at siblings once its best value is strictly above beta, an
//! adversary node once its lowest value is strictly below alpha. Pruning only skips work, the
//! root value is always the same as [crate::minimax::MinimaxAgent] computes.

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
/// This is the struct that wraps a scoring function and can be used to run minimax with
/// Alpha-Beta pruning
///
/// It also outputs traces using the [tracing] crate.
pub struct AlphaBetaAgent<ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearchOptions,
}

impl<ScorableType> AlphaBetaAgent<ScorableType> {
    /// Construct a new `AlphaBetaAgent`
    pub fn new(score_function: ScorableType, options: SearchOptions) -> Self {
        Self {
            score_function,
            options,
        }
    }

    /// Run the pruned search from the given state to the configured depth
    pub fn search<GameType>(&self, game: &GameType) -> SearchResult<GameType::Action>
    where
        GameType: AdversarialGame,
        ScorableType: Scorable<GameType>,
    {
        self.search_with_instruments(game, &Instruments {})
    }

    /// Run the pruned search, reporting expansions, evaluations and cutoffs to `instruments`
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
            "alpha_beta",
            depth = self.options.depth,
            adversaries = game.adversary_count(),
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let search = AlphaBeta {
                score_function: &self.score_function,
                turns: TurnModel::new(self.options.depth),
                instruments,
            };

            let mut options = vec![];
            let value = search.value(
                game,
                Turn::Maximizer,
                FIRST_PLY,
                Score::NEG_INFINITY,
                Score::INFINITY,
                Some(&mut options),
            );

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", value.score);
            current_span.record("chosen_action", format!("{:?}", value.action).as_str());

            value.into_result(options)
        })
    }
}

impl<GameType, ScorableType> SearchAgent<GameType> for AlphaBetaAgent<ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn decide_action(&self, game: &GameType) -> Option<GameType::Action> {
        self.search(game).action
    }
}

struct AlphaBeta<'a, ScorableType, InstrumentsType> {
    score_function: &'a ScorableType,
    turns: TurnModel,
    instruments: &'a InstrumentsType,
}

impl<'a, ScorableType, InstrumentsType> AlphaBeta<'a, ScorableType, InstrumentsType>
where
    InstrumentsType: SearchInstruments,
{
    fn value<GameType>(
        &self,
        node: &GameType,
        turn: Turn,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
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
                    let score = self
                        .value(&child, next_turn, next_depth, alpha, beta, None)
                        .score;

                    record(&mut root_options, action, score);
                    best.offer(action, score);

                    if best.score() > beta {
                        self.instruments.observe_cutoff(turn);
                        return best.into_value();
                    }
                    alpha = alpha.max(best.score());
                }
                best.into_value()
            }
            Turn::Adversary(_) => {
                let mut lowest = Score::INFINITY;
                for action in actions {
                    let child = node.next_state(agent, action);
                    let score = self
                        .value(&child, next_turn, next_depth, alpha, beta, None)
                        .score;

                    lowest = lowest.min(score);

                    if lowest < alpha {
                        self.instruments.observe_cutoff(turn);
                        return NodeValue::scored(lowest);
                    }
                    beta = beta.min(lowest);
                }
                NodeValue::scored(lowest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use proptest::prelude::*;

    use super::*;
    use crate::{
        minimax::MinimaxAgent,
        test_games::{brute_force_minimax, TreeGame},
        SearchCounts,
    };

    fn leaf_value(game: &TreeGame) -> Score {
        game.leaf_value()
    }

    #[test]
    fn test_pruned_subtree_is_never_evaluated() {
        // The second action's first reply (2) is already below the 3 guaranteed by the first
        // action, so the replies worth 4 and 6 must be skipped. The third action is cut off too,
        // but only at its last reply
        let evaluated = RefCell::new(vec![]);
        let score = |game: &TreeGame| {
            evaluated.borrow_mut().push(game.path().to_vec());
            game.leaf_value()
        };
        let game =
            TreeGame::new(vec![3, 3]).with_leaves(1, &[3., 12., 8., 2., 4., 6., 14., 5., 2.]);
        let counts = SearchCounts::default();

        let result = AlphaBetaAgent::new(&score, SearchOptions { depth: 1 })
            .search_with_instruments(&game, &counts);

        assert_eq!(result.score, brute_force_minimax(&game, 1));
        assert_eq!(result.score, 3.0);
        assert_eq!(result.action, Some(0));

        let evaluated = evaluated.borrow();
        assert!(!evaluated.contains(&vec![1, 1]));
        assert!(!evaluated.contains(&vec![1, 2]));
        assert_eq!(evaluated.len(), 7);
        assert_eq!(counts.cutoffs(), 2);
    }

    #[test]
    fn test_equal_values_do_not_prune() {
        // A reply equal to alpha is not strictly below it, so every sibling is still visited
        let game = TreeGame::new(vec![2, 2]).with_leaves(1, &[3., 5., 3., 4.]);
        let counts = SearchCounts::default();

        let result = AlphaBetaAgent::new(leaf_value, SearchOptions { depth: 1 })
            .search_with_instruments(&game, &counts);

        assert_eq!(counts.evaluations(), 4);
        assert_eq!(counts.cutoffs(), 0);
        assert_eq!(result.score, 3.0);
        assert_eq!(result.action, Some(0));
    }

    #[test]
    fn test_prunes_less_than_minimax() {
        let values: Vec<Score> = (0..256).map(|i| ((i * 53) % 31) as Score).collect();
        let game = TreeGame::new(vec![4, 2, 2]).with_leaves(2, &values);

        let minimax_counts = SearchCounts::default();
        let minimax = MinimaxAgent::new(leaf_value, SearchOptions { depth: 2 })
            .search_with_instruments(&game, &minimax_counts);

        let alpha_beta_counts = SearchCounts::default();
        let alpha_beta = AlphaBetaAgent::new(leaf_value, SearchOptions { depth: 2 })
            .search_with_instruments(&game, &alpha_beta_counts);

        assert_eq!(alpha_beta.score, minimax.score);
        assert_eq!(alpha_beta.action, minimax.action);
        assert!(alpha_beta_counts.evaluations() < minimax_counts.evaluations());
    }

    #[test]
    fn test_terminal_root_has_no_action() {
        let game = TreeGame::constant(2, 2, -1.0).won();
        let agent = AlphaBetaAgent::new(leaf_value, SearchOptions { depth: 2 });

        assert_eq!(agent.decide_action(&game), None);
    }

    #[test]
    fn test_depth_zero_is_a_leaf() {
        let game = TreeGame::constant(1, 2, 4.0);
        let counts = SearchCounts::default();

        let result = AlphaBetaAgent::new(leaf_value, SearchOptions { depth: 0 })
            .search_with_instruments(&game, &counts);

        assert_eq!(result.action, None);
        assert_eq!(result.score, 4.0);
        assert!(result.options.is_empty());
        assert_eq!(counts.evaluations(), 1);
        assert_eq!(counts.expansions(), 0);
    }

    fn arbitrary_tree() -> impl Strategy<Value = (TreeGame, usize)> {
        (prop::collection::vec(1usize..=3, 2..=3), 1usize..=2).prop_flat_map(
            |(branching, depth)| {
                let leaves = branching.iter().product::<usize>().pow(depth as u32);
                prop::collection::vec(-50i32..50, leaves).prop_map(move |values| {
                    let values: Vec<Score> = values.into_iter().map(Score::from).collect();
                    (
                        TreeGame::new(branching.clone()).with_leaves(depth, &values),
                        depth,
                    )
                })
            },
        )
    }

    proptest! {
        #[test]
        fn test_agrees_with_minimax((game, depth) in arbitrary_tree()) {
            let options = SearchOptions { depth };
            let minimax = MinimaxAgent::new(leaf_value, options).search(&game);
            let alpha_beta = AlphaBetaAgent::new(leaf_value, options).search(&game);

            prop_assert_eq!(alpha_beta.score, minimax.score);
            prop_assert_eq!(alpha_beta.score, brute_force_minimax(&game, depth));
            prop_assert_eq!(alpha_beta.action, minimax.action);
        }
    }
}
