use multiagent_search::{
    alpha_beta::AlphaBetaAgent, evaluation::Evaluation, expectimax::ExpectimaxAgent,
    minimax::MinimaxAgent, reflex::ReflexAgent, Score, SearchAgent, SearchCounts, SearchOptions,
    SearchResult,
};

use crate::{AgentFactory, BoxedAgent, Direction, GameState};

pub struct MinimaxFactory;

impl AgentFactory for MinimaxFactory {
    fn name(&self) -> String {
        "minimax".to_owned()
    }

    fn build(&self, evaluation: Evaluation, options: SearchOptions) -> BoxedAgent {
        Box::new(MinimaxAgent::new(evaluation, options))
    }

    fn explain(
        &self,
        evaluation: Evaluation,
        options: SearchOptions,
        game: &GameState,
        counts: &SearchCounts,
    ) -> SearchResult<Direction> {
        MinimaxAgent::new(evaluation, options).search_with_instruments(game, counts)
    }
}

pub struct AlphaBetaFactory;

impl AgentFactory for AlphaBetaFactory {
    fn name(&self) -> String {
        "alphabeta".to_owned()
    }

    fn build(&self, evaluation: Evaluation, options: SearchOptions) -> BoxedAgent {
        Box::new(AlphaBetaAgent::new(evaluation, options))
    }

    fn explain(
        &self,
        evaluation: Evaluation,
        options: SearchOptions,
        game: &GameState,
        counts: &SearchCounts,
    ) -> SearchResult<Direction> {
        AlphaBetaAgent::new(evaluation, options).search_with_instruments(game, counts)
    }
}

pub struct ExpectimaxFactory;

impl AgentFactory for ExpectimaxFactory {
    fn name(&self) -> String {
        "expectimax".to_owned()
    }

    fn build(&self, evaluation: Evaluation, options: SearchOptions) -> BoxedAgent {
        Box::new(ExpectimaxAgent::new(evaluation, options))
    }

    fn explain(
        &self,
        evaluation: Evaluation,
        options: SearchOptions,
        game: &GameState,
        counts: &SearchCounts,
    ) -> SearchResult<Direction> {
        ExpectimaxAgent::new(evaluation, options).search_with_instruments(game, counts)
    }
}

/// The reflex agent only looks one move ahead, so the depth in `options` is ignored
pub struct ReflexFactory;

impl AgentFactory for ReflexFactory {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    fn build(&self, evaluation: Evaluation, _options: SearchOptions) -> BoxedAgent {
        Box::new(ReflexAgent::new(evaluation))
    }

    /// Every action is scored on the state it leads to, and nothing is expanded or counted
    fn explain(
        &self,
        evaluation: Evaluation,
        _options: SearchOptions,
        game: &GameState,
        _counts: &SearchCounts,
    ) -> SearchResult<Direction> {
        let agent = ReflexAgent::new(evaluation);
        let options = agent.scored_actions(game);
        let score = options
            .iter()
            .map(|(_, score)| *score)
            .fold(Score::NEG_INFINITY, Score::max);

        SearchResult {
            score,
            action: agent.decide_action(game),
            options,
        }
    }
}
