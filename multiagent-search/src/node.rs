//! Scaffolding shared by the recursive strategies

use crate::{Scorable, Score, SearchInstruments, SearchResult};

/// The value of a node. Only maximizer nodes carry an action
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NodeValue<Action> {
    pub(crate) score: Score,
    pub(crate) action: Option<Action>,
}

impl<Action> NodeValue<Action> {
    pub(crate) fn scored(score: Score) -> Self {
        Self {
            score,
            action: None,
        }
    }

    pub(crate) fn into_result(self, options: Vec<(Action, Score)>) -> SearchResult<Action> {
        SearchResult {
            score: self.score,
            action: self.action,
            options,
        }
    }
}

/// Apply the evaluation function to a leaf
pub(crate) fn leaf<GameType, ScorableType, InstrumentsType, Action>(
    game: &GameType,
    score_function: &ScorableType,
    instruments: &InstrumentsType,
) -> NodeValue<Action>
where
    ScorableType: Scorable<GameType>,
    InstrumentsType: SearchInstruments,
{
    instruments.observe_evaluation();
    NodeValue::scored(score_function.score(game))
}

/// The running best of a maximizer node
///
/// The action is only replaced when a later action scores strictly higher, so ties keep the
/// earliest action in legal-action order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BestAction<Action> {
    score: Score,
    action: Option<Action>,
}

impl<Action: Copy> BestAction<Action> {
    pub(crate) fn new() -> Self {
        Self {
            score: Score::NEG_INFINITY,
            action: None,
        }
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn offer(&mut self, action: Action, score: Score) {
        if self.action.is_none() || score > self.score {
            self.score = score;
            self.action = Some(action);
        }
    }

    pub(crate) fn into_value(self) -> NodeValue<Action> {
        NodeValue {
            score: self.score,
            action: self.action,
        }
    }
}

/// Records the value of each root action. Below the root nothing is recorded
pub(crate) type RootOptions<'a, Action> = Option<&'a mut Vec<(Action, Score)>>;

pub(crate) fn record<Action>(options: &mut RootOptions<'_, Action>, action: Action, score: Score) {
    if let Some(options) = options.as_deref_mut() {
        options.push((action, score));
    }
}
