#![deny(missing_debug_implementations, missing_docs)]
//! This crate implements adversarial game tree search for games with one maximizing agent and any
//! number of adversaries. You provide a game that implements the traits in [game] and an
//! evaluation function that turns a game state into a [Score].
//!
//! Three interchangeable strategies are provided:
//!
//! - [minimax::MinimaxAgent] assumes every adversary minimizes our score
//! - [alpha_beta::AlphaBetaAgent] is minimax with alpha-beta pruning, it always agrees with
//!   minimax but does less work
//! - [expectimax::ExpectimaxAgent] assumes every adversary picks uniformly at random from its legal
//!   actions
//!
//! All of them share the same [turn::TurnModel]. One 'ply' is the maximizer moving followed by
//! every adversary moving once, and the depth limit counts plies.
//!
//! ```rust
//! use multiagent_search::{
//!     evaluation::ScoreEvaluation, minimax::MinimaxAgent, SearchAgent, SearchOptions,
//! };
//! # use multiagent_search::game::*;
//! # #[derive(Clone)]
//! # struct Countdown(i32);
//! # impl LegalActionsGame for Countdown {
//! #     type Action = char;
//! #     fn legal_actions(&self, _agent: AgentIndex) -> Vec<char> {
//! #         if self.0 > 0 { vec!['a', 'b'] } else { vec![] }
//! #     }
//! # }
//! # impl SimulableGame for Countdown {
//! #     fn next_state(&self, _agent: AgentIndex, action: char) -> Self {
//! #         Countdown(self.0 - if action == 'a' { 1 } else { 2 })
//! #     }
//! # }
//! # impl VictorDeterminableGame for Countdown {
//! #     fn is_win(&self) -> bool { false }
//! #     fn is_lose(&self) -> bool { false }
//! # }
//! # impl AdversaryCountGame for Countdown {
//! #     fn adversary_count(&self) -> usize { 1 }
//! # }
//! # impl ScoreGettableGame for Countdown {
//! #     fn score(&self) -> f64 { self.0 as f64 }
//! # }
//!
//! // `Countdown` is any type implementing the traits in the `game` module
//! let agent = MinimaxAgent::new(ScoreEvaluation, SearchOptions { depth: 2 });
//!
//! assert_eq!(agent.decide_action(&Countdown(10)), Some('a'));
//! ```

pub mod alpha_beta;
pub mod evaluation;
pub mod expectimax;
pub mod game;
pub mod instruments;
pub mod minimax;
pub mod reflex;
pub mod score;
pub mod turn;

mod node;
mod search_result;
pub use search_result::SearchResult;

pub use instruments::{Instruments, SearchCounts, SearchInstruments};
pub use score::{Score, Scorable};

use game::AdversarialGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Optional properties that can be defined for any of the search agents
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_search::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchOptions {
    /// How many plies to look ahead before applying the evaluation function
    ///
    /// A ply is one move by the maximizer followed by one move from every adversary. A depth of 0
    /// means the root itself is a cutoff, so no action can be chosen.
    ///
    /// Defaults to 2
    pub depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { depth: 2 }
    }
}

/// Something that can pick an action for the maximizing agent
///
/// This is the seam used by drivers, it lets callers swap between strategies without caring which
/// one they hold.
pub trait SearchAgent<GameType: AdversarialGame> {
    /// A short stable name for this agent, used for logging and lookups
    fn name(&self) -> &'static str;

    /// Pick the action the maximizer should take from the given state
    ///
    /// Returns `None` when the state offers no decision, either because it is already a cutoff
    /// (win, loss or a depth of 0) or because the maximizer has no legal actions.
    fn decide_action(&self, game: &GameType) -> Option<GameType::Action>;
}

#[cfg(test)]
pub(crate) mod test_games;
