//! Pacman as a multi-agent search problem
//!
//! This crate provides the board, the rules and a driver that plays full games with one of the
//! [multiagent_search] strategies controlling pacman and [ghosts::RandomGhost] controlling every
//! ghost.

use anyhow::{anyhow, Result};
use itertools::Itertools;
use multiagent_search::{
    evaluation::Evaluation, SearchAgent, SearchCounts, SearchOptions, SearchResult,
};

pub mod direction;
pub mod factories;
pub mod game_state;
pub mod ghosts;
pub mod layout;
pub mod runner;

pub use direction::Direction;
pub use game_state::GameState;
pub use layout::Layout;
pub use runner::{GameOutcome, Runner, Summary};

use crate::factories::{AlphaBetaFactory, ExpectimaxFactory, MinimaxFactory, ReflexFactory};

pub type BoxedAgent = Box<dyn SearchAgent<GameState> + Send + Sync>;
pub type BoxedFactory = Box<dyn AgentFactory + Send + Sync>;

/// Builds a pacman agent from an evaluation function and search options
pub trait AgentFactory {
    fn name(&self) -> String;
    fn build(&self, evaluation: Evaluation, options: SearchOptions) -> BoxedAgent;

    /// Make the same decision the built agent would, keeping the value of every root action
    fn explain(
        &self,
        evaluation: Evaluation,
        options: SearchOptions,
        game: &GameState,
        counts: &SearchCounts,
    ) -> SearchResult<Direction>;
}

pub fn all_factories() -> Vec<BoxedFactory> {
    vec![
        Box::new(MinimaxFactory {}),
        Box::new(AlphaBetaFactory {}),
        Box::new(ExpectimaxFactory {}),
        Box::new(ReflexFactory {}),
    ]
}

pub fn factory_by_name(name: &str) -> Result<BoxedFactory> {
    let factories = all_factories();
    let known = factories.iter().map(|f| f.name()).join(", ");

    factories
        .into_iter()
        .find(|f| f.name() == name)
        .ok_or_else(|| anyhow!("Unknown agent {name:?}, expected one of: {known}"))
}
