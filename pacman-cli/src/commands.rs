pub mod decide;
pub mod play;

use std::path::PathBuf;

use clap::Subcommand;
use color_eyre::eyre::{eyre, Result};
use multiagent_search::{
    evaluation::{Evaluation, EvaluationKind, EvaluationWeights},
    SearchOptions,
};
use pacman_rs::{factory_by_name, BoxedFactory, GameState, Layout};

use decide::Decide;
use play::Play;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play full games against random ghosts and report the scores
    Play(Play),
    /// Show what an agent would do from the starting position of a layout
    Decide(Decide),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Decide(d) => d.run()?,
        }

        Ok(())
    }
}

/// The flags shared by every command that builds an agent
#[derive(clap::Args, Debug)]
pub(crate) struct AgentArgs {
    /// Layout file to load
    #[clap(short, long, env = "PACMAN_LAYOUT", value_parser)]
    layout: PathBuf,

    /// One of minimax, alphabeta, expectimax or reflex
    #[clap(short, long, env = "PACMAN_AGENT", default_value = "expectimax")]
    agent: String,

    /// Evaluation function applied at the search frontier, either score or better
    #[clap(short, long, env = "PACMAN_EVALUATION", value_parser, default_value_t = EvaluationKind::Better)]
    evaluation: EvaluationKind,

    /// Number of plies to search. Ignored by the reflex agent
    #[clap(short, long, env = "PACMAN_DEPTH", value_parser, default_value_t = SearchOptions::default().depth)]
    depth: usize,

    /// Weight of the distance to the nearest food
    #[clap(long, env = "PACMAN_FOOD_WEIGHT", value_parser)]
    food_weight: Option<f64>,

    /// Weight of the distance to the nearest capsule
    #[clap(long, env = "PACMAN_CAPSULE_WEIGHT", value_parser)]
    capsule_weight: Option<f64>,

    /// Weight of the distance to the nearest unscared ghost
    #[clap(long, env = "PACMAN_GHOST_WEIGHT", value_parser)]
    ghost_weight: Option<f64>,
}

impl AgentArgs {
    pub(crate) fn initial_state(&self) -> Result<GameState> {
        let layout = Layout::from_file(&self.layout).map_err(|err| eyre!("{err:#}"))?;

        Ok(GameState::new(layout))
    }

    pub(crate) fn factory(&self) -> Result<BoxedFactory> {
        factory_by_name(&self.agent).map_err(|err| eyre!("{err:#}"))
    }

    pub(crate) fn options(&self) -> SearchOptions {
        SearchOptions { depth: self.depth }
    }

    pub(crate) fn evaluation(&self) -> Evaluation {
        let defaults = EvaluationWeights::default();
        let weights = EvaluationWeights {
            food_weight: self.food_weight.unwrap_or(defaults.food_weight),
            capsule_weight: self.capsule_weight.unwrap_or(defaults.capsule_weight),
            adversary_weight: self.ghost_weight.unwrap_or(defaults.adversary_weight),
            ..defaults
        };

        Evaluation::new(self.evaluation, weights)
    }
}
