use color_eyre::eyre::Result;
use itertools::Itertools;
use pacman_rs::{runner::DEFAULT_MAX_MOVES, Runner, Summary};
use tracing::info;

use super::AgentArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    #[clap(flatten)]
    agent: AgentArgs,

    /// Number of games to play
    #[clap(short, long, env = "PACMAN_GAMES", value_parser, default_value_t = 1)]
    games: usize,

    /// Seed for the ghosts' random moves
    #[clap(short, long, env = "PACMAN_SEED", value_parser, default_value_t = 0)]
    seed: u64,

    /// Games still running after this many pacman moves are stopped and are reported as stopped
    #[clap(short, long, env = "PACMAN_MAX_MOVES", value_parser, default_value_t = DEFAULT_MAX_MOVES)]
    max_moves: usize,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let game = self.agent.initial_state()?;
        let factory = self.agent.factory()?;
        let evaluation = self.agent.evaluation();
        let agent = factory.build(evaluation, self.agent.options());

        info!(
            agent = factory.name(),
            evaluation = %evaluation.kind(),
            depth = self.agent.depth,
            games = self.games,
            seed = self.seed,
            "Starting games"
        );

        let mut runner = Runner::new(agent, self.seed).with_max_moves(self.max_moves);
        let outcomes = runner.play_many(&game, self.games);

        for (number, outcome) in outcomes.iter().enumerate() {
            let result = match (outcome.won, outcome.lost) {
                (true, _) => "Win",
                (false, true) => "Loss",
                (false, false) => "Stopped",
            };
            println!(
                "Game {}: {result} with a score of {} after {} moves",
                number + 1,
                outcome.score,
                outcome.moves
            );
        }

        let summary = Summary::from_outcomes(&outcomes);
        println!("Average Score: {:.1}", summary.average_score);
        println!(
            "Scores:        {}",
            outcomes.iter().map(|o| o.score).join(", ")
        );
        println!(
            "Win Rate:      {}/{} ({:.2})",
            summary.wins,
            summary.games,
            summary.win_rate()
        );

        Ok(())
    }
}
