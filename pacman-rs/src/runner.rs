//! Plays complete games
//!
//! Pacman is driven by a search agent, every ghost by [RandomGhost]. The runner owns a seeded
//! [StdRng] for the ghosts, so a given seed always replays the same games for deterministic
//! agents.

use derivative::Derivative;
use multiagent_search::game::{
    AdversaryCountGame, ScoreGettableGame, SimulableGame, VictorDeterminableGame, MAXIMIZER,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info_span, warn};

use crate::{game_state::GameState, ghosts::RandomGhost, BoxedAgent};

/// Games still running after this many pacman moves are stopped
pub const DEFAULT_MAX_MOVES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOutcome {
    pub score: f64,
    pub won: bool,
    /// Caught by a ghost. Games stopped by the move cap, or because the agent had no action, are
    /// neither won nor lost
    pub lost: bool,
    /// The number of pacman moves that were played
    pub moves: usize,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Runner {
    #[derivative(Debug = "ignore")]
    agent: BoxedAgent,
    ghost: RandomGhost,
    max_moves: usize,
    rng: StdRng,
}

impl Runner {
    pub fn new(agent: BoxedAgent, seed: u64) -> Self {
        Self {
            agent,
            ghost: RandomGhost,
            max_moves: DEFAULT_MAX_MOVES,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Play until pacman wins, loses, runs out of moves or the agent has no action to offer
    pub fn play(&mut self, initial: &GameState) -> GameOutcome {
        info_span!("game", agent = self.agent.name(), max_moves = self.max_moves).in_scope(|| {
            let mut state = initial.clone();
            let mut moves = 0;

            while !state.is_over() && moves < self.max_moves {
                let Some(action) = self.agent.decide_action(&state) else {
                    warn!(moves, "Agent had no action, ending the game");
                    break;
                };
                state = state.next_state(MAXIMIZER, action);
                moves += 1;

                for ghost in 1..=state.adversary_count() {
                    if state.is_over() {
                        break;
                    }
                    if let Some(action) = self.ghost.choose(&state, ghost, &mut self.rng) {
                        state = state.next_state(ghost, action);
                    }
                }
            }

            let outcome = GameOutcome {
                score: state.score(),
                won: state.is_win(),
                lost: state.is_lose(),
                moves,
            };
            debug!(?outcome, "Game over");

            outcome
        })
    }

    /// Play `games` games in a row from the same starting state
    pub fn play_many(&mut self, initial: &GameState, games: usize) -> Vec<GameOutcome> {
        (0..games).map(|_| self.play(initial)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub wins: usize,
    pub average_score: f64,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[GameOutcome]) -> Self {
        let games = outcomes.len();
        let total: f64 = outcomes.iter().map(|o| o.score).sum();

        Self {
            games,
            wins: outcomes.iter().filter(|o| o.won).count(),
            average_score: if games == 0 {
                0.0
            } else {
                total / games as f64
            },
        }
    }

    /// Between 0 and 1. An empty summary has a win rate of 0
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}
