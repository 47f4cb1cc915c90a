//! The rules of the game
//!
//! Pacman is agent 0 and the ghosts are agents `1..=ghosts`, in the order they appear in the
//! layout. Every transition returns a new state and leaves the old one untouched, so the search can
//! branch freely from any state.

use std::{fmt, sync::Arc};

use itertools::Itertools;
use multiagent_search::game::{
    AdversaryCountGame, AdversaryGettableGame, AdversaryState, AgentIndex, CapsuleGettableGame,
    FoodGettableGame, LegalActionsGame, MaximizerPositionGame, Position, ScoreGettableGame,
    SimulableGame, VictorDeterminableGame, MAXIMIZER,
};
use tracing::warn;

use crate::{direction::Direction, layout::Layout};

/// How many ghost moves a capsule keeps the ghosts scared for
pub const SCARED_TIME: u32 = 40;
/// Charged on every pacman move, including `Stop`
pub const TIME_PENALTY: f64 = 1.0;
pub const FOOD_REWARD: f64 = 10.0;
pub const WIN_REWARD: f64 = 500.0;
pub const LOSE_PENALTY: f64 = 500.0;
pub const SCARED_GHOST_REWARD: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostState {
    pub position: Position,
    /// Where the ghost respawns after being eaten
    pub start: Position,
    /// The direction of the last move, used to stop ghosts from turning around
    pub direction: Direction,
    pub scared_timer: u32,
}

impl GhostState {
    fn new(start: Position) -> Self {
        Self {
            position: start,
            start,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    layout: Arc<Layout>,
    pacman: Position,
    ghosts: Vec<GhostState>,
    food: Vec<bool>,
    food_left: usize,
    capsules: Vec<Position>,
    score: f64,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Start a game from the layout's starting positions
    pub fn new(layout: Layout) -> Self {
        let layout = Arc::new(layout);
        let mut food = vec![false; (layout.width() * layout.height()) as usize];
        for index in layout.food().iter().filter_map(|&p| layout.index_of(p)) {
            food[index] = true;
        }

        Self {
            pacman: layout.pacman_start(),
            ghosts: layout
                .ghost_starts()
                .iter()
                .map(|&start| GhostState::new(start))
                .collect(),
            food_left: food.iter().filter(|&&f| f).count(),
            food,
            capsules: layout.capsules().to_vec(),
            score: 0.0,
            outcome: None,
            layout,
        }
    }

    pub fn pacman_position(&self) -> Position {
        self.pacman
    }

    pub fn ghosts(&self) -> &[GhostState] {
        &self.ghosts
    }

    pub fn food_left(&self) -> usize {
        self.food_left
    }

    pub fn has_food(&self, position: Position) -> bool {
        self.layout
            .index_of(position)
            .map(|index| self.food[index])
            .unwrap_or(false)
    }

    fn possible_moves(&self, from: Position) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |d| !self.layout.is_wall(d.apply(from)))
    }

    fn move_pacman(&mut self, direction: Direction) {
        self.score -= TIME_PENALTY;
        self.pacman = direction.apply(self.pacman);

        if let Some(index) = self.layout.index_of(self.pacman) {
            if self.food[index] {
                self.food[index] = false;
                self.food_left -= 1;
                self.score += FOOD_REWARD;

                if self.food_left == 0 {
                    self.score += WIN_REWARD;
                    self.outcome = Some(Outcome::Win);
                }
            }
        }

        if let Some(capsule) = self.capsules.iter().position(|&c| c == self.pacman) {
            self.capsules.remove(capsule);
            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = SCARED_TIME;
            }
        }

        for ghost in 0..self.ghosts.len() {
            self.resolve_collision(ghost);
        }
    }

    fn move_ghost(&mut self, ghost: usize, direction: Direction) {
        let state = &mut self.ghosts[ghost];
        state.position = direction.apply(state.position);
        state.direction = direction;
        state.scared_timer = state.scared_timer.saturating_sub(1);

        self.resolve_collision(ghost);
    }

    fn resolve_collision(&mut self, ghost: usize) {
        let state = &mut self.ghosts[ghost];
        if state.position != self.pacman {
            return;
        }

        if state.is_scared() {
            self.score += SCARED_GHOST_REWARD;
            *state = GhostState::new(state.start);
        } else if self.outcome.is_none() {
            self.score -= LOSE_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }
}

impl LegalActionsGame for GameState {
    type Action = Direction;

    /// Finished games have no legal actions for anyone
    ///
    /// Pacman may move into any open cell or `Stop`. Ghosts may not `Stop`, and may only reverse
    /// their last direction when that is the only move left to them.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        if agent == MAXIMIZER {
            return self.possible_moves(self.pacman).collect();
        }

        let Some(ghost) = self.ghosts.get(agent - 1) else {
            return vec![];
        };
        let mut actions = self
            .possible_moves(ghost.position)
            .filter(|&d| d != Direction::Stop)
            .collect_vec();

        let reverse = ghost.direction.reverse();
        if actions.len() > 1 {
            actions.retain(|&d| d != reverse);
        }

        actions
    }
}

impl SimulableGame for GameState {
    /// A finished game, or an action that isn't legal for `agent`, leaves the state unchanged
    fn next_state(&self, agent: AgentIndex, action: Direction) -> Self {
        if self.is_over() {
            return self.clone();
        }

        if !self.legal_actions(agent).contains(&action) {
            warn!(agent, %action, "Ignoring an illegal action");
            return self.clone();
        }

        let mut next = self.clone();
        if agent == MAXIMIZER {
            next.move_pacman(action);
        } else {
            next.move_ghost(agent - 1, action);
        }
        next
    }
}

impl VictorDeterminableGame for GameState {
    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }
}

impl AdversaryCountGame for GameState {
    fn adversary_count(&self) -> usize {
        self.ghosts.len()
    }
}

impl ScoreGettableGame for GameState {
    fn score(&self) -> f64 {
        self.score
    }
}

impl MaximizerPositionGame for GameState {
    fn maximizer_position(&self) -> Position {
        self.pacman
    }
}

impl FoodGettableGame for GameState {
    fn food_positions(&self) -> Vec<Position> {
        let width = self.layout.width();

        self.food
            .iter()
            .positions(|&f| f)
            .map(|index| Position::new(index as i32 % width, index as i32 / width))
            .collect()
    }
}

impl CapsuleGettableGame for GameState {
    fn capsule_positions(&self) -> Vec<Position> {
        self.capsules.clone()
    }
}

impl AdversaryGettableGame for GameState {
    fn adversaries(&self) -> Vec<AdversaryState> {
        self.ghosts
            .iter()
            .map(|ghost| AdversaryState {
                position: ghost.position,
                scared_timer: ghost.scared_timer,
            })
            .collect()
    }
}

/// Draws the board in the layout format, with scared ghosts shown as `g`
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.layout.height()).rev() {
            let row: String = (0..self.layout.width())
                .map(|x| {
                    let position = Position::new(x, y);

                    if let Some(ghost) = self.ghosts.iter().find(|g| g.position == position) {
                        if ghost.is_scared() {
                            'g'
                        } else {
                            'G'
                        }
                    } else if position == self.pacman {
                        'P'
                    } else if self.layout.is_wall(position) {
                        '%'
                    } else if self.capsules.contains(&position) {
                        'o'
                    } else if self.has_food(position) {
                        '.'
                    } else {
                        ' '
                    }
                })
                .collect();
            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}
