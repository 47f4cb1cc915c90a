//! The traits a game has to implement to be searched
//!
//! The search itself only needs [AdversarialGame], which covers legal actions, transitions and
//! terminal states. The introspection traits (positions, food, capsules and adversaries) are only
//! needed by [crate::evaluation::BetterEvaluation].

use std::fmt::{self, Debug};

/// Identifies a participant in the game. The maximizer is always [MAXIMIZER], adversaries are
/// numbered from 1 in turn order
pub type AgentIndex = usize;

/// The agent whose action the search selects
pub const MAXIMIZER: AgentIndex = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
/// A cell on a grid shaped board
pub struct Position {
    /// Column, growing to the right
    pub x: i32,
    /// Row, growing upwards
    pub y: i32,
}

impl Position {
    /// Construct a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The number of orthogonal steps between two positions, ignoring walls
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A game that can list the actions available to each agent
pub trait LegalActionsGame {
    /// The moves agents can make. These carry no payload beyond their identity
    type Action: Copy + Eq + Debug;

    /// The legal actions for the given agent
    ///
    /// The order must be stable for a given state, since both the tie-break between equally
    /// scored actions and the alpha-beta pruning order depend on it.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;
}

/// A game that can produce the state following an action
pub trait SimulableGame: LegalActionsGame + Sized {
    /// Returns the state after `agent` takes `action`. This must not modify `self`
    fn next_state(&self, agent: AgentIndex, action: Self::Action) -> Self;
}

/// A game that knows when it is over
pub trait VictorDeterminableGame {
    /// Did the maximizer win
    fn is_win(&self) -> bool;

    /// Did the maximizer lose
    fn is_lose(&self) -> bool;

    /// Is this state terminal for either reason
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game with a fixed number of adversaries
pub trait AdversaryCountGame {
    /// The number of non-maximizing agents. They use the indices `1..=adversary_count()`
    fn adversary_count(&self) -> usize;
}

/// A game that tracks its own running score
pub trait ScoreGettableGame {
    /// The score as tracked by the game itself
    fn score(&self) -> f64;
}

/// A game that knows where the maximizer is
pub trait MaximizerPositionGame {
    /// The cell the maximizer currently occupies
    fn maximizer_position(&self) -> Position;
}

/// A game with food on the board
pub trait FoodGettableGame {
    /// Every cell that still holds food
    fn food_positions(&self) -> Vec<Position>;
}

/// A game with capsules on the board
pub trait CapsuleGettableGame {
    /// Every cell that still holds a capsule
    fn capsule_positions(&self) -> Vec<Position>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the evaluation function is allowed to know about an adversary
pub struct AdversaryState {
    /// Where the adversary currently is
    pub position: Position,
    /// How many more moves this adversary stays scared for. Zero means it is a threat
    pub scared_timer: u32,
}

impl AdversaryState {
    /// Is this adversary currently under a scared timer
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// A game that can describe its adversaries
pub trait AdversaryGettableGame {
    /// The state of each adversary, in agent index order
    fn adversaries(&self) -> Vec<AdversaryState>;
}

/// Everything the search strategies need from a game
///
/// This is implemented automatically for anything that implements the underlying traits
pub trait AdversarialGame:
    LegalActionsGame + SimulableGame + VictorDeterminableGame + AdversaryCountGame
{
}

impl<T> AdversarialGame for T where
    T: LegalActionsGame + SimulableGame + VictorDeterminableGame + AdversaryCountGame
{
}

/// Everything [crate::evaluation::BetterEvaluation] needs to look at
///
/// This is implemented automatically for anything that implements the underlying traits
pub trait IntrospectableGame:
    ScoreGettableGame
    + MaximizerPositionGame
    + FoodGettableGame
    + CapsuleGettableGame
    + AdversaryGettableGame
{
}

impl<T> IntrospectableGame for T where
    T: ScoreGettableGame
        + MaximizerPositionGame
        + FoodGettableGame
        + CapsuleGettableGame
        + AdversaryGettableGame
{
}
