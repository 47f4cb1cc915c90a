//! The score type, and the trait evaluation functions implement

/// A desirability score, higher is better for the maximizer
pub type Score = f64;

/// This trait is used to control something that can return a score from a game state
///
/// We use this trait to be able to swap in different evaluation functions. Any
/// `Fn(&GameType) -> Score` implements it, so plain functions and closures can be used directly.
pub trait Scorable<GameType> {
    /// Convert the given game state into a [Score]
    fn score(&self, game: &GameType) -> Score;
}

impl<GameType, FnLike: Fn(&GameType) -> Score> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> Score {
        (self)(game)
    }
}
