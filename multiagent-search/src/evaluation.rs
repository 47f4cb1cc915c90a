//! Evaluation functions that turn a game state into a [Score]
//!
//! [ScoreEvaluation] just trusts the game's own score. [BetterEvaluation] also looks at the
//! distance from the maximizer to the nearest food, the nearest capsule and the nearest adversary
//! that is not scared.

use std::{fmt, str::FromStr};

use crate::{
    game::{IntrospectableGame, Position, ScoreGettableGame},
    Scorable, Score,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Scores a state with the score the game tracks itself
pub struct ScoreEvaluation;

impl<GameType: ScoreGettableGame> Scorable<GameType> for ScoreEvaluation {
    fn score(&self, game: &GameType) -> Score {
        game.score()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// The tunable constants of [BetterEvaluation]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_search::evaluation::EvaluationWeights;
///
/// let weights = EvaluationWeights::default();
///
/// assert_eq!(weights.food_weight, 10.0);
/// assert_eq!(weights.capsule_weight, 10.0);
/// assert_eq!(weights.adversary_weight, 55.0);
/// assert_eq!(weights.no_food_default, 500.0);
/// assert_eq!(weights.no_capsule_default, 500.0);
/// assert_eq!(weights.no_adversary_default, 500.0);
/// ```
pub struct EvaluationWeights {
    /// Added per step of distance to the nearest food
    pub food_weight: Score,
    /// Added per step of distance to the nearest capsule
    pub capsule_weight: Score,
    /// Subtracted per step of distance to the nearest adversary that is not scared
    pub adversary_weight: Score,
    /// Added instead of the food term when no food is left
    pub no_food_default: Score,
    /// Added instead of the capsule term when no capsule is left
    pub no_capsule_default: Score,
    /// Subtracted instead of the adversary term when every adversary is scared
    pub no_adversary_default: Score,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            food_weight: 10.0,
            capsule_weight: 10.0,
            adversary_weight: 55.0,
            no_food_default: 500.0,
            no_capsule_default: 500.0,
            no_adversary_default: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// The distance based heuristic
///
/// `score + food term + capsule term - adversary term`, where each term is its weight times the
/// distance to the nearest target, or its default when there is no target.
///
/// Note the food and capsule terms are added and the adversary term is subtracted. Holding
/// everything else fixed, food further away scores higher and an unscared adversary further away
/// scores lower.
pub struct BetterEvaluation {
    /// Weights and no-target defaults for each term
    pub weights: EvaluationWeights,
}

impl BetterEvaluation {
    /// Construct a `BetterEvaluation` with custom weights
    pub fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    fn distance_term(
        from: &Position,
        targets: impl IntoIterator<Item = Position>,
        weight: Score,
        default: Score,
    ) -> Score {
        nearest_distance(from, targets)
            .map(|distance| weight * Score::from(distance))
            .unwrap_or(default)
    }
}

/// The Manhattan distance to the closest of `targets`, or `None` if there are none
pub fn nearest_distance(
    from: &Position,
    targets: impl IntoIterator<Item = Position>,
) -> Option<u32> {
    targets
        .into_iter()
        .map(|target| from.manhattan_distance(&target))
        .min()
}

impl<GameType: IntrospectableGame> Scorable<GameType> for BetterEvaluation {
    fn score(&self, game: &GameType) -> Score {
        let weights = &self.weights;
        let position = game.maximizer_position();

        let food = Self::distance_term(
            &position,
            game.food_positions(),
            weights.food_weight,
            weights.no_food_default,
        );
        let capsules = Self::distance_term(
            &position,
            game.capsule_positions(),
            weights.capsule_weight,
            weights.no_capsule_default,
        );
        let threats = game
            .adversaries()
            .into_iter()
            .filter(|adversary| !adversary.is_scared())
            .map(|adversary| adversary.position);
        let adversaries = Self::distance_term(
            &position,
            threats,
            weights.adversary_weight,
            weights.no_adversary_default,
        );

        game.score() + food + capsules - adversaries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Names the available evaluation functions so they can be picked at runtime
pub enum EvaluationKind {
    /// [ScoreEvaluation]
    Score,
    /// [BetterEvaluation]
    Better,
}

impl EvaluationKind {
    /// Every kind, in the order they are listed to users
    pub const ALL: [EvaluationKind; 2] = [EvaluationKind::Score, EvaluationKind::Better];

    /// The name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            EvaluationKind::Score => "score",
            EvaluationKind::Better => "better",
        }
    }
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Returned when parsing an [EvaluationKind] from a name we don't know
pub struct UnknownEvaluation(pub String);

impl fmt::Display for UnknownEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown evaluation function `{}`, expected one of: score, better",
            self.0
        )
    }
}

impl std::error::Error for UnknownEvaluation {}

impl FromStr for EvaluationKind {
    type Err = UnknownEvaluation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" | "scoreEvaluationFunction" => Ok(EvaluationKind::Score),
            "better" | "betterEvaluationFunction" => Ok(EvaluationKind::Better),
            other => Err(UnknownEvaluation(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// An evaluation function chosen at runtime
pub enum Evaluation {
    /// The game score on its own
    Score(ScoreEvaluation),
    /// The score adjusted by distances to food, capsules and ghosts
    Better(BetterEvaluation),
}

impl Evaluation {
    /// Build the evaluation function for `kind`. The weights are only used by
    /// [EvaluationKind::Better]
    pub fn new(kind: EvaluationKind, weights: EvaluationWeights) -> Self {
        match kind {
            EvaluationKind::Score => Evaluation::Score(ScoreEvaluation),
            EvaluationKind::Better => Evaluation::Better(BetterEvaluation::new(weights)),
        }
    }

    /// Which kind of evaluation this is, ignoring the weights
    pub fn kind(&self) -> EvaluationKind {
        match self {
            Evaluation::Score(_) => EvaluationKind::Score,
            Evaluation::Better(_) => EvaluationKind::Better,
        }
    }
}

impl<GameType: IntrospectableGame> Scorable<GameType> for Evaluation {
    fn score(&self, game: &GameType) -> Score {
        match self {
            Evaluation::Score(e) => e.score(game),
            Evaluation::Better(e) => e.score(game),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        AdversaryGettableGame, AdversaryState, CapsuleGettableGame, FoodGettableGame,
        MaximizerPositionGame,
    };

    #[derive(Debug, Clone)]
    struct Snapshot {
        score: f64,
        position: Position,
        food: Vec<Position>,
        capsules: Vec<Position>,
        adversaries: Vec<AdversaryState>,
    }

    impl Snapshot {
        fn at_origin(score: f64) -> Self {
            Self {
                score,
                position: Position::new(0, 0),
                food: vec![],
                capsules: vec![],
                adversaries: vec![],
            }
        }

        fn with_food(mut self, x: i32, y: i32) -> Self {
            self.food.push(Position::new(x, y));
            self
        }

        fn with_capsule(mut self, x: i32, y: i32) -> Self {
            self.capsules.push(Position::new(x, y));
            self
        }

        fn with_ghost(mut self, x: i32, y: i32, scared_timer: u32) -> Self {
            self.adversaries.push(AdversaryState {
                position: Position::new(x, y),
                scared_timer,
            });
            self
        }
    }

    impl ScoreGettableGame for Snapshot {
        fn score(&self) -> f64 {
            self.score
        }
    }

    impl MaximizerPositionGame for Snapshot {
        fn maximizer_position(&self) -> Position {
            self.position
        }
    }

    impl FoodGettableGame for Snapshot {
        fn food_positions(&self) -> Vec<Position> {
            self.food.clone()
        }
    }

    impl CapsuleGettableGame for Snapshot {
        fn capsule_positions(&self) -> Vec<Position> {
            self.capsules.clone()
        }
    }

    impl AdversaryGettableGame for Snapshot {
        fn adversaries(&self) -> Vec<AdversaryState> {
            self.adversaries.clone()
        }
    }

    fn better(game: &Snapshot) -> Score {
        BetterEvaluation::default().score(game)
    }

    #[test]
    fn test_worked_example() {
        // food at distance 3, no capsules, one unscared ghost at distance 5
        let game = Snapshot::at_origin(10.0)
            .with_food(1, 2)
            .with_food(4, 4)
            .with_ghost(2, 3, 0);

        assert_eq!(better(&game), 10.0 + 3.0 * 10.0 + 500.0 - 5.0 * 55.0);
        assert_eq!(better(&game), 265.0);
    }

    #[test]
    fn test_score_evaluation_is_the_game_score() {
        let game = Snapshot::at_origin(-42.0).with_food(1, 1).with_ghost(1, 0, 0);

        assert_eq!(ScoreEvaluation.score(&game), -42.0);
    }

    #[test]
    fn test_adversary_term_grows_with_distance() {
        // The adversary term is subtracted, so each step further from the nearest unscared ghost
        // costs exactly `adversary_weight`
        let scores: Vec<Score> = (1..6)
            .map(|distance| {
                let game = Snapshot::at_origin(0.0)
                    .with_food(2, 0)
                    .with_ghost(0, distance, 0);
                better(&game)
            })
            .collect();

        for pair in scores.windows(2) {
            assert_eq!(pair[0] - pair[1], 55.0);
        }
    }

    #[test]
    fn test_only_nearest_ghost_counts() {
        let one = Snapshot::at_origin(0.0).with_ghost(0, 2, 0);
        let two = one.clone().with_ghost(6, 6, 0);

        assert_eq!(better(&one), better(&two));
    }

    #[test]
    fn test_closer_food_scores_lower_with_positive_weight() {
        let near = Snapshot::at_origin(0.0).with_food(1, 0).with_ghost(5, 5, 0);
        let far = Snapshot::at_origin(0.0).with_food(4, 0).with_ghost(5, 5, 0);

        assert!(better(&near) < better(&far));
        assert_eq!(better(&far) - better(&near), 30.0);
    }

    #[test]
    fn test_closer_capsule_scores_lower_with_positive_weight() {
        let near = Snapshot::at_origin(0.0).with_capsule(0, 1);
        let far = Snapshot::at_origin(0.0).with_capsule(0, 3);

        assert_eq!(better(&far) - better(&near), 20.0);
    }

    #[test]
    fn test_no_food_scores_like_food_fifty_steps_away() {
        let none = Snapshot::at_origin(0.0).with_capsule(1, 0).with_ghost(3, 0, 0);
        let fifty = none.clone().with_food(25, 25);

        assert_eq!(better(&none), better(&fifty));
    }

    #[test]
    fn test_scared_ghosts_are_ignored() {
        let scared = Snapshot::at_origin(0.0).with_food(1, 0).with_ghost(1, 1, 5);
        let empty = Snapshot::at_origin(0.0).with_food(1, 0);

        assert_eq!(better(&scared), better(&empty));
        assert_eq!(better(&empty), 10.0 + 500.0 - 500.0);

        let mixed = scared.with_ghost(0, 4, 0);
        assert_eq!(better(&mixed), 10.0 + 500.0 - 4.0 * 55.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = EvaluationWeights {
            food_weight: -1.0,
            adversary_weight: 2.0,
            ..Default::default()
        };
        let game = Snapshot::at_origin(1.0)
            .with_food(3, 0)
            .with_capsule(0, 2)
            .with_ghost(1, 1, 0);

        let score = BetterEvaluation::new(weights).score(&game);

        assert_eq!(score, 1.0 - 3.0 + 20.0 - 4.0);
    }

    #[test]
    fn test_evaluation_kind_names() {
        assert_eq!("score".parse::<EvaluationKind>(), Ok(EvaluationKind::Score));
        assert_eq!(
            "betterEvaluationFunction".parse::<EvaluationKind>(),
            Ok(EvaluationKind::Better)
        );
        assert_eq!(
            "nope".parse::<EvaluationKind>(),
            Err(UnknownEvaluation("nope".to_owned()))
        );

        for kind in EvaluationKind::ALL {
            assert_eq!(kind.name().parse::<EvaluationKind>(), Ok(kind));
            assert_eq!(Evaluation::new(kind, Default::default()).kind(), kind);
        }
    }

    #[test]
    fn test_runtime_evaluation_dispatches() {
        let game = Snapshot::at_origin(10.0).with_food(0, 3).with_ghost(5, 0, 0);
        let weights = EvaluationWeights::default();

        assert_eq!(Evaluation::new(EvaluationKind::Score, weights).score(&game), 10.0);
        assert_eq!(
            Evaluation::new(EvaluationKind::Better, weights).score(&game),
            better(&game)
        );
    }

    #[test]
    fn test_nearest_distance() {
        let origin = Position::new(0, 0);

        assert_eq!(nearest_distance(&origin, vec![]), None);
        assert_eq!(
            nearest_distance(&origin, vec![Position::new(3, 3), Position::new(-1, 1)]),
            Some(2)
        );
    }
}
