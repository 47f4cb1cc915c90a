//! Parsing of the text board format
//!
//! Each character is one cell: `%` wall, `.` food, `o` capsule, `P` pacman, `G` ghost and a space
//! for an empty cell. The first line is the top row of the board, so `y` grows upwards.

use std::{fs, path::Path, str::FromStr};

use anyhow::{bail, Context, Result};
use multiagent_search::game::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: i32,
    height: i32,
    walls: Vec<bool>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    pacman_start: Position,
    ghost_starts: Vec<Position>,
}

impl Layout {
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            bail!("Layout is empty");
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut walls = vec![false; width * height];
        let mut food = vec![];
        let mut capsules = vec![];
        let mut pacman_start = None;
        let mut ghost_starts = vec![];

        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                bail!(
                    "Row {} is {} cells wide but the first row is {}",
                    row_index + 1,
                    row.chars().count(),
                    width
                );
            }

            let y = (height - 1 - row_index) as i32;
            for (x, cell) in row.chars().enumerate() {
                let position = Position::new(x as i32, y);
                match cell {
                    '%' => walls[y as usize * width + x] = true,
                    '.' => food.push(position),
                    'o' => capsules.push(position),
                    'P' => {
                        if let Some(existing) = pacman_start.replace(position) {
                            bail!("Found a second pacman at {position}, the first is at {existing}");
                        }
                    }
                    'G' => ghost_starts.push(position),
                    ' ' => {}
                    other => bail!("Unknown layout character {other:?} at {position}"),
                }
            }
        }

        let pacman_start = pacman_start.context("Layout has no pacman")?;

        Ok(Self {
            width: width as i32,
            height: height as i32,
            walls,
            food,
            capsules,
            pacman_start,
            ghost_starts,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read layout {}", path.display()))?;

        Self::parse(&text).with_context(|| format!("Invalid layout {}", path.display()))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    /// The row major index of an in bounds position
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| (position.y * self.width + position.x) as usize)
    }

    /// Cells off the board count as walls
    pub fn is_wall(&self, position: Position) -> bool {
        self.index_of(position)
            .map(|index| self.walls[index])
            .unwrap_or(true)
    }

    pub fn food(&self) -> &[Position] {
        &self.food
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn pacman_start(&self) -> Position {
        self.pacman_start
    }

    /// Ghost starting cells in reading order. Ghost `i` is agent `i + 1`
    pub fn ghost_starts(&self) -> &[Position] {
        &self.ghost_starts
    }
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fixture() {
        let layout = Layout::parse(include_str!("../fixtures/testClassic.lay")).unwrap();

        assert_eq!(layout.width(), 5);
        assert_eq!(layout.height(), 10);
        assert_eq!(layout.pacman_start(), Position::new(1, 1));
        assert_eq!(layout.ghost_starts(), &[Position::new(2, 7)]);
        assert_eq!(layout.food().len(), 8);
        assert!(layout.capsules().is_empty());
    }

    #[test]
    fn test_bundled_fixtures_parse() {
        let minimax = Layout::parse(include_str!("../fixtures/minimaxClassic.lay")).unwrap();
        assert_eq!(minimax.ghost_starts().len(), 3);
        assert_eq!(minimax.food().len(), 2);

        let trapped = Layout::parse(include_str!("../fixtures/trappedClassic.lay")).unwrap();
        assert_eq!(trapped.ghost_starts().len(), 2);
        assert_eq!(trapped.food().len(), 4);

        let capsule = Layout::parse(include_str!("../fixtures/capsuleCorner.lay")).unwrap();
        assert_eq!(capsule.capsules(), &[Position::new(3, 3)]);
        assert_eq!(capsule.ghost_starts(), &[Position::new(1, 1)]);
    }

    #[test]
    fn test_y_grows_upwards() {
        let layout: Layout = "%%%%\n%P.%\n%G %\n%%%%".parse().unwrap();

        assert_eq!(layout.pacman_start(), Position::new(1, 2));
        assert_eq!(layout.food(), &[Position::new(2, 2)]);
        assert_eq!(layout.ghost_starts(), &[Position::new(1, 1)]);
        assert!(layout.is_wall(Position::new(0, 0)));
        assert!(!layout.is_wall(Position::new(2, 1)));
    }

    #[test]
    fn test_off_board_is_wall() {
        let layout: Layout = "P".parse().unwrap();

        assert!(!layout.is_wall(Position::new(0, 0)));
        assert!(layout.is_wall(Position::new(-1, 0)));
        assert!(layout.is_wall(Position::new(0, 1)));
        assert_eq!(layout.index_of(Position::new(1, 0)), None);
    }

    #[test]
    fn test_capsules() {
        let layout: Layout = "%%%%%\n%Po %\n%%%%%".parse().unwrap();

        assert_eq!(layout.capsules(), &[Position::new(2, 1)]);
        assert!(layout.ghost_starts().is_empty());
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = Layout::parse("%%%%\n%P%\n%%%%").unwrap_err();

        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_unknown_character_is_rejected() {
        let err = Layout::parse("%%%\n%P%\n%x%").unwrap_err();

        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_missing_pacman_is_rejected() {
        assert!(Layout::parse("%%%\n%.%\n%%%").is_err());
        assert!(Layout::parse("").is_err());
    }

    #[test]
    fn test_second_pacman_is_rejected() {
        assert!(Layout::parse("%%%%\n%PP%\n%%%%").is_err());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Layout::from_file("does/not/exist.lay").unwrap_err();

        assert!(err.to_string().contains("does/not/exist.lay"));
    }
}
