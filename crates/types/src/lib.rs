//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic, so they can be shared by the
//! engine, the persistence layer and any front end.
//!
//! # Board Sizes
//!
//! Boards are square. The side length is picked by difficulty:
//!
//! | Difficulty | Side | Winning score |
//! |------------|------|---------------|
//! | `Easy`     | 4    | 4096          |
//! | `Medium`   | 5    | 2048          |
//! | `Expert`   | 6    | 8192          |
//!
//! # Tile Spawning
//!
//! - `SPAWN_LOW_TILE` (2) spawns with probability `SPAWN_LOW_PROBABILITY` (0.9)
//! - `SPAWN_HIGH_TILE` (4) spawns otherwise
//! - `INITIAL_TILES` (2) tiles are placed on every fresh board
//!
//! # Examples
//!
//! ```
//! use slabs_types::{Difficulty, Direction, GameAction};
//!
//! // Parse a swipe (case-insensitive)
//! let dir = Direction::from_str("Up").unwrap();
//! assert_eq!(dir, Direction::Up);
//! assert_eq!(dir.opposite(), Direction::Down);
//!
//! // Difficulty drives board side and winning threshold
//! let difficulty = Difficulty::from_str("expert").unwrap();
//! assert_eq!(difficulty.board_side(), 6);
//! assert_eq!(difficulty.winning_score(), 8192);
//!
//! // Actions are what the reducer consumes
//! let action = GameAction::from_str("left").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Left));
//! ```

use serde::{Deserialize, Serialize};

/// Smallest supported board side (Easy)
pub const MIN_BOARD_SIDE: usize = 4;

/// Largest supported board side (Expert)
pub const MAX_BOARD_SIDE: usize = 6;

/// Cell capacity of the largest board
pub const MAX_CELLS: usize = MAX_BOARD_SIDE * MAX_BOARD_SIDE;

/// Number of distinct board sides
pub const BOARD_SIDE_COUNT: usize = MAX_BOARD_SIDE - MIN_BOARD_SIDE + 1;

/// Tile placed most of the time
pub const SPAWN_LOW_TILE: u64 = 2;

/// Tile placed the rest of the time
pub const SPAWN_HIGH_TILE: u64 = 4;

/// Largest tile a board accepts from outside.
///
/// A 6x6 board cannot build past 2^38 in play; boards loaded from elsewhere
/// are held below this so doubling and summing tiles never overflow `u64`.
pub const MAX_TILE: u64 = 1 << 40;

/// Probability that a spawned tile is `SPAWN_LOW_TILE`
pub const SPAWN_LOW_PROBABILITY: f64 = 0.9;

/// Tiles spawned on a fresh board
pub const INITIAL_TILES: usize = 2;

/// Key prefix for persisted best scores (`bestScore_4`, `bestScore_5`, ...)
pub const BEST_SCORE_KEY_PREFIX: &str = "bestScore_";

/// Build the persistence key for a board side.
///
/// # Examples
///
/// ```
/// use slabs_types::best_score_key;
///
/// assert_eq!(best_score_key(5), "bestScore_5");
/// ```
pub fn best_score_key(side: usize) -> String {
    format!("{}{}", BEST_SCORE_KEY_PREFIX, side)
}

/// Whether `side` is a playable board side.
pub fn is_supported_side(side: usize) -> bool {
    (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&side)
}

/// Whether `value` may sit in a cell: 0 (empty) or a power of two from 2
/// up to [`MAX_TILE`].
pub fn is_valid_tile(value: u64) -> bool {
    value == 0 || (value >= SPAWN_LOW_TILE && value <= MAX_TILE && value.is_power_of_two())
}

/// Swipe direction
///
/// Tiles slide toward the named edge of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use slabs_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("RIGHT"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// The direction pointing at the opposite edge
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Difficulty levels
///
/// Each level fixes the board side and the score needed to win:
/// - **Easy**: 4x4, win at 4096
/// - **Medium**: 5x5, win at 2048
/// - **Expert**: 6x6, win at 8192
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Expert,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use slabs_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_str("insane"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EASY" => Some(Difficulty::Easy),
            "MEDIUM" => Some(Difficulty::Medium),
            "EXPERT" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Convert to uppercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Expert => "EXPERT",
        }
    }

    /// Difficulty that plays on a board of `side`
    ///
    /// # Examples
    ///
    /// ```
    /// use slabs_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_side(5), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_side(8), None);
    /// ```
    pub fn from_side(side: usize) -> Option<Self> {
        match side {
            4 => Some(Difficulty::Easy),
            5 => Some(Difficulty::Medium),
            6 => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Board side length for this difficulty
    pub fn board_side(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 5,
            Difficulty::Expert => 6,
        }
    }

    /// Score at which the game counts as won
    pub fn winning_score(&self) -> u64 {
        match self {
            Difficulty::Easy => 4096,
            Difficulty::Expert => 8192,
            Difficulty::Medium => 2048,
        }
    }
}

/// Events accepted by the game-state reducer
///
/// Front ends translate swipes, key presses or menu buttons into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Swipe the board in a direction
    Move(Direction),
    /// Start a new game at the current difficulty
    NewGame,
    /// Reset the current game (same effect as `NewGame`)
    ResetGameState,
    /// Switch difficulty and start over on the matching board size
    SetDifficulty(Difficulty),
    /// Leave the paused state
    ResumeGame,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Directions map to `Move`; difficulty names map to `SetDifficulty`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slabs_types::{Difficulty, Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("down"), Some(GameAction::Move(Direction::Down)));
    /// assert_eq!(GameAction::from_str("newGame"), Some(GameAction::NewGame));
    /// assert_eq!(
    ///     GameAction::from_str("expert"),
    ///     Some(GameAction::SetDifficulty(Difficulty::Expert))
    /// );
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_str(s) {
            return Some(GameAction::Move(direction));
        }
        if let Some(difficulty) = Difficulty::from_str(s) {
            return Some(GameAction::SetDifficulty(difficulty));
        }
        match s.to_lowercase().as_str() {
            "newgame" => Some(GameAction::NewGame),
            "resetgamestate" | "reset" => Some(GameAction::ResetGameState),
            "resumegame" | "resume" => Some(GameAction::ResumeGame),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_table_matches_game_rules() {
        assert_eq!(Difficulty::Easy.board_side(), 4);
        assert_eq!(Difficulty::Medium.board_side(), 5);
        assert_eq!(Difficulty::Expert.board_side(), 6);

        assert_eq!(Difficulty::Easy.winning_score(), 4096);
        assert_eq!(Difficulty::Medium.winning_score(), 2048);
        assert_eq!(Difficulty::Expert.winning_score(), 8192);

        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn every_difficulty_has_a_supported_side() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Expert] {
            assert!(is_supported_side(d.board_side()), "{:?}", d);
        }
        assert!(!is_supported_side(3));
        assert!(!is_supported_side(7));
    }

    #[test]
    fn spawn_constants() {
        assert_eq!(SPAWN_LOW_TILE, 2);
        assert_eq!(SPAWN_HIGH_TILE, 4);
        assert_eq!(SPAWN_LOW_PROBABILITY, 0.9);
        assert!(is_valid_tile(0));
        assert!(is_valid_tile(2));
        assert!(is_valid_tile(MAX_TILE));
        assert!(!is_valid_tile(1));
        assert!(!is_valid_tile(6));
        assert!(!is_valid_tile(MAX_TILE * 2));
        assert_eq!(INITIAL_TILES, 2);
        assert_eq!(MAX_CELLS, 36);
        assert_eq!(BOARD_SIDE_COUNT, 3);
    }

    #[test]
    fn direction_string_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_str(d.as_str()), Some(d));
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn difficulty_string_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Expert] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
            assert_eq!(Difficulty::from_side(d.board_side()), Some(d));
        }
    }

    #[test]
    fn reset_aliases() {
        assert_eq!(GameAction::from_str("reset"), Some(GameAction::ResetGameState));
        assert_eq!(GameAction::from_str("resumeGame"), Some(GameAction::ResumeGame));
    }
}
