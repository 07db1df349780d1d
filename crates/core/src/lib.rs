//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and move logic.
//! It has **zero dependencies** on UI or I/O; randomness and persistence are
//! passed in by the caller, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is a pure function over a `Copy` board
//! - **Portable**: Runs behind any front end (touch, terminal, headless)
//! - **Fast**: Boards live on the stack; moves never allocate
//!
//! # Module Structure
//!
//! - [`board`]: square 4x4/5x5/6x6 grid in a fixed flat array
//! - [`transform`]: transpose/flip used to turn every swipe into "slide left"
//! - [`line`]: slide-and-merge for a single row
//! - [`engine`]: one swipe over a whole board (slide, spawn, game-over check)
//! - [`terminal`]: game-over detection
//! - [`rng`]: tile spawning and a seedable LCG
//! - [`game_state`]: the aggregate state and its reducer
//! - [`best_score`]: per-side best scores and the persistence contract
//! - [`session`]: live game with injected RNG and store
//! - [`snapshot`]: read-only view for rendering
//!
//! # Game Rules
//!
//! - **Swipe**: all tiles slide toward one edge; equal neighbours merge once
//! - **Scoring**: each merge adds the merged tile's value
//! - **Spawn**: after a swipe that changed the board, a 2 (90%) or 4 (10%)
//!   appears on a random empty cell
//! - **Game over**: no empty cell and no equal horizontal/vertical neighbours
//! - **Win**: score reaches the difficulty's threshold (4096/2048/8192)
//!
//! # Example
//!
//! ```
//! use slabs_core::{GameState, BestScores, SimpleRng};
//! use slabs_core::types::{Direction, GameAction};
//!
//! let mut rng = SimpleRng::new(12345);
//! let game = GameState::new(BestScores::new(), &mut rng);
//! assert_eq!(game.board().count_tiles(), 2);
//!
//! let t = game.reduce(GameAction::ResumeGame, &mut rng);
//! let t = t.state.reduce(GameAction::Move(Direction::Left), &mut rng);
//! assert!(t.state.score() >= game.score());
//! ```

pub mod best_score;
pub mod board;
pub mod engine;
pub mod game_state;
pub mod line;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod terminal;
pub mod transform;

pub use slabs_types as types;

// Re-export commonly used types for convenience
pub use best_score::{BestScoreStore, BestScores, MemoryStore, NewBest, StoreError};
pub use board::{Board, BoardError, BoardRepr};
pub use engine::{apply_move, can_move, shift, MoveResult};
pub use game_state::{starting_board, GameState, Transition};
pub use line::{slide, slide_in_place};
pub use rng::{spawn_tile, with_random_tile, SimpleRng};
pub use session::Session;
pub use snapshot::GameSnapshot;
pub use terminal::{has_legal_move, is_game_over};
pub use transform::{flip_horizontal, orient, restore, transpose};
