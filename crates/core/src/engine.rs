//! Move engine - apply one swipe to a whole board
//!
//! A move reorients the board so the swipe becomes "slide left", collapses
//! every row, restores the orientation, spawns a tile if anything moved and
//! then checks for game over. The caller's board is never touched.

use rand::Rng;

use crate::board::Board;
use crate::line::slide_in_place;
use crate::rng::spawn_tile;
use crate::terminal::is_game_over;
use crate::transform::{orient, restore};
use crate::types::Direction;

/// Outcome of applying a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Board after sliding, merging and spawning
    pub board: Board,
    /// Sum of all merged tile values
    pub score_gained: u64,
    /// Whether sliding changed any cell
    pub moved: bool,
    /// No empty cell and no equal neighbours left
    pub is_terminal: bool,
}

/// Slide and merge without spawning a tile
pub fn shift(board: &Board, direction: Direction) -> (Board, u64) {
    let mut work = orient(board, direction);
    let mut score = 0u64;
    for r in 0..work.side() {
        score += slide_in_place(work.row_mut(r));
    }
    (restore(&work, direction), score)
}

/// Check whether a swipe would change the board
pub fn can_move(board: &Board, direction: Direction) -> bool {
    shift(board, direction).0 != *board
}

/// Apply a swipe to `board`.
///
/// A tile is spawned only when the swipe changed the board, so swiping into
/// a wall does not hand out a free tile.
pub fn apply_move<R: Rng + ?Sized>(board: &Board, direction: Direction, rng: &mut R) -> MoveResult {
    let (mut next, score_gained) = shift(board, direction);
    let moved = next != *board;
    if moved {
        spawn_tile(&mut next, rng);
    }
    MoveResult {
        board: next,
        score_gained,
        moved,
        is_terminal: is_game_over(&next),
    }
}
