//! Terminal-state detection
//!
//! A board is over when every cell is filled and no two horizontally or
//! vertically adjacent cells hold the same tile.

use crate::board::Board;

/// Check whether any swipe could still change the board
pub fn has_legal_move(board: &Board) -> bool {
    let side = board.side();
    let cells = board.cells();
    for r in 0..side {
        for c in 0..side {
            let v = cells[r * side + c];
            if v == 0 {
                return true;
            }
            if c + 1 < side && cells[r * side + c + 1] == v {
                return true;
            }
            if r + 1 < side && cells[(r + 1) * side + c] == v {
                return true;
            }
        }
    }
    false
}

/// Check for game over (full board, no equal neighbours)
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board)
}
