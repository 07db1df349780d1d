//! Board transforms - reduce every swipe to "slide left"
//!
//! Sliding is only implemented for one orientation: each row collapses toward
//! column 0. The other three directions are handled by reorienting the board
//! first and undoing the reorientation afterwards:
//!
//! | Direction | Forward                 | Inverse                 |
//! |-----------|-------------------------|-------------------------|
//! | Left      | identity                | identity                |
//! | Right     | flip                    | flip                    |
//! | Up        | transpose               | transpose               |
//! | Down      | transpose, then flip    | flip, then transpose    |

use crate::board::Board;
use crate::types::Direction;

/// Swap rows and columns (cell[r][c] becomes cell[c][r])
pub fn transpose(board: &Board) -> Board {
    let mut out = *board;
    transpose_in_place(&mut out);
    out
}

/// Reverse each row
pub fn flip_horizontal(board: &Board) -> Board {
    let mut out = *board;
    flip_in_place(&mut out);
    out
}

pub(crate) fn transpose_in_place(board: &mut Board) {
    let side = board.side();
    let cells = board.cells_mut();
    for r in 0..side {
        for c in (r + 1)..side {
            cells.swap(r * side + c, c * side + r);
        }
    }
}

pub(crate) fn flip_in_place(board: &mut Board) {
    for r in 0..board.side() {
        board.row_mut(r).reverse();
    }
}

/// Reorient `board` so that sliding in `direction` becomes sliding left
pub fn orient(board: &Board, direction: Direction) -> Board {
    let mut out = *board;
    match direction {
        Direction::Left => {}
        Direction::Right => flip_in_place(&mut out),
        Direction::Up => transpose_in_place(&mut out),
        Direction::Down => {
            transpose_in_place(&mut out);
            flip_in_place(&mut out);
        }
    }
    out
}

/// Undo [`orient`] for the same direction
pub fn restore(board: &Board, direction: Direction) -> Board {
    let mut out = *board;
    match direction {
        Direction::Left => {}
        Direction::Right => flip_in_place(&mut out),
        Direction::Up => transpose_in_place(&mut out),
        Direction::Down => {
            flip_in_place(&mut out);
            transpose_in_place(&mut out);
        }
    }
    out
}
