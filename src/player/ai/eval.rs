//! # Evaluation Module
//!
//! Static evaluation of a Reversi position from the point of view of one side
//! (positive = good for that side).
//!
//! ## Scoring Strategy
//! 1. **Positional weights**: corners are worth a lot, the cells touching an
//!    empty corner are dangerous, edges are mildly good.
//! 2. **Mobility**: the difference in the number of valid moves.
//! 3. **Disk difference**: only matters once the board is nearly full.

use crate::core::{Board, Disk, BOARD_HEIGHT, BOARD_WIDTH};
use crate::logic::valid_moves;

/// 8x8 盤用の位置評価 (y * 8 + x)
const POSITION_WEIGHTS: [i32; 64] = [
    100, -20, 10, 5, 5, 10, -20, 100, //
    -20, -50, -2, -2, -2, -2, -50, -20, //
    10, -2, 1, 1, 1, 1, -2, 10, //
    5, -2, 1, 0, 0, 1, -2, 5, //
    5, -2, 1, 0, 0, 1, -2, 5, //
    10, -2, 1, 1, 1, 1, -2, 10, //
    -20, -50, -2, -2, -2, -2, -50, -20, //
    100, -20, 10, 5, 5, 10, -20, 100,
];

const MOBILITY_WEIGHT: i32 = 5;
/// 残りマスがこれ以下になったら石数を重視する
const ENDGAME_EMPTY_CELLS: usize = 12;
const ENDGAME_DISK_WEIGHT: i32 = 10;

pub fn evaluate(board: &Board, side: Disk) -> i32 {
    let opponent = side.flipped();

    let positional = if board.width == BOARD_WIDTH && board.height == BOARD_HEIGHT {
        board
            .coordinates()
            .map(|c| {
                let weight = POSITION_WEIGHTS[c.y * BOARD_WIDTH + c.x];
                match board.disk_at(c.x, c.y) {
                    Some(d) if d == side => weight,
                    Some(_) => -weight,
                    None => 0,
                }
            })
            .sum()
    } else {
        0
    };

    let mobility = valid_moves(board, side).len() as i32 - valid_moves(board, opponent).len() as i32;

    let own = board.count(side) as i32;
    let theirs = board.count(opponent) as i32;
    let empty = board.width * board.height - (own + theirs) as usize;
    let disks = if empty <= ENDGAME_EMPTY_CELLS {
        (own - theirs) * ENDGAME_DISK_WEIGHT
    } else {
        0
    };

    positional + mobility * MOBILITY_WEIGHT + disks
}
