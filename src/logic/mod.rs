use crate::core::{Board, Coordinate, Disk};
use crate::error::DiskPlacementError;

/// 8方向
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// `side` が (x, y) に石を置いたときに裏返る石の座標。置けない場合は空
pub fn flipped_disk_coordinates(board: &Board, side: Disk, x: usize, y: usize) -> Vec<Coordinate> {
    if !board.contains(x, y) || board.disk_at(x, y).is_some() {
        return Vec::new();
    }

    let origin = Coordinate::new(x, y);
    let mut flipped = Vec::new();

    for (dx, dy) in DIRECTIONS {
        let mut line = Vec::new();
        let mut curr = origin;
        while let Some(next) = offset_pos(curr, dx, dy, board) {
            match board.disk_at(next.x, next.y) {
                Some(disk) if disk == side => {
                    flipped.extend(line.drain(..));
                    break;
                }
                Some(_) => {
                    line.push(next);
                    curr = next;
                }
                None => break,
            }
        }
    }

    flipped
}

pub fn can_place_disk(board: &Board, side: Disk, x: usize, y: usize) -> bool {
    !flipped_disk_coordinates(board, side, x, y).is_empty()
}

/// 合法手 (行優先)
pub fn valid_moves(board: &Board, side: Disk) -> Vec<Coordinate> {
    board
        .coordinates()
        .filter(|c| can_place_disk(board, side, c.x, c.y))
        .collect()
}

pub fn has_valid_move(board: &Board, side: Disk) -> bool {
    board
        .coordinates()
        .any(|c| can_place_disk(board, side, c.x, c.y))
}

/// 石を置いて挟んだ石を裏返す。裏返した座標を返す
pub fn place_disk(
    board: &mut Board,
    side: Disk,
    x: usize,
    y: usize,
) -> Result<Vec<Coordinate>, DiskPlacementError> {
    if !board.contains(x, y) {
        return Err(DiskPlacementError::OutOfBounds { x, y });
    }
    let flipped = flipped_disk_coordinates(board, side, x, y);
    if flipped.is_empty() {
        return Err(DiskPlacementError::Illegal { side, x, y });
    }

    board.set_disk(Some(side), x, y);
    for c in &flipped {
        board.set_disk(Some(side), c.x, c.y);
    }
    Ok(flipped)
}

/// 置いた結果の盤面だけが欲しい場合 (AIの評価用)
pub fn apply_move(board: &Board, side: Disk, at: Coordinate) -> Option<Board> {
    let mut next = board.clone();
    place_disk(&mut next, side, at.x, at.y).ok()?;
    Some(next)
}

pub fn count_disks(board: &Board, side: Disk) -> usize {
    board.count(side)
}

/// 石の多い方。同数なら None
pub fn side_with_more_disks(board: &Board) -> Option<Disk> {
    let dark = board.count(Disk::Dark);
    let light = board.count(Disk::Light);
    match dark.cmp(&light) {
        std::cmp::Ordering::Greater => Some(Disk::Dark),
        std::cmp::Ordering::Less => Some(Disk::Light),
        std::cmp::Ordering::Equal => None,
    }
}

fn offset_pos(pos: Coordinate, dx: i32, dy: i32, board: &Board) -> Option<Coordinate> {
    let x = pos.x as i32 + dx;
    let y = pos.y as i32 + dy;
    if x >= 0 && y >= 0 && board.contains(x as usize, y as usize) {
        Some(Coordinate::new(x as usize, y as usize))
    } else {
        None
    }
}
