use super::types::{Coordinate, Disk};

pub const BOARD_WIDTH: usize = 8;
pub const BOARD_HEIGHT: usize = 8;

/// 盤面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    /// 行優先のセル (None = 空き)
    cells: Vec<Option<Disk>>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// 中央4マスに石を置いた初期配置
    pub fn initial() -> Self {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let (cx, cy) = (BOARD_WIDTH / 2, BOARD_HEIGHT / 2);
        board.set_disk(Some(Disk::Light), cx - 1, cy - 1);
        board.set_disk(Some(Disk::Dark), cx, cy - 1);
        board.set_disk(Some(Disk::Dark), cx - 1, cy);
        board.set_disk(Some(Disk::Light), cx, cy);
        board
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Option<Disk>>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Board {
            width,
            height,
            cells,
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn disk_at(&self, x: usize, y: usize) -> Option<Disk> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// 盤外への書き込みは無視する
    pub fn set_disk(&mut self, disk: Option<Disk>, x: usize, y: usize) {
        if self.contains(x, y) {
            let w = self.width;
            self.cells[y * w + x] = disk;
        }
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coordinate::new(x, y)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Disk>]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    pub fn count(&self, side: Disk) -> usize {
        self.cells.iter().filter(|c| **c == Some(side)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.count(Disk::Dark), 2);
        assert_eq!(board.count(Disk::Light), 2);
        assert_eq!(board.disk_at(3, 3), Some(Disk::Light));
        assert_eq!(board.disk_at(4, 3), Some(Disk::Dark));
        assert_eq!(board.disk_at(3, 4), Some(Disk::Dark));
        assert_eq!(board.disk_at(4, 4), Some(Disk::Light));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::new(8, 8);
        board.set_disk(Some(Disk::Dark), 8, 0);
        assert_eq!(board.disk_at(8, 0), None);
        assert_eq!(board.count(Disk::Dark), 0);
    }

    #[test]
    fn test_coordinates_are_row_major() {
        let board = Board::new(3, 2);
        let coords: Vec<_> = board.coordinates().collect();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords[0], Coordinate::new(0, 0));
        assert_eq!(coords[1], Coordinate::new(1, 0));
        assert_eq!(coords[3], Coordinate::new(0, 1));
    }
}
