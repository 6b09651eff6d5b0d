pub mod board;
pub mod serialization;
pub mod types;

pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
pub use types::{Coordinate, Disk, IndexOutOfRange};
