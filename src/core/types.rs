use serde::{Deserialize, Serialize};
use std::fmt;

/// 石の色 (プレイヤーの手番を表すのにも使う)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disk {
    Dark,  // 先手
    Light, // 後手
}

impl Default for Disk {
    fn default() -> Self {
        Disk::Dark
    }
}

impl Disk {
    /// UI上の並び順
    pub const SIDES: [Disk; 2] = [Disk::Dark, Disk::Light];

    pub fn flipped(self) -> Disk {
        match self {
            Disk::Dark => Disk::Light,
            Disk::Light => Disk::Dark,
        }
    }

    /// ラベルやカウンタの配列に対するインデックス
    pub fn index(self) -> usize {
        match self {
            Disk::Dark => 0,
            Disk::Light => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Disk::Dark => 'x',
            Disk::Light => 'o',
        }
    }

    pub fn from_symbol(c: char) -> Option<Disk> {
        match c {
            'x' => Some(Disk::Dark),
            'o' => Some(Disk::Light),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Disk::Dark => "Dark",
            Disk::Light => "Light",
        }
    }
}

impl TryFrom<usize> for Disk {
    type Error = IndexOutOfRange;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Disk::SIDES
            .into_iter()
            .find(|side| side.index() == index)
            .ok_or(IndexOutOfRange {
                index,
                domain: "side",
            })
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 2値のUIインデックスを範囲外で変換しようとした
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("index {index} is out of range for {domain}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub domain: &'static str,
}

/// 盤面座標 (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Coordinate { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
