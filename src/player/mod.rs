pub mod ai;

use crate::core::IndexOutOfRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 各サイドの操作モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Manual,
    Computer,
}

impl Default for Player {
    fn default() -> Self {
        Player::Manual
    }
}

impl Player {
    /// セグメントの並び順
    pub const VALUES: [Player; 2] = [Player::Manual, Player::Computer];

    /// セグメントコントロール上のインデックス
    pub fn index(self) -> usize {
        match self {
            Player::Manual => 0,
            Player::Computer => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Manual => "Manual",
            Player::Computer => "Computer",
        }
    }
}

impl TryFrom<usize> for Player {
    type Error = IndexOutOfRange;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Player::VALUES
            .into_iter()
            .find(|player| player.index() == index)
            .ok_or(IndexOutOfRange {
                index,
                domain: "player mode",
            })
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_index_round_trip() {
        for player in Player::VALUES {
            let index = player.index();
            assert!(index < 2);
            assert_eq!(Player::try_from(index), Ok(player));
        }
    }

    #[test]
    fn test_player_index_out_of_range() {
        assert!(Player::try_from(2).is_err());
        assert!(Player::try_from(usize::MAX).is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Player::Computer).unwrap(),
            "\"computer\""
        );
    }
}
