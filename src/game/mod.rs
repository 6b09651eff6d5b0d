pub mod canceller;
pub mod controller;
pub mod delegate;
pub mod saver;


pub use canceller::Canceller;
pub use controller::GameController;
pub use delegate::{
    BoardAnimationDelegate, Completion, ConfirmCompletion, GameControllerDelegate,
    GameSaverDelegate, MoveHandler, StrategyDelegate,
};
pub use saver::GameSaver;

use crate::core::{Board, Disk};
use crate::logic::side_with_more_disks;
use crate::player::Player;

/// 手番表示の内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Turn(Disk),
    Result { winner: Option<Disk> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    /// None = 終局
    pub turn: Option<Disk>,
    /// `Disk::index` 順
    pub players: [Player; 2],
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            board: Board::initial(),
            turn: Some(Disk::Dark),
            players: [Player::Manual, Player::Manual],
        }
    }

    pub fn player(&self, side: Disk) -> Player {
        self.players[side.index()]
    }

    pub fn set_player(&mut self, player: Player, side: Disk) {
        self.players[side.index()] = player;
    }

    pub fn message(&self) -> Message {
        match self.turn {
            Some(side) => Message::Turn(side),
            None => Message::Result {
                winner: side_with_more_disks(&self.board),
            },
        }
    }
}
