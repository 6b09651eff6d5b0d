use serde::{Deserialize, Serialize};

use super::{GameSaverDelegate, GameState};
use crate::core::{Board, Disk, BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::SaveError;
use crate::player::Player;

const SAVE_FORMAT_VERSION: u32 = 1;

/// 保存ファイルの中身
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveData {
    version: u32,
    /// 参考情報。読み込み時は使わない
    #[serde(default)]
    saved_at: String,
    turn: Option<Disk>,
    players: [Player; 2],
    #[serde(with = "crate::core::serialization")]
    board: Board,
}

/// Encodes [`GameState`] into the save blob and hands the bytes to its delegate.
pub struct GameSaver<D> {
    delegate: D,
}

impl<D: GameSaverDelegate> GameSaver<D> {
    pub fn new(delegate: D) -> Self {
        GameSaver { delegate }
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn save(&mut self, state: &GameState) -> Result<(), SaveError> {
        let data = encode(state)?;
        self.delegate.write_data(&data)
    }

    pub fn load(&self) -> Result<GameState, SaveError> {
        let data = self.delegate.read_data()?;
        decode(&data)
    }
}

pub fn encode(state: &GameState) -> Result<Vec<u8>, SaveError> {
    let data = SaveData {
        version: SAVE_FORMAT_VERSION,
        saved_at: chrono::Local::now().to_rfc3339(),
        turn: state.turn,
        players: state.players,
        board: state.board.clone(),
    };
    Ok(serde_json::to_vec_pretty(&data)?)
}

pub fn decode(bytes: &[u8]) -> Result<GameState, SaveError> {
    let data: SaveData = serde_json::from_slice(bytes)?;

    if data.version != SAVE_FORMAT_VERSION {
        return Err(SaveError::Corrupt(format!(
            "unsupported save version {}",
            data.version
        )));
    }
    if data.board.width != BOARD_WIDTH || data.board.height != BOARD_HEIGHT {
        return Err(SaveError::Corrupt(format!(
            "board is {}x{}, expected {}x{}",
            data.board.width, data.board.height, BOARD_WIDTH, BOARD_HEIGHT
        )));
    }

    Ok(GameState {
        board: data.board,
        turn: data.turn,
        players: data.players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::place_disk;

    #[derive(Default)]
    struct MemoryStore {
        data: Option<Vec<u8>>,
    }

    impl GameSaverDelegate for MemoryStore {
        fn write_data(&mut self, data: &[u8]) -> Result<(), SaveError> {
            self.data = Some(data.to_vec());
            Ok(())
        }

        fn read_data(&self) -> Result<Vec<u8>, SaveError> {
            self.data.clone().ok_or(SaveError::Io {
                path: "memory".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut state = GameState::new();
        place_disk(&mut state.board, Disk::Dark, 3, 2).unwrap();
        state.turn = Some(Disk::Light);
        state.set_player(Player::Computer, Disk::Light);

        let mut saver = GameSaver::new(MemoryStore::default());
        saver.save(&state).unwrap();
        assert_eq!(saver.load().unwrap(), state);
    }

    #[test]
    fn test_finished_game_has_no_turn() {
        let mut state = GameState::new();
        state.turn = None;
        let decoded = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(decoded.turn, None);
    }

    #[test]
    fn test_load_missing_propagates_error() {
        let saver = GameSaver::new(MemoryStore::default());
        assert!(saver.load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_reject_unknown_version() {
        let json = r#"{"version":9,"turn":"dark","players":["manual","manual"],
            "board":["--------","--------","--------","---ox---","---xo---","--------","--------","--------"]}"#;
        assert!(matches!(
            decode(json.as_bytes()),
            Err(SaveError::Corrupt(_))
        ));
    }

    #[test]
    fn test_reject_wrong_board_size() {
        let json = r#"{"version":1,"turn":null,"players":["manual","computer"],"board":["xo","ox"]}"#;
        assert!(matches!(
            decode(json.as_bytes()),
            Err(SaveError::Corrupt(_))
        ));
    }

    #[test]
    fn test_reject_garbage() {
        assert!(matches!(decode(b"not json"), Err(SaveError::Json(_))));
    }
}
