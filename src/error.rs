use std::path::PathBuf;

use crate::core::Disk;

/// Errors that can occur when placing a disk on a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiskPlacementError {
    #[error("({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },

    #[error("{side} cannot place a disk at ({x}, {y})")]
    Illegal { side: Disk, x: usize, y: usize },
}

/// Errors returned by the game controller's operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game has already started")]
    AlreadyStarted,

    #[error("game has not started")]
    NotStarted,

    #[error("game is over")]
    GameOver,

    #[error("{0} is not played manually")]
    NotManualTurn(Disk),

    #[error("waiting for an animation or prompt to finish")]
    Busy,

    #[error(transparent)]
    Placement(#[from] DiskPlacementError),
}

/// Errors that can occur while reading or writing save data.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("unable to resolve the local data directory")]
    NoDataDir,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt save data: {0}")]
    Corrupt(String),
}

impl SaveError {
    /// 保存ファイルがまだ無いだけのケース
    pub fn is_not_found(&self) -> bool {
        matches!(self, SaveError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_error_display() {
        let err = DiskPlacementError::Illegal {
            side: Disk::Light,
            x: 0,
            y: 7,
        };
        assert_eq!(err.to_string(), "Light cannot place a disk at (0, 7)");
    }

    #[test]
    fn test_game_error_wraps_placement() {
        let err: GameError = DiskPlacementError::OutOfBounds { x: 9, y: 1 }.into();
        assert_eq!(err.to_string(), "(9, 1) is outside the board");
    }

    #[test]
    fn test_save_error_not_found() {
        let err = SaveError::Io {
            path: PathBuf::from("Game"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_not_found());
        assert!(!SaveError::Corrupt("bad".into()).is_not_found());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ai.temperature must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ai.temperature must be > 0"
        );
    }
}
