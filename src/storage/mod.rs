use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use crate::error::SaveError;
use crate::game::GameSaverDelegate;

pub const APP_DIR_NAME: &str = "reversi-challenge";
pub const SAVE_FILE_NAME: &str = "Game";

/// プロセス中で一度だけ解決する
static DEFAULT_SAVE_PATH: Lazy<Option<PathBuf>> =
    Lazy::new(|| dirs::data_local_dir().map(|base| base.join(APP_DIR_NAME).join(SAVE_FILE_NAME)));

/// ユーザーのローカルデータ領域にある保存ファイルの場所
pub fn default_save_path() -> Result<&'static Path, SaveError> {
    DEFAULT_SAVE_PATH.as_deref().ok_or(SaveError::NoDataDir)
}

/// Reads and writes the save blob at a single fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SaveError {
        SaveError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl GameSaverDelegate for FileStore {
    /// 一時ファイルに書いてから rename する
    fn write_data(&mut self, data: &[u8]) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, data).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }

    fn read_data(&self) -> Result<Vec<u8>, SaveError> {
        fs::read(&self.path).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_is_stable() {
        let first = default_save_path();
        let second = default_save_path();
        match (first, second) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a, b);
                assert!(std::ptr::eq(a, b));
                assert!(a.ends_with(Path::new(APP_DIR_NAME).join(SAVE_FILE_NAME)));
            }
            (Err(_), Err(_)) => {}
            _ => panic!("default save path changed between calls"),
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("Game"));

        store.write_data(b"first").unwrap();
        store.write_data(b"second").unwrap();

        assert_eq!(store.read_data().unwrap(), b"second");
        assert!(!dir.path().join("nested").join("Game.tmp").exists());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("Game"));
        let err = store.read_data().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_failure_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        // 親がファイルなのでディレクトリを作れない
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let mut store = FileStore::new(blocker.join("Game"));
        assert!(matches!(
            store.write_data(b"data"),
            Err(SaveError::Io { .. })
        ));
    }
}
