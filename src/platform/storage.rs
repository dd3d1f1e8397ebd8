//! Best-record storage backends

use crate::error::PersistError;
use crate::highscores::{BestRecords, BestStore};

/// JSON file on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    pub path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BestStore for FileStore {
    fn load(&self) -> Result<BestRecords, PersistError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            // Never played before
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BestRecords::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, records: &BestRecords) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(records)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Default store for the current platform
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> FileStore {
    FileStore::new(super::data_path("air_dodger_bests.json"))
}

/// Read a LocalStorage key
#[cfg(target_arch = "wasm32")]
pub fn local_get(key: &str) -> Result<Option<String>, PersistError> {
    local_storage()?
        .get_item(key)
        .map_err(|_| PersistError::Unavailable { backend: "localStorage" })
}

/// Write a LocalStorage key
#[cfg(target_arch = "wasm32")]
pub fn local_set(key: &str, value: &str) -> Result<(), PersistError> {
    local_storage()?
        .set_item(key, value)
        .map_err(|_| PersistError::Unavailable { backend: "localStorage" })
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PersistError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(PersistError::Unavailable { backend: "localStorage" })
}

/// Two plain LocalStorage keys, one per record
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const TIME_KEY: &'static str = "bestTime";
    const SCORE_KEY: &'static str = "bestScore";

    fn read_u64(key: &str) -> Result<u64, PersistError> {
        match local_get(key)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| PersistError::Parse(format!("{} = {:?}", key, raw))),
            None => Ok(0),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl BestStore for LocalStorageStore {
    fn load(&self) -> Result<BestRecords, PersistError> {
        Ok(BestRecords {
            best_time_secs: Self::read_u64(Self::TIME_KEY)?,
            best_score: Self::read_u64(Self::SCORE_KEY)?,
        })
    }

    fn save(&mut self, records: &BestRecords) -> Result<(), PersistError> {
        local_set(Self::TIME_KEY, &records.best_time_secs.to_string())?;
        local_set(Self::SCORE_KEY, &records.best_score.to_string())?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> LocalStorageStore {
    LocalStorageStore
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("air-dodger-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_is_zero_bests() {
        let store = FileStore::new(scratch("never-written.json"));
        assert_eq!(store.load().unwrap(), BestRecords::default());
    }

    #[test]
    fn test_file_round_trip() {
        let mut store = FileStore::new(scratch("bests.json"));
        let bests = BestRecords {
            best_time_secs: 93,
            best_score: 41,
        };
        store.save(&bests).unwrap();
        assert_eq!(store.load().unwrap(), bests);
        let _ = std::fs::remove_file(&store.path);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = scratch("corrupt.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Parse(_))));
        let _ = std::fs::remove_file(&path);
    }
}
