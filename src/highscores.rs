//! High score persistence
//!
//! A single non-negative integer, stored as decimal text. Missing or malformed
//! values read as zero; write failures are reported to the caller, which logs
//! and drops them so gameplay never notices.

use std::path::PathBuf;

use thiserror::Error;

/// Storage key / file stem for the persisted score
pub const STORAGE_KEY: &str = "torus_asteroids_high_score";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score storage unavailable: {0}")]
    Unavailable(&'static str),
}

/// Parse a stored value; anything but a plain non-negative integer is rejected
pub fn parse_high_score(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Where the high score lives between sessions
pub trait HighScoreStore {
    /// Stored score, or 0 when missing or unreadable
    fn load(&mut self) -> u64;

    fn save(&mut self, score: u64) -> Result<(), StorageError>;
}

/// In-process store, for tests and storage-less hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub raw: Option<String>,
    /// Make every save fail, to exercise the error path
    pub fail_writes: bool,
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            ..Self::default()
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u64 {
        let Some(raw) = self.raw.as_deref() else {
            return 0;
        };
        match parse_high_score(raw) {
            Some(score) => score,
            None => {
                log::warn!("Discarding malformed high score {:?}", raw);
                self.raw = None;
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("memory store is read-only"));
        }
        self.raw = Some(score.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Plain-text file store for native builds
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> u64 {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Could not read high score from {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match parse_high_score(&raw) {
            Some(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            None => {
                log::warn!("Discarding malformed high score in {}", self.path.display());
                let _ = std::fs::remove_file(&self.path);
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, score.to_string())?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> u64 {
        let Some(storage) = Self::storage() else {
            return 0;
        };

        match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => match parse_high_score(&raw) {
                Some(score) => {
                    log::info!("Loaded high score {}", score);
                    score
                }
                None => {
                    let _ = storage.remove_item(STORAGE_KEY);
                    0
                }
            },
            _ => 0,
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable("no localStorage"))?;
        storage
            .set_item(STORAGE_KEY, &score.to_string())
            .map_err(|_| StorageError::Unavailable("localStorage rejected the write"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_high_score("1200"), Some(1200));
        assert_eq!(parse_high_score(" 42\n"), Some(42));
        assert_eq!(parse_high_score("-5"), None);
        assert_eq!(parse_high_score("12abc"), None);
        assert_eq!(parse_high_score(""), None);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), 0);
        store.save(880).expect("save");
        assert_eq!(store.load(), 880);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_malformed_value_reads_zero_and_is_cleared() {
        let mut store = MemoryStore::with_raw("not a number");
        assert_eq!(store.load(), 0);
        assert!(store.raw.is_none());
    }

    #[test]
    fn test_failing_store_reports_error() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        assert!(matches!(store.save(10), Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("torus-asteroids-{}", std::process::id()));
        let path = dir.join("high_score.txt");
        let mut store = FileStore::new(&path);

        assert_eq!(store.load(), 0);
        store.save(31_337).expect("save");
        assert_eq!(store.load(), 31_337);

        std::fs::write(&path, "garbage").expect("write");
        assert_eq!(store.load(), 0);
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
