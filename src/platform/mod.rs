//! Platform abstraction layer
//!
//! Handles browser/native differences for logging and the default
//! high-score storage backend.

/// Route `log` output to stderr, honouring `RUST_LOG` over `default_filter`
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // A second init (tests, embedding hosts) keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Route `log` output and panics to the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_logging(_default_filter: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// High score file next to the working directory
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store(settings: &crate::Settings) -> crate::highscores::FileStore {
    crate::highscores::FileStore::new(&settings.high_score_path)
}

/// High score in the page's LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn default_store(_settings: &crate::Settings) -> crate::highscores::LocalStorageStore {
    crate::highscores::LocalStorageStore
}
