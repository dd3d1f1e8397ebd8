//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, JSON files on native)
//! - Drawing and audio playback (web only; native runs headless)

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use storage::default_store;

/// Directory for native save data; `AIR_DODGER_DATA` overrides the default
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> std::path::PathBuf {
    std::env::var_os("AIR_DODGER_DATA")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// Path of a file inside [`data_dir`]
#[cfg(not(target_arch = "wasm32"))]
pub fn data_path(file_name: &str) -> std::path::PathBuf {
    data_dir().join(file_name)
}
