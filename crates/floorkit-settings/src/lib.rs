//! Floorkit Settings Crate
//!
//! Editor configuration (defaults, interaction limits, export options) and the
//! directory-backed storage slot used for save/load-local.

pub mod config;
pub mod error;
pub mod storage;

pub use config::{
    DefaultsSettings, EditorConfig, ExportSettings, HistorySettings, InteractionSettings,
    StorageSettings,
};
pub use error::{SettingsError, SettingsResult};
pub use storage::LocalStorage;
