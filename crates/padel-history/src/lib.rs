//! Padel History -- persistence for settings and archived matches.
//!
//! This crate owns the serialization contract between the scoring model and
//! whatever key-value storage the host platform provides. It never lets a
//! storage or decoding failure escape to the scorer as a fatal error:
//! corrupt data loads as defaults, and write failures are reported to the
//! caller to log.
//!
//! # Modules
//!
//! - [`record`]: on-disk JSON shapes and validated conversion to the model.
//! - [`store`]: the [`KeyValueStore`](store::KeyValueStore) seam plus
//!   in-memory and directory-backed implementations.
//! - [`history`]: the newest-first [`MatchHistory`](history::MatchHistory)
//!   log.
//! - [`settings`]: loading and saving
//!   [`GameSettings`](padel_model::settings::GameSettings).

#![deny(unsafe_code)]

pub mod history;
pub mod record;
pub mod settings;
pub mod store;

/// Storage key of the match history blob.
pub const HISTORY_KEY: &str = "history";

/// Storage key of the settings blob.
pub const SETTINGS_KEY: &str = "settings";

pub use history::MatchHistory;
pub use record::{MatchRecord, RecordError};
pub use settings::{load_settings, save_settings};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
