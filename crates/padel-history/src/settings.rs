//! Persistence for [`GameSettings`].
//!
//! Stored under [`SETTINGS_KEY`] as `{ "scoringMode": "goldenPoint" }`.
//! Anything unreadable falls back to the defaults.

use padel_model::settings::GameSettings;

use crate::store::{KeyValueStore, StoreError};
use crate::SETTINGS_KEY;

/// Load settings, falling back to [`GameSettings::default`] when absent,
/// unreadable or corrupt.
pub fn load_settings(store: &impl KeyValueStore) -> GameSettings {
    match store.get(SETTINGS_KEY) {
        Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|error| {
            tracing::warn!(%error, "corrupt settings -- using defaults");
            GameSettings::default()
        }),
        Ok(None) => GameSettings::default(),
        Err(error) => {
            tracing::warn!(%error, "failed to read settings -- using defaults");
            GameSettings::default()
        }
    }
}

/// Write settings under [`SETTINGS_KEY`].
///
/// # Errors
///
/// Returns [`StoreError`] if encoding or writing fails.
pub fn save_settings(
    store: &mut impl KeyValueStore,
    settings: &GameSettings,
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(settings).map_err(|source| StoreError::Encode {
        key: SETTINGS_KEY.to_owned(),
        source,
    })?;
    store.set(SETTINGS_KEY, &bytes)
}
