//! The match history log.
//!
//! [`MatchHistory`] is an ordered list of archived matches, newest first.
//! From the scorer's point of view it is append-only: matches enter at
//! position 0. Callers may delete single entries or clear the log.
//!
//! Loading never fails. A missing blob yields an empty history, and so does
//! a corrupt one (unparseable JSON or any record that violates the model
//! rules), after logging a warning.

use padel_model::match_state::Match;
use uuid::Uuid;

use crate::record::MatchRecord;
use crate::store::{KeyValueStore, StoreError};
use crate::HISTORY_KEY;

/// Archived matches, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchHistory {
    matches: Vec<Match>,
}

impl MatchHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from matches already ordered newest first.
    pub fn from_matches(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    /// Load the history stored under [`HISTORY_KEY`].
    ///
    /// Falls back to an empty history on a read failure or corrupt data.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let bytes = match store.get(HISTORY_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Self::new(),
            Err(error) => {
                tracing::warn!(%error, "failed to read match history -- starting empty");
                return Self::new();
            }
        };
        match Self::decode(&bytes) {
            Ok(history) => {
                tracing::debug!(entries = history.len(), "loaded match history");
                history
            }
            Err(reason) => {
                tracing::warn!(%reason, "corrupt match history -- starting empty");
                Self::new()
            }
        }
    }

    fn decode(bytes: &[u8]) -> Result<Self, String> {
        let records: Vec<MatchRecord> =
            serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        let matches = records
            .into_iter()
            .map(Match::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        Ok(Self { matches })
    }

    /// Encode the whole log as a JSON array of match records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, StoreError> {
        let records: Vec<MatchRecord> = self.matches.iter().map(MatchRecord::from).collect();
        serde_json::to_vec(&records).map_err(|source| StoreError::Encode {
            key: HISTORY_KEY.to_owned(),
            source,
        })
    }

    /// Write the log under [`HISTORY_KEY`].
    ///
    /// # Errors
    ///
    /// Returns the store's error if encoding or writing fails.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        let bytes = self.encode()?;
        store.set(HISTORY_KEY, &bytes)
    }

    /// Insert `m` at position 0.
    pub fn archive(&mut self, m: Match) {
        tracing::info!(match_id = %m.id(), completed = m.is_completed(), "archived match");
        self.matches.insert(0, m);
    }

    /// Remove and return the entry at `index`. Out of range is a no-op.
    pub fn delete(&mut self, index: usize) -> Option<Match> {
        if index >= self.matches.len() {
            return None;
        }
        Some(self.matches.remove(index))
    }

    /// Remove the newest entry if it is the match with `id`.
    pub fn remove_latest_if(&mut self, id: Uuid) -> Option<Match> {
        if self.latest().map(Match::id) == Some(id) {
            Some(self.matches.remove(0))
        } else {
            None
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.matches.clear();
    }

    /// The newest entry.
    pub fn latest(&self) -> Option<&Match> {
        self.matches.first()
    }

    pub fn get(&self, index: usize) -> Option<&Match> {
        self.matches.get(index)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn finished(name: &str) -> Match {
        let mut m = Match::new(name, "Rivals");
        m.stop();
        m
    }

    #[test]
    fn archive_inserts_newest_first() {
        let mut history = MatchHistory::new();
        history.archive(finished("first"));
        history.archive(finished("second"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().team1_name(), "second");
        assert_eq!(history.get(1).unwrap().team1_name(), "first");
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut history = MatchHistory::new();
        history.archive(finished("a"));
        history.archive(finished("b"));
        history.archive(finished("c"));

        let removed = history.delete(1).unwrap();
        assert_eq!(removed.team1_name(), "b");
        assert_eq!(history.len(), 2);
        assert!(history.delete(2).is_none());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn remove_latest_only_matches_newest_id() {
        let mut history = MatchHistory::new();
        let older = finished("older");
        let older_id = older.id();
        history.archive(older);
        history.archive(finished("newer"));

        assert!(history.remove_latest_if(older_id).is_none());
        let newest_id = history.latest().unwrap().id();
        assert!(history.remove_latest_if(newest_id).is_some());
        assert_eq!(history.latest().unwrap().id(), older_id);
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let mut history = MatchHistory::new();
        history.archive(finished("saved"));
        history.save(&mut store).unwrap();

        let loaded = MatchHistory::load(&store);
        assert_eq!(loaded, history);
    }

    #[test]
    fn missing_history_loads_empty() {
        assert!(MatchHistory::load(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn corrupt_json_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, b"{not json").unwrap();
        assert!(MatchHistory::load(&store).is_empty());
    }

    #[test]
    fn invalid_record_loads_empty() {
        let mut store = MemoryStore::new();
        let mut record = MatchRecord::from(&finished("bad"));
        record.current_set_index = 9;
        store
            .set(HISTORY_KEY, &serde_json::to_vec(&vec![record]).unwrap())
            .unwrap();
        assert!(MatchHistory::load(&store).is_empty());
    }
}
