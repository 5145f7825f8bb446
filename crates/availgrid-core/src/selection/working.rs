//! One participant's unsubmitted edits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::time_key::TimeKey;
use crate::vote::{EditMode, Vote};

/// What a toggle did to one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Toggle<M> {
    /// The key now holds `mode`; `previous` is what it held before.
    Set { mode: M, previous: Option<M> },
    /// The key held the toggled mode and is unset again.
    Cleared { previous: M },
}

/// Map from time key to editing mode. Absent keys carry no opinion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingSelection<K: Ord, M> {
    entries: BTreeMap<K, M>,
}

impl<K: Ord, M> Default for WorkingSelection<K, M> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: TimeKey, M: EditMode> WorkingSelection<K, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a participant's previously submitted votes.
    ///
    /// Statuses this screen cannot express are left unset; later votes for
    /// the same key win.
    pub fn from_votes(votes: &[Vote<K>], participant_id: &str) -> Self {
        let mut selection = Self::new();
        for vote in votes.iter().filter(|v| v.participant_id == participant_id) {
            match M::from_status(vote.status) {
                Some(mode) => {
                    selection.entries.insert(vote.time_key.clone(), mode);
                }
                None => {
                    selection.entries.remove(&vote.time_key);
                }
            }
        }
        selection
    }

    /// Set `key` to `mode`, or unset it when it already holds `mode`.
    ///
    /// Covers first touch, re-touch with another mode, and erasing, without
    /// a separate erase mode.
    pub fn toggle_apply(&mut self, key: K, mode: M) -> Toggle<M> {
        match self.entries.get(&key).copied() {
            Some(current) if current == mode => {
                self.entries.remove(&key);
                Toggle::Cleared { previous: current }
            }
            previous => {
                self.entries.insert(key, mode);
                Toggle::Set { mode, previous }
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<M> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: K, mode: M) -> Option<M> {
        self.entries.insert(key, mode)
    }

    pub fn remove(&mut self, key: &K) -> Option<M> {
        self.entries.remove(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, M)> {
        self.entries.iter().map(|(k, m)| (k, *m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries holding `mode`.
    pub fn count(&self, mode: M) -> usize {
        self.entries.values().filter(|m| **m == mode).count()
    }
}

impl<K: TimeKey, M: EditMode> FromIterator<(K, M)> for WorkingSelection<K, M> {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
