//! Vote aggregation.
//!
//! Reduces a snapshot of `(participant, key, status)` records into one
//! [`Aggregate`] per key. Pure functions; safe to call on every render.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::status::VoteStatus;
use crate::time_key::TimeKey;

/// One participant's status for one time key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote<K> {
    pub participant_id: String,
    pub time_key: K,
    pub status: VoteStatus,
}

impl<K> Vote<K> {
    pub fn new(participant_id: impl Into<String>, time_key: K, status: VoteStatus) -> Self {
        Self {
            participant_id: participant_id.into(),
            time_key,
            status,
        }
    }
}

/// A vote record before normalization; every field is an unchecked string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVote {
    pub participant_id: String,
    pub time_key: String,
    pub status: String,
}

impl RawVote {
    pub fn new(
        participant_id: impl Into<String>,
        time_key: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            time_key: time_key.into(),
            status: status.into(),
        }
    }

    /// Parse into a typed vote for key domain `K`.
    pub fn normalize<K: TimeKey>(&self) -> Result<Vote<K>, String> {
        let participant_id = self.participant_id.trim();
        if participant_id.is_empty() {
            return Err("empty participant id".to_string());
        }
        let time_key = self.time_key.parse::<K>().map_err(|e| e.to_string())?;
        let status = self.status.parse::<VoteStatus>()?;
        Ok(Vote::new(participant_id, time_key, status))
    }
}

/// Per-key tally of the three statuses.
///
/// `total == preferred + non_preferred + impossible` always holds;
/// [`Aggregate::record`] is the only mutator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub preferred: u32,
    pub non_preferred: u32,
    pub impossible: u32,
    pub total: u32,
}

impl Aggregate {
    pub fn record(&mut self, status: VoteStatus) {
        match status {
            VoteStatus::Preferred => self.preferred += 1,
            VoteStatus::NonPreferred => self.non_preferred += 1,
            VoteStatus::Impossible => self.impossible += 1,
        }
        self.total += 1;
    }

    pub fn count(&self, status: VoteStatus) -> u32 {
        match status {
            VoteStatus::Preferred => self.preferred,
            VoteStatus::NonPreferred => self.non_preferred,
            VoteStatus::Impossible => self.impossible,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn is_vetoed(&self) -> bool {
        self.impossible > 0
    }
}

/// Tally votes per key.
///
/// When the same participant voted more than once for the same key, the
/// last vote in input order wins. Keys without votes are absent from the
/// result; use [`aggregate_for`] to read them as zero.
pub fn aggregate<K: TimeKey>(votes: &[Vote<K>]) -> BTreeMap<K, Aggregate> {
    let mut latest: HashMap<(&str, &K), VoteStatus> = HashMap::with_capacity(votes.len());
    for vote in votes {
        latest.insert((vote.participant_id.as_str(), &vote.time_key), vote.status);
    }

    let mut result: BTreeMap<K, Aggregate> = BTreeMap::new();
    for ((_, key), status) in latest {
        result.entry(key.clone()).or_default().record(status);
    }
    result
}

/// Normalize raw records, dropping malformed ones.
///
/// One bad record never blanks the whole heatmap: it is skipped with a
/// warning and the rest are kept in input order.
pub fn normalize_votes<K: TimeKey>(raw: &[RawVote]) -> Vec<Vote<K>> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, record)| match record.normalize::<K>() {
            Ok(vote) => Some(vote),
            Err(reason) => {
                tracing::warn!(
                    index,
                    domain = K::DOMAIN,
                    participant = %record.participant_id,
                    time_key = %record.time_key,
                    %reason,
                    "skipping malformed vote record"
                );
                None
            }
        })
        .collect()
}

/// [`normalize_votes`] followed by [`aggregate`].
pub fn aggregate_raw<K: TimeKey>(raw: &[RawVote]) -> BTreeMap<K, Aggregate> {
    aggregate(&normalize_votes::<K>(raw))
}

/// Aggregate for `key`, zero when nobody voted for it.
pub fn aggregate_for<K: TimeKey>(aggregates: &BTreeMap<K, Aggregate>, key: &K) -> Aggregate {
    aggregates.get(key).copied().unwrap_or_default()
}

/// Group-relative heat scale.
///
/// The highest `preferred` count among keys nobody ruled impossible,
/// floored at 1 so it can always be divided by.
pub fn max_preferred_baseline<K>(aggregates: &BTreeMap<K, Aggregate>) -> u32 {
    aggregates
        .values()
        .filter(|agg| agg.impossible == 0)
        .map(|agg| agg.preferred)
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Keys nobody vetoed, best first.
///
/// Ordered by `preferred` descending, then `non_preferred` ascending, then
/// key ascending.
pub fn best_candidates<K: TimeKey>(
    aggregates: &BTreeMap<K, Aggregate>,
    limit: usize,
) -> Vec<(K, Aggregate)> {
    let mut candidates: Vec<_> = aggregates
        .iter()
        .filter(|(_, agg)| !agg.is_vetoed() && agg.preferred > 0)
        .map(|(key, agg)| (key.clone(), *agg))
        .collect();

    candidates.sort_by(|a, b| {
        b.1.preferred
            .cmp(&a.1.preferred)
            .then(a.1.non_preferred.cmp(&b.1.non_preferred))
            .then(a.0.cmp(&b.0))
    });
    candidates.truncate(limit);
    candidates
}

/// Number of distinct participants in a vote set.
pub fn participants<K>(votes: &[Vote<K>]) -> usize {
    votes
        .iter()
        .map(|v| v.participant_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}
