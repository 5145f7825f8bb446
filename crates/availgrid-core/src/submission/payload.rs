//! Wire payloads for vote submission.
//!
//! The day and slot endpoints speak different vocabularies; a
//! [`SubmissionContext`] picks the one matching the current screen.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::selection::WorkingSelection;
use crate::time_key::{DayKey, SlotKey, TimeKey};
use crate::vote::{DayMode, EditMode, SlotMode};

/// Turns one selection entry into one wire record.
pub trait SubmissionContext<K, M> {
    type Record: Serialize;

    fn record(&self, key: &K, mode: M) -> Self::Record;
}

/// Build the payload for `selection`: one record per entry, in key order.
///
/// Unset keys are never sent. An empty selection yields an empty payload;
/// whether that is an error is the caller's decision.
pub fn to_payload<K, M, C>(selection: &WorkingSelection<K, M>, context: &C) -> Vec<C::Record>
where
    K: TimeKey,
    M: EditMode,
    C: SubmissionContext<K, M>,
{
    selection
        .iter()
        .map(|(key, mode)| context.record(key, mode))
        .collect()
}

/// Single-letter status of the day-vote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayVoteCode {
    #[serde(rename = "P")]
    Preferred,
    #[serde(rename = "N")]
    NonPreferred,
    #[serde(rename = "I")]
    Impossible,
}

impl From<DayMode> for DayVoteCode {
    fn from(mode: DayMode) -> Self {
        match mode {
            DayMode::Preferred => DayVoteCode::Preferred,
            DayMode::NonPreferred => DayVoteCode::NonPreferred,
            DayMode::Impossible => DayVoteCode::Impossible,
        }
    }
}

/// `{ "time": <unix seconds>, "type": "P" | "N" | "I" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayVoteRecord {
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: DayVoteCode,
}

/// Day-level voting. Days are sent as unix seconds of local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayContext {
    pub offset: FixedOffset,
}

impl DayContext {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// `None` when `minutes` is not a valid UTC offset.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::new)
    }
}

impl SubmissionContext<DayKey, DayMode> for DayContext {
    type Record = DayVoteRecord;

    fn record(&self, key: &DayKey, mode: DayMode) -> DayVoteRecord {
        DayVoteRecord {
            time: key.unix_midnight(self.offset),
            kind: mode.into(),
        }
    }
}

/// Status vocabulary of the slot-vote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotWireStatus {
    Preferred,
    Impossible,
}

impl From<SlotMode> for SlotWireStatus {
    fn from(mode: SlotMode) -> Self {
        match mode {
            SlotMode::Possible => SlotWireStatus::Preferred,
            SlotMode::Impossible => SlotWireStatus::Impossible,
        }
    }
}

/// `{ "datetime": "YYYY-MM-DDTHH:mm:00", "status": "preferred" | "impossible" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotVoteRecord {
    pub datetime: String,
    pub status: SlotWireStatus,
}

/// Slot-level voting on one fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotContext {
    pub date: DayKey,
}

impl SlotContext {
    pub fn new(date: DayKey) -> Self {
        Self { date }
    }
}

/// Local date-time string of a slot on `date`, `YYYY-MM-DDTHH:mm:00`.
pub fn slot_datetime(date: DayKey, slot: SlotKey) -> String {
    date.date()
        .and_time(slot.time())
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

impl SubmissionContext<SlotKey, SlotMode> for SlotContext {
    type Record = SlotVoteRecord;

    fn record(&self, key: &SlotKey, mode: SlotMode) -> SlotVoteRecord {
        SlotVoteRecord {
            datetime: slot_datetime(self.date, *key),
            status: mode.into(),
        }
    }
}
