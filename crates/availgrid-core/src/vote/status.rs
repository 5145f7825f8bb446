//! Vote statuses and per-screen editing modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three mutually exclusive availability statuses.
///
/// Categorical, not ranked. Only the color policy singles out
/// `Impossible`, which vetoes a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteStatus {
    Preferred,
    NonPreferred,
    Impossible,
}

impl VoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteStatus::Preferred => "preferred",
            VoteStatus::NonPreferred => "nonPreferred",
            VoteStatus::Impossible => "impossible",
        }
    }
}

impl fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteStatus {
    type Err = String;

    /// Accepts the canonical names, `non_preferred`, and the single-letter
    /// day codes `P`/`N`/`I` used by the day-vote endpoint.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preferred" | "P" => Ok(VoteStatus::Preferred),
            "nonPreferred" | "non_preferred" | "N" => Ok(VoteStatus::NonPreferred),
            "impossible" | "I" => Ok(VoteStatus::Impossible),
            other => Err(format!("unknown vote status: {other}")),
        }
    }
}

/// The editing vocabulary of one voting screen.
///
/// A working selection stores modes, not statuses: the slot screen only
/// knows "possible" and "impossible".
pub trait EditMode: Copy + Eq + fmt::Debug {
    /// Status this mode stands for once submitted.
    fn status(self) -> VoteStatus;

    /// Mode for a previously submitted status, if this screen can express it.
    fn from_status(status: VoteStatus) -> Option<Self>;
}

/// Modes of the day-level voting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayMode {
    Preferred,
    NonPreferred,
    Impossible,
}

impl DayMode {
    /// Single-letter code of the day-vote endpoint.
    pub fn code(self) -> char {
        match self {
            DayMode::Preferred => 'P',
            DayMode::NonPreferred => 'N',
            DayMode::Impossible => 'I',
        }
    }
}

impl EditMode for DayMode {
    fn status(self) -> VoteStatus {
        match self {
            DayMode::Preferred => VoteStatus::Preferred,
            DayMode::NonPreferred => VoteStatus::NonPreferred,
            DayMode::Impossible => VoteStatus::Impossible,
        }
    }

    fn from_status(status: VoteStatus) -> Option<Self> {
        Some(match status {
            VoteStatus::Preferred => DayMode::Preferred,
            VoteStatus::NonPreferred => DayMode::NonPreferred,
            VoteStatus::Impossible => DayMode::Impossible,
        })
    }
}

/// Modes of the half-hour slot voting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotMode {
    Possible,
    Impossible,
}

impl SlotMode {
    /// Status string of the slot-vote endpoint.
    pub fn wire_status(self) -> &'static str {
        match self {
            SlotMode::Possible => "preferred",
            SlotMode::Impossible => "impossible",
        }
    }
}

impl EditMode for SlotMode {
    fn status(self) -> VoteStatus {
        match self {
            SlotMode::Possible => VoteStatus::Preferred,
            SlotMode::Impossible => VoteStatus::Impossible,
        }
    }

    fn from_status(status: VoteStatus) -> Option<Self> {
        match status {
            VoteStatus::Preferred => Some(SlotMode::Possible),
            VoteStatus::Impossible => Some(SlotMode::Impossible),
            VoteStatus::NonPreferred => None,
        }
    }
}
