//! Votes and their aggregation.
//!
//! This module provides the vote data model and the aggregation engine
//! that turns a snapshot of individual votes into per-key tallies.

mod aggregate;
mod status;

pub use aggregate::{
    aggregate, aggregate_for, aggregate_raw, best_candidates, max_preferred_baseline,
    normalize_votes, participants, Aggregate, RawVote, Vote,
};

pub use status::{DayMode, EditMode, SlotMode, VoteStatus};
