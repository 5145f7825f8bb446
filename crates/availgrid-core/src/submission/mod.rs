//! Vote submission: payload assembly and the HTTP client that delivers it.

mod client;
mod payload;

pub use client::{
    normalize_day_response, normalize_slot_response, submit_day_selection,
    submit_slot_selection, SubmitError, VoteApiClient,
};
pub use payload::{
    slot_datetime, to_payload, DayContext, DayVoteCode, DayVoteRecord, SlotContext,
    SlotVoteRecord, SlotWireStatus, SubmissionContext,
};
