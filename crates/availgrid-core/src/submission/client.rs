//! HTTP client for the per-event vote endpoints.
//!
//! Fetches vote snapshots (normalizing the server shapes into [`Vote`]s)
//! and posts payloads built by [`to_payload`]. Retry policy belongs to
//! the caller.

use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;
use url::Url;

use super::payload::{
    to_payload, DayContext, DayVoteRecord, SlotContext, SlotVoteRecord,
};
use crate::selection::WorkingSelection;
use crate::storage::ApiConfig;
use crate::time_key::{DayKey, SlotKey};
use crate::vote::{normalize_votes, DayMode, RawVote, SlotMode, Vote};

/// Submission and fetch errors.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("No changes selected")]
    EmptySelection,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API URL cannot take a path: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl SubmitError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmitError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            SubmitError::Rejected { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Participant ids arrive as strings or numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParticipantRef {
    Text(String),
    Number(i64),
}

impl ParticipantRef {
    fn into_id(self) -> String {
        match self {
            ParticipantRef::Text(s) => s,
            ParticipantRef::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServerDayVote {
    user_id: ParticipantRef,
    time: i64,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ServerSlotVote {
    user_id: ParticipantRef,
    datetime: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct VoteList {
    #[serde(default)]
    votes: Vec<serde_json::Value>,
}

/// Decode each entry on its own so one malformed entry is skipped, not fatal.
fn decode_entries<T: for<'de> Deserialize<'de>>(list: VoteList) -> Vec<T> {
    list.votes
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable vote entry");
                None
            }
        })
        .collect()
}

/// Normalize a day-vote list response.
pub fn normalize_day_response(body: &serde_json::Value, context: &DayContext) -> Vec<Vote<DayKey>> {
    let list = match VoteList::deserialize(body) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "day vote response has no vote list");
            return Vec::new();
        }
    };
    let raw: Vec<RawVote> = decode_entries::<ServerDayVote>(list)
        .into_iter()
        .map(|v| {
            let key = DayKey::from_unix(v.time, context.offset)
                .map(|d| d.to_string())
                .unwrap_or_default();
            RawVote::new(v.user_id.into_id(), key, v.kind)
        })
        .collect();
    normalize_votes(&raw)
}

/// Normalize a slot-vote list response, keeping only votes on `context.date`.
pub fn normalize_slot_response(
    body: &serde_json::Value,
    context: &SlotContext,
) -> Vec<Vote<SlotKey>> {
    let list = match VoteList::deserialize(body) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "slot vote response has no vote list");
            return Vec::new();
        }
    };
    let raw: Vec<RawVote> = decode_entries::<ServerSlotVote>(list)
        .into_iter()
        .filter_map(|v| {
            let key = match parse_local_datetime(&v.datetime) {
                Some(dt) if dt.date() != context.date.date() => return None,
                // Slots start on the minute; anything else is not a slot boundary.
                Some(dt) if dt.second() == 0 && dt.nanosecond() == 0 => {
                    dt.format("%H:%M").to_string()
                }
                Some(_) | None => String::new(),
            };
            Some(RawVote::new(v.user_id.into_id(), key, v.status))
        })
        .collect();
    normalize_votes(&raw)
}

/// Body of a rejected response, for the error message.
async fn read_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "could not read error response body");
            String::new()
        }
    }
}

fn parse_local_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Client for one vote API deployment.
#[derive(Debug, Clone)]
pub struct VoteApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl VoteApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SubmitError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, SubmitError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, event_id: &str, resource: &str) -> Result<Url, SubmitError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SubmitError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["events", event_id, resource]);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, SubmitError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(SubmitError::Rejected { status: status.as_u16(), body });
        }
        Ok(response.json().await?)
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<(), SubmitError> {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(SubmitError::Rejected { status: status.as_u16(), body });
        }
        Ok(())
    }

    /// `GET /events/{id}/votes`
    pub async fn fetch_day_votes(
        &self,
        event_id: &str,
        context: &DayContext,
    ) -> Result<Vec<Vote<DayKey>>, SubmitError> {
        let body = self.get_json(self.endpoint(event_id, "votes")?).await?;
        Ok(normalize_day_response(&body, context))
    }

    /// `GET /events/{id}/slot-votes?date=YYYY-MM-DD`
    pub async fn fetch_slot_votes(
        &self,
        event_id: &str,
        context: &SlotContext,
    ) -> Result<Vec<Vote<SlotKey>>, SubmitError> {
        let mut url = self.endpoint(event_id, "slot-votes")?;
        url.query_pairs_mut().append_pair("date", &context.date.to_string());
        let body = self.get_json(url).await?;
        Ok(normalize_slot_response(&body, context))
    }

    /// `POST /events/{id}/votes`
    pub async fn submit_day_votes(
        &self,
        event_id: &str,
        records: &[DayVoteRecord],
    ) -> Result<(), SubmitError> {
        tracing::info!(event_id, count = records.len(), "submitting day votes");
        self.post_json(self.endpoint(event_id, "votes")?, records).await
    }

    /// `POST /events/{id}/slot-votes`
    pub async fn submit_slot_votes(
        &self,
        event_id: &str,
        records: &[SlotVoteRecord],
    ) -> Result<(), SubmitError> {
        tracing::info!(event_id, count = records.len(), "submitting slot votes");
        self.post_json(self.endpoint(event_id, "slot-votes")?, records).await
    }
}

/// Submit a day selection, clearing it only once the server accepted it.
///
/// An empty selection is rejected before any request is made. On error
/// the selection is left untouched so the edits can be retried.
pub async fn submit_day_selection(
    client: &VoteApiClient,
    event_id: &str,
    selection: &mut WorkingSelection<DayKey, DayMode>,
    context: &DayContext,
) -> Result<usize, SubmitError> {
    if selection.is_empty() {
        return Err(SubmitError::EmptySelection);
    }
    let payload = to_payload(selection, context);
    client.submit_day_votes(event_id, &payload).await?;
    selection.clear();
    Ok(payload.len())
}

/// Slot-level counterpart of [`submit_day_selection`].
pub async fn submit_slot_selection(
    client: &VoteApiClient,
    event_id: &str,
    selection: &mut WorkingSelection<SlotKey, SlotMode>,
    context: &SlotContext,
) -> Result<usize, SubmitError> {
    if selection.is_empty() {
        return Err(SubmitError::EmptySelection);
    }
    let payload = to_payload(selection, context);
    client.submit_slot_votes(event_id, &payload).await?;
    selection.clear();
    Ok(payload.len())
}
