//! # Availgrid Core Library
//!
//! Collaborative availability voting for event scheduling. Participants
//! mark days of a month, or half-hour slots of one day, as preferred,
//! non-preferred or impossible; the library aggregates the group's votes
//! into a heatmap and edits a participant's own selection by tap and drag.
//!
//! ## Architecture
//!
//! - **Vote engine**: aggregation of vote snapshots into per-key tallies
//! - **Heatmap**: group-relative color policy and a text renderer
//! - **Grid**: pointer-to-cell geometry and day/slot layouts
//! - **Selection**: the working selection and the drag-paint engine
//! - **Submission**: wire payloads and the HTTP vote client
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`PaintEngine`]: Tap and drag editing over any [`GridLayout`]
//! - [`HeatmapView`]: Styled aggregate view over any [`TimeKey`] domain
//! - [`VoteApiClient`]: Fetches and submits votes
//! - [`Config`]: Application configuration management

pub mod error;
pub mod grid;
pub mod heatmap;
pub mod route;
pub mod selection;
pub mod storage;
pub mod submission;
pub mod time_key;
pub mod vote;

pub use error::{ConfigError, CoreError, TimeKeyError, ValidationError};
pub use grid::{GeometryResolver, GridGeometry, GridLayout, MonthGrid, SlotGrid, WeekStart};
pub use heatmap::{HeatmapPolicy, HeatmapView, Rgb};
pub use route::{EditTarget, RouteParams};
pub use selection::{PaintEngine, PaintEvent, Toggle, WorkingSelection};
pub use storage::Config;
pub use submission::{DayContext, SlotContext, SubmitError, VoteApiClient};
pub use time_key::{DayKey, SlotKey, TimeKey};
pub use vote::{aggregate, Aggregate, DayMode, EditMode, SlotMode, Vote, VoteStatus};
