use std::path::{Path, PathBuf};

use availgrid_core::error::Result;
use availgrid_core::submission::{submit_day_selection, submit_slot_selection};
use availgrid_core::{DayKey, DayMode, SlotKey, SlotMode, VoteApiClient, WorkingSelection};
use clap::Args;

use super::payload::{day_context, slot_context};
use super::{load_config, read_json, Domain};

#[derive(Args)]
pub struct SubmitArgs {
    /// Key domain of the selection file
    #[arg(value_enum)]
    domain: Domain,
    /// Event to vote on
    event_id: String,
    /// JSON object mapping time keys to modes
    selection: PathBuf,
    /// Date of the slots (slots only), YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// UTC offset of the voter in minutes (days only)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset_minutes: i32,
}

pub fn run(args: SubmitArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let client = VoteApiClient::from_config(&config.api)?;
    tracing::debug!(
        base_url = %client.base_url(),
        event_id = %args.event_id,
        "submitting selection"
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let sent = match args.domain {
        Domain::Days => {
            let context = day_context(args.offset_minutes)?;
            let mut selection: WorkingSelection<DayKey, DayMode> = read_json(&args.selection)?;
            runtime.block_on(submit_day_selection(
                &client,
                &args.event_id,
                &mut selection,
                &context,
            ))?
        }
        Domain::Slots => {
            let context = slot_context(args.date.as_deref())?;
            let mut selection: WorkingSelection<SlotKey, SlotMode> = read_json(&args.selection)?;
            runtime.block_on(submit_slot_selection(
                &client,
                &args.event_id,
                &mut selection,
                &context,
            ))?
        }
    };

    println!("submitted {sent} votes to event {}", args.event_id);
    Ok(())
}
