use std::path::PathBuf;

use availgrid_core::error::Result;
use availgrid_core::submission::to_payload;
use availgrid_core::{
    DayContext, DayKey, DayMode, SlotContext, SlotKey, SlotMode, ValidationError, WorkingSelection,
};
use clap::Args;

use super::{read_json, Domain};

#[derive(Args)]
pub struct PayloadArgs {
    /// Key domain of the selection file
    #[arg(value_enum)]
    domain: Domain,
    /// JSON object mapping time keys to modes
    selection: PathBuf,
    /// Date of the slots (slots only), YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// UTC offset of the voter in minutes (days only)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset_minutes: i32,
}

pub fn day_context(offset_minutes: i32) -> Result<DayContext, ValidationError> {
    DayContext::from_offset_minutes(offset_minutes).ok_or_else(|| ValidationError::InvalidValue {
        field: "offset-minutes".to_string(),
        message: format!("{offset_minutes} is not a valid UTC offset"),
    })
}

pub fn slot_context(date: Option<&str>) -> Result<SlotContext, ValidationError> {
    let date = date.ok_or_else(|| ValidationError::MissingParameter("date".to_string()))?;
    let date = date.parse::<DayKey>().map_err(|e| ValidationError::InvalidValue {
        field: "date".to_string(),
        message: e.to_string(),
    })?;
    Ok(SlotContext::new(date))
}

pub fn run(args: PayloadArgs) -> Result<()> {
    let json = match args.domain {
        Domain::Days => {
            let context = day_context(args.offset_minutes)?;
            let selection: WorkingSelection<DayKey, DayMode> = read_json(&args.selection)?;
            serde_json::to_string_pretty(&to_payload(&selection, &context))?
        }
        Domain::Slots => {
            let context = slot_context(args.date.as_deref())?;
            let selection: WorkingSelection<SlotKey, SlotMode> = read_json(&args.selection)?;
            serde_json::to_string_pretty(&to_payload(&selection, &context))?
        }
    };
    println!("{json}");
    Ok(())
}
