use std::path::{Path, PathBuf};

use availgrid_core::error::Result;
use availgrid_core::heatmap::{render_day_heatmap, render_slot_heatmap};
use availgrid_core::vote::{aggregate_raw, RawVote};
use availgrid_core::{DayKey, HeatmapPolicy, HeatmapView, SlotKey};
use clap::Args;

use super::{load_config, read_json, Domain};

#[derive(Args)]
pub struct HeatmapArgs {
    /// Key domain of the vote file
    #[arg(value_enum)]
    domain: Domain,
    /// JSON array of `{participant_id, time_key, status}` records
    votes: PathBuf,
    /// Print the styled cells as JSON instead of a text grid
    #[arg(long)]
    json: bool,
}

pub fn run(args: HeatmapArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let policy = HeatmapPolicy::from_config(&config.heatmap);
    let raw: Vec<RawVote> = read_json(&args.votes)?;

    match args.domain {
        Domain::Days => {
            let view = HeatmapView::build(&aggregate_raw::<DayKey>(&raw), &policy);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_day_heatmap(&view, config.grid.week_start));
            }
        }
        Domain::Slots => {
            let view = HeatmapView::build(&aggregate_raw::<SlotKey>(&raw), &policy);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_slot_heatmap(&view));
            }
        }
    }
    Ok(())
}
