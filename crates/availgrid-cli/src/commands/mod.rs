pub mod config;
pub mod geometry;
pub mod heatmap;
pub mod payload;
pub mod submit;

use std::io;
use std::path::Path;

use availgrid_core::error::Result;
use availgrid_core::Config;
use clap::ValueEnum;
use serde::de::DeserializeOwned;

/// Which voting screen a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Domain {
    /// Whole days, keys `YYYY-MM-DD`
    Days,
    /// Half-hour slots of one day, keys `HH:mm`
    Slots,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("cannot read {}: {e}", path.display())))?;
    let value = serde_json::from_str(&content).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("cannot parse {}: {e}", path.display()),
        )
    })?;
    Ok(value)
}

/// Config from `--config` when given (defaults if the file does not exist
/// yet), otherwise the user config.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Ok(Config::load_from(path)?),
        Some(_) => Ok(Config::default()),
        None => Ok(Config::load_or_default()),
    }
}
