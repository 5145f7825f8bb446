use std::path::Path;

use availgrid_core::error::Result;
use availgrid_core::grid::{Point, Viewport};
use availgrid_core::{GeometryResolver, ValidationError};
use clap::Args;

use super::load_config;

#[derive(Args)]
pub struct GeometryArgs {
    /// Viewport width
    #[arg(long)]
    width: f64,
    /// Viewport height
    #[arg(long)]
    height: f64,
    /// Height taken by headers above the grid
    #[arg(long, default_value_t = 0.0)]
    reserved: f64,
    /// Number of rows
    #[arg(long, default_value_t = 24)]
    rows: usize,
    /// Cells per row
    #[arg(long, default_value_t = 2)]
    columns: usize,
    /// Locate this point (`x,y`) in the grid
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    locate: Option<Point>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("y: {e}"))?;
    Ok(Point::new(x, y))
}

pub fn run(args: GeometryArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let resolver = GeometryResolver::from_config(&config.grid);

    let geometry = resolver
        .compute(Viewport::new(args.width, args.height), args.reserved, args.rows, args.columns)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "viewport".to_string(),
            message: "geometry unavailable: viewport not measured or grid empty".to_string(),
        })?;

    match args.locate {
        Some(point) => match geometry.locate(point) {
            Some(cell) => println!("{}", serde_json::to_string(&cell)?),
            None => println!("null"),
        },
        None => println!("{}", serde_json::to_string_pretty(&geometry)?),
    }
    Ok(())
}
