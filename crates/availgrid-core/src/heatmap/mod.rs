//! Heatmap coloring and text rendering.

mod color;
mod policy;
mod render;

pub use color::Rgb;
pub use policy::{CellStyle, HeatCell, HeatmapPolicy, HeatmapView};
pub use render::{heat_char, render_day_heatmap, render_slot_heatmap};
