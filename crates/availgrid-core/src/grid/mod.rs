//! Grid geometry and layouts.
//!
//! Converts pointer coordinates into cells and cells into time keys,
//! staying correct when the host re-measures its layout.

mod geometry;
mod layout;
mod tracker;

pub use geometry::{
    point_to_cell, Cell, GeometryResolver, GridGeometry, Point, RawCell, Viewport,
};
pub use layout::{GridLayout, MonthGrid, SlotGrid, WeekStart};
pub use tracker::{LayoutTracker, StaticViewport, ViewportSource};
