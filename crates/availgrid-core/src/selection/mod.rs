//! Interactive selection: the working selection map and the drag-paint
//! engine that mutates it.

mod paint;
mod working;

pub use paint::{PaintEngine, PaintEvent, PaintState};
pub use working::{Toggle, WorkingSelection};
