//! Drag-to-paint selection engine.
//!
//! A single-gesture state machine. It does not read input devices; the
//! host forwards pointer events one at a time.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Dragging --move--> Dragging --end/cancel--> Idle
//! ```
//!
//! Within one gesture each cell toggles at most once, however often the
//! pointer crosses it. Ending or cancelling a gesture keeps the toggles it
//! applied.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PaintEngine::new(SlotGrid::full_day(), resolver, SlotMode::Possible);
//! engine.refresh_layout(&host_viewport);
//! engine.gesture_start(point);
//! engine.gesture_move(next_point); // Returns Some(PaintEvent) when a cell changed
//! engine.gesture_end();
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::working::{Toggle, WorkingSelection};
use crate::grid::{
    Cell, GeometryResolver, GridGeometry, GridLayout, LayoutTracker, Point, ViewportSource,
};
use crate::vote::EditMode;

#[derive(Debug, Clone, PartialEq, Eq)]
enum GestureState {
    Idle,
    Dragging { touched: HashSet<Cell> },
}

/// Public view of the gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintState {
    Idle,
    Dragging,
}

/// A change to the working selection, for the host to re-render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintEvent<K, M> {
    pub key: K,
    pub cell: Cell,
    pub change: Toggle<M>,
}

/// Owns the editing mode, the working selection and the gesture state
/// of one voting grid.
#[derive(Debug, Clone)]
pub struct PaintEngine<L: GridLayout, M: EditMode> {
    layout: L,
    tracker: LayoutTracker,
    mode: M,
    selection: WorkingSelection<L::Key, M>,
    state: GestureState,
}

impl<L: GridLayout, M: EditMode> PaintEngine<L, M> {
    /// Create an engine with an empty selection.
    ///
    /// Starts `Idle` with no geometry; call [`PaintEngine::refresh_layout`]
    /// once the host has measured the grid.
    pub fn new(layout: L, resolver: GeometryResolver, mode: M) -> Self {
        let tracker = LayoutTracker::new(resolver, layout.rows(), layout.columns());
        Self {
            layout,
            tracker,
            mode,
            selection: WorkingSelection::new(),
            state: GestureState::Idle,
        }
    }

    /// Start from previously submitted choices.
    pub fn with_selection(mut self, selection: WorkingSelection<L::Key, M>) -> Self {
        self.selection = selection;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> M {
        self.mode
    }

    pub fn state(&self) -> PaintState {
        match self.state {
            GestureState::Idle => PaintState::Idle,
            GestureState::Dragging { .. } => PaintState::Dragging,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn selection(&self) -> &WorkingSelection<L::Key, M> {
        &self.selection
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.tracker.geometry()
    }

    /// Cell and key under `point`, `None` while geometry is unavailable.
    pub fn resolve(&self, point: Point) -> Option<(Cell, L::Key)> {
        let cell = self.tracker.geometry()?.locate(point)?;
        let key = self.layout.key_at(cell)?;
        Some((cell, key))
    }

    // ── Layout ───────────────────────────────────────────────────────

    /// Pull fresh measurements from the host.
    pub fn refresh_layout<S: ViewportSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Option<&GridGeometry> {
        self.tracker.refresh(source)
    }

    /// Drop the current geometry until the next refresh.
    pub fn invalidate_layout(&mut self) {
        self.tracker.invalidate();
    }

    /// Swap the layout (e.g. next month). The selection is kept.
    pub fn set_layout(&mut self, layout: L) {
        self.tracker.reshape(layout.rows(), layout.columns());
        self.layout = layout;
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: M) {
        self.mode = mode;
    }

    /// Pointer down. Ignored while a gesture is already active.
    pub fn gesture_start(&mut self, point: Point) -> Option<PaintEvent<L::Key, M>> {
        if self.is_dragging() {
            tracing::debug!("gesture start ignored, already dragging");
            return None;
        }
        tracing::debug!(x = point.x, y = point.y, mode = ?self.mode, "gesture start");
        self.state = GestureState::Dragging {
            touched: HashSet::new(),
        };
        self.paint_at(point)
    }

    /// Pointer moved. Ignored when idle or over an already-touched cell.
    pub fn gesture_move(&mut self, point: Point) -> Option<PaintEvent<L::Key, M>> {
        if !self.is_dragging() {
            return None;
        }
        self.paint_at(point)
    }

    /// Pointer up.
    pub fn gesture_end(&mut self) {
        self.finish("end");
    }

    /// The host reclaimed the pointer. Applied toggles are kept.
    pub fn gesture_cancel(&mut self) {
        self.finish("cancel");
    }

    /// Toggle `key` with the current mode, outside of any gesture.
    pub fn toggle_key(&mut self, key: L::Key) -> Toggle<M> {
        self.selection.toggle_apply(key, self.mode)
    }

    /// Clear the selection after a confirmed submission.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Mutable access for submission helpers.
    pub fn selection_mut(&mut self) -> &mut WorkingSelection<L::Key, M> {
        &mut self.selection
    }

    fn paint_at(&mut self, point: Point) -> Option<PaintEvent<L::Key, M>> {
        let (cell, key) = self.resolve(point)?;
        let GestureState::Dragging { touched } = &mut self.state else {
            return None;
        };
        if !touched.insert(cell) {
            return None;
        }
        let change = self.selection.toggle_apply(key.clone(), self.mode);
        Some(PaintEvent { key, cell, change })
    }

    fn finish(&mut self, reason: &str) {
        if let GestureState::Dragging { touched } = &self.state {
            tracing::debug!(reason, cells = touched.len(), "gesture finished");
        }
        self.state = GestureState::Idle;
    }
}
