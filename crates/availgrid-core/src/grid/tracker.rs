//! Layout tracking.
//!
//! The host pulls viewport measurements into a [`LayoutTracker`] whenever
//! its layout changes. Geometry computed before the container has settled
//! (no measured origin yet) is stale and never handed out.

use super::geometry::{GeometryResolver, GridGeometry, Point, Viewport};

/// Host-side viewport measurements, queried on demand.
pub trait ViewportSource {
    /// Current viewport, `None` before the first measurement.
    fn viewport(&self) -> Option<Viewport>;

    /// Height consumed by chrome above and below the grid.
    fn reserved_height(&self) -> f64;

    /// Measured top-left corner of the grid container, `None` until the
    /// layout has settled after mount.
    fn origin(&self) -> Option<Point>;
}

/// Fixed measurements, for hosts that measure once and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticViewport {
    pub viewport: Viewport,
    pub reserved_height: f64,
    pub origin: Point,
}

impl ViewportSource for StaticViewport {
    fn viewport(&self) -> Option<Viewport> {
        Some(self.viewport)
    }

    fn reserved_height(&self) -> f64 {
        self.reserved_height
    }

    fn origin(&self) -> Option<Point> {
        Some(self.origin)
    }
}

/// Last known geometry of one grid and whether it can be trusted.
#[derive(Debug, Clone)]
pub struct LayoutTracker {
    resolver: GeometryResolver,
    rows: usize,
    columns: usize,
    geometry: Option<GridGeometry>,
    settled: bool,
}

impl LayoutTracker {
    pub fn new(resolver: GeometryResolver, rows: usize, columns: usize) -> Self {
        Self {
            resolver,
            rows,
            columns,
            geometry: None,
            settled: false,
        }
    }

    /// Geometry, only once it was computed against a settled layout.
    pub fn geometry(&self) -> Option<&GridGeometry> {
        if self.settled {
            self.geometry.as_ref()
        } else {
            None
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled && self.geometry.is_some()
    }

    /// Mark the current geometry stale (rotation, resize, remount).
    pub fn invalidate(&mut self) {
        self.settled = false;
    }

    /// Change the grid shape, e.g. when switching months.
    pub fn reshape(&mut self, rows: usize, columns: usize) {
        if rows != self.rows || columns != self.columns {
            self.rows = rows;
            self.columns = columns;
            self.invalidate();
        }
    }

    /// Pull measurements from the host and recompute.
    ///
    /// Returns the fresh geometry when the layout has settled.
    pub fn refresh<S: ViewportSource + ?Sized>(&mut self, source: &S) -> Option<&GridGeometry> {
        let computed = source.viewport().and_then(|viewport| {
            self.resolver
                .compute(viewport, source.reserved_height(), self.rows, self.columns)
        });

        match (computed, source.origin()) {
            (Some(geometry), Some(origin)) => {
                self.geometry = Some(geometry.with_origin(origin));
                self.settled = true;
            }
            (computed, _) => {
                tracing::debug!(
                    measured = computed.is_some(),
                    "layout not settled, geometry withheld"
                );
                self.geometry = computed;
                self.settled = false;
            }
        }
        self.geometry()
    }
}
