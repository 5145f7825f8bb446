//! Grid geometry resolution.
//!
//! Computes cell sizes from the viewport and maps pointer coordinates to
//! cell indices. Independent of any rendering toolkit.

use serde::{Deserialize, Serialize};

use crate::storage::GridConfig;

/// Measured viewport size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// False until the host has measured a real size.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A pointer position in the same coordinate space as the grid origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Unchecked row/column, possibly outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawCell {
    pub row: i64,
    pub col: i64,
}

/// A cell known to lie inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Pixel layout of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub rows: usize,
    pub columns_per_row: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl GridGeometry {
    /// Same cell sizes, anchored at a host-measured origin.
    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            origin_x: origin.x,
            origin_y: origin.y,
            ..self
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Cell under `point`, using this geometry's origin.
    ///
    /// Out-of-range rows and columns are rejected, never clamped or
    /// wrapped.
    pub fn locate(&self, point: Point) -> Option<Cell> {
        let raw = point_to_cell(point, self.origin(), self)?;
        self.bound(raw)
    }

    /// Accept `raw` only when it lies inside the grid.
    pub fn bound(&self, raw: RawCell) -> Option<Cell> {
        let row = usize::try_from(raw.row).ok()?;
        let col = usize::try_from(raw.col).ok()?;
        (row < self.rows && col < self.columns_per_row).then_some(Cell { row, col })
    }

    /// Top-left corner of `cell`.
    pub fn cell_origin(&self, cell: Cell) -> Point {
        Point::new(
            self.origin_x + cell.col as f64 * self.cell_width,
            self.origin_y + cell.row as f64 * self.cell_height,
        )
    }

    /// Center of `cell`, handy for synthesizing pointer paths.
    pub fn cell_center(&self, cell: Cell) -> Point {
        let corner = self.cell_origin(cell);
        Point::new(corner.x + self.cell_width / 2.0, corner.y + self.cell_height / 2.0)
    }

    fn is_usable(&self) -> bool {
        self.cell_width.is_finite()
            && self.cell_height.is_finite()
            && self.cell_width > 0.0
            && self.cell_height > 0.0
    }
}

/// Signed row/column of `point` relative to `origin`.
///
/// `None` when the geometry has no usable cell size or the point is not
/// finite. Range checks are left to the caller, see [`GridGeometry::bound`].
pub fn point_to_cell(point: Point, origin: Point, geometry: &GridGeometry) -> Option<RawCell> {
    if !geometry.is_usable() || !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    let row = ((point.y - origin.y) / geometry.cell_height).floor();
    let col = ((point.x - origin.x) / geometry.cell_width).floor();
    Some(RawCell {
        row: row as i64,
        col: col as i64,
    })
}

/// Derives cell sizes from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryResolver {
    /// Rows never shrink below this height; the grid scrolls instead.
    pub min_cell_height: f64,
    /// Padding on each side of the grid.
    pub horizontal_inset: f64,
}

impl Default for GeometryResolver {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl GeometryResolver {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            min_cell_height: config.min_cell_height,
            horizontal_inset: config.horizontal_inset,
        }
    }

    /// Fit `row_count` rows into the space left after `reserved_height`.
    ///
    /// `None` while the viewport is unmeasured or the grid has no rows or
    /// columns.
    pub fn compute(
        &self,
        viewport: Viewport,
        reserved_height: f64,
        row_count: usize,
        columns_per_row: usize,
    ) -> Option<GridGeometry> {
        if !viewport.is_measured() || row_count == 0 || columns_per_row == 0 {
            return None;
        }

        let reserved = if reserved_height.is_finite() { reserved_height.max(0.0) } else { 0.0 };
        let fitted = ((viewport.height - reserved) / row_count as f64).floor();
        let cell_height = fitted.max(self.min_cell_height);

        let available_width = viewport.width - 2.0 * self.horizontal_inset;
        let cell_width = (available_width / columns_per_row as f64).floor();
        if cell_width <= 0.0 || cell_height <= 0.0 {
            return None;
        }

        tracing::debug!(
            rows = row_count,
            columns = columns_per_row,
            cell_width,
            cell_height,
            "computed grid geometry"
        );

        Some(GridGeometry {
            rows: row_count,
            columns_per_row,
            cell_width,
            cell_height,
            origin_x: self.horizontal_inset,
            origin_y: 0.0,
        })
    }
}
