//! Cell-to-key layouts.
//!
//! A layout says how many rows and columns a grid has and which time key
//! sits in each cell. Cells with no key (padding days of a month view)
//! are inert.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::geometry::Cell;
use crate::time_key::{DayKey, SlotKey, TimeKey};

/// Maps grid cells to time keys.
pub trait GridLayout {
    type Key: TimeKey;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Key at `cell`, `None` for padding or out-of-range cells.
    fn key_at(&self, cell: Cell) -> Option<Self::Key>;

    /// Inverse of [`GridLayout::key_at`].
    fn cell_of(&self, key: &Self::Key) -> Option<Cell>;

    /// Every key of the layout in row-major order.
    fn keys(&self) -> Vec<Self::Key> {
        let mut keys = Vec::new();
        for row in 0..self.rows() {
            for col in 0..self.columns() {
                if let Some(key) = self.key_at(Cell::new(row, col)) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}

/// One row per hour, two half-hour columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    start_hour: u8,
    end_hour: u8,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            start_hour: 0,
            end_hour: 24,
        }
    }
}

impl SlotGrid {
    /// Full day, 24 rows.
    pub fn full_day() -> Self {
        Self::default()
    }

    /// Hours `start..end`; `None` for an empty or out-of-day window.
    pub fn hours(start: u8, end: u8) -> Option<Self> {
        (start < end && end <= 24).then_some(Self {
            start_hour: start,
            end_hour: end,
        })
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }
}

impl GridLayout for SlotGrid {
    type Key = SlotKey;

    fn rows(&self) -> usize {
        usize::from(self.end_hour - self.start_hour)
    }

    fn columns(&self) -> usize {
        2
    }

    fn key_at(&self, cell: Cell) -> Option<SlotKey> {
        if cell.row >= self.rows() || cell.col >= 2 {
            return None;
        }
        SlotKey::new(self.start_hour + cell.row as u8, cell.col == 1)
    }

    fn cell_of(&self, key: &SlotKey) -> Option<Cell> {
        let hour = key.hour();
        (hour >= self.start_hour && hour < self.end_hour).then(|| {
            Cell::new(
                usize::from(hour - self.start_hour),
                usize::from(key.is_second_half()),
            )
        })
    }
}

/// First day of the week in month views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

/// A month calendar: seven columns, one row per (partial) week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
    days: usize,
    lead: usize,
    week_start: WeekStart,
}

impl MonthGrid {
    /// `None` for an invalid year/month.
    pub fn new(year: i32, month: u32, week_start: WeekStart) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = first.checked_add_months(Months::new(1))?;
        let days = (next - first).num_days() as usize;
        let lead = match week_start {
            WeekStart::Sunday => first.weekday().num_days_from_sunday(),
            WeekStart::Monday => first.weekday().num_days_from_monday(),
        } as usize;
        Some(Self {
            first,
            days,
            lead,
            week_start,
        })
    }

    /// The month containing `day`.
    pub fn containing(day: DayKey, week_start: WeekStart) -> Option<Self> {
        let date = day.date();
        Self::new(date.year(), date.month(), week_start)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> usize {
        self.days
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// The following month with the same week start.
    pub fn next_month(&self) -> Option<Self> {
        let next = self.first.checked_add_months(Months::new(1))?;
        Self::new(next.year(), next.month(), self.week_start)
    }
}

impl GridLayout for MonthGrid {
    type Key = DayKey;

    fn rows(&self) -> usize {
        (self.lead + self.days).div_ceil(7)
    }

    fn columns(&self) -> usize {
        7
    }

    fn key_at(&self, cell: Cell) -> Option<DayKey> {
        if cell.col >= 7 {
            return None;
        }
        let index = cell.row * 7 + cell.col;
        if index < self.lead || index >= self.lead + self.days {
            return None;
        }
        let offset = (index - self.lead) as u64;
        self.first
            .checked_add_days(chrono::Days::new(offset))
            .map(DayKey::new)
    }

    fn cell_of(&self, key: &DayKey) -> Option<Cell> {
        let date = key.date();
        if date.year() != self.year() || date.month() != self.month() {
            return None;
        }
        let index = self.lead + date.day0() as usize;
        Some(Cell::new(index / 7, index % 7))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_grid_maps_rows_to_hours() {
        let grid = SlotGrid::full_day();
        assert_eq!(grid.rows(), 24);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.key_at(Cell::new(0, 0)).unwrap().to_string(), "00:00");
        assert_eq!(grid.key_at(Cell::new(0, 1)).unwrap().to_string(), "00:30");
        assert_eq!(grid.key_at(Cell::new(1, 1)).unwrap().to_string(), "01:30");
        assert_eq!(grid.key_at(Cell::new(23, 1)).unwrap().to_string(), "23:30");
        assert!(grid.key_at(Cell::new(24, 0)).is_none());
        assert!(grid.key_at(Cell::new(0, 2)).is_none());
        assert_eq!(grid.keys().len(), 48);
    }

    #[test]
    fn test_slot_grid_window() {
        let grid = SlotGrid::hours(9, 18).unwrap();
        assert_eq!(grid.rows(), 9);
        assert_eq!(grid.key_at(Cell::new(0, 1)).unwrap().to_string(), "09:30");
        assert_eq!(grid.cell_of(&"17:00".parse().unwrap()), Some(Cell::new(8, 0)));
        assert_eq!(grid.cell_of(&"18:00".parse().unwrap()), None);
        assert!(SlotGrid::hours(10, 10).is_none());
        assert!(SlotGrid::hours(0, 25).is_none());
    }

    #[test]
    fn test_month_grid_sunday_start() {
        // August 2025 starts on a Friday.
        let grid = MonthGrid::new(2025, 8, WeekStart::Sunday).unwrap();
        assert_eq!(grid.days_in_month(), 31);
        assert_eq!(grid.rows(), 6);
        assert!(grid.key_at(Cell::new(0, 4)).is_none());
        assert_eq!(grid.key_at(Cell::new(0, 5)).unwrap().to_string(), "2025-08-01");
        assert_eq!(grid.key_at(Cell::new(5, 0)).unwrap().to_string(), "2025-08-31");
        assert!(grid.key_at(Cell::new(5, 1)).is_none());
    }

    #[test]
    fn test_month_grid_monday_start() {
        let grid = MonthGrid::new(2025, 8, WeekStart::Monday).unwrap();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.key_at(Cell::new(0, 4)).unwrap().to_string(), "2025-08-01");
        assert_eq!(grid.key_at(Cell::new(4, 6)).unwrap().to_string(), "2025-08-31");
    }

    #[test]
    fn test_month_grid_cell_of_inverts_key_at() {
        let grid = MonthGrid::new(2024, 2, WeekStart::Sunday).unwrap();
        assert_eq!(grid.days_in_month(), 29);
        for key in grid.keys() {
            let cell = grid.cell_of(&key).unwrap();
            assert_eq!(grid.key_at(cell), Some(key));
        }
        assert!(grid.cell_of(&"2024-03-01".parse().unwrap()).is_none());
    }

    #[test]
    fn test_month_grid_next_month_rolls_year() {
        let grid = MonthGrid::new(2025, 12, WeekStart::Sunday).unwrap();
        let next = grid.next_month().unwrap();
        assert_eq!((next.year(), next.month()), (2026, 1));
    }
}
