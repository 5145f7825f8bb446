//! Text rendering of heatmaps for terminals.
//!
//! One character per unit, followed by a legend and the best candidates.

use std::fmt::Write as _;

use super::policy::{HeatCell, HeatmapView};
use crate::grid::{Cell, GridLayout, MonthGrid, SlotGrid, WeekStart};
use crate::time_key::{DayKey, SlotKey, TimeKey};
use crate::vote::best_candidates;

const TOP_CANDIDATES: usize = 5;

const LEGEND: &str = concat!(
    "Legend: · (no votes) ░ (≤25%) ▒ (≤50%) ▓ (≤75%) █ (>75%) ",
    "x (vetoed) * (non-preferred)\n",
);

/// Heat character for one unit.
pub fn heat_char(cell: Option<&HeatCell>) -> char {
    let Some(cell) = cell.filter(|c| !c.aggregate.is_empty()) else {
        return '·';
    };
    if cell.aggregate.is_vetoed() {
        return 'x';
    }
    match cell.style.intensity {
        i if i <= 0.25 => '░',
        i if i <= 0.5 => '▒',
        i if i <= 0.75 => '▓',
        _ => '█',
    }
}

fn push_unit<K: TimeKey>(output: &mut String, view: &HeatmapView<K>, key: &K) {
    let cell = view.cells.get(key);
    output.push(heat_char(cell));
    let marked = cell.is_some_and(|c| c.style.show_secondary_marker);
    output.push(if marked { '*' } else { ' ' });
}

fn push_footer<K: TimeKey>(output: &mut String, view: &HeatmapView<K>) {
    output.push('\n');
    output.push_str(LEGEND);

    let aggregates = view
        .cells
        .iter()
        .map(|(k, c)| (k.clone(), c.aggregate))
        .collect();
    let best = best_candidates(&aggregates, TOP_CANDIDATES);
    if !best.is_empty() {
        output.push_str("\nBest candidates:\n");
        for (key, agg) in best {
            let _ = writeln!(
                output,
                "  {key} - {} preferred, {} non-preferred",
                agg.preferred, agg.non_preferred
            );
        }
    }
}

fn weekday_header(week_start: WeekStart) -> &'static str {
    match week_start {
        WeekStart::Sunday => "Su Mo Tu We Th Fr Sa",
        WeekStart::Monday => "Mo Tu We Th Fr Sa Su",
    }
}

/// Render day votes as month calendars, from the first voted month to the
/// last.
pub fn render_day_heatmap(view: &HeatmapView<DayKey>, week_start: WeekStart) -> String {
    let mut output = String::new();
    output.push_str("\nDay Heatmap\n");
    output.push_str(&"=".repeat(40));
    output.push('\n');

    let (Some(first), Some(last)) = (view.cells.keys().next(), view.cells.keys().next_back())
    else {
        output.push_str("No votes yet.\n");
        return output;
    };

    let _ = writeln!(output, "Baseline: {} preferred\n", view.baseline);

    let mut month = MonthGrid::containing(*first, week_start);
    let last_month = MonthGrid::containing(*last, week_start);
    while let Some(grid) = month {
        let _ = writeln!(output, "{:04}-{:02}", grid.year(), grid.month());
        output.push_str(weekday_header(week_start));
        output.push('\n');
        for row in 0..grid.rows() {
            for col in 0..grid.columns() {
                match grid.key_at(Cell { row, col }) {
                    Some(day) => push_unit(&mut output, view, &day),
                    None => output.push_str("  "),
                }
                output.push(' ');
            }
            output.truncate(output.trim_end().len());
            output.push('\n');
        }
        output.push('\n');

        if Some(grid) == last_month {
            break;
        }
        month = grid.next_month();
    }

    push_footer(&mut output, view);
    output
}

/// Render slot votes as a 24 x 2 grid, one row per hour.
pub fn render_slot_heatmap(view: &HeatmapView<SlotKey>) -> String {
    let mut output = String::new();
    output.push_str("\nSlot Heatmap\n");
    output.push_str(&"=".repeat(40));
    output.push('\n');

    if view.is_empty() {
        output.push_str("No votes yet.\n");
        return output;
    }

    let _ = writeln!(output, "Baseline: {} preferred\n", view.baseline);
    output.push_str("      :00 :30\n");

    let grid = SlotGrid::full_day();
    for row in 0..grid.rows() {
        let _ = write!(output, "{:02}    ", grid.start_hour() as usize + row);
        for col in 0..grid.columns() {
            if let Some(slot) = grid.key_at(Cell { row, col }) {
                output.push(' ');
                push_unit(&mut output, view, &slot);
                output.push(' ');
            }
        }
        output.truncate(output.trim_end().len());
        output.push('\n');
    }

    push_footer(&mut output, view);
    output
}
