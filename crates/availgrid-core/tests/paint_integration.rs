//! Integration tests for the drag-paint engine.
//!
//! This test file verifies:
//! - Gesture paths over slot and month grids
//! - At most one toggle per cell and gesture
//! - Behavior while the layout is unmeasured
//! - Toggle involution on the working selection

use availgrid_core::grid::{Point, StaticViewport, Viewport};
use availgrid_core::selection::{PaintState, Toggle, WorkingSelection};
use availgrid_core::{
    DayKey, DayMode, GeometryResolver, MonthGrid, PaintEngine, SlotGrid, SlotKey, SlotMode,
    WeekStart,
};
use proptest::prelude::*;

const CELL_WIDTH: f64 = 100.0;
const CELL_HEIGHT: f64 = 30.0;

fn resolver() -> GeometryResolver {
    GeometryResolver {
        min_cell_height: 20.0,
        horizontal_inset: 0.0,
    }
}

fn viewport(columns: usize, rows: usize) -> StaticViewport {
    StaticViewport {
        viewport: Viewport::new(columns as f64 * CELL_WIDTH, rows as f64 * CELL_HEIGHT),
        reserved_height: 0.0,
        origin: Point::new(0.0, 0.0),
    }
}

fn at(row: usize, col: usize) -> Point {
    Point::new(
        col as f64 * CELL_WIDTH + CELL_WIDTH / 2.0,
        row as f64 * CELL_HEIGHT + CELL_HEIGHT / 2.0,
    )
}

fn slot(s: &str) -> SlotKey {
    s.parse().unwrap()
}

fn slot_engine() -> PaintEngine<SlotGrid, SlotMode> {
    let mut engine = PaintEngine::new(SlotGrid::full_day(), resolver(), SlotMode::Possible);
    engine.refresh_layout(&viewport(2, 24));
    engine
}

#[test]
fn test_three_cell_drag_from_empty_selection() {
    let mut engine = slot_engine();
    engine.gesture_start(at(0, 0));
    engine.gesture_move(at(0, 1));
    engine.gesture_move(at(1, 1));
    engine.gesture_end();

    let selection: Vec<(String, SlotMode)> = engine
        .selection()
        .iter()
        .map(|(k, m)| (k.to_string(), m))
        .collect();
    assert_eq!(
        selection,
        vec![
            ("00:00".to_string(), SlotMode::Possible),
            ("00:30".to_string(), SlotMode::Possible),
            ("01:30".to_string(), SlotMode::Possible),
        ]
    );
    assert_eq!(engine.state(), PaintState::Idle);
}

#[test]
fn test_crossing_a_cell_five_times_toggles_once() {
    let mut engine = slot_engine();
    engine.selection_mut().insert(slot("05:00"), SlotMode::Possible);

    engine.gesture_start(at(5, 0));
    for _ in 0..5 {
        engine.gesture_move(at(5, 1));
        engine.gesture_move(at(5, 0));
    }
    engine.gesture_end();

    assert_eq!(engine.selection().get(&slot("05:00")), None);
    assert_eq!(engine.selection().get(&slot("05:30")), Some(SlotMode::Possible));
    assert_eq!(engine.selection().len(), 1);
}

#[test]
fn test_new_gesture_can_retoggle() {
    let mut engine = slot_engine();
    engine.gesture_start(at(3, 0));
    engine.gesture_end();
    engine.gesture_start(at(3, 0));
    engine.gesture_end();
    assert!(engine.selection().is_empty());
}

#[test]
fn test_cancel_keeps_applied_toggles() {
    let mut engine = slot_engine();
    engine.set_mode(SlotMode::Impossible);
    engine.gesture_start(at(9, 0));
    engine.gesture_move(at(10, 0));
    engine.gesture_cancel();

    assert_eq!(engine.state(), PaintState::Idle);
    assert_eq!(engine.selection().count(SlotMode::Impossible), 2);
    assert!(engine.gesture_move(at(11, 0)).is_none());
}

#[test]
fn test_unmeasured_layout_touches_nothing() {
    let mut engine = PaintEngine::new(SlotGrid::full_day(), resolver(), SlotMode::Possible);
    assert!(engine.gesture_start(at(0, 0)).is_none());
    assert!(engine.is_dragging());
    engine.gesture_end();
    assert!(engine.selection().is_empty());

    engine.refresh_layout(&viewport(2, 24));
    engine.invalidate_layout();
    assert!(engine.gesture_start(at(0, 0)).is_none());
    engine.gesture_end();
    assert!(engine.selection().is_empty());
}

#[test]
fn test_switching_mode_overwrites_cell() {
    let mut engine = slot_engine();
    engine.gesture_start(at(8, 0));
    engine.gesture_end();

    engine.set_mode(SlotMode::Impossible);
    let event = engine.gesture_start(at(8, 0)).unwrap();
    engine.gesture_end();

    assert_eq!(
        event.change,
        Toggle::Set {
            mode: SlotMode::Impossible,
            previous: Some(SlotMode::Possible)
        }
    );
    assert_eq!(engine.selection().get(&slot("08:00")), Some(SlotMode::Impossible));
}

#[test]
fn test_month_grid_drag_across_a_week() {
    // August 2025 starts on a Friday: with Sunday first, the 1st sits at (0, 5)
    let grid = MonthGrid::new(2025, 8, WeekStart::Sunday).unwrap();
    let mut engine = PaintEngine::new(grid, resolver(), DayMode::Preferred);
    engine.refresh_layout(&viewport(7, 6));

    assert!(engine.gesture_start(at(0, 0)).is_none());
    for col in 1..7 {
        engine.gesture_move(at(0, col));
    }
    engine.gesture_move(at(1, 0));
    engine.gesture_end();

    let days: Vec<String> = engine.selection().iter().map(|(k, _)| k.to_string()).collect();
    assert_eq!(days, vec!["2025-08-01", "2025-08-02", "2025-08-03"]);
    assert_eq!(
        engine.selection().get(&"2025-08-03".parse::<DayKey>().unwrap()),
        Some(DayMode::Preferred)
    );
}

#[test]
fn test_seeded_selection_from_votes() {
    use availgrid_core::vote::{Vote, VoteStatus};
    let votes = vec![
        Vote::new("me", slot("09:00"), VoteStatus::Preferred),
        Vote::new("me", slot("09:30"), VoteStatus::NonPreferred),
        Vote::new("other", slot("10:00"), VoteStatus::Impossible),
    ];
    let selection = WorkingSelection::<SlotKey, SlotMode>::from_votes(&votes, "me");
    let engine = PaintEngine::new(SlotGrid::full_day(), resolver(), SlotMode::Possible)
        .with_selection(selection);

    assert_eq!(engine.selection().len(), 1);
    assert_eq!(engine.selection().get(&slot("09:00")), Some(SlotMode::Possible));
}

fn arb_day_mode() -> impl Strategy<Value = DayMode> {
    prop_oneof![
        Just(DayMode::Preferred),
        Just(DayMode::NonPreferred),
        Just(DayMode::Impossible),
    ]
}

proptest! {
    /// Property: toggling twice restores a cell that was unset or held the mode
    #[test]
    fn prop_toggle_twice_restores_cell(
        day in 1..=31u32,
        mode in arb_day_mode(),
        preset in any::<bool>(),
    ) {
        let key = DayKey::from_ymd(2025, 8, day).unwrap();
        let mut selection: WorkingSelection<DayKey, DayMode> = WorkingSelection::new();
        if preset {
            selection.insert(key, mode);
        }
        let before = selection.clone();

        selection.toggle_apply(key, mode);
        prop_assert_ne!(&selection, &before);
        selection.toggle_apply(key, mode);
        prop_assert_eq!(selection, before);
    }

    /// Property: any path within one gesture toggles each cell at most once
    #[test]
    fn prop_gesture_toggles_each_cell_once(
        path in prop::collection::vec((0..24usize, 0..2usize), 1..40),
    ) {
        let mut engine = slot_engine();
        let mut events = 0;
        if engine.gesture_start(at(path[0].0, path[0].1)).is_some() {
            events += 1;
        }
        for &(row, col) in &path[1..] {
            if engine.gesture_move(at(row, col)).is_some() {
                events += 1;
            }
        }
        engine.gesture_end();

        let distinct: std::collections::HashSet<_> = path.iter().collect();
        prop_assert_eq!(events, distinct.len());
        prop_assert_eq!(engine.selection().len(), distinct.len());
    }
}
