//! Integration tests for the heatmap color policy.

use std::collections::BTreeMap;

use availgrid_core::heatmap::{render_day_heatmap, render_slot_heatmap};
use availgrid_core::vote::{aggregate, Aggregate, Vote, VoteStatus};
use availgrid_core::{DayKey, HeatmapPolicy, HeatmapView, Rgb, SlotKey, WeekStart};
use proptest::prelude::*;

fn agg(preferred: u32, non_preferred: u32, impossible: u32) -> Aggregate {
    Aggregate {
        preferred,
        non_preferred,
        impossible,
        total: preferred + non_preferred + impossible,
    }
}

#[test]
fn test_half_baseline_blends_white_and_accent() {
    let policy = HeatmapPolicy::default();
    let style = policy.color_for(Some(&agg(2, 0, 0)), 4);

    assert_eq!(style.background, Rgb::WHITE.lerp(policy.accent, 0.5));
    assert_eq!(style.background, Rgb::new(157, 193, 251));
    assert!(!style.text_is_light);
}

#[test]
fn test_baseline_ignores_vetoed_keys() {
    let mut map = BTreeMap::new();
    map.insert("2025-08-17".parse::<DayKey>().unwrap(), agg(9, 0, 1));
    map.insert("2025-08-18".parse::<DayKey>().unwrap(), agg(2, 0, 0));
    let view = HeatmapView::build(&map, &HeatmapPolicy::default());

    assert_eq!(view.baseline, 2);
    assert!(view.style_for(&"2025-08-18".parse().unwrap()).text_is_light);
}

#[test]
fn test_custom_policy_colors() {
    let policy = HeatmapPolicy {
        neutral: Rgb::new(0, 0, 0),
        veto: Rgb::new(255, 0, 0),
        accent: Rgb::new(0, 200, 0),
        light_text_threshold: 0.9,
    };
    assert_eq!(policy.color_for(Some(&agg(0, 0, 1)), 1).background, Rgb::new(255, 0, 0));
    assert_eq!(policy.color_for(Some(&agg(1, 0, 0)), 2).background, Rgb::new(0, 100, 0));
    assert_eq!(policy.color_for(None, 2).background, Rgb::new(0, 0, 0));
}

#[test]
fn test_render_both_domains() {
    let day_votes = vec![Vote::new(
        "a",
        "2025-08-17".parse::<DayKey>().unwrap(),
        VoteStatus::Preferred,
    )];
    let day_view = HeatmapView::build(&aggregate(&day_votes), &HeatmapPolicy::default());
    let output = render_day_heatmap(&day_view, WeekStart::Sunday);
    assert!(output.contains("Day Heatmap"));
    assert!(output.contains("Su Mo Tu We Th Fr Sa"));
    assert!(output.contains("2025-08-17 - 1 preferred"));

    let slot_votes = vec![Vote::new(
        "a",
        "23:30".parse::<SlotKey>().unwrap(),
        VoteStatus::Impossible,
    )];
    let slot_view = HeatmapView::build(&aggregate(&slot_votes), &HeatmapPolicy::default());
    let output = render_slot_heatmap(&slot_view);
    assert!(output.contains("23     ·   x"));
    assert!(!output.contains("Best candidates"));
}

proptest! {
    /// Property: more preferred votes never give a lighter background
    #[test]
    fn prop_color_is_monotonic(
        low in 0..20u32,
        extra in 1..20u32,
        non_preferred in 0..5u32,
        baseline in 0..25u32,
    ) {
        let policy = HeatmapPolicy::default();
        let lighter = policy.color_for(Some(&agg(low, non_preferred, 0)), baseline);
        let darker = policy.color_for(Some(&agg(low + extra, non_preferred, 0)), baseline);
        prop_assert!(darker.background.luminance() <= lighter.background.luminance());
        prop_assert!(darker.intensity >= lighter.intensity);
    }

    /// Property: any impossible vote paints the veto color
    #[test]
    fn prop_veto_dominates(
        preferred in 0..1000u32,
        non_preferred in 0..1000u32,
        impossible in 1..10u32,
        baseline in 0..1000u32,
    ) {
        let policy = HeatmapPolicy::default();
        let style = policy.color_for(Some(&agg(preferred, non_preferred, impossible)), baseline);
        prop_assert_eq!(style.background, policy.veto);
        prop_assert!(!style.show_secondary_marker);
    }
}
