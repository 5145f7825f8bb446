//! Heatmap color policy.
//!
//! Maps an [`Aggregate`] and the group-relative baseline to a cell style.
//! Rules are evaluated in order and the first match wins:
//!
//! 1. no votes: neutral background
//! 2. any `impossible` vote: veto gray, whatever else was voted
//! 3. otherwise: blend neutral -> accent by `preferred / baseline`
//!
//! The same policy serves day grids and slot grids; [`HeatmapView`] is
//! generic over the key domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::color::Rgb;
use crate::storage::HeatmapConfig;
use crate::time_key::TimeKey;
use crate::vote::{max_preferred_baseline, Aggregate};

/// Display decision for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub background: Rgb,
    pub text_is_light: bool,
    /// Someone marked this unit non-preferred.
    pub show_secondary_marker: bool,
    /// Blend parameter used for the background, 0.0 for neutral and veto cells.
    pub intensity: f64,
}

/// Colors and thresholds of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPolicy {
    pub neutral: Rgb,
    pub veto: Rgb,
    pub accent: Rgb,
    /// Text turns light above this intensity.
    pub light_text_threshold: f64,
}

impl Default for HeatmapPolicy {
    fn default() -> Self {
        Self::from_config(&HeatmapConfig::default())
    }
}

impl HeatmapPolicy {
    pub fn from_config(config: &HeatmapConfig) -> Self {
        Self {
            neutral: config.neutral,
            veto: config.veto,
            accent: config.accent,
            light_text_threshold: config.light_text_threshold,
        }
    }

    /// Style of a unit with no votes.
    pub fn empty_style(&self) -> CellStyle {
        CellStyle {
            background: self.neutral,
            text_is_light: false,
            show_secondary_marker: false,
            intensity: 0.0,
        }
    }

    /// Style for one aggregate. A baseline of 0 is treated as 1.
    pub fn color_for(&self, agg: Option<&Aggregate>, baseline: u32) -> CellStyle {
        let agg = match agg {
            Some(agg) if agg.total > 0 => agg,
            _ => return self.empty_style(),
        };

        if agg.impossible > 0 {
            return CellStyle {
                background: self.veto,
                text_is_light: false,
                show_secondary_marker: false,
                intensity: 0.0,
            };
        }

        let ratio = (f64::from(agg.preferred) / f64::from(baseline.max(1))).clamp(0.0, 1.0);
        CellStyle {
            background: self.neutral.lerp(self.accent, ratio),
            text_is_light: ratio > self.light_text_threshold,
            show_secondary_marker: agg.non_preferred > 0,
            intensity: ratio,
        }
    }
}

/// Aggregate and style of one key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub aggregate: Aggregate,
    pub style: CellStyle,
}

/// Styled heatmap over one key domain.
///
/// Serializes as `{baseline, cells}`; keys without votes are left out.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapView<K: Ord> {
    pub baseline: u32,
    pub cells: BTreeMap<K, HeatCell>,
    #[serde(skip)]
    empty: CellStyle,
}

impl<K: TimeKey> HeatmapView<K> {
    /// Style every aggregated key against the group baseline.
    pub fn build(aggregates: &BTreeMap<K, Aggregate>, policy: &HeatmapPolicy) -> Self {
        let baseline = max_preferred_baseline(aggregates);
        let cells = aggregates
            .iter()
            .map(|(key, agg)| {
                let cell = HeatCell {
                    aggregate: *agg,
                    style: policy.color_for(Some(agg), baseline),
                };
                (key.clone(), cell)
            })
            .collect();

        Self {
            baseline,
            cells,
            empty: policy.empty_style(),
        }
    }

    /// Style for `key`; neutral when nobody voted for it.
    pub fn style_for(&self, key: &K) -> CellStyle {
        self.cells.get(key).map(|c| c.style).unwrap_or(self.empty)
    }

    pub fn aggregate_for(&self, key: &K) -> Aggregate {
        self.cells.get(key).map(|c| c.aggregate).unwrap_or_default()
    }

    /// Keys flagged with the non-preferred marker.
    pub fn marked_keys(&self) -> impl Iterator<Item = &K> {
        self.cells
            .iter()
            .filter(|(_, c)| c.style.show_secondary_marker)
            .map(|(k, _)| k)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_key::SlotKey;

    fn agg(preferred: u32, non_preferred: u32, impossible: u32) -> Aggregate {
        Aggregate {
            preferred,
            non_preferred,
            impossible,
            total: preferred + non_preferred + impossible,
        }
    }

    #[test]
    fn test_missing_or_empty_aggregate_is_neutral() {
        let policy = HeatmapPolicy::default();
        assert_eq!(policy.color_for(None, 4), policy.empty_style());
        assert_eq!(policy.color_for(Some(&Aggregate::default()), 4), policy.empty_style());
        assert_eq!(policy.empty_style().background, Rgb::WHITE);
    }

    #[test]
    fn test_veto_is_gray_without_marker() {
        let policy = HeatmapPolicy::default();
        let style = policy.color_for(Some(&agg(2, 1, 1)), 3);
        assert_eq!(style.background, policy.veto);
        assert!(!style.text_is_light);
        assert!(!style.show_secondary_marker);
    }

    #[test]
    fn test_half_baseline_blends_halfway() {
        let policy = HeatmapPolicy::default();
        let style = policy.color_for(Some(&agg(2, 0, 0)), 4);
        assert_eq!(style.background, policy.neutral.lerp(policy.accent, 0.5));
        assert!(!style.text_is_light);
        assert_eq!(style.intensity, 0.5);
    }

    #[test]
    fn test_full_ratio_uses_accent_with_light_text() {
        let policy = HeatmapPolicy::default();
        let style = policy.color_for(Some(&agg(5, 0, 0)), 4);
        assert_eq!(style.background, policy.accent);
        assert!(style.text_is_light);
    }

    #[test]
    fn test_text_threshold_is_exclusive() {
        let policy = HeatmapPolicy {
            light_text_threshold: 0.5,
            ..HeatmapPolicy::default()
        };
        assert!(!policy.color_for(Some(&agg(1, 0, 0)), 2).text_is_light);
        assert!(policy.color_for(Some(&agg(2, 0, 0)), 3).text_is_light);
    }

    #[test]
    fn test_marker_for_non_preferred() {
        let policy = HeatmapPolicy::default();
        let style = policy.color_for(Some(&agg(3, 1, 0)), 3);
        assert!(style.show_secondary_marker);
        assert_eq!(style.background, policy.accent);
    }

    #[test]
    fn test_zero_baseline_does_not_divide_by_zero() {
        let policy = HeatmapPolicy::default();
        let style = policy.color_for(Some(&agg(1, 0, 0)), 0);
        assert_eq!(style.background, policy.accent);
    }

    #[test]
    fn test_view_styles_against_group_baseline() {
        let mut map = BTreeMap::new();
        let nine: SlotKey = "09:00".parse().unwrap();
        let ten: SlotKey = "10:00".parse().unwrap();
        let eleven: SlotKey = "11:00".parse().unwrap();
        map.insert(nine, agg(4, 0, 0));
        map.insert(ten, agg(2, 1, 0));
        map.insert(eleven, agg(8, 0, 2));

        let policy = HeatmapPolicy::default();
        let view = HeatmapView::build(&map, &policy);

        assert_eq!(view.baseline, 4);
        assert_eq!(view.style_for(&nine).background, policy.accent);
        assert_eq!(view.style_for(&ten).intensity, 0.5);
        assert_eq!(view.style_for(&eleven).background, policy.veto);
        assert_eq!(view.style_for(&"12:00".parse().unwrap()), policy.empty_style());
        assert_eq!(view.marked_keys().collect::<Vec<_>>(), vec![&ten]);
    }

    #[test]
    fn test_view_json_has_only_baseline_and_cells() {
        let mut map = BTreeMap::new();
        map.insert("09:30".parse::<SlotKey>().unwrap(), agg(1, 0, 0));
        let view = HeatmapView::build(&map, &HeatmapPolicy::default());

        let json = serde_json::to_value(&view).unwrap();
        let fields: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["baseline", "cells"]);
        assert_eq!(json["baseline"], 1);
        assert!(json["cells"]["09:30"].is_object());
    }
}
