//! Route parameter normalization.
//!
//! Hosts hand over query parameters that may be a single string or an
//! array of strings. They are reduced to a typed [`EditTarget`] before any
//! engine code sees them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time_key::DayKey;

/// One raw parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteParam {
    One(String),
    Many(Vec<String>),
}

impl RouteParam {
    /// The first value, trimmed. Empty strings count as absent.
    pub fn first(&self) -> Option<&str> {
        let value = match self {
            RouteParam::One(s) => s.as_str(),
            RouteParam::Many(values) => values.first()?.as_str(),
        };
        let value = value.trim();
        (!value.is_empty()).then_some(value)
    }
}

impl From<&str> for RouteParam {
    fn from(value: &str) -> Self {
        RouteParam::One(value.to_string())
    }
}

impl From<Vec<String>> for RouteParam {
    fn from(values: Vec<String>) -> Self {
        RouteParam::Many(values)
    }
}

/// Raw parameters keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams(HashMap<String, RouteParam>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RouteParam>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(RouteParam::first)
    }
}

impl<N: Into<String>, V: Into<RouteParam>> FromIterator<(N, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

/// What the editing screen is about: an event, and for slot voting a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditTarget {
    pub event_id: String,
    pub date: Option<DayKey>,
}

impl EditTarget {
    /// Read `id` and the optional `date` parameter.
    ///
    /// # Errors
    ///
    /// `MissingParameter("id")` when the event id is absent or empty,
    /// `InvalidValue` when a date is given but is not `YYYY-MM-DD`.
    pub fn from_params(params: &RouteParams) -> Result<Self, ValidationError> {
        let event_id = params
            .first("id")
            .ok_or_else(|| ValidationError::MissingParameter("id".to_string()))?
            .to_string();

        let date = params
            .first("date")
            .map(|raw| {
                raw.parse::<DayKey>()
                    .map_err(|e| ValidationError::InvalidValue {
                        field: "date".to_string(),
                        message: e.to_string(),
                    })
            })
            .transpose()?;

        Ok(Self { event_id, date })
    }

    /// The date, required for slot voting.
    pub fn require_date(&self) -> Result<DayKey, ValidationError> {
        self.date
            .ok_or_else(|| ValidationError::MissingParameter("date".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_param() {
        let params: RouteParams = [("id", "evt-1")].into_iter().collect();
        let target = EditTarget::from_params(&params).unwrap();
        assert_eq!(target.event_id, "evt-1");
        assert_eq!(target.date, None);
    }

    #[test]
    fn test_array_param_first_value_wins() {
        let mut params = RouteParams::new();
        params.insert("id", vec!["evt-2".to_string(), "evt-3".to_string()]);
        params.insert("date", vec!["2025-08-17".to_string()]);
        let target = EditTarget::from_params(&params).unwrap();
        assert_eq!(target.event_id, "evt-2");
        assert_eq!(target.require_date().unwrap().to_string(), "2025-08-17");
    }

    #[test]
    fn test_missing_or_empty_id() {
        let expected = Err(ValidationError::MissingParameter("id".to_string()));
        assert_eq!(EditTarget::from_params(&RouteParams::new()), expected);

        let params: RouteParams = [("id", "  ")].into_iter().collect();
        assert_eq!(EditTarget::from_params(&params), expected);

        let mut params = RouteParams::new();
        params.insert("id", Vec::<String>::new());
        assert_eq!(EditTarget::from_params(&params), expected);
    }

    #[test]
    fn test_invalid_date() {
        let params: RouteParams = [("id", "evt-1"), ("date", "17/08/2025")].into_iter().collect();
        let err = EditTarget::from_params(&params).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "date"));
    }

    #[test]
    fn test_require_date_when_absent() {
        let params: RouteParams = [("id", "evt-1")].into_iter().collect();
        let target = EditTarget::from_params(&params).unwrap();
        assert_eq!(
            target.require_date(),
            Err(ValidationError::MissingParameter("date".to_string()))
        );
    }

    #[test]
    fn test_deserialize_mixed_shapes() {
        let params: RouteParams =
            serde_json::from_str(r#"{"id": ["evt-9", "ignored"], "date": "2025-08-18"}"#).unwrap();
        let target = EditTarget::from_params(&params).unwrap();
        assert_eq!(target.event_id, "evt-9");
        assert_eq!(target.date, Some("2025-08-18".parse().unwrap()));
    }
}
