//! The pagination contract shared by every list view.
//!
//! Raw `limit`/`offset` inputs are normalized into a [`PageWindow`] before any
//! store access, and every list response is shaped into the same
//! [`Paginated`] envelope.

use serde::{Deserialize, Serialize};
use tokenview_types::{Page, PageWindow, ValidationError};

use crate::error::{QueryError, QueryResult};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 60;

/// Page-size bounds applied to every list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Limit used when the request does not carry one.
    pub default_limit: u32,
    /// Largest limit a request may ask for.
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> QueryResult<()> {
        if self.default_limit == 0 {
            return Err(QueryError::Config("default_limit must be at least 1".into()));
        }
        if self.default_limit > self.max_limit {
            return Err(QueryError::Config(format!(
                "default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }

    /// Resolve request parameters into a bounded window.
    pub fn window(&self, params: PageParams) -> Result<PageWindow, ValidationError> {
        PageWindow::bounded(
            params.limit.unwrap_or(i64::from(self.default_limit)),
            params.offset.unwrap_or(0),
            self.max_limit,
        )
    }
}

/// Optional page parameters exactly as the request supplied them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// Parse textual query-string values.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            limit: limit.map(|raw| parse_integer("limit", raw)).transpose()?,
            offset: offset.map(|raw| parse_integer("offset", raw)).transpose()?,
        })
    }
}

fn parse_integer(name: &str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

/// Uniform list envelope: `{limit, offset, total, results}`.
///
/// `total` counts every matching row, not just this page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub limit: u32,
    pub offset: u64,
    pub total: u64,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(window: PageWindow, page: Page<T>) -> Self {
        Self {
            limit: window.limit(),
            offset: window.offset(),
            total: page.total,
            results: page.rows,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            limit: self.limit,
            offset: self.offset,
            total: self.total,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_apply_when_absent() {
        let window = PaginationConfig::default().window(PageParams::default()).unwrap();
        assert_eq!(window.limit(), DEFAULT_LIMIT);
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn out_of_bounds_is_validation_error() {
        let config = PaginationConfig::default();
        assert!(config.window(PageParams::new(Some(0), None)).is_err());
        assert!(config.window(PageParams::new(Some(61), None)).is_err());
        assert!(config.window(PageParams::new(Some(-3), None)).is_err());
        assert_eq!(
            config.window(PageParams::new(None, Some(-1))).unwrap_err(),
            ValidationError::NegativeOffset(-1)
        );
    }

    #[test]
    fn parse_rejects_non_integers() {
        assert_eq!(
            PageParams::parse(Some("ten"), None).unwrap_err(),
            ValidationError::NotAnInteger {
                name: "limit".into(),
                value: "ten".into()
            }
        );
        assert!(PageParams::parse(None, Some("1.5")).is_err());
        assert_eq!(
            PageParams::parse(Some("5"), Some("10")).unwrap(),
            PageParams::new(Some(5), Some(10))
        );
    }

    #[test]
    fn config_validation() {
        assert!(PaginationConfig::default().validate().is_ok());
        let zero = PaginationConfig { default_limit: 0, max_limit: 10 };
        assert!(zero.validate().is_err());
        let inverted = PaginationConfig { default_limit: 50, max_limit: 10 };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn envelope_serializes_with_contract_field_names() {
        let window = PageWindow::bounded(2, 0, 60).unwrap();
        let envelope = Paginated::new(window, Page { total: 3, rows: vec!["a", "b"] });
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"limit": 2, "offset": 0, "total": 3, "results": ["a", "b"]})
        );
    }

    proptest! {
        #[test]
        fn valid_params_produce_bounded_window(limit in 1i64..=60, offset in 0i64..10_000) {
            let window = PaginationConfig::default()
                .window(PageParams::new(Some(limit), Some(offset)))
                .unwrap();
            prop_assert_eq!(i64::from(window.limit()), limit);
            prop_assert_eq!(window.offset() as i64, offset);
        }

        #[test]
        fn oversized_limits_always_rejected(limit in 61i64..i64::MAX) {
            prop_assert!(PaginationConfig::default()
                .window(PageParams::new(Some(limit), None))
                .is_err());
        }
    }
}
