use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A bounded page request: `limit` in `[1, max]`, `offset >= 0`.
///
/// Request-scoped and only constructed through [`PageWindow::bounded`] or
/// [`PageWindow::single`], so the bounds always hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PageWindow {
    limit: u32,
    offset: u64,
}

impl PageWindow {
    /// Build a window, checking `limit` against `max_limit`.
    pub fn bounded(limit: i64, offset: i64, max_limit: u32) -> Result<Self, ValidationError> {
        if offset < 0 {
            return Err(ValidationError::NegativeOffset(offset));
        }
        if limit < 1 || limit > i64::from(max_limit) {
            return Err(ValidationError::LimitOutOfRange {
                value: limit,
                max: max_limit,
            });
        }
        Ok(Self {
            limit: limit as u32,
            offset: offset as u64,
        })
    }

    /// A single-row window at offset 0, used for existence checks.
    pub const fn single() -> Self {
        Self {
            limit: 1,
            offset: 0,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Slice an already ordered, already filtered row set.
    pub fn apply<T>(&self, rows: impl IntoIterator<Item = T>) -> Page<T> {
        let mut total = 0u64;
        let mut selected = Vec::with_capacity(self.limit as usize);
        for row in rows {
            if total >= self.offset && selected.len() < self.limit as usize {
                selected.push(row);
            }
            total += 1;
        }
        Page {
            total,
            rows: selected,
        }
    }
}

/// A store-produced page: the rows inside the window plus the count of all
/// rows that matched the filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            rows: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}
