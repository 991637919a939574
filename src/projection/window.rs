use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Inclusive datetime window a projection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ProjectionWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::ProjectionInput(format!(
                "window end {end} must fall after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The standard forward-looking window, `from` through `from` plus the
    /// given number of years (clamped to 1-100).
    pub fn horizon(from: NaiveDateTime, years: u32) -> Self {
        Self {
            start: from,
            end: from + Duration::days(365 * i64::from(years.clamp(1, 100))),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }
}
