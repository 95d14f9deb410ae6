//! Query predicates: row-count limits, clustering ranges and calendar bounds.
//!
//! Everything here is validated on construction, so the query engine only
//! ever receives well-formed predicates.

use std::num::NonZeroUsize;

use crate::clustering::ClusteringValue;
use crate::error::CoreError;

/// A positive row-count cap, pushed down to the storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(NonZeroUsize);

impl Limit {
    pub fn new(value: i64) -> Result<Self, CoreError> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidArgument(format!("limit must be >= 1, got {value}")))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// A range of encoded clustering keys: `start` inclusive, `end` exclusive.
/// `None` leaves that side unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyRange {
    start: Option<String>,
    end: Option<String>,
}

impl KeyRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: Option<String>, end: Option<String>) -> Result<Self, CoreError> {
        if let (Some(s), Some(e)) = (&start, &end)
            && s >= e
        {
            return Err(CoreError::InvalidArgument(format!(
                "key range start {s:?} is not below end {e:?}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.start.as_deref().is_none_or(|s| key >= s)
            && self.end.as_deref().is_none_or(|e| key < e)
    }
}

/// An inclusive range on one clustering column, with every preceding column
/// held at a fixed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRange {
    fixed: Vec<ClusteringValue>,
    low: ClusteringValue,
    high: ClusteringValue,
}

impl ColumnRange {
    pub fn new(
        fixed: Vec<ClusteringValue>,
        low: ClusteringValue,
        high: ClusteringValue,
    ) -> Result<Self, CoreError> {
        if low > high {
            return Err(CoreError::InvalidArgument(format!(
                "range start {low:?} is after range end {high:?}"
            )));
        }
        Ok(Self { fixed, low, high })
    }

    pub fn fixed(&self) -> &[ClusteringValue] {
        &self.fixed
    }

    pub fn low(&self) -> ClusteringValue {
        self.low
    }

    pub fn high(&self) -> ClusteringValue {
        self.high
    }
}

/// Inclusive hour window within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    start: i8,
    end: i8,
}

impl HourRange {
    pub fn new(start: i32, end: i32) -> Result<Self, CoreError> {
        let start = hour_of_day(start)?;
        let end = hour_of_day(end)?;
        if start > end {
            return Err(CoreError::InvalidArgument(format!(
                "hour range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i8 {
        self.start
    }

    pub fn end(&self) -> i8 {
        self.end
    }
}

pub fn day_of_month(day: i32) -> Result<i8, CoreError> {
    i8::try_from(day)
        .ok()
        .filter(|d| (1..=31).contains(d))
        .ok_or_else(|| CoreError::InvalidArgument(format!("day {day} outside 1..=31")))
}

pub fn hour_of_day(hour: i32) -> Result<i8, CoreError> {
    i8::try_from(hour)
        .ok()
        .filter(|h| (0..=23).contains(h))
        .ok_or_else(|| CoreError::InvalidArgument(format!("hour {hour} outside 0..=23")))
}
