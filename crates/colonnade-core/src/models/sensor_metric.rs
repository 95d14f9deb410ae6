use std::collections::BTreeMap;

use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::clustering::{self, ClusteringSpec, ClusteringValue};
use crate::error::CoreError;
use crate::keys::MetricPartitionKey;
use crate::predicate::{self, ColumnRange, HourRange};
use crate::row::Row;

/// A single sensor reading.
///
/// Partitioned by `(sensor_id, year, month)` and clustered by
/// `(day, hour, recorded_at)`, all descending, so the first row of a
/// partition is always the most recent reading. `year`, `month`, `day` and
/// `hour` are denormalized from `recorded_at` (UTC); build readings with
/// [`SensorMetric::new`] so they cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SensorMetric {
    pub sensor_id: String,
    pub year: i16,
    pub month: i8,
    pub day: i8,
    pub hour: i8,
    pub recorded_at: jiff::Timestamp,
    pub metric_type: String,
    pub metric_value: f64,
    pub unit: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// UTC calendar position of an instant, at clustering granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarSlot {
    pub year: i16,
    pub month: i8,
    pub day: i8,
    pub hour: i8,
}

impl CalendarSlot {
    /// The one derivation of calendar fields from a timestamp.
    pub fn of(instant: jiff::Timestamp) -> Self {
        let zoned = instant.to_zoned(TimeZone::UTC);
        Self {
            year: zoned.year(),
            month: zoned.month(),
            day: zoned.day(),
            hour: zoned.hour(),
        }
    }
}

impl SensorMetric {
    pub fn new(
        sensor_id: impl Into<String>,
        recorded_at: jiff::Timestamp,
        metric_type: impl Into<String>,
        metric_value: f64,
        unit: impl Into<String>,
    ) -> Self {
        let slot = CalendarSlot::of(recorded_at);
        Self {
            sensor_id: sensor_id.into(),
            year: slot.year,
            month: slot.month,
            day: slot.day,
            hour: slot.hour,
            recorded_at,
            metric_type: metric_type.into(),
            metric_value,
            unit: unit.into(),
            location: String::new(),
            status: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn slot(&self) -> CalendarSlot {
        CalendarSlot {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
        }
    }
}

impl Row for SensorMetric {
    type Partition = MetricPartitionKey;

    const CLUSTERING: &'static ClusteringSpec = &clustering::SENSOR_METRICS;

    fn partition_key(&self) -> Result<MetricPartitionKey, CoreError> {
        MetricPartitionKey::new(&self.sensor_id, self.year.into(), self.month.into())
    }

    fn clustering_values(&self) -> Vec<ClusteringValue> {
        vec![
            ClusteringValue::I8(self.day),
            ClusteringValue::I8(self.hour),
            ClusteringValue::I64(self.recorded_at.as_microsecond()),
        ]
    }

    fn validate(&self) -> Result<(), CoreError> {
        self.partition_key()?;
        predicate::day_of_month(self.day.into())?;
        predicate::hour_of_day(self.hour.into())?;
        let expected = CalendarSlot::of(self.recorded_at);
        if self.slot() != expected {
            return Err(CoreError::InvalidArgument(format!(
                "calendar fields {:?} disagree with recorded_at {} ({expected:?})",
                self.slot(),
                self.recorded_at
            )));
        }
        Ok(())
    }
}

/// Clustering prefix selecting one day of a month partition.
pub fn day_prefix(day: i8) -> [ClusteringValue; 1] {
    [ClusteringValue::I8(day)]
}

/// Clustering prefix selecting one hour of one day.
pub fn hour_prefix(day: i8, hour: i8) -> [ClusteringValue; 2] {
    [ClusteringValue::I8(day), ClusteringValue::I8(hour)]
}

/// Clustering range selecting an hour window of one day.
pub fn hour_range(day: i8, hours: HourRange) -> Result<ColumnRange, CoreError> {
    ColumnRange::new(
        vec![ClusteringValue::I8(day)],
        ClusteringValue::I8(hours.start()),
        ClusteringValue::I8(hours.end()),
    )
}
