use std::sync::Arc;

use colonnade_core::keys::MetricPartitionKey;
use colonnade_core::models::sensor_metric::{self, CalendarSlot, SensorMetric};
use colonnade_core::predicate::{self, HourRange, Limit};

use crate::engine::WideColumnStore;
use crate::error::QueryError;
use crate::query::{RangeQueryEngine, RowCursor};

/// Sensor readings, one partition per sensor per month.
///
/// Every read returns rows newest first. Arguments are validated before the
/// engine is touched: a bad sensor id, year or month is `InvalidKey`; a bad
/// day, hour or limit is `InvalidArgument`.
#[derive(Clone)]
pub struct MetricStore {
    metrics: RangeQueryEngine<SensorMetric>,
}

impl MetricStore {
    pub fn new(store: Arc<dyn WideColumnStore>, page_size: usize) -> Self {
        Self {
            metrics: RangeQueryEngine::new(store, page_size),
        }
    }

    pub async fn metrics_for_month(
        &self,
        sensor_id: &str,
        year: i32,
        month: i32,
    ) -> Result<Vec<SensorMetric>, QueryError> {
        self.month_cursor(sensor_id, year, month)?.collect().await
    }

    /// Streaming form of [`Self::metrics_for_month`].
    pub fn month_cursor(
        &self,
        sensor_id: &str,
        year: i32,
        month: i32,
    ) -> Result<RowCursor<SensorMetric>, QueryError> {
        let key = MetricPartitionKey::new(sensor_id, year, month)?;
        Ok(self.metrics.scan_all(&key))
    }

    pub async fn metrics_for_day(
        &self,
        sensor_id: &str,
        year: i32,
        month: i32,
        day: i32,
        limit: i64,
    ) -> Result<Vec<SensorMetric>, QueryError> {
        let key = MetricPartitionKey::new(sensor_id, year, month)?;
        let day = predicate::day_of_month(day)?;
        let limit = Limit::new(limit)?;
        self.metrics
            .scan_prefix(&key, &sensor_metric::day_prefix(day), Some(limit))?
            .collect()
            .await
    }

    pub async fn latest_metrics(
        &self,
        sensor_id: &str,
        year: i32,
        month: i32,
        limit: i64,
    ) -> Result<Vec<SensorMetric>, QueryError> {
        let key = MetricPartitionKey::new(sensor_id, year, month)?;
        let limit = Limit::new(limit)?;
        self.metrics.scan_bounded(&key, limit).collect().await
    }

    pub async fn metrics_for_hour_range(
        &self,
        sensor_id: &str,
        year: i32,
        month: i32,
        day: i32,
        hour_start: i32,
        hour_end: i32,
    ) -> Result<Vec<SensorMetric>, QueryError> {
        let key = MetricPartitionKey::new(sensor_id, year, month)?;
        let day = predicate::day_of_month(day)?;
        let hours = HourRange::new(hour_start, hour_end)?;
        let range = sensor_metric::hour_range(day, hours)?;
        self.metrics.scan_range(&key, &range)?.collect().await
    }

    /// The whole month partition that contains `now` (UTC).
    pub async fn metrics_for_current_month(
        &self,
        sensor_id: &str,
        now: jiff::Timestamp,
    ) -> Result<Vec<SensorMetric>, QueryError> {
        let slot = CalendarSlot::of(now);
        self.metrics_for_month(sensor_id, slot.year.into(), slot.month.into())
            .await
    }

    pub async fn append_metric(&self, metric: &SensorMetric) -> Result<(), QueryError> {
        self.metrics.append(metric).await
    }
}
