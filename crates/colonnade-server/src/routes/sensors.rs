use axum::Json;
use axum::extract::{Path, Query, State};
use colonnade_core::models::sensor_metric::SensorMetric;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DayParams {
    #[serde(default = "default_day_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    #[serde(default = "default_latest_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourWindow {
    pub hour_start: i32,
    pub hour_end: i32,
}

fn default_day_limit() -> i64 {
    100
}

fn default_latest_limit() -> i64 {
    50
}

type Metrics = Result<Json<Vec<SensorMetric>>, ApiError>;

pub async fn metrics_for_month(
    State(state): State<AppState>,
    Path((sensor_id, year, month)): Path<(String, i32, i32)>,
) -> Metrics {
    let rows = state
        .sensors
        .metrics_for_month(&sensor_id, year, month)
        .await?;
    Ok(Json(rows))
}

pub async fn metrics_for_day(
    State(state): State<AppState>,
    Path((sensor_id, year, month, day)): Path<(String, i32, i32, i32)>,
    Query(params): Query<DayParams>,
) -> Metrics {
    let rows = state
        .sensors
        .metrics_for_day(&sensor_id, year, month, day, params.limit)
        .await?;
    Ok(Json(rows))
}

pub async fn latest_metrics(
    State(state): State<AppState>,
    Path((sensor_id, year, month)): Path<(String, i32, i32)>,
    Query(params): Query<LatestParams>,
) -> Metrics {
    let rows = state
        .sensors
        .latest_metrics(&sensor_id, year, month, params.limit)
        .await?;
    Ok(Json(rows))
}

pub async fn metrics_for_hour_range(
    State(state): State<AppState>,
    Path((sensor_id, year, month, day)): Path<(String, i32, i32, i32)>,
    Query(window): Query<HourWindow>,
) -> Metrics {
    let rows = state
        .sensors
        .metrics_for_hour_range(
            &sensor_id,
            year,
            month,
            day,
            window.hour_start,
            window.hour_end,
        )
        .await?;
    Ok(Json(rows))
}

pub async fn current_month(
    State(state): State<AppState>,
    Path(sensor_id): Path<String>,
) -> Metrics {
    let rows = state
        .sensors
        .metrics_for_current_month(&sensor_id, jiff::Timestamp::now())
        .await?;
    Ok(Json(rows))
}

pub async fn health() -> &'static str {
    "Sensor Metrics API is running!"
}
