use axum::{
    extract::{Path, Query, State},
    routing::put,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::TemplateSeatType;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/halls/{hall_id}/seats/bulk-set-type", put(bulk_set_seat_type))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSetTypeQuery {
    pub seat_type: TemplateSeatType,
}

/// Массовая смена типа мест в существующем зале (на стороне бэкенда).
pub async fn bulk_set_seat_type(
    State(state): State<Arc<AppState>>,
    Path(hall_id): Path<i64>,
    Query(query): Query<BulkSetTypeQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let result = state
        .upstream
        .bulk_set_seat_type(hall_id, query.seat_type)
        .await?;
    Ok(Json(result))
}
