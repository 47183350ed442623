use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::ScheduleListing;
use crate::selection::{SeatMap, SelectionSet};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schedules/{schedule_id}/seat-map", get(get_seat_map))
        .route("/movies/{movie_id}/schedules", get(get_movie_schedules))
}

/// Схема зала по свежему снимку, без выбора.
pub async fn get_seat_map(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i64>,
) -> ApiResult<Json<SeatMap>> {
    let detail = state.upstream.get_schedule_detail(schedule_id).await?;
    Ok(Json(SeatMap::build(&detail, &SelectionSet::new())))
}

pub async fn get_movie_schedules(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let (listing, hit) = load_showtimes(&state, movie_id).await?;
    let cache_header = if hit { "HIT" } else { "MISS" };
    Ok(([("x-cache", cache_header)], Json(listing)))
}

/// Сеансы фильма: сначала кэш, потом бэкенд. Второй элемент - попадание в кэш.
pub(crate) async fn load_showtimes(
    state: &AppState,
    movie_id: i64,
) -> ApiResult<(ScheduleListing, bool)> {
    if let Some(listing) = state.cache.get_cached_showtimes(movie_id).await {
        return Ok((listing, true));
    }
    let listing = state.upstream.get_schedules_by_movie(movie_id).await?;
    state.cache.cache_showtimes(movie_id, &listing).await;
    Ok((listing, false))
}
