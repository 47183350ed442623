use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::schedules::load_showtimes;
use crate::error::{ApiResult, AppError};
use crate::middleware::MaybeUser;
use crate::models::{CreatedOrder, Schedule};
use crate::selection::{SeatMap, SelectionSession, ToggleOutcome};
use crate::sessions::SessionError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/selections", post(open_selection))
        .route("/selections/{id}", get(get_selection).delete(discard_selection))
        .route("/selections/{id}/toggle", patch(toggle_seat))
        .route("/selections/{id}/refresh", post(refresh_selection))
        .route("/selections/{id}/showtimes", get(same_day_showtimes))
        .route("/selections/{id}/confirm", post(confirm_selection))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSelectionRequest {
    pub schedule_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub ss_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub session_id: Uuid,
    pub seat_map: SeatMap,
}

impl From<&SelectionSession> for SelectionView {
    fn from(session: &SelectionSession) -> Self {
        Self {
            session_id: session.id,
            seat_map: session.seat_map(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// `SELECTED`, `DESELECTED` или `IGNORED`.
    pub outcome: &'static str,
    pub ss_ids: Vec<i64>,
    #[serde(flatten)]
    pub view: SelectionView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub dropped_ss_ids: Vec<i64>,
    #[serde(flatten)]
    pub view: SelectionView,
}

fn session_not_found() -> AppError {
    AppError::NotFound("сессия выбора мест".into())
}

fn session_error(err: SessionError) -> AppError {
    match err {
        SessionError::NotFound => session_not_found(),
        SessionError::Busy => AppError::from(err),
    }
}

pub async fn open_selection(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OpenSelectionRequest>,
) -> ApiResult<(StatusCode, Json<SelectionView>)> {
    let detail = state.upstream.get_schedule_detail(body.schedule_id).await?;
    let session = SelectionSession::new(detail);
    let view = SelectionView::from(&session);

    info!("Selection session {} opened for schedule {}", session.id, body.schedule_id);
    state.selections.insert(session.id, session).await;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SelectionView>> {
    let session = state.selections.get(id).await.ok_or_else(session_not_found)?;
    Ok(Json(SelectionView::from(&session)))
}

pub async fn discard_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.selections.remove(id).await.map_err(session_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    MaybeUser(user_id): MaybeUser,
    Json(body): Json<ToggleRequest>,
) -> ApiResult<Json<ToggleResponse>> {
    let (outcome, view) = state
        .selections
        .update(id, |session| {
            session
                .toggle(body.ss_id, user_id)
                .map(|outcome| (outcome, SelectionView::from(&*session)))
        })
        .await
        .map_err(session_error)??;

    let (outcome, ss_ids) = match outcome {
        ToggleOutcome::Ignored => ("IGNORED", Vec::new()),
        ToggleOutcome::Selected(ids) => ("SELECTED", ids),
        ToggleOutcome::Deselected(ids) => ("DESELECTED", ids),
    };
    Ok(Json(ToggleResponse {
        outcome,
        ss_ids,
        view,
    }))
}

/// Ручное обновление схемы: статусы мест меняются только здесь.
pub async fn refresh_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RefreshResponse>> {
    let schedule_id = state
        .selections
        .get(id)
        .await
        .ok_or_else(session_not_found)?
        .schedule_id();
    let fresh = state.upstream.get_schedule_detail(schedule_id).await?;

    let (dropped, view) = state
        .selections
        .update(id, |session| {
            let dropped = session.refresh(fresh);
            (dropped, SelectionView::from(&*session))
        })
        .await
        .map_err(session_error)?;

    if !dropped.is_empty() {
        info!("Selection {}: {} seats no longer available", id, dropped.len());
    }
    Ok(Json(RefreshResponse {
        dropped_ss_ids: dropped,
        view,
    }))
}

/// Сеансы того же фильма в тот же день, что и сеанс сессии.
pub async fn same_day_showtimes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Schedule>>> {
    let session = state.selections.get(id).await.ok_or_else(session_not_found)?;
    let snapshot = session.snapshot();
    let movie_id = snapshot.schedule.movie_id.unwrap_or(snapshot.movie.movie_id);
    let Some(date) = snapshot.schedule.start_date() else {
        return Ok(Json(Vec::new()));
    };

    let (listing, _) = load_showtimes(&state, movie_id).await?;
    Ok(Json(listing.on_date(date)))
}

/// Подтверждение выбора. На время запроса к сервису заказов сессия занята:
/// повторное подтверждение и клики получают 409. Сессия удаляется только
/// после успешного заказа.
pub async fn confirm_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    MaybeUser(user_id): MaybeUser,
) -> ApiResult<(StatusCode, Json<CreatedOrder>)> {
    let order = state
        .selections
        .claim(id, |session| session.confirm(user_id).map_err(AppError::from))
        .await?;
    let seats = order.seat_showing_ids.len();

    // отдельная задача доводит заказ до конца, даже если клиент отключился
    let task_state = Arc::clone(&state);
    let created = tokio::spawn(async move {
        match task_state.upstream.create_order(&order).await {
            Ok(created) => {
                task_state.selections.finish(id).await;
                Ok(created)
            }
            Err(e) => {
                task_state.selections.release(id).await;
                Err(e)
            }
        }
    })
    .await??;

    info!(
        "Order {} created from selection {} ({} seats)",
        created.order_id, id, seats
    );
    Ok((StatusCode::CREATED, Json(created)))
}
