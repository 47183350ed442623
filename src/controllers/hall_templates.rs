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

use crate::editor::{HallLayout, HallTemplateEditor, TemplateError};
use crate::error::{ApiResult, AppError};
use crate::layout::AislePartition;
use crate::models::{HallType, TemplateSeatType};
use crate::sessions::SessionError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hall-templates", post(open_editor))
        .route("/hall-templates/{id}", get(get_editor).delete(discard_editor))
        .route("/hall-templates/{id}/details", patch(update_details))
        .route("/hall-templates/{id}/resize", patch(resize))
        .route("/hall-templates/{id}/row-labels", patch(set_row_labels))
        .route("/hall-templates/{id}/cells/toggle", patch(toggle_cell))
        .route("/hall-templates/{id}/cells/seat-type-menu", patch(seat_type_menu))
        .route("/hall-templates/{id}/cells/seat-type", patch(choose_seat_type))
        .route("/hall-templates/{id}/bulk-dialog", patch(bulk_dialog))
        .route("/hall-templates/{id}/bulk-seat-type", patch(bulk_seat_type))
        .route("/hall-templates/{id}/submit", post(submit))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEditorRequest {
    #[serde(default)]
    pub cinema_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub hall_type: Option<HallType>,
    pub cinema_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ResizeRequest {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLabelsRequest {
    pub row_labels: String,
}

#[derive(Debug, Deserialize)]
pub struct CellRequest {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Deserialize)]
pub struct SeatTypeMenuRequest {
    pub open: bool,
    pub row: Option<usize>,
    pub col: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatTypeRequest {
    pub seat_type: TemplateSeatType,
}

#[derive(Debug, Deserialize)]
pub struct DialogRequest {
    pub open: bool,
}

/// Состояние редактора вместе с производными данными для отрисовки.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    #[serde(flatten)]
    pub editor: HallTemplateEditor,
    pub aisle_preview: AislePartition,
    pub layout: HallLayout,
}

impl From<&HallTemplateEditor> for EditorView {
    fn from(editor: &HallTemplateEditor) -> Self {
        Self {
            editor: editor.clone(),
            aisle_preview: editor.aisle_preview(),
            layout: editor.template.serialize(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub hall: serde_json::Value,
    pub editor: EditorView,
}

fn editor_not_found() -> AppError {
    AppError::NotFound("шаблон зала".into())
}

fn editor_error(err: SessionError) -> AppError {
    match err {
        SessionError::NotFound => editor_not_found(),
        SessionError::Busy => AppError::from(err),
    }
}

/// Применяет изменение к редактору и возвращает его новое состояние.
async fn edit<F>(state: &AppState, id: Uuid, f: F) -> ApiResult<Json<EditorView>>
where
    F: FnOnce(&mut HallTemplateEditor) -> Result<(), TemplateError>,
{
    let view = state
        .templates
        .update(id, |editor| f(editor).map(|_| EditorView::from(&*editor)))
        .await
        .map_err(editor_error)??;
    Ok(Json(view))
}

pub async fn open_editor(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OpenEditorRequest>,
) -> ApiResult<(StatusCode, Json<EditorView>)> {
    let editor = HallTemplateEditor::new(body.cinema_id);
    let view = EditorView::from(&editor);
    info!("Hall template editor {} opened", editor.id);
    state.templates.insert(editor.id, editor).await;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_editor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<EditorView>> {
    let editor = state.templates.get(id).await.ok_or_else(editor_not_found)?;
    Ok(Json(EditorView::from(&editor)))
}

pub async fn discard_editor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.templates.remove(id).await.map_err(editor_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<DetailsRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| {
        if let Some(name) = body.name {
            editor.name = name;
        }
        if let Some(hall_type) = body.hall_type {
            editor.hall_type = hall_type;
        }
        if body.cinema_id.is_some() {
            editor.cinema_id = body.cinema_id;
        }
        Ok(())
    })
    .await
}

pub async fn resize(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ResizeRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| editor.resize(body.rows, body.cols)).await
}

pub async fn set_row_labels(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<RowLabelsRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| editor.set_row_labels(&body.row_labels)).await
}

pub async fn toggle_cell(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<CellRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| {
        editor.toggle_existence(body.row, body.col).map(|_| ())
    })
    .await
}

/// Открывает меню для ячейки (если место существует) или закрывает его.
pub async fn seat_type_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SeatTypeMenuRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| {
        if !body.open {
            editor.close_seat_type_menu();
            return Ok(());
        }
        match (body.row, body.col) {
            (Some(row), Some(col)) => editor.open_seat_type_menu(row, col).map(|_| ()),
            _ => Err(TemplateError::Invalid("укажите ряд и колонку".into())),
        }
    })
    .await
}

pub async fn choose_seat_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SeatTypeRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| editor.choose_seat_type(body.seat_type)).await
}

pub async fn bulk_dialog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<DialogRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| {
        editor.set_bulk_dialog(body.open);
        Ok(())
    })
    .await
}

pub async fn bulk_seat_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SeatTypeRequest>,
) -> ApiResult<Json<EditorView>> {
    edit(&state, id, |editor| {
        editor.bulk_set_seat_type(body.seat_type);
        Ok(())
    })
    .await
}

/// Отправляет шаблон в API администрирования. Пока запрос идёт, редактор
/// занят и правки получают 409. При ошибке редактор не трогается.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let request = state
        .templates
        .claim(id, |editor| editor.to_create_request().map_err(AppError::from))
        .await?;

    let task_state = Arc::clone(&state);
    let (hall, view) = tokio::spawn(async move {
        let hall = match task_state.upstream.create_hall_with_seats(&request).await {
            Ok(hall) => hall,
            Err(e) => {
                task_state.templates.release(id).await;
                return Err(AppError::from(e));
            }
        };
        info!("Hall '{}' created from template {}", request.name, id);

        // сброс под тем же захватом: правка не может вклиниться перед ним
        let view = task_state
            .templates
            .release_with(id, |editor| {
                editor.reset();
                EditorView::from(&*editor)
            })
            .await
            .map_err(editor_error)?;
        Ok((hall, view))
    })
    .await??;

    Ok((StatusCode::CREATED, Json(SubmitResponse { hall, editor: view })))
}
