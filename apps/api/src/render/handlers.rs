use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::RenderedResume;
use crate::store::WorkspaceView;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub editing: bool,
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<WorkspaceView>, AppError> {
    let view = state.store.read(resume_id, |ws| Ok(ws.view())).await?;
    Ok(Json(view))
}

/// GET /api/v1/resumes/:id/render?editing=true
///
/// `editing=true` projects the open session's working copy with the
/// editing affordances (empty optional sections, invalid work items kept).
pub async fn handle_render(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedResume>, AppError> {
    let rendered = state
        .store
        .read(resume_id, |ws| Ok(ws.render(query.editing)))
        .await?;
    Ok(Json(rendered))
}

/// GET /api/v1/resumes/:id/export
///
/// Returns the committed resume as markdown. Refused while a session is open.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let markdown = state
        .store
        .read(resume_id, |ws| Ok(ws.export_markdown()?))
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"resume-{resume_id}.md\""),
            ),
        ],
        markdown,
    ))
}
