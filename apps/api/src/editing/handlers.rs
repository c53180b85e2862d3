//! Axum route handlers for the edit-session API.
//!
//! A resume has at most one open session. Ops are applied to the working copy
//! only; the stored document changes on commit.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::editing::EditOp;
use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub resume_id: Uuid,
    pub editing: bool,
    pub document: ResumeDocument,
}

#[derive(Debug, Serialize)]
pub struct ApplyEditResponse {
    pub resume_id: Uuid,
    /// False when the op addressed an item index that does not exist.
    pub applied: bool,
    pub document: ResumeDocument,
}

/// POST /api/v1/resumes/:id/edit
pub async fn handle_begin_edit(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let document = state
        .store
        .update(resume_id, |ws| Ok(ws.begin_edit()?.clone()))
        .await?;

    Ok(Json(SessionResponse {
        resume_id,
        editing: true,
        document,
    }))
}

/// GET /api/v1/resumes/:id/edit
pub async fn handle_get_working_copy(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let document = state
        .store
        .read(resume_id, |ws| Ok(ws.working_copy()?.clone()))
        .await?;

    Ok(Json(SessionResponse {
        resume_id,
        editing: true,
        document,
    }))
}

/// PATCH /api/v1/resumes/:id/edit
///
/// Body is a single tagged `EditOp`, e.g.
/// `{"op":"set_scalar_field","field":"name","value":"Jane"}`.
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(op): Json<EditOp>,
) -> Result<Json<ApplyEditResponse>, AppError> {
    let (applied, document) = state
        .store
        .update(resume_id, |ws| {
            let applied = ws.apply_edit(op)?;
            Ok((applied, ws.working_copy()?.clone()))
        })
        .await?;

    if !applied {
        tracing::debug!("Edit op on resume {resume_id} addressed a missing item; ignored");
    }

    Ok(Json(ApplyEditResponse {
        resume_id,
        applied,
        document,
    }))
}

/// POST /api/v1/resumes/:id/edit/commit
pub async fn handle_commit_edit(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let document = state
        .store
        .update(resume_id, |ws| Ok(ws.commit_edit()?.clone()))
        .await?;

    Ok(Json(SessionResponse {
        resume_id,
        editing: false,
        document,
    }))
}

/// POST /api/v1/resumes/:id/edit/cancel
pub async fn handle_cancel_edit(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let document = state
        .store
        .update(resume_id, |ws| Ok(ws.cancel_edit()?.clone()))
        .await?;

    Ok(Json(SessionResponse {
        resume_id,
        editing: false,
        document,
    }))
}
