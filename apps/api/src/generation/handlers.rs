//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate_resume, SourceDocument};
use crate::models::fixtures::sample_resume;
use crate::models::resume::ResumeDocument;
use crate::normalize::SanitizeReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume_id: Uuid,
    pub document: ResumeDocument,
    pub warnings: SanitizeReport,
}

/// Fields pulled out of the multipart upload.
struct UploadForm {
    file: Option<(bytes::Bytes, String)>,
    page_count: Option<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Multipart upload: `file` (PDF or DOCX) and optional `page_count`.
/// Runs the full pipeline and stores the resulting document.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let form = read_upload_form(multipart).await?;

    let (bytes, mime) = form
        .file
        .ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let source = SourceDocument::new(bytes, &mime)?;
    let page_count = form.page_count.unwrap_or(state.config.default_page_count);

    let generated = generate_resume(state.generator.as_ref(), &source, page_count).await?;
    let view = state.store.insert(generated.document).await;

    Ok(Json(GenerateResponse {
        resume_id: view.resume_id,
        document: view.document,
        warnings: generated.warnings,
    }))
}

/// POST /api/v1/resumes/sample
///
/// Stores the bundled sample resume without calling the backend.
pub async fn handle_load_sample(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let view = state.store.insert(sample_resume()).await;
    Ok(Json(GenerateResponse {
        resume_id: view.resume_id,
        document: view.document,
        warnings: SanitizeReport::default(),
    }))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm {
        file: None,
        page_count: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let mime = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                form.file = Some((bytes, mime));
            }
            Some("page_count") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read page_count: {e}")))?;
                let count = raw.trim().parse::<u8>().map_err(|_| {
                    AppError::Validation(format!("page_count must be a number, got '{raw}'"))
                })?;
                form.page_count = Some(count);
            }
            _ => {}
        }
    }

    Ok(form)
}
