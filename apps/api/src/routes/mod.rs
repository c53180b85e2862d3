pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::editing::handlers as editing;
use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route(
            "/api/v1/resumes/generate",
            post(generation::handle_generate).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/resumes/sample", post(generation::handle_load_sample))
        // Render API
        .route("/api/v1/resumes/:id", get(render::handle_get_resume))
        .route("/api/v1/resumes/:id/render", get(render::handle_render))
        .route("/api/v1/resumes/:id/export", get(render::handle_export))
        // Edit session API
        .route(
            "/api/v1/resumes/:id/edit",
            post(editing::handle_begin_edit)
                .get(editing::handle_get_working_copy)
                .patch(editing::handle_apply_edit),
        )
        .route(
            "/api/v1/resumes/:id/edit/commit",
            post(editing::handle_commit_edit),
        )
        .route(
            "/api/v1/resumes/:id/edit/cancel",
            post(editing::handle_cancel_edit),
        )
        .with_state(state)
}
