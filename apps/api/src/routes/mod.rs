pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::ingest::handlers as ingest;
use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_end_session),
        )
        // Inputs
        .route(
            "/api/v1/sessions/:id/resume/upload",
            post(ingest::handle_upload_resume),
        )
        .route("/api/v1/sessions/:id/resume", put(session::handle_put_resume))
        .route("/api/v1/sessions/:id/job", put(session::handle_put_job))
        .route("/api/v1/sessions/:id/job/fetch", post(ingest::handle_fetch_job))
        // Generation
        .route(
            "/api/v1/sessions/:id/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/generate/documents",
            post(generation::handle_generate_documents),
        )
        .route(
            "/api/v1/sessions/:id/feedback",
            post(generation::handle_feedback),
        )
        // Artifacts and downloads
        .route(
            "/api/v1/sessions/:id/artifacts/:kind",
            put(session::handle_edit_artifact),
        )
        .route(
            "/api/v1/sessions/:id/artifacts/:kind/:format",
            get(render::handle_download_artifact),
        )
        .route("/api/v1/documents/:format", post(render::handle_render_text))
        .layer(body_limit)
        .with_state(state)
}
