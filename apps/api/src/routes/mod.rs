pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::interview::{admin, handlers};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/session", post(handlers::handle_create_session))
        .route("/api/v1/session/:token", get(handlers::handle_get_status))
        .route(
            "/api/v1/session/:token/answer",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/session/:token/complete",
            post(handlers::handle_complete_session),
        )
        // Interview flow
        .route(
            "/api/v1/interview/question/:token",
            post(handlers::handle_next_question),
        )
        .route(
            "/api/v1/interview/glyph/:token",
            post(handlers::handle_glyph),
        )
        .route(
            "/api/v1/interview/summary/:token",
            post(handlers::handle_summary),
        )
        .route("/api/v1/result/:token", get(handlers::handle_result))
        .route("/api/v1/stats", get(handlers::handle_stats))
        // Legacy endpoints (token-less callers)
        .route(
            "/api/v1/interview/question",
            post(handlers::handle_legacy_questions),
        )
        .route(
            "/api/v1/interview/glyph",
            post(handlers::handle_legacy_glyph),
        )
        .route(
            "/api/v1/interview/summary",
            post(handlers::handle_legacy_summary),
        )
        // Admin (JSON + CSV only)
        .route("/admin/sessions", get(admin::handle_list_sessions))
        .route(
            "/admin/sessions/:token",
            delete(admin::handle_delete_session),
        )
        .route("/admin/stats", get(admin::handle_admin_stats))
        .route("/admin/export/sessions", get(admin::handle_export_sessions))
        .with_state(state)
}
