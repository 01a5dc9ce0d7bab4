pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::editor::handlers;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template catalog
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route("/api/v1/templates/:id/style", get(templates::handle_get_style))
        // Documents
        .route(
            "/api/v1/resumes",
            post(handlers::handle_create_resume).get(handlers::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get_resume).delete(handlers::handle_delete_resume),
        )
        // Content
        .route("/api/v1/resumes/:id/basics", put(handlers::handle_update_basics))
        .route(
            "/api/v1/resumes/:id/collections",
            put(handlers::handle_replace_collection),
        )
        .route("/api/v1/resumes/:id/items", post(handlers::handle_add_item))
        .route(
            "/api/v1/resumes/:id/items/:item_id",
            put(handlers::handle_update_item),
        )
        .route(
            "/api/v1/resumes/:id/items/:kind/:item_id",
            delete(handlers::handle_remove_item),
        )
        .route(
            "/api/v1/resumes/:id/items/:kind/:item_id/visibility",
            put(handlers::handle_set_item_visibility),
        )
        .route(
            "/api/v1/resumes/:id/skills/suggested",
            post(handlers::handle_add_suggested_skills),
        )
        .route(
            "/api/v1/resumes/:id/metadata",
            patch(handlers::handle_update_metadata),
        )
        // Layout
        .route(
            "/api/v1/resumes/:id/layout",
            get(handlers::handle_get_layout).put(handlers::handle_reorder),
        )
        .route(
            "/api/v1/resumes/:id/layout/move",
            post(handlers::handle_move_section),
        )
        // Render
        .route("/api/v1/resumes/:id/render", get(handlers::handle_render))
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
