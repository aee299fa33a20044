mod options;
mod page;
mod sessions;
mod store;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use interviewbot_core::InterviewController;
use interviewbot_logging::Logger;

pub use store::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub controller: Arc<InterviewController>,
    pub logger: Arc<Logger>,
}

pub fn create_router(
    store: Arc<SessionStore>,
    controller: Arc<InterviewController>,
    logger: Arc<Logger>,
) -> Router {
    let state = AppState {
        store,
        controller,
        logger,
    };

    Router::new()
        .route("/", get(page::index))
        .route("/api/options", get(options::get_options))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route(
            "/api/sessions/{id}/preferences",
            post(sessions::submit_preferences),
        )
        .route("/api/sessions/{id}/begin", post(sessions::begin_interview))
        .route("/api/sessions/{id}/messages", post(sessions::send_message))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
