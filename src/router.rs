use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::db::SchoolStore;
use crate::handlers::schools;

/// Shared handler state. The store (and its pool) is constructed once in
/// `main` and injected here; nothing else is shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub store: SchoolStore,
}

impl AppState {
    pub fn new(store: SchoolStore) -> Self {
        Self { store }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(schools::service_banner))
        .route("/api/school/addschools", post(schools::add_school))
        .route("/api/school/listschools", get(schools::list_schools))
        .route(
            "/api/school/{id}",
            get(schools::get_school)
                .put(schools::update_school)
                .delete(schools::delete_school),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
