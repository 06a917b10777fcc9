use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::handlers::{fallback, health, protected, public};
use crate::middleware::require_bearer;
use crate::state::AppState;

/// Build the HTTP routing table.
///
/// | Method | Path            | Auth   |
/// |--------|-----------------|--------|
/// | GET    | /contacts       | bearer |
/// | POST   | /contacts       |        |
/// | GET    | /contacts/:id   |        |
/// | PUT    | /contacts/:id   |        |
/// | DELETE | /contacts/:id   |        |
/// | POST   | /login          |        |
/// | POST   | /register       |        |
/// | GET    | /health         |        |
pub fn router(state: AppState, api: &ApiConfig) -> Router {
    // route_layer only wraps the GET registered so far; POST stays public
    let contacts_collection = get(protected::contacts::contacts_get)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .post(public::contacts::contact_post);

    let router = Router::new()
        .route("/contacts", contacts_collection)
        .route(
            "/contacts/:id",
            get(public::contacts::contact_get)
                .put(public::contacts::contact_put)
                .delete(public::contacts::contact_delete),
        )
        .route("/login", post(public::auth::login_post))
        .route("/register", post(public::auth::register_post))
        .route("/health", get(health::health))
        .fallback(fallback::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    let router = if api.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router
        .layer(CatchPanicLayer::custom(fallback::handle_panic))
        .layer(TraceLayer::new_for_http())
}
