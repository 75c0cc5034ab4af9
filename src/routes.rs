// routes.rs
use axum::{
    routing::{get, post},
    Router,
};
use http::Method;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{self, AppState};

/// Poll routes under the state's mount path.
///
/// Paths are spelled out in full rather than nested so that the index keeps
/// its trailing slash (`/polls/`).
pub fn create_routes(state: AppState) -> Router {
    let mount = state.mount_path.to_string();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_origin(Any);

    let api: Router<AppState> = Router::new()
        .route(
            &format!("{mount}/api/questions/{{id}}/results"),
            get(handlers::results_json),
        )
        .layer(cors);

    let mut pages = Router::new();
    if !mount.is_empty() {
        pages = pages.route(&mount, get(handlers::index_redirect));
    }

    pages
        .route(&format!("{mount}/"), get(handlers::index))
        .route(&format!("{mount}/{{id}}/"), get(handlers::detail))
        .route(&format!("{mount}/{{id}}/results/"), get(handlers::results))
        .route(&format!("{mount}/{{id}}/vote/"), post(handlers::vote))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
