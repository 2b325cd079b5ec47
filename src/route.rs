use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{handler::*, middleware::mw_require_auth, AppState};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let auth = Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in));

    let api = Router::new()
        .route("/lists", get(get_all_lists).post(create_list))
        .route(
            "/lists/:id",
            get(get_list_by_id).put(update_list).delete(delete_list),
        )
        .route("/lists/:id/items", get(get_all_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item_by_id).put(update_item).delete(delete_item),
        )
        .route_layer(from_fn_with_state(app_state.clone(), mw_require_auth));

    Router::new()
        .route("/", get(health_checker_handler))
        .nest("/auth", auth)
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
