//! Route definitions for the Roasted API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::access_middleware, AppState};

/// Create API routes
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Passcode unlock (public)
        .route("/access/unlock", post(handlers::unlock))
        // Protected routes - live roast timer
        .nest("/timer", timer_routes(state))
        // Protected routes - green bean inventory
        .nest("/beans", bean_routes(state))
        // Protected routes - roast history
        .nest("/roasts", roast_routes(state))
}

/// Roast timer routes (protected)
fn timer_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_timer))
        .route("/start", post(handlers::start_roast))
        .route("/first-crack", post(handlers::log_first_crack))
        .route("/end-roast", post(handlers::end_roast))
        .route("/end-cooling", post(handlers::end_cooling))
        .route("/reset", post(handlers::reset_roast))
        .route("/save", post(handlers::save_roast))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            access_middleware,
        ))
}

/// Bean inventory routes (protected)
fn bean_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_beans).post(handlers::create_bean))
        .route("/:bean_id", get(handlers::get_bean))
        .route(
            "/:bean_id/adjustments",
            get(handlers::list_adjustments).post(handlers::adjust_quantity),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            access_middleware,
        ))
}

/// Roast history routes (protected)
fn roast_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_roasts).post(handlers::create_roast))
        .route("/latest", get(handlers::latest_roast))
        .route("/stats", get(handlers::history_stats))
        .route(
            "/:roast_id",
            get(handlers::get_roast).delete(handlers::delete_roast),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            access_middleware,
        ))
}
