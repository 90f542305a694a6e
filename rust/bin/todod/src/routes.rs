//! Route registration: the ToDo module plus system endpoints.

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;
use todo::TodoModule;
use tower_http::trace::TraceLayer;

/// Build the complete router. Request tracing is only added when
/// `trace` is set (development mode).
pub fn build_router(module: &TodoModule, trace: bool) -> Router {
    let available = module.store().is_available();

    let system_routes = Router::new()
        .route("/health", get(move || health(available)))
        .route("/version", get(version));

    let app = system_routes.merge(module.routes());

    if trace {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

async fn health(store_available: bool) -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "store": if store_available { "connected" } else { "unavailable" },
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "todod",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
