pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use state::AppState;

/// Every `/api` route, with state applied.
pub fn build_router(state: Arc<AppState>) -> Router {
    let order_routes = Router::new()
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/validate", post(handlers::validate_order))
        .route("/orders/search", get(handlers::search_orders))
        .route("/orders/stats", get(handlers::order_stats))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/status", put(handlers::update_order_status))
        .route("/contact", post(handlers::submit_contact));

    let user_routes = Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/register", post(handlers::register_user))
        .route("/users/login", post(handlers::login_user))
        .route(
            "/users/profile/{id}",
            get(handlers::get_user_profile).put(handlers::update_user_profile),
        )
        .route("/users/{id}", delete(handlers::delete_user));

    let catalog_routes = Router::new()
        .route("/games", get(handlers::list_games))
        .route("/games/categories", get(handlers::game_categories))
        .route("/games/platforms", get(handlers::game_platforms))
        .route("/games/featured", get(handlers::featured_games))
        .route("/games/search", get(handlers::search_games))
        .route("/games/{id}", get(handlers::get_game))
        .route("/accessories", get(handlers::list_accessories))
        .route(
            "/accessories/categories",
            get(handlers::accessory_categories),
        )
        .route("/accessories/brands", get(handlers::accessory_brands))
        .route("/accessories/featured", get(handlers::featured_accessories))
        .route("/accessories/search", get(handlers::search_accessories))
        .route("/accessories/by-price", get(handlers::accessories_by_price))
        .route("/accessories/{id}", get(handlers::get_accessory));

    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(order_routes)
        .merge(user_routes)
        .merge(catalog_routes);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .with_state(state)
        // stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
}

/// Bind and serve until Ctrl+C.
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind to {}: {}", addr, e))?;

    tracing::info!(%addr, "Gateway listening");
    tracing::info!("API docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
