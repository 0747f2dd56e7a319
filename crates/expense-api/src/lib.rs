//! HTTP API server for the expense tracker
//!
//! Routes are organized into modules:
//! - routes::expenses: create, list, fetch, update, delete (under the base path)
//! - routes::health: health payload at `/`
//!
//! Every error response has the body `{"error": true, "message": ...}`,
//! including unknown routes, unsupported methods and handler panics.

pub mod error;
pub mod routes;

use axum::extract::{OriginalUri, Request};
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use expense_config::Config;
use expense_core::ExpenseService;
use log::{error, info};
use std::any::Any;
use std::time::Instant;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: ExpenseService,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::health::health_check;

    let base_path = state.config.server.base_path.trim_end_matches('/').to_string();
    let expenses = routes::expenses::router();

    let router = Router::new().route("/", get(health_check));
    let router = if base_path.is_empty() {
        router.merge(expenses)
    } else {
        router.nest(&base_path, expenses)
    };

    router
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(log_request)),
        )
        .with_state(state)
}

/// Catch-all for paths no route matches
async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound {
        message: format!("Cannot {} {}", method, uri.path()),
    }
}

/// Catch-all for a known path requested with a method it does not serve
pub(crate) async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed {
        message: format!("Cannot {} {}", method, uri.path()),
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("Request handler panicked: {}", details);

    ApiError::unexpected().into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        target: "expense::http",
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Start the server
pub async fn start_server(config: Config, service: ExpenseService) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let environment = config.app.environment.clone();
    let base_path = config.server.base_path.clone();
    let state = AppState { service, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Expense Tracker Service listening on http://{}", addr);
    info!("Environment: {}", environment);
    info!("Expense API mounted at {}/expenses", base_path.trim_end_matches('/'));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}
