use std::any::Any;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::{header, Method},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};

use crate::{error::ApiError, handlers, metrics, state::AppState};

pub fn info_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::api_info).fallback(handlers::method_not_allowed),
        )
        .route(
            "/docs",
            get(handlers::api_docs).fallback(handlers::method_not_allowed),
        )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route(
        "/health",
        get(handlers::health_check).fallback(handlers::method_not_allowed),
    )
}

pub fn validation_routes() -> Router<AppState> {
    Router::new().route(
        "/validate",
        post(handlers::validate_submission).fallback(handlers::method_not_allowed),
    )
}

pub fn observability_routes() -> Router<AppState> {
    Router::new().route(
        "/metrics",
        get(handlers::metrics_endpoint).fallback(handlers::method_not_allowed),
    )
}

/// Browser clients may call the API from any origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Panic recovery sits inside the request logger so a panicking request is
/// still logged and counted with its 500 status.
pub fn with_middleware(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_logger))
        .layer(cors_layer())
}

/// Full application router with logging, panic recovery and CORS applied
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(info_routes())
        .merge(health_routes())
        .merge(validation_routes())
        .merge(observability_routes())
        .fallback(handlers::route_not_found);
    with_middleware(routes).with_state(state)
}

async fn request_logger(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());
    metrics::observe_http(method.as_str(), &path, status, elapsed.as_secs_f64());

    response
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = handlers::panic_message(err.as_ref());
    tracing::error!(error = %detail, "Unhandled panic while serving request");
    ApiError::internal(detail).into_response()
}
