use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::create_cors_layer;
use axum::{Json, Router, routing::get};
use core_config::cors::CorsConfig;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Creates the application router with the shared cross-cutting layers.
///
/// This sets up:
/// - API routes nested under `/api`
/// - `root` routes (health, readiness) merged at the top level
/// - the OpenAPI document at `/api-docs/openapi.json`
/// - a `{message}` 404 fallback
///
/// Request tracing and the CORS allow-list wrap every route above.
///
/// # Errors
/// `InvalidInput` when the CORS configuration cannot be turned into a layer.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/products", products::handlers::router(service));
/// let router = create_router::<ApiDoc>(api_routes, health_router(app_info!()), &config.cors)?;
/// ```
pub fn create_router<T>(apis: Router, root: Router, cors: &CorsConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(cors)?;
    info!(
        "CORS configured with allowed origins: {}",
        cors.allowed_origins.join(",")
    );

    let openapi = T::openapi();

    let router = Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .nest("/api", apis)
        .merge(root)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer);

    Ok(router)
}

/// Server with coordinated shutdown and cleanup.
///
/// On SIGINT/SIGTERM the server stops accepting connections, drains
/// in-flight requests, then runs `cleanup` bounded by `shutdown_timeout`.
/// `cleanup` also runs when the listener cannot bind.
///
/// ```ignore
/// let client = state.mongo_client.clone();
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     database::mongodb::close(client).await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = match tokio::net::TcpListener::bind(server_config.address()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", server_config.address(), e);
            run_cleanup(cleanup, shutdown_timeout).await;
            return Err(e);
        }
    };
    if let Ok(addr) = listener.local_addr() {
        info!("Server starting on {}", addr);
    }

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { shutdown_handle.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // Server errors also end in cleanup so the store connection is released
    coordinator.shutdown();
    run_cleanup(cleanup, shutdown_timeout).await;

    serve_result
}

async fn run_cleanup<F>(cleanup: F, timeout: Duration)
where
    F: Future<Output = ()>,
{
    info!("Starting cleanup tasks (timeout: {:?})", timeout);
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!("Cleanup exceeded timeout of {:?}, forcing shutdown", timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test api"))]
    struct TestDoc;

    fn app() -> Router {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        let root = Router::new().route("/health", get(|| async { "ok" }));
        create_router::<TestDoc>(apis, root, &CorsConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_are_nested() {
        let response = app()
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_message() {
        let response = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "The requested resource was not found");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["info"]["title"], "test api");
    }

    #[tokio::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let response = app()
            .oneshot(
                Request::get("/api/ping")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_cors_headers() {
        let response = app()
            .oneshot(
                Request::get("/api/ping")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_root_routes_share_cors_layer() {
        let response = app()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_cleanup_runs_when_bind_fails() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let server = ServerConfig::new("127.0.0.1".to_string(), port);

        let cleaned = Arc::new(AtomicBool::new(false));
        let flag = cleaned.clone();
        let result = create_production_app(
            Router::new(),
            &server,
            Duration::from_secs(1),
            async move { flag.store(true, Ordering::SeqCst) },
        )
        .await;

        assert!(result.is_err());
        assert!(cleaned.load(Ordering::SeqCst));
    }
}
