use axum::http::{HeaderName, Request, Response};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::{net::SocketAddr, sync::Arc, time::Duration};

use aviario::{
    bridge::{self, Bridge, HeadlessWindow},
    config::AppConfig,
    db::{create_pool, ensure_schema},
    routes::create_app,
    services::product_service::ProductGateway,
    shutdown,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,aviario=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url, config.max_connections).await?;
    ensure_schema(&pool).await?;

    let gateway = ProductGateway::new(pool);
    match gateway.ping().await {
        Ok(now) => tracing::info!(%now, "database connection ok"),
        Err(err) => tracing::error!(error = %err, "database connection check failed"),
    }

    let (bridge_handle, dispatcher) = bridge::spawn(Bridge::new(
        gateway.clone(),
        Arc::new(HeadlessWindow::new()),
    ));
    let state = AppState::new(bridge_handle, &config.script_cdn);

    let concurrency_limit_layer = ConcurrencyLimitLayer::new(100);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::debug!(
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    let app = create_app(state, &config.content_security_policy())?
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(concurrency_limit_layer);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(async {
            if let Err(err) = shutdown::signal().await {
                tracing::error!(error = %err, "shutdown signal handler failed");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    // The router and its bridge handles are gone; let queued requests finish.
    match tokio::time::timeout(Duration::from_secs(5), dispatcher).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::error!(error = %err, "bridge dispatcher panicked"),
        Err(_) => tracing::warn!("bridge dispatcher did not stop in time"),
    }
    gateway.close().await;
    tracing::info!("database pool closed");

    Ok(())
}
