mod core;
mod features;
mod shared;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::http::RetryingClient;
use crate::core::openapi::ApiDoc;
use crate::core::{database, middleware};
use crate::features::favourites::{routes as favourites_routes, FavouriteService};
use crate::features::history::HistoryService;
use crate::features::recommendations::{
    routes as recommendations_routes, CatalogService, GenreResolverService,
};

fn main() -> anyhow::Result<()> {
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?
        .block_on(run(worker_threads))
}

async fn run(worker_threads: usize) -> anyhow::Result<()> {
    // .env before the subscriber so RUST_LOG from the file is honored
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    tracing::info!(
        available_cpus = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
        worker_threads,
        pid = std::process::id(),
        "Configuration loaded"
    );

    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; genre resolution will default to Drama");
    }
    if config.tmdb.api_key.is_none() {
        tracing::warn!("TMDB_API_KEY not set; catalog lookups will return no movies");
    }

    // Lazy pool: a database outage degrades persistence instead of failing
    // startup
    let pool = database::create_pool(&config.database)?;
    tracing::info!("Database connection pool created (lazy connect)");

    // One retrying client shared by both outbound integrations
    let http_client = RetryingClient::default();

    let genre_resolver = Arc::new(GenreResolverService::new(
        http_client.clone(),
        config.gemini.clone(),
    ));
    let catalog_service = Arc::new(CatalogService::new(http_client, config.tmdb.clone()));
    let history_service = Arc::new(HistoryService::new(pool.clone()));
    let favourite_service = Arc::new(FavouriteService::new(pool));
    tracing::info!(model = %config.gemini.model, "Services initialized");

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(recommendations_routes::routes(
            genre_resolver,
            catalog_service,
            history_service,
        ))
        .merge(favourites_routes::routes(favourite_service))
        .route("/health", get(health_check))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))?;

    let listener = bind_listener(socket_addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Bind the listening socket through socket2 so keepalive and address reuse
/// can be set before the listener is handed to tokio
fn bind_listener(addr: SocketAddr) -> anyhow::Result<tokio::net::TcpListener> {
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}
