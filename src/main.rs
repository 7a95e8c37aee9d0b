use std::sync::Arc;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use hotel_contact_backend::{
    background_task::start_rate_limit_eviction_task,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::{
        origin_guard::{OriginGuard, OriginPolicy},
        security_headers::security_headers,
    },
    repositories::{contact_me::ContactMeRepository, sqlx_repo::SqlxContactMeRepo},
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let pool = create_pool(&config.database_url, config.max_db_connections)
        .await
        .context("contact store is unreachable")?;

    run_migrations(&pool)
        .await
        .context("contact store could not be prepared")?;

    let contact_repo: Arc<dyn ContactMeRepository> = Arc::new(SqlxContactMeRepo::new(pool.clone()));
    let app_state = web::Data::new(AppState::new(&config, contact_repo));

    let origin_policy = OriginPolicy::new(config.cors_origins());
    if origin_policy.allows_any_origin() {
        tracing::warn!("No CORS allow-list configured; accepting requests from any origin");
    }

    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let limiter = app_state.rate_limiter();
    tracing::info!(
        "Contact submissions limited to {} per {} per client",
        limiter.limit(),
        humantime::format_duration(limiter.window())
    );

    let eviction = tokio::spawn(start_rate_limit_eviction_task(limiter));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(origin_policy.cors())
            .wrap(OriginGuard::new(origin_policy.clone()))
            .wrap(security_headers())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        handle.stop(true).await;
    });

    server.await.context("server error")?;

    eviction.abort();
    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

#[actix_web::main]
async fn main() {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing_subscriber::fmt().init();
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!("Fatal: {:#}", e);
        std::process::exit(1);
    }
}
