//! Social Login Service - 服务入口

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use social_adapter_postgres::{PostgresConfig, create_pool};
use social_bootstrap::{RuntimeConfig, init_runtime, shutdown_signal};
use social_config::AppConfig;
use social_login::api::http::{AppState, routes};
use social_login::application::services::{LoginFlow, UserResolver};
use social_login::infrastructure::persistence::{
    PostgresAccessTokenRepository, PostgresUserRepository,
};
use social_telemetry::init_metrics;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let runtime = RuntimeConfig::default();
    let config = AppConfig::load(&runtime.config_dir)
        .with_context(|| format!("loading config from {}", runtime.config_dir))?;
    init_runtime(&config);

    let metrics = init_metrics()?;

    let pool = create_pool(
        &PostgresConfig::new(config.database.url.expose_secret().as_str())
            .with_max_connections(config.database.max_connections),
    )
    .await?;

    let http = reqwest::Client::builder()
        .user_agent(concat!("social-login/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;

    let resolver = UserResolver::new(
        Arc::new(PostgresAccessTokenRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool.clone())),
    );
    let login_flow = LoginFlow::new(
        http,
        config.github.clone(),
        config.convert_token.clone(),
        resolver,
    );

    let app = routes(AppState::new(login_flow, pool, metrics)).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    info!(%addr, "Starting social-login");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
