use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vip_membership::adapters::http::{app_router, AppState, HttpSettings};
use vip_membership::adapters::{
    BcryptPasswordHasher, InMemoryRateLimiter, JwtSessionManager, PostgresAccountRepository,
    TracingEventPublisher,
};
use vip_membership::config::{AppConfig, MIN_PRODUCTION_SECRET_BYTES};
use vip_membership::domain::account::AdminPolicy;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server exited with error");
        eprintln!("vip-membership: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    if config.auth.jwt_secret.expose_secret().len() < MIN_PRODUCTION_SECRET_BYTES {
        warn!("JWT secret is shorter than the production minimum");
    }

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    let sessions = Arc::new(JwtSessionManager::new(
        &config.auth.jwt_secret,
        config.auth.issuer.clone(),
        config.auth.token_ttl(),
    ));

    let state = AppState {
        account_repository: Arc::new(PostgresAccountRepository::new(pool)),
        password_hasher: Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
        token_issuer: sessions.clone(),
        session_validator: sessions,
        login_limiter: Arc::new(InMemoryRateLimiter::new(
            config.rate_limit.login_attempts_per_window,
            config.rate_limit.window_secs,
        )),
        event_publisher: Arc::new(TracingEventPublisher::new()),
        admin_policy: AdminPolicy::new(&config.membership.super_admin_username),
        vip_duration_days: config.membership.vip_duration_days,
    };

    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = app_router(state, &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "VIP membership service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
