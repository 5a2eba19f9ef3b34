//! Wedding planner API server binary.
//!
//! Loads configuration, connects to PostgreSQL, serves the REST API and
//! shuts down gracefully on SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use wedding_api::config::{ApiConfig, PRODUCTION, mask_database_url};
use wedding_core::auth::TokenService;
use wedding_core::auth::queries::PgUserRepository;
use wedding_core::weddings::PgWeddingRepository;

/// In-flight requests get this long after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// CLI arguments; every flag can also come from the environment.
#[derive(Parser, Debug)]
#[command(name = "wedding_server", about = "Wedding planner API server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Token signing secret.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Deployment environment.
    #[arg(long, env = "ENV", default_value = "development")]
    env: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "MAX_DB_CONNS", default_value_t = 100)]
    max_connections: u32,

    /// Per-request timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `.env` is a development convenience only.
    if std::env::var("ENV").as_deref() != Ok(PRODUCTION) {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wedding_api=debug,wedding_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig::new(
        format!("0.0.0.0:{}", args.port),
        args.database_url,
        args.jwt_secret,
        args.env,
        args.max_connections,
        Duration::from_secs(args.request_timeout_secs),
    )?;

    info!(
        database_url = %mask_database_url(&config.database_url),
        bind_addr = %config.bind_addr,
        env = %config.env,
        "starting wedding_server"
    );

    let tokens = Arc::new(TokenService::new(config.jwt_secret.as_bytes())?);

    info!(
        max_connections = config.max_connections,
        "configuring connection pool"
    );
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    if config.is_production() {
        info!("production mode: skipping automatic migrations");
    } else {
        info!("running database migrations");
        wedding_api::migrate(&pool).await?;
    }

    let state = wedding_api::AppState {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        weddings: Arc::new(PgWeddingRepository::new(pool.clone())),
        tokens,
        config: config.clone(),
    };
    let app = wedding_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    let ct = CancellationToken::new();
    tokio::spawn(watch_signals(ct.clone()));

    let server = axum::serve(listener, app).with_graceful_shutdown({
        let ct = ct.clone();
        async move { ct.cancelled().await }
    });
    let mut server = tokio::spawn(async move { server.await });

    let finished = tokio::select! {
        res = &mut server => Some(res),
        _ = ct.cancelled() => tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await.ok(),
    };
    match finished {
        Some(Ok(Ok(()))) => info!("server stopped"),
        Some(Ok(Err(e))) => error!(error = %e, "server error"),
        Some(Err(e)) => error!(error = %e, "server task failed"),
        None => {
            warn!("graceful shutdown timed out, forcing exit");
            server.abort();
        }
    }

    pool.close().await;
    info!("database connections closed");

    Ok(())
}

/// Cancel `ct` on the first SIGINT or SIGTERM.
async fn watch_signals(ct: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
    ct.cancel();
}
