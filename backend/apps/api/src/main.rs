//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use mining::{
    BasisPoints, FileSessionStore, MiningAppState, MiningConfig, PgSessionStore, RewardEngine,
    SessionStore, TokenAmount, mining_router,
};
use platform::clock::SystemClock;
use platform::env::{var_opt, var_or};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,mining=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mining_config = load_mining_config()?;
    mining_config.validate()?;
    tracing::info!(
        cooldown_secs = mining_config.cooldown_secs(),
        base_rate = %mining_config.base_rate,
        bonus_per_referral = %mining_config.bonus_per_referral,
        max_referral_bonus = ?mining_config.max_referral_bonus,
        "Mining configuration loaded"
    );
    let mining_config = Arc::new(mining_config);

    // Session store: PostgreSQL when configured, otherwise a local file
    let mining_routes = match var_opt::<String>("DATABASE_URL")? {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let session_key = var_or("MINING_SESSION_KEY", "default".to_string())?;
            tracing::info!(session_key = %session_key, "Using PostgreSQL session store");
            build_mining_routes(PgSessionStore::new(pool, session_key), mining_config).await?
        }
        None => {
            let path = var_or("MINING_STATE_PATH", PathBuf::from("mining_session.json"))?;
            tracing::info!(path = %path.display(), "Using file session store");
            build_mining_routes(FileSessionStore::new(path), mining_config).await?
        }
    };

    // CORS configuration
    let frontend_origins = var_or(
        "FRONTEND_ORIGINS",
        "http://localhost:40922,http://127.0.0.1:40922".to_string(),
    )?;

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .expose_headers([header::RETRY_AFTER]);

    // Build router
    let app = Router::new()
        .nest("/api/mining", mining_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = var_or("MINING_LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 31113)))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Built-in defaults, overridden by whatever `MINING_*` variables are set
fn load_mining_config() -> anyhow::Result<MiningConfig> {
    let base = if cfg!(debug_assertions) {
        MiningConfig::development()
    } else {
        MiningConfig::default()
    };

    Ok(MiningConfig {
        cooldown: var_opt::<u64>("MINING_COOLDOWN_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(base.cooldown),
        bonus_per_referral: var_or::<BasisPoints>(
            "MINING_BONUS_PER_REFERRAL_BPS",
            base.bonus_per_referral,
        )?,
        base_rate: var_or::<TokenAmount>("MINING_BASE_RATE", base.base_rate)?,
        max_referral_bonus: var_opt::<BasisPoints>("MINING_MAX_REFERRAL_BONUS_BPS")?
            .or(base.max_referral_bonus),
    })
}

async fn build_mining_routes<S>(store: S, config: Arc<MiningConfig>) -> anyhow::Result<Router>
where
    S: SessionStore + Send + Sync + 'static,
{
    let engine = RewardEngine::restore(Arc::new(store), config).await?;
    let state = MiningAppState::new(engine, Arc::new(SystemClock));
    Ok(mining_router(state))
}
