//! # Server Setup
//!
//! Application state, server configuration, and the HTTP server lifecycle.
//!
//! ## Lifecycle
//!
//! 1. Tracing, configuration and the store are initialized; any failure
//!    aborts startup.
//! 2. The router is served until SIGINT or SIGTERM.
//! 3. On a signal the listener stops accepting. In-flight requests get
//!    [`ServerConfig::shutdown_grace`] to finish; whatever is still running
//!    after that is dropped.
//! 4. The store is closed last.

// region: --- Imports
use crate::routes::create_router;
use axum::{extract::FromRef, Router};
use lib_core::{Config, DynStore, SqliteStore};
use lib_utils::{get_env_or, get_env_parse_or};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub config: Config,
}

impl FromRef<AppState> for DynStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8082";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8082")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        }
    }
}

impl ServerConfig {
    /// Read `HTTP_ADDR`, `ALLOWED_ORIGINS` and `SHUTDOWN_GRACE_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_address = get_env_or("HTTP_ADDR", DEFAULT_BIND_ADDRESS);
        let allowed_origins = parse_origins(&get_env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGIN));
        let grace_secs = get_env_parse_or("SHUTDOWN_GRACE_SECS", DEFAULT_SHUTDOWN_GRACE_SECS)?;

        Ok(Self {
            bind_address,
            allowed_origins,
            shutdown_grace: Duration::from_secs(grace_secs),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global tracing subscriber. Level comes from `LOG_LEVEL`.
pub fn init_tracing() -> anyhow::Result<()> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;

    info!(" Log level: {}", log_level);
    Ok(())
}

/// Initialize and run the HTTP server until a shutdown signal.
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading fails
/// - The database cannot be opened or migrated
/// - Server binding fails
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    init_tracing()?;

    info!(" STUDENTS API STARTING");

    let app_config = Config::load()?;
    info!("Environment: {}", app_config.app_env);
    info!("Database URL: {}", app_config.database_url);

    ensure_database_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let store = SqliteStore::connect(&app_config.database_url).await?.into_dyn();
    info!(" Migrations complete");

    let state = AppState {
        store: store.clone(),
        config: app_config,
    };
    let app = create_router(state, &server_config.allowed_origins);

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    info!(" SERVER READY: http://{}", server_config.bind_address);

    let served = serve_until(listener, app, shutdown_signal(), server_config.shutdown_grace).await;

    store.close().await;
    info!(" Database closed, bye");

    served
}

/// Serve `app` until `signal` resolves, then drain for at most `grace`.
///
/// Connections still open when the grace period ends are left to the
/// runtime, which drops them when the process exits.
pub async fn serve_until<F>(listener: TcpListener, app: Router, signal: F, grace: Duration) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => return Ok(joined??),
        _ = signal => {}
    }

    info!(" Shutdown signal received, draining for up to {:?}", grace);
    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => joined??,
        Err(_) => {
            warn!(" Grace period elapsed, dropping in-flight requests");
            server.abort();
        }
    }

    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for SIGINT: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_database_dir(database_url: &str) -> std::io::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }

    Ok(())
}

/// File path inside a `sqlite:` URL, or `None` for in-memory databases.
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.contains(":memory:") {
        None
    } else {
        Some(path)
    }
}
// endregion: --- Server Setup
