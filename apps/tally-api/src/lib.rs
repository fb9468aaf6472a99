//! # Tally API
//!
//! HTTP front for sale recording.
//!
//! ## Module Organization
//! ```text
//! tally_api/
//! ├── lib.rs          ◄─── You are here (state, router, tracing)
//! ├── config.rs       ◄─── Environment configuration
//! ├── error.rs        ◄─── ServiceError → HTTP response
//! └── routes/
//!     ├── sales.rs    ◄─── POST /sales
//!     └── health.rs   ◄─── GET /health
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `TALLY_PORT` - HTTP port (default: 3000)
//! - `TALLY_DATABASE_PATH` - SQLite file (default: ./data/tally.db)
//! - `TALLY_DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `RUST_LOG` - log filter (default: `info,tally_*=debug,sqlx=warn`)

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use tracing_subscriber::EnvFilter;

use tally_db::Database;
use tally_sales::SalesService;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sales: SalesService,
}

impl AppState {
    /// Wires the sale service to the SQLite repositories of `db`.
    pub fn new(db: Database) -> Self {
        let sales = SalesService::from_database(&db);
        AppState { db, sales }
    }
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    routes::router(state)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_sales=trace` - Trace the sale service only
/// - Default: INFO, DEBUG for tally crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,tally_api=debug,tally_sales=debug,tally_db=debug,sqlx=warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
