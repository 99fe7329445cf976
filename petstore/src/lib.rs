//! # petstore: Pet Store Management Service
//!
//! `petstore` is a CRUD web service managing pet stores and their associated
//! employees and customers, backed by PostgreSQL. It exposes a small REST
//! API for creating, updating, listing and deleting stores, and for
//! attaching employees (one-to-many) and customers (many-to-many) to them.
//!
//! ## Overview
//!
//! Every request follows the same shape: the API layer deserializes a JSON
//! payload, the service layer opens a transaction and runs the
//! find-or-create / field-copy / association-wiring sequence through the
//! repositories, and the result is projected back to a wire DTO. A payload
//! without an id inserts a fresh row; a payload with an id loads and
//! overwrites the existing row, failing with 404 when it is gone and with
//! 409 when the entity exists but belongs to a different store than the one
//! named in the request path.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL for all persistence needs. It can
//! operate with either an embedded PostgreSQL instance (useful for
//! development and standalone deployments) or an external PostgreSQL
//! database (recommended for production).
//!
//! The **API layer** ([`api`]) exposes the resource routes under `/store`,
//! documented with OpenAPI and served with Scalar at `/docs`. The
//! **service layer** ([`service`]) owns the transaction per operation. The
//! **database layer** ([`db`]) uses the repository pattern to abstract data
//! access; each entity has a corresponding repository that handles queries
//! and mutations. Errors flow through [`errors::Error`], which maps to
//! `{"message": ...}` JSON responses with appropriate status codes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use petstore::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = petstore::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize telemetry (structured logging)
//!     petstore::telemetry::init_telemetry()?;
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and automatically runs
//! migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! // Run migrations
//! petstore::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod service;
pub mod telemetry;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::openapi::ApiDoc;
use axum::{
    Router,
    routing::{get, post, put},
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{CustomerId, EmployeeId, StoreId};

/// Application state shared across all request handlers.
///
/// Contains the database connection pool and the loaded configuration;
/// handlers reach the delete policy and any future knobs through it.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the petstore database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Setup the database connection and run migrations.
/// Returns: (embedded_db, pool)
async fn setup_database(config: &Config) -> anyhow::Result<(Option<db::embedded::EmbeddedDatabase>, PgPool)> {
    // Database connection - handle both embedded and external
    let (embedded_db, database_url) = match &config.database {
        config::DatabaseConfig::Embedded { data_dir, persistent } => {
            info!("Starting with embedded database (persistent: {})", persistent);
            if !persistent {
                info!("persistent=false: database will be ephemeral and data will be lost on shutdown");
            }
            #[cfg(feature = "embedded-db")]
            {
                let embedded_db = db::embedded::EmbeddedDatabase::start(data_dir.clone(), *persistent).await?;
                let url = embedded_db.connection_string().to_string();
                (Some(embedded_db), url)
            }
            #[cfg(not(feature = "embedded-db"))]
            {
                let _ = data_dir;
                anyhow::bail!(
                    "Embedded database is configured but the feature is not enabled. \
                     Rebuild with --features embedded-db to use embedded database."
                );
            }
        }
        config::DatabaseConfig::External { url } => {
            info!("Using external database");
            (None::<db::embedded::EmbeddedDatabase>, url.clone())
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .min_connections(config.pool.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.pool.acquire_timeout_secs))
        .connect(&database_url)
        .await?;
    migrator().run(&pool).await?;

    Ok((embedded_db, pool))
}

/// Build the application router with all endpoints and middleware.
///
/// This constructs the complete Axum router with:
/// - Store/employee/customer resource routes under `/store`
/// - A `/healthz` liveness route
/// - OpenAPI docs served with Scalar at `/docs`
/// - CORS and tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> Router {
    let store_routes = Router::new()
        .route(
            "/store",
            post(api::handlers::stores::create_store).get(api::handlers::stores::list_stores),
        )
        .route(
            "/store/{store_id}",
            put(api::handlers::stores::update_store)
                .get(api::handlers::stores::get_store)
                .delete(api::handlers::stores::delete_store),
        )
        .route("/store/{store_id}/employee", post(api::handlers::employees::add_employee))
        .route("/store/{store_id}/customer", post(api::handlers::customers::add_customer))
        .with_state(state);

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(store_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] initializes the database (embedded or
///    external), runs migrations and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts
///    handling requests
/// 3. **Shutdown**: when the shutdown signal resolves, connections are
///    closed and the embedded database (if any) is stopped
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
    _embedded_db: Option<db::embedded::EmbeddedDatabase>,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application over an existing pool.
    ///
    /// Used by tests, where the pool is provisioned per test by
    /// `#[sqlx::test]`; migrations are still applied (a no-op when already
    /// run).
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        let (embedded_db, pool) = match pool {
            Some(pool) => {
                migrator().run(&pool).await?;
                (None, pool)
            }
            None => setup_database(&config).await?,
        };

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state);

        Ok(Self {
            router,
            config,
            pool,
            _embedded_db: embedded_db,
        })
    }

    /// Convert application into a test server (for tests)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Pet store service listening on http://{}, docs at http://localhost:{}/docs",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        // Clean up embedded database if it exists
        #[cfg(feature = "embedded-db")]
        if let Some(embedded_db) = self._embedded_db {
            info!("Shutting down embedded database...");
            embedded_db.stop().await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::*;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_openapi_docs_are_served(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.get("/docs").await;
        response.assert_status_ok();
    }
}
