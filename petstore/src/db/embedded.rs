//! Embedded PostgreSQL database support.
//!
//! Lets the service run standalone without an external database. Enabled via
//! the `embedded-db` cargo feature (on by default); the server binaries are
//! downloaded and managed by [`postgresql_embedded`].

#[cfg(feature = "embedded-db")]
use postgresql_embedded::{PostgreSQL, Settings};
#[cfg(feature = "embedded-db")]
use std::path::PathBuf;
#[cfg(feature = "embedded-db")]
use tracing::info;

/// A running embedded PostgreSQL server and the connection string to reach it.
#[cfg(feature = "embedded-db")]
pub struct EmbeddedDatabase {
    postgresql: PostgreSQL,
    connection_string: String,
}

#[cfg(feature = "embedded-db")]
impl EmbeddedDatabase {
    const DATABASE_NAME: &'static str = "petstore";

    /// Start an embedded PostgreSQL server.
    ///
    /// With `persistent` set to false the data directory is temporary and all
    /// data is lost on shutdown.
    pub async fn start(data_dir: Option<PathBuf>, persistent: bool) -> anyhow::Result<Self> {
        let mut settings = Settings::default();
        settings.temporary = !persistent;
        if let Some(dir) = data_dir {
            settings.data_dir = dir;
        }

        let mut postgresql = PostgreSQL::new(settings);
        postgresql.setup().await?;
        postgresql.start().await?;

        if !postgresql.database_exists(Self::DATABASE_NAME).await? {
            postgresql.create_database(Self::DATABASE_NAME).await?;
        }

        let connection_string = postgresql.settings().url(Self::DATABASE_NAME);
        info!("Embedded PostgreSQL started");

        Ok(Self {
            postgresql,
            connection_string,
        })
    }

    /// Connection string for the embedded database
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Stop the embedded server, flushing and releasing its data directory
    pub async fn stop(self) -> anyhow::Result<()> {
        self.postgresql.stop().await?;
        Ok(())
    }
}

/// Stub so the type can be named when the feature is disabled. Construction
/// is rejected in `setup_database` before this is ever instantiated.
#[cfg(not(feature = "embedded-db"))]
pub struct EmbeddedDatabase;
