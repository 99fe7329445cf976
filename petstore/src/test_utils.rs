//! Test utilities for integration testing (available with `test-utils` feature).

use crate::config::{Config, DatabaseConfig, DeleteBehavior, PoolSettings};
use crate::db::handlers::{Customers, Repository, Stores};
use crate::db::models::customers::{CustomerDBResponse, CustomerWriteDBRequest};
use crate::db::models::stores::{StoreDBResponse, StoreWriteDBRequest};
use crate::types::{CustomerId, StoreId};
use axum_test::TestServer;
use sqlx::PgPool;

/// Build a test server over a pool provisioned by `#[sqlx::test]`
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();
    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");
    app.into_test_server()
}

/// Same as [`create_test_app`], with restrict-mode store deletion
pub async fn create_test_restrict_app(pool: PgPool) -> TestServer {
    let mut config = create_test_config();
    config.delete_behavior = DeleteBehavior::Restrict;
    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");
    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::External {
            // Unused: tests always hand the application a ready-made pool
            url: "postgresql://localhost/petstore-test".to_string(),
        },
        pool: PoolSettings {
            max_connections: 1,
            ..Default::default()
        },
        delete_behavior: DeleteBehavior::Cascade,
    }
}

pub async fn create_test_store(pool: &PgPool, name: &str) -> StoreDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Stores::new(&mut conn);
    repo.create(&StoreWriteDBRequest {
        name: Some(name.to_string()),
        city: Some("Springfield".to_string()),
        ..Default::default()
    })
    .await
    .expect("Failed to create test store")
}

pub async fn create_test_customer(pool: &PgPool, first_name: &str) -> CustomerDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Customers::new(&mut conn);
    repo.create(&CustomerWriteDBRequest {
        first_name: Some(first_name.to_string()),
        email: Some(format!("{}@example.com", first_name.to_lowercase())),
        ..Default::default()
    })
    .await
    .expect("Failed to create test customer")
}

pub async fn link_test_customer(pool: &PgPool, customer_id: CustomerId, store_id: StoreId) {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Customers::new(&mut conn);
    repo.link_to_store(customer_id, store_id)
        .await
        .expect("Failed to link test customer");
}
