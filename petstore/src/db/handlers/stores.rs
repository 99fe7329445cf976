//! Database repository for pet stores.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::stores::{StoreDBResponse, StoreWriteDBRequest},
};
use crate::types::StoreId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Store {
    pub id: StoreId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Store> for StoreDBResponse {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            address: store.address,
            city: store.city,
            state: store.state,
            zip: store.zip,
            phone: store.phone,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

pub struct Stores<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Stores<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Stores<'c> {
    type WriteRequest = StoreWriteDBRequest;
    type Response = StoreDBResponse;
    type Id = StoreId;

    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &Self::WriteRequest) -> Result<Self::Response> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO pet_stores (name, address, city, state, zip, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.zip)
        .bind(&request.phone)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(StoreDBResponse::from(store))
    }

    #[instrument(skip(self), fields(store_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM pet_stores WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(store.map(StoreDBResponse::from))
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let stores = sqlx::query_as::<_, Store>("SELECT * FROM pet_stores ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(stores.into_iter().map(StoreDBResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(store_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::WriteRequest) -> Result<Self::Response> {
        // Whole-row field copy: a None overwrites the column with NULL
        let store = sqlx::query_as::<_, Store>(
            r#"
            UPDATE pet_stores SET
                name = $2,
                address = $3,
                city = $4,
                state = $5,
                zip = $6,
                phone = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.zip)
        .bind(&request.phone)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(StoreDBResponse::from(store))
    }

    #[instrument(skip(self), fields(store_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pet_stores WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn write_request(name: &str) -> StoreWriteDBRequest {
        StoreWriteDBRequest {
            name: Some(name.to_string()),
            address: Some("123 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
            zip: Some("62704".to_string()),
            phone: Some("555-0100".to_string()),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_assigns_id_and_echoes_fields(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Stores::new(&mut conn);

        let store = repo.create(&write_request("Pawsome")).await.expect("Failed to create store");

        assert!(store.id > 0);
        assert_eq!(store.name.as_deref(), Some("Pawsome"));
        assert_eq!(store.city.as_deref(), Some("Springfield"));
        assert_eq!(store.phone.as_deref(), Some("555-0100"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_assigns_distinct_ids(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Stores::new(&mut conn);

        let first = repo.create(&write_request("First")).await.unwrap();
        let second = repo.create(&write_request("Second")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_overwrites_all_fields(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Stores::new(&mut conn);
        let store = repo.create(&write_request("Pawsome")).await.unwrap();

        // phone omitted: the save is a field copy, so the column is cleared
        let update = StoreWriteDBRequest {
            name: Some("Pawsome II".to_string()),
            city: Some("Shelbyville".to_string()),
            ..Default::default()
        };
        let updated = repo.update(store.id, &update).await.expect("Failed to update store");

        assert_eq!(updated.id, store.id);
        assert_eq!(updated.name.as_deref(), Some("Pawsome II"));
        assert_eq!(updated.city.as_deref(), Some("Shelbyville"));
        assert_eq!(updated.phone, None);

        let reread = repo.get_by_id(store.id).await.unwrap().expect("Store should exist");
        assert_eq!(reread.name.as_deref(), Some("Pawsome II"));
        assert_eq!(reread.phone, None);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_by_id_unknown_returns_none(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Stores::new(&mut conn);

        let store = repo.get_by_id(4096).await.expect("Lookup should not error");
        assert!(store.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_unknown_returns_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Stores::new(&mut conn);

        let result = repo.update(4096, &write_request("Ghost")).await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_reports_whether_row_was_removed(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Stores::new(&mut conn);
        let store = repo.create(&write_request("Pawsome")).await.unwrap();

        assert!(repo.delete(store.id).await.unwrap());
        assert!(!repo.delete(store.id).await.unwrap());
        assert!(repo.get_by_id(store.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_returns_all_stores(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Stores::new(&mut conn);

        for i in 0..3 {
            repo.create(&write_request(&format!("Store {i}"))).await.unwrap();
        }

        let stores = repo.list().await.expect("Failed to list stores");
        assert_eq!(stores.len(), 3);
    }
}
