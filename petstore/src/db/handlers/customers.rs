//! Database repository for customers and their store links.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::customers::{CustomerDBResponse, CustomerWriteDBRequest},
};
use crate::types::{CustomerId, StoreId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Customer {
    pub id: CustomerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDBResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

pub struct Customers<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Customers<'c> {
    type WriteRequest = CustomerWriteDBRequest;
    type Response = CustomerDBResponse;
    type Id = CustomerId;

    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &Self::WriteRequest) -> Result<Self::Response> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(CustomerDBResponse::from(customer))
    }

    #[instrument(skip(self), fields(customer_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(customer.map(CustomerDBResponse::from))
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(customers.into_iter().map(CustomerDBResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(customer_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::WriteRequest) -> Result<Self::Response> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                first_name = $2,
                last_name = $3,
                email = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(CustomerDBResponse::from(customer))
    }

    #[instrument(skip(self), fields(customer_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Customers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Link a customer to a store. Idempotent: the join table's composite
    /// key gives the association set semantics.
    #[instrument(skip(self), err)]
    pub async fn link_to_store(&mut self, customer_id: CustomerId, store_id: StoreId) -> Result<()> {
        match sqlx::query("INSERT INTO store_customers (store_id, customer_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(store_id)
            .bind(customer_id)
            .execute(&mut *self.db)
            .await
        {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                // Foreign key violation means either customer or store doesn't exist
                Err(DbError::NotFound)
            }
            Err(e) => Err(DbError::from(e)),
        }
    }

    #[instrument(skip(self), err)]
    pub async fn is_linked_to_store(&mut self, customer_id: CustomerId, store_id: StoreId) -> Result<bool> {
        let linked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM store_customers WHERE customer_id = $1 AND store_id = $2)",
        )
        .bind(customer_id)
        .bind(store_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(linked)
    }

    #[instrument(skip(self), err)]
    pub async fn list_for_store(&mut self, store_id: StoreId) -> Result<Vec<CustomerDBResponse>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT c.* FROM customers c
            INNER JOIN store_customers sc ON c.id = sc.customer_id
            WHERE sc.store_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(store_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(customers.into_iter().map(CustomerDBResponse::from).collect())
    }

    #[instrument(skip(self), err)]
    pub async fn store_ids_for_customer(&mut self, customer_id: CustomerId) -> Result<Vec<StoreId>> {
        let store_ids =
            sqlx::query_scalar::<_, StoreId>("SELECT store_id FROM store_customers WHERE customer_id = $1 ORDER BY store_id")
                .bind(customer_id)
                .fetch_all(&mut *self.db)
                .await?;

        Ok(store_ids)
    }

    #[instrument(skip(self), err)]
    pub async fn count_for_store(&mut self, store_id: StoreId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM store_customers WHERE store_id = $1")
            .bind(store_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    /// Remove every customer link for the store; the customers themselves
    /// are kept.
    #[instrument(skip(self), err)]
    pub async fn unlink_all_for_store(&mut self, store_id: StoreId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM store_customers WHERE store_id = $1")
            .bind(store_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
