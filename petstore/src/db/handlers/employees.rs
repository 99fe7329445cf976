//! Database repository for pet store employees.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::employees::{EmployeeDBResponse, EmployeeWriteDBRequest},
};
use crate::types::{EmployeeId, StoreId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Employee {
    pub id: EmployeeId,
    pub store_id: StoreId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeDBResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            store_id: employee.store_id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            phone: employee.phone,
            job_title: employee.job_title,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

pub struct Employees<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Employees<'c> {
    type WriteRequest = EmployeeWriteDBRequest;
    type Response = EmployeeDBResponse;
    type Id = EmployeeId;

    #[instrument(skip(self, request), fields(store_id = request.store_id), err)]
    async fn create(&mut self, request: &Self::WriteRequest) -> Result<Self::Response> {
        match sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (store_id, first_name, last_name, phone, job_title)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.store_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(&request.job_title)
        .fetch_one(&mut *self.db)
        .await
        {
            Ok(employee) => Ok(EmployeeDBResponse::from(employee)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                // Foreign key violation means the owning store doesn't exist
                Err(DbError::NotFound)
            }
            Err(e) => Err(DbError::from(e)),
        }
    }

    #[instrument(skip(self), fields(employee_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(employee.map(EmployeeDBResponse::from))
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(employees.into_iter().map(EmployeeDBResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(employee_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::WriteRequest) -> Result<Self::Response> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                store_id = $2,
                first_name = $3,
                last_name = $4,
                phone = $5,
                job_title = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.store_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(&request.job_title)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(EmployeeDBResponse::from(employee))
    }

    #[instrument(skip(self), fields(employee_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Employees<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn list_for_store(&mut self, store_id: StoreId) -> Result<Vec<EmployeeDBResponse>> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE store_id = $1 ORDER BY id")
            .bind(store_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(employees.into_iter().map(EmployeeDBResponse::from).collect())
    }

    #[instrument(skip(self), err)]
    pub async fn count_for_store(&mut self, store_id: StoreId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE store_id = $1")
            .bind(store_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_for_store(&mut self, store_id: StoreId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE store_id = $1")
            .bind(store_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
