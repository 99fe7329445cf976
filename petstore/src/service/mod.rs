//! Transactional orchestration between the API layer and the repositories.
//!
//! Each operation here owns one database transaction: it loads or creates
//! the entities involved, copies the flat fields from the wire payload,
//! wires associations on both sides, and commits. If any step fails the
//! transaction is dropped and rolled back, so no partial writes are ever
//! visible.
//!
//! Saves follow the find-or-create pattern: a payload without an id inserts
//! a fresh row; a payload with an id loads the existing row (failing with
//! [`Error::NotFound`] if it is gone) and overwrites its fields. Child
//! saves additionally check ownership: an existing employee must belong to
//! the store in the request path, and an existing customer must already be
//! linked to it ([`Error::InvalidAssociation`] otherwise).

use crate::api::models::customers::CustomerData;
use crate::api::models::employees::EmployeeData;
use crate::api::models::stores::{StoreData, StoreSummary};
use crate::config::DeleteBehavior;
use crate::db::handlers::{Customers, Employees, Repository, Stores};
use crate::db::models::customers::CustomerWriteDBRequest;
use crate::db::models::employees::EmployeeWriteDBRequest;
use crate::db::models::stores::{StoreDBResponse, StoreWriteDBRequest};
use crate::errors::{Error, Result};
use crate::types::StoreId;
use sqlx::{Acquire, PgPool, Postgres, Transaction};
use tracing::instrument;

fn store_not_found(id: StoreId) -> Error {
    Error::NotFound {
        resource: "Pet Store".to_string(),
        id,
    }
}

/// Load a store row, failing with the store-flavored NotFound
async fn require_store(tx: &mut Transaction<'_, Postgres>, store_id: StoreId) -> Result<StoreDBResponse> {
    let mut repo = Stores::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
    repo.get_by_id(store_id).await?.ok_or_else(|| store_not_found(store_id))
}

/// Build the full projection: the store row plus its employee and customer sets
async fn load_store_data(tx: &mut Transaction<'_, Postgres>, store: StoreDBResponse) -> Result<StoreData> {
    let employees = {
        let mut repo = Employees::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.list_for_store(store.id).await?
    };
    let customers = {
        let mut repo = Customers::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.list_for_store(store.id).await?
    };
    Ok(StoreData::with_associations(store, employees, customers))
}

/// Create or update a pet store and return the refreshed full projection.
#[instrument(skip(pool, data), fields(store_id = data.id), err)]
pub async fn save_store(pool: &PgPool, data: StoreData) -> Result<StoreData> {
    let mut tx = pool.begin().await.map_err(|e| Error::Database(e.into()))?;

    let request = StoreWriteDBRequest {
        name: data.name,
        address: data.address,
        city: data.city,
        state: data.state,
        zip: data.zip,
        phone: data.phone,
    };

    let store = {
        let mut repo = Stores::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        match data.id {
            None => repo.create(&request).await?,
            Some(id) => {
                repo.get_by_id(id).await?.ok_or_else(|| store_not_found(id))?;
                repo.update(id, &request).await?
            }
        }
    };

    let data = load_store_data(&mut tx, store).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok(data)
}

/// Create or update an employee of the given store.
///
/// The store must exist, and an existing employee must already belong to it.
#[instrument(skip(pool, data), fields(employee_id = data.id), err)]
pub async fn save_employee(pool: &PgPool, store_id: StoreId, data: EmployeeData) -> Result<EmployeeData> {
    let mut tx = pool.begin().await.map_err(|e| Error::Database(e.into()))?;

    require_store(&mut tx, store_id).await?;

    let request = EmployeeWriteDBRequest {
        store_id,
        first_name: data.first_name,
        last_name: data.last_name,
        phone: data.phone,
        job_title: data.job_title,
    };

    let employee = {
        let mut repo = Employees::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        match data.id {
            None => repo.create(&request).await?,
            Some(id) => {
                let existing = repo.get_by_id(id).await?.ok_or(Error::NotFound {
                    resource: "Employee".to_string(),
                    id,
                })?;
                if existing.store_id != store_id {
                    return Err(Error::InvalidAssociation {
                        message: format!("Employee with ID={id} does not belong to pet store with ID={store_id}"),
                    });
                }
                repo.update(id, &request).await?
            }
        }
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok(EmployeeData::from(employee))
}

/// Create or update a customer and link them to the given store.
///
/// The store must exist. An existing customer must already be linked to it;
/// a fresh customer is linked as part of the same transaction. The link is
/// written explicitly on the join table, which covers both sides of the
/// many-to-many association.
#[instrument(skip(pool, data), fields(customer_id = data.id), err)]
pub async fn save_customer(pool: &PgPool, store_id: StoreId, data: CustomerData) -> Result<CustomerData> {
    let mut tx = pool.begin().await.map_err(|e| Error::Database(e.into()))?;

    require_store(&mut tx, store_id).await?;

    let request = CustomerWriteDBRequest {
        first_name: data.first_name,
        last_name: data.last_name,
        email: data.email,
    };

    let customer = {
        let mut repo = Customers::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        let customer = match data.id {
            None => repo.create(&request).await?,
            Some(id) => {
                repo.get_by_id(id).await?.ok_or(Error::NotFound {
                    resource: "Customer".to_string(),
                    id,
                })?;
                if !repo.is_linked_to_store(id, store_id).await? {
                    return Err(Error::InvalidAssociation {
                        message: format!("Customer with ID={id} does not shop at pet store with ID={store_id}"),
                    });
                }
                repo.update(id, &request).await?
            }
        };
        repo.link_to_store(customer.id, store_id).await?;
        customer
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok(CustomerData::from(customer))
}

/// List all stores as flat summaries, never with nested detail.
#[instrument(skip(pool), err)]
pub async fn list_stores(pool: &PgPool) -> Result<Vec<StoreSummary>> {
    let mut tx = pool.begin().await.map_err(|e| Error::Database(e.into()))?;

    let stores = {
        let mut repo = Stores::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.list().await?
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok(stores.into_iter().map(StoreSummary::from).collect())
}

/// Fetch one store with its full nested employee and customer projections.
#[instrument(skip(pool), err)]
pub async fn get_store(pool: &PgPool, store_id: StoreId) -> Result<StoreData> {
    let mut tx = pool.begin().await.map_err(|e| Error::Database(e.into()))?;

    let store = require_store(&mut tx, store_id).await?;
    let data = load_store_data(&mut tx, store).await?;

    // Commit the transaction to ensure all reads were atomic
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok(data)
}

/// Delete a store.
///
/// The cascade policy is explicit, not schema-level: `Cascade` removes the
/// store's employees and its customer links (customers themselves survive)
/// in the same transaction, `Restrict` refuses while any dependent exists.
#[instrument(skip(pool), err)]
pub async fn delete_store(pool: &PgPool, store_id: StoreId, behavior: DeleteBehavior) -> Result<()> {
    let mut tx = pool.begin().await.map_err(|e| Error::Database(e.into()))?;

    require_store(&mut tx, store_id).await?;

    match behavior {
        DeleteBehavior::Cascade => {
            {
                let mut repo = Customers::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
                repo.unlink_all_for_store(store_id).await?;
            }
            {
                let mut repo = Employees::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
                repo.delete_for_store(store_id).await?;
            }
        }
        DeleteBehavior::Restrict => {
            let employees = {
                let mut repo = Employees::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
                repo.count_for_store(store_id).await?
            };
            let customers = {
                let mut repo = Customers::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
                repo.count_for_store(store_id).await?
            };
            if employees > 0 || customers > 0 {
                return Err(Error::Conflict {
                    message: format!(
                        "Pet Store with ID={store_id} still has {employees} employees and {customers} customer links"
                    ),
                });
            }
        }
    }

    {
        let mut repo = Stores::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.delete(store_id).await?;
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn store_data(name: &str) -> StoreData {
        StoreData {
            name: Some(name.to_string()),
            address: Some("123 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
            zip: Some("62704".to_string()),
            phone: Some("555-0100".to_string()),
            ..Default::default()
        }
    }

    fn employee_data(first_name: &str) -> EmployeeData {
        EmployeeData {
            first_name: Some(first_name.to_string()),
            last_name: Some("Smith".to_string()),
            job_title: Some("Groomer".to_string()),
            ..Default::default()
        }
    }

    fn customer_data(first_name: &str) -> CustomerData {
        CustomerData {
            first_name: Some(first_name.to_string()),
            last_name: Some("Jones".to_string()),
            email: Some(format!("{}@example.com", first_name.to_lowercase())),
            ..Default::default()
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_store_without_id_creates(pool: PgPool) {
        let saved = save_store(&pool, store_data("Pawsome")).await.expect("Failed to save store");

        assert!(saved.id.is_some());
        assert_eq!(saved.name.as_deref(), Some("Pawsome"));
        assert!(saved.employees.is_empty());
        assert!(saved.customers.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_store_with_id_updates(pool: PgPool) {
        let created = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let id = created.id.unwrap();

        let mut update = store_data("Pawsome II");
        update.id = Some(id);
        let updated = save_store(&pool, update).await.expect("Failed to update store");

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.name.as_deref(), Some("Pawsome II"));

        let reread = get_store(&pool, id).await.unwrap();
        assert_eq!(reread.name.as_deref(), Some("Pawsome II"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_store_with_unknown_id_is_not_found(pool: PgPool) {
        let mut data = store_data("Ghost");
        data.id = Some(4096);

        let result = save_store(&pool, data).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_store_unknown_is_not_found(pool: PgPool) {
        let result = get_store(&pool, 4096).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_store_unknown_is_not_found(pool: PgPool) {
        let result = delete_store(&pool, 4096, DeleteBehavior::Cascade).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_employee_requires_store(pool: PgPool) {
        let result = save_employee(&pool, 4096, employee_data("Al")).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_employee_sets_back_reference(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();

        let employee = save_employee(&pool, store_id, employee_data("Al"))
            .await
            .expect("Failed to save employee");

        assert!(employee.id.is_some());
        assert_eq!(employee.store_id, Some(store_id));
        assert_eq!(employee.first_name.as_deref(), Some("Al"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_employee_updates_in_place(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();
        let employee = save_employee(&pool, store_id, employee_data("Al")).await.unwrap();

        let mut update = employee_data("Alan");
        update.id = employee.id;
        update.job_title = Some("Manager".to_string());
        let updated = save_employee(&pool, store_id, update).await.expect("Failed to update employee");

        assert_eq!(updated.id, employee.id);
        assert_eq!(updated.first_name.as_deref(), Some("Alan"));
        assert_eq!(updated.job_title.as_deref(), Some("Manager"));

        // still exactly one employee at the store
        let full = get_store(&pool, store_id).await.unwrap();
        assert_eq!(full.employees.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_employee_of_other_store_is_rejected_without_mutation(pool: PgPool) {
        let first = save_store(&pool, store_data("First")).await.unwrap().id.unwrap();
        let second = save_store(&pool, store_data("Second")).await.unwrap().id.unwrap();
        let employee = save_employee(&pool, first, employee_data("Al")).await.unwrap();

        let mut stolen = employee_data("Mallory");
        stolen.id = employee.id;
        let result = save_employee(&pool, second, stolen).await;
        assert!(matches!(result, Err(Error::InvalidAssociation { .. })));

        // neither store's employee set changed
        let first_full = get_store(&pool, first).await.unwrap();
        assert_eq!(first_full.employees.len(), 1);
        assert_eq!(first_full.employees[0].first_name.as_deref(), Some("Al"));
        let second_full = get_store(&pool, second).await.unwrap();
        assert!(second_full.employees.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_employee_with_unknown_id_is_not_found(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();

        let mut data = employee_data("Ghost");
        data.id = Some(4096);
        let result = save_employee(&pool, store.id.unwrap(), data).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_customer_links_new_customer(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();

        let customer = save_customer(&pool, store_id, customer_data("Dot"))
            .await
            .expect("Failed to save customer");

        assert!(customer.id.is_some());
        let full = get_store(&pool, store_id).await.unwrap();
        assert_eq!(full.customers.len(), 1);
        assert_eq!(full.customers[0].id, customer.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_customer_not_shopping_at_store_is_rejected(pool: PgPool) {
        let first = save_store(&pool, store_data("First")).await.unwrap().id.unwrap();
        let second = save_store(&pool, store_data("Second")).await.unwrap().id.unwrap();
        let customer = save_customer(&pool, first, customer_data("Dot")).await.unwrap();

        let mut update = customer_data("Dot");
        update.id = customer.id;
        let result = save_customer(&pool, second, update).await;
        assert!(matches!(result, Err(Error::InvalidAssociation { .. })));

        let second_full = get_store(&pool, second).await.unwrap();
        assert!(second_full.customers.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_customer_updates_already_linked_customer(pool: PgPool) {
        use crate::test_utils::{create_test_customer, create_test_store, link_test_customer};

        let store = create_test_store(&pool, "Pawsome").await;
        let customer = create_test_customer(&pool, "Dot").await;
        link_test_customer(&pool, customer.id, store.id).await;

        let mut update = customer_data("Dorothy");
        update.id = Some(customer.id);
        let updated = save_customer(&pool, store.id, update).await.expect("Failed to update customer");

        assert_eq!(updated.id, Some(customer.id));
        assert_eq!(updated.first_name.as_deref(), Some("Dorothy"));

        let full = get_store(&pool, store.id).await.unwrap();
        assert_eq!(full.customers.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_save_customer_twice_collapses_association(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();
        let customer = save_customer(&pool, store_id, customer_data("Dot")).await.unwrap();

        let mut again = customer_data("Dot");
        again.id = customer.id;
        save_customer(&pool, store_id, again).await.expect("Resaving should succeed");

        let full = get_store(&pool, store_id).await.unwrap();
        assert_eq!(full.customers.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_stores_returns_flat_summaries(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();
        save_employee(&pool, store_id, employee_data("Al")).await.unwrap();
        save_customer(&pool, store_id, customer_data("Dot")).await.unwrap();
        save_store(&pool, store_data("Second")).await.unwrap();

        let summaries = list_stores(&pool).await.expect("Failed to list stores");
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, store_id);
        assert_eq!(summaries[0].name.as_deref(), Some("Pawsome"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_round_trip_store_with_members(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();
        let employee = save_employee(&pool, store_id, employee_data("Al")).await.unwrap();
        let customer = save_customer(&pool, store_id, customer_data("Dot")).await.unwrap();

        let full = get_store(&pool, store_id).await.unwrap();
        assert_eq!(full.id, Some(store_id));
        assert_eq!(full.employees.len(), 1);
        assert_eq!(full.employees[0].id, employee.id);
        assert_eq!(full.customers.len(), 1);
        assert_eq!(full.customers[0].id, customer.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_store_cascade_removes_dependents_keeps_customers(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();
        save_employee(&pool, store_id, employee_data("Al")).await.unwrap();
        let customer = save_customer(&pool, store_id, customer_data("Dot")).await.unwrap();

        delete_store(&pool, store_id, DeleteBehavior::Cascade)
            .await
            .expect("Failed to delete store");

        let result = get_store(&pool, store_id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        // the customer row survives the store
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Customers::new(&mut conn);
        assert!(repo.get_by_id(customer.id.unwrap()).await.unwrap().is_some());
        assert!(repo.store_ids_for_customer(customer.id.unwrap()).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_store_restrict_refuses_with_dependents(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();
        save_employee(&pool, store_id, employee_data("Al")).await.unwrap();

        let result = delete_store(&pool, store_id, DeleteBehavior::Restrict).await;
        assert!(matches!(result, Err(Error::Conflict { .. })));

        // nothing was deleted
        let full = get_store(&pool, store_id).await.unwrap();
        assert_eq!(full.employees.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_store_restrict_allows_empty_store(pool: PgPool) {
        let store = save_store(&pool, store_data("Pawsome")).await.unwrap();
        let store_id = store.id.unwrap();

        delete_store(&pool, store_id, DeleteBehavior::Restrict)
            .await
            .expect("Deleting an empty store should succeed");

        let result = get_store(&pool, store_id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
