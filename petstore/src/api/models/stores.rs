//! API request/response models for pet stores.

use crate::api::models::customers::CustomerData;
use crate::api::models::employees::EmployeeData;
use crate::db::models::customers::CustomerDBResponse;
use crate::db::models::employees::EmployeeDBResponse;
use crate::db::models::stores::StoreDBResponse;
use crate::types::StoreId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full pet store payload, used both as the save body and the response.
///
/// On a save, a null `id` creates a new store and a non-null `id` updates an
/// existing one; the nested sets in a save body are ignored, employees and
/// customers are managed through their own routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    /// Database-assigned identifier; null means "create new"
    pub id: Option<StoreId>,
    #[schema(example = "Pawsome")]
    pub name: Option<String>,
    #[schema(example = "123 Main St")]
    pub address: Option<String>,
    #[schema(example = "Springfield")]
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    /// Employees of this store (populated on responses)
    pub employees: Vec<EmployeeData>,
    /// Customers shopping at this store (populated on responses)
    pub customers: Vec<CustomerData>,
}

impl StoreData {
    /// Build the full projection from a store row and its association rows
    pub fn with_associations(
        store: StoreDBResponse,
        employees: Vec<EmployeeDBResponse>,
        customers: Vec<CustomerDBResponse>,
    ) -> Self {
        Self {
            id: Some(store.id),
            name: store.name,
            address: store.address,
            city: store.city,
            state: store.state,
            zip: store.zip,
            phone: store.phone,
            employees: employees.into_iter().map(EmployeeData::from).collect(),
            customers: customers.into_iter().map(CustomerData::from).collect(),
        }
    }
}

/// Flat store projection returned by the list endpoint. Deliberately has no
/// association fields, so summaries can never leak nested detail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: StoreId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

impl From<StoreDBResponse> for StoreSummary {
    fn from(db: StoreDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            address: db.address,
            city: db.city,
            state: db.state,
            zip: db.zip,
            phone: db.phone,
        }
    }
}
