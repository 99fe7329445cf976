//! API request/response models for pet store employees.

use crate::db::models::employees::EmployeeDBResponse;
use crate::types::{EmployeeId, StoreId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee payload, used both as the save body and the response.
///
/// On a save, a null `id` creates a new employee and a non-null `id` updates
/// an existing one; `storeId` in the body is ignored, the back-link always
/// comes from the request path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeData {
    /// Database-assigned identifier; null means "create new"
    pub id: Option<EmployeeId>,
    /// Owning pet store (populated on responses)
    pub store_id: Option<StoreId>,
    #[schema(example = "Al")]
    pub first_name: Option<String>,
    #[schema(example = "Smith")]
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "Groomer")]
    pub job_title: Option<String>,
}

impl From<EmployeeDBResponse> for EmployeeData {
    fn from(db: EmployeeDBResponse) -> Self {
        Self {
            id: Some(db.id),
            store_id: Some(db.store_id),
            first_name: db.first_name,
            last_name: db.last_name,
            phone: db.phone,
            job_title: db.job_title,
        }
    }
}
