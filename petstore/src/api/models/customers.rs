//! API request/response models for customers.

use crate::db::models::customers::CustomerDBResponse;
use crate::types::CustomerId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer payload, used both as the save body and the response.
///
/// On a save, a null `id` creates a new customer and links it to the path's
/// store; a non-null `id` updates an existing customer, which must already
/// shop at that store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerData {
    /// Database-assigned identifier; null means "create new"
    pub id: Option<CustomerId>,
    #[schema(example = "Dot")]
    pub first_name: Option<String>,
    #[schema(example = "Jones")]
    pub last_name: Option<String>,
    #[schema(example = "dot@example.com")]
    pub email: Option<String>,
}

impl From<CustomerDBResponse> for CustomerData {
    fn from(db: CustomerDBResponse) -> Self {
        Self {
            id: Some(db.id),
            first_name: db.first_name,
            last_name: db.last_name,
            email: db.email,
        }
    }
}
