use crate::types::CustomerId;
use chrono::{DateTime, Utc};

/// Database request for writing a customer's flat fields. Store links live
/// in the `store_customers` join table, not on the row.
#[derive(Debug, Clone, Default)]
pub struct CustomerWriteDBRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Database response for a customer row
#[derive(Debug, Clone)]
pub struct CustomerDBResponse {
    pub id: CustomerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
