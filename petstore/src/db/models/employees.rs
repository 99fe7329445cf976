use crate::types::{EmployeeId, StoreId};
use chrono::{DateTime, Utc};

/// Database request for writing an employee.
///
/// `store_id` is the owning store's back-reference; it is always set from
/// the request path, never from the body.
#[derive(Debug, Clone)]
pub struct EmployeeWriteDBRequest {
    pub store_id: StoreId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
}

/// Database response for an employee row
#[derive(Debug, Clone)]
pub struct EmployeeDBResponse {
    pub id: EmployeeId,
    pub store_id: StoreId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
