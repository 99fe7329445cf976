use crate::types::StoreId;
use chrono::{DateTime, Utc};

/// Database request for writing a pet store's flat fields.
///
/// Serves both create and update: a save is a whole-row field copy, so a
/// `None` on update clears the column rather than keeping the old value.
#[derive(Debug, Clone, Default)]
pub struct StoreWriteDBRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// Database response for a pet store row
#[derive(Debug, Clone)]
pub struct StoreDBResponse {
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
