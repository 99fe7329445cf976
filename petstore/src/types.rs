//! Common type definitions.
//!
//! Entity ids are database-assigned `BIGINT` identity columns, wrapped in
//! type aliases so signatures say which entity they refer to:
//!
//! - [`StoreId`]: pet store identifier
//! - [`EmployeeId`]: employee identifier
//! - [`CustomerId`]: customer identifier

// Type aliases for IDs
pub type StoreId = i64;
pub type EmployeeId = i64;
pub type CustomerId = i64;
