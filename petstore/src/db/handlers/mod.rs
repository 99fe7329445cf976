//! Repository implementations for database access.
//!
//! This module provides repository structs for each entity in the system.
//! Repositories follow a consistent pattern and implement the [`Repository`]
//! trait.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns models from [`crate::db::models`]
//! - Uses the connection's transaction for ACID guarantees
//!
//! # Available Repositories
//!
//! - [`Stores`]: pet store rows
//! - [`Employees`]: employee rows, scoped to their owning store
//! - [`Customers`]: customer rows and the store-customer join table
//!
//! Association queries (employees of a store, customers of a store, link
//! bookkeeping) live on the owning repository as inherent methods.

pub mod customers;
pub mod employees;
pub mod repository;
pub mod stores;

pub use customers::Customers;
pub use employees::Employees;
pub use repository::Repository;
pub use stores::Stores;
