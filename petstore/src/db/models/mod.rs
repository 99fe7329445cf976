//! Database record models matching table schemas.
//!
//! This module contains struct definitions that directly correspond to
//! database table rows. These models are used by repositories to return
//! query results and accept insertion/update data.
//!
//! # Design Principles
//!
//! - **Schema Mapping**: Each model struct matches a database table schema
//! - **Separation**: Database models are distinct from API models to allow
//!   independent evolution of storage and API representations
//!
//! All saves in this service are whole-row field copies, so each entity has
//! a single `*WriteDBRequest` that serves both create and update, plus a
//! `*DBResponse` returned by queries. Database models convert to API models
//! via `From` impls in [`crate::api::models`].

pub mod customers;
pub mod employees;
pub mod stores;
