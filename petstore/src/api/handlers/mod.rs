//! HTTP request handlers for all API endpoints.
//!
//! This module contains Axum route handlers organized by resource type.
//! Each handler is responsible for:
//! - Request deserialization and path validation
//! - Business logic execution via the [`crate::service`] layer
//! - Response status codes and serialization
//!
//! # Handler Modules
//!
//! - [`stores`]: pet store CRUD (create, update, list, get, delete)
//! - [`employees`]: employee save under a store path
//! - [`customers`]: customer save and store linking under a store path
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which automatically converts to
//! appropriate HTTP status codes and `{"message": ...}` JSON bodies.

pub mod customers;
pub mod employees;
pub mod stores;
