//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! All resource routes are rooted at `/store`:
//!
//! - **Stores** (`POST /store`, `PUT /store/{id}`, `GET /store`,
//!   `GET /store/{id}`, `DELETE /store/{id}`)
//! - **Employees** (`POST /store/{id}/employee`)
//! - **Customers** (`POST /store/{id}/customer`)
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is available at `/docs` when the server is running.

pub mod handlers;
pub mod models;
